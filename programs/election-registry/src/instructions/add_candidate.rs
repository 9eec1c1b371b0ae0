use anchor_lang::prelude::*;
use crate::contexts::AddCandidate;

pub fn handler(
    ctx: Context<AddCandidate>,
    position: u8,
    name: String,
    candidate: Pubkey,
) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let added = ctx
        .accounts
        .election
        .add_candidate(caller, position, name, candidate)?;

    msg!("✅ Candidate added to position {}", added.position);
    msg!("   Name: {}", added.name);
    msg!("   Identity: {}", added.candidate);

    emit!(added);
    Ok(())
}

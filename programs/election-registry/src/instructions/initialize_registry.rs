use anchor_lang::prelude::*;
use crate::{contexts::InitializeRegistry, events::RegistryInitialized, state::Registry};

pub fn handler(ctx: Context<InitializeRegistry>, treasury: Pubkey, creation_fee: u64) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    ctx.accounts
        .registry
        .set_inner(Registry::new(owner, treasury, creation_fee, ctx.bumps.registry)?);

    emit!(RegistryInitialized {
        owner,
        treasury,
        creation_fee,
    });

    msg!("✅ Election registry initialized!");
    msg!("   Owner: {}", owner);
    msg!("   Treasury: {}", treasury);
    msg!("   Creation fee: {} lamports", creation_fee);

    Ok(())
}

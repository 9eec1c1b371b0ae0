use anchor_lang::prelude::*;
use crate::contexts::UpdateRegistry;

pub fn set_creation_fee(ctx: Context<UpdateRegistry>, new_fee: u64) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let updated = ctx.accounts.registry.set_creation_fee(caller, new_fee)?;

    msg!("Creation fee: {} → {} lamports", updated.old_fee, updated.new_fee);
    emit!(updated);
    Ok(())
}

pub fn set_treasury(ctx: Context<UpdateRegistry>, new_treasury: Pubkey) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let updated = ctx.accounts.registry.set_treasury(caller, new_treasury)?;

    msg!("Treasury: {} → {}", updated.old_treasury, updated.new_treasury);
    emit!(updated);
    Ok(())
}

pub fn transfer_ownership(ctx: Context<UpdateRegistry>, new_owner: Pubkey) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let transferred = ctx.accounts.registry.transfer_ownership(caller, new_owner)?;

    msg!(
        "Registry ownership: {} → {}",
        transferred.previous_owner,
        transferred.new_owner
    );
    emit!(transferred);
    Ok(())
}

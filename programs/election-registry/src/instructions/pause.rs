use anchor_lang::prelude::*;
use crate::contexts::ManageElection;

/// Pausing does not extend the voting window.
pub fn pause(ctx: Context<ManageElection>) -> Result<()> {
    let clock = Clock::get()?;
    let caller = ctx.accounts.owner.key();
    let paused = ctx.accounts.election.pause(caller, clock.unix_timestamp)?;

    msg!("⏸️ Election #{} paused", paused.election_id);
    emit!(paused);
    Ok(())
}

pub fn resume(ctx: Context<ManageElection>) -> Result<()> {
    let clock = Clock::get()?;
    let caller = ctx.accounts.owner.key();
    let resumed = ctx.accounts.election.resume(caller, clock.unix_timestamp)?;

    msg!(
        "▶️ Election #{} resumed, voting closes at {}",
        resumed.election_id,
        ctx.accounts.election.end_time
    );
    emit!(resumed);
    Ok(())
}

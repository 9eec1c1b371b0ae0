use anchor_lang::prelude::*;
use crate::contexts::ManageElection;

pub fn handler(ctx: Context<ManageElection>, duration: u64) -> Result<()> {
    let clock = Clock::get()?;
    let caller = ctx.accounts.owner.key();
    let started = ctx
        .accounts
        .election
        .start(caller, duration, clock.unix_timestamp)?;

    msg!(
        "🗳️ Election #{} open: {} → {}",
        started.election_id,
        started.start_time,
        started.end_time
    );

    emit!(started);
    Ok(())
}

use anchor_lang::prelude::*;
use crate::contexts::ManageElection;

pub fn handler(ctx: Context<ManageElection>) -> Result<()> {
    let clock = Clock::get()?;
    let caller = ctx.accounts.owner.key();
    let finalization = ctx
        .accounts
        .election
        .finalize(caller, clock.unix_timestamp)?;

    for winner in finalization.winners {
        msg!(
            "🏆 Position {}: {} ({} votes)",
            winner.position,
            winner.name,
            winner.votes
        );
        emit!(winner);
    }

    msg!(
        "✅ Election #{} finalized with {} votes cast",
        finalization.finalized.election_id,
        finalization.finalized.total_votes
    );
    emit!(finalization.finalized);

    Ok(())
}

use anchor_lang::prelude::*;
use crate::contexts::CastVote;

pub fn handler(ctx: Context<CastVote>, ballot: Vec<u8>) -> Result<()> {
    let clock = Clock::get()?;
    let voter = ctx.accounts.voter.key();
    let accounts = ctx.accounts;
    let cast = accounts.election.vote(
        voter,
        accounts.voter_record.as_deref_mut(),
        ballot,
        clock.unix_timestamp,
    )?;

    msg!(
        "✅ Ballot recorded for {} (votes cast: {})",
        voter,
        cast.total_votes
    );

    emit!(cast);
    Ok(())
}

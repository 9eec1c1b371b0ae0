use anchor_lang::prelude::*;
use crate::{
    contexts::{
        ReadBallot, ReadElection, ReadElectionWindow, ReadIndexPage, ReadOrganizer,
        ReadOrganizerIndex, ReadRegistry, ReadVoter,
    },
    lifecycle,
    registry::{read_window, window},
    state::{Candidate, ElectionInfo, ElectionStats, PositionSummary, VoterStatus},
};

// ============================================================================
// REGISTRY
// ============================================================================

/// Elections stored on global index page `page`; empty past the last page.
pub fn get_all_elections(ctx: Context<ReadIndexPage>, _page: u64) -> Result<Vec<Pubkey>> {
    Ok(ctx
        .accounts
        .index_page
        .as_ref()
        .map(|page| page.elections.clone())
        .unwrap_or_default())
}

pub fn get_election_count(ctx: Context<ReadRegistry>) -> Result<u64> {
    Ok(ctx.accounts.registry.election_count)
}

pub fn get_elections_paginated(
    ctx: Context<ReadElectionWindow>,
    offset: u64,
    limit: u64,
) -> Result<Vec<Pubkey>> {
    let accounts = ctx.accounts;
    let (start, end) = window(accounts.registry.election_count, offset, limit);
    read_window(
        [accounts.first_page.as_deref(), accounts.second_page.as_deref()],
        start,
        end,
    )
}

pub fn get_organizer_election_count(
    ctx: Context<ReadOrganizerIndex>,
    organizer: Pubkey,
) -> Result<u64> {
    Ok(ctx
        .accounts
        .organizer_index
        .as_ref()
        .filter(|index| index.organizer == organizer)
        .map(|index| index.election_count)
        .unwrap_or_default())
}

/// Empty when the organizer has never created an election.
pub fn get_elections_by_organizer(
    ctx: Context<ReadOrganizer>,
    organizer: Pubkey,
    offset: u64,
    limit: u64,
) -> Result<Vec<Pubkey>> {
    let accounts = ctx.accounts;
    let Some(index) = accounts
        .organizer_index
        .as_ref()
        .filter(|index| index.organizer == organizer)
    else {
        return Ok(Vec::new());
    };

    let (start, end) = window(index.election_count, offset, limit);
    read_window(
        [accounts.first_page.as_deref(), accounts.second_page.as_deref()],
        start,
        end,
    )
}

// ============================================================================
// ELECTION
// ============================================================================

pub fn get_positions(ctx: Context<ReadElection>) -> Result<Vec<PositionSummary>> {
    Ok(ctx.accounts.election.position_summaries())
}

pub fn get_candidates(ctx: Context<ReadElection>, position: u8) -> Result<Vec<Candidate>> {
    ctx.accounts.election.candidates(position)
}

pub fn get_ballot(ctx: Context<ReadBallot>, voter: Pubkey) -> Result<Vec<u8>> {
    let caller = ctx.accounts.caller.key();
    ctx.accounts
        .election
        .ballot_of(caller, voter, ctx.accounts.voter_record.as_deref())
}

pub fn get_election_stats(ctx: Context<ReadElection>) -> Result<ElectionStats> {
    Ok(ctx.accounts.election.stats())
}

pub fn get_election_info(ctx: Context<ReadElection>) -> Result<ElectionInfo> {
    Ok(ctx.accounts.election.info())
}

pub fn get_voter_status(ctx: Context<ReadVoter>, _voter: Pubkey) -> Result<VoterStatus> {
    Ok(lifecycle::voter_status(ctx.accounts.voter_record.as_deref()))
}

pub fn get_winners(ctx: Context<ReadElection>, position: u8) -> Result<Vec<u8>> {
    ctx.accounts.election.winners(position)
}

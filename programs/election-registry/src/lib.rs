// Stops Rust Analyzer complaining about missing configs
#![allow(unexpected_cfgs)]
// Silences the realloc deprecation warning from the `AddCandidate` constraint
#![allow(deprecated)]

pub mod constants;
pub mod contexts;
pub mod error;
pub mod events;
pub mod guard;
pub mod instructions;
pub mod lifecycle;
pub mod registry;
pub mod state;
pub mod transfer;

use anchor_lang::prelude::*;

pub use contexts::*;
pub use error::*;
pub use events::*;
pub use state::*;

declare_id!("2b2EqLu2aj7Zqy1FimpYYsfQDqK4P4mXueebkSQxi7n6");

/// Election Registry: fee-gated factory for multi-position elections
///
/// - The registry creates elections, forwards a creation fee to the
///   treasury and refunds any overpayment
/// - Each election runs Draft → Active → Ended under its organizer
/// - Whitelisted voters cast one ballot covering every position
/// - Finalization declares every top-tally candidate per position
#[program]
pub mod election_registry {
    use super::*;

    // ========================================================================
    // Registry
    // ========================================================================

    /// Create the registry (caller becomes owner)
    pub fn initialize_registry(
        ctx: Context<InitializeRegistry>,
        treasury: Pubkey,
        creation_fee: u64,
    ) -> Result<()> {
        instructions::initialize_registry::handler(ctx, treasury, creation_fee)
    }

    /// Create a new election, paying at least the current creation fee
    pub fn create_election(
        ctx: Context<CreateElection>,
        title: String,
        positions: Vec<String>,
        payment: u64,
    ) -> Result<()> {
        instructions::create_election::handler(ctx, title, positions, payment)
    }

    /// Change the creation fee (owner-only)
    pub fn set_creation_fee(ctx: Context<UpdateRegistry>, new_fee: u64) -> Result<()> {
        instructions::configure_registry::set_creation_fee(ctx, new_fee)
    }

    /// Change the fee recipient (owner-only)
    pub fn set_treasury(ctx: Context<UpdateRegistry>, new_treasury: Pubkey) -> Result<()> {
        instructions::configure_registry::set_treasury(ctx, new_treasury)
    }

    /// Hand the registry to a new owner (owner-only)
    pub fn transfer_registry_ownership(
        ctx: Context<UpdateRegistry>,
        new_owner: Pubkey,
    ) -> Result<()> {
        instructions::configure_registry::transfer_ownership(ctx, new_owner)
    }

    /// Elections stored on one global index page (31 per page)
    pub fn get_all_elections(ctx: Context<ReadIndexPage>, page: u64) -> Result<Vec<Pubkey>> {
        instructions::queries::get_all_elections(ctx, page)
    }

    pub fn get_election_count(ctx: Context<ReadRegistry>) -> Result<u64> {
        instructions::queries::get_election_count(ctx)
    }

    pub fn get_organizer_election_count(
        ctx: Context<ReadOrganizerIndex>,
        organizer: Pubkey,
    ) -> Result<u64> {
        instructions::queries::get_organizer_election_count(ctx, organizer)
    }

    /// At most `MAX_PAGE_SIZE` of the organizer's elections from `offset`
    pub fn get_elections_by_organizer(
        ctx: Context<ReadOrganizer>,
        organizer: Pubkey,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Pubkey>> {
        instructions::queries::get_elections_by_organizer(ctx, organizer, offset, limit)
    }

    /// At most `MAX_PAGE_SIZE` elections from `offset`
    pub fn get_elections_paginated(
        ctx: Context<ReadElectionWindow>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Pubkey>> {
        instructions::queries::get_elections_paginated(ctx, offset, limit)
    }

    // ========================================================================
    // Election
    // ========================================================================

    /// Register a candidate for one position (owner-only, Draft)
    pub fn add_candidate(
        ctx: Context<AddCandidate>,
        position: u8,
        name: String,
        candidate: Pubkey,
    ) -> Result<()> {
        instructions::add_candidate::handler(ctx, position, name, candidate)
    }

    /// Whitelist a batch of voters (owner-only, Draft)
    pub fn whitelist_voters<'info>(
        ctx: Context<'_, '_, 'info, 'info, WhitelistVoters<'info>>,
        identities: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::whitelist_voters::handler(ctx, identities)
    }

    /// Open voting for `duration` seconds (owner-only)
    pub fn start_election(ctx: Context<ManageElection>, duration: u64) -> Result<()> {
        instructions::start_election::handler(ctx, duration)
    }

    /// Cast one ballot: a candidate index for every position
    pub fn vote(ctx: Context<CastVote>, ballot: Vec<u8>) -> Result<()> {
        instructions::vote::handler(ctx, ballot)
    }

    pub fn pause(ctx: Context<ManageElection>) -> Result<()> {
        instructions::pause::pause(ctx)
    }

    pub fn resume(ctx: Context<ManageElection>) -> Result<()> {
        instructions::pause::resume(ctx)
    }

    /// Close voting and declare winners (owner-only, after end time)
    pub fn finalize_election(ctx: Context<ManageElection>) -> Result<()> {
        instructions::finalize_election::handler(ctx)
    }

    pub fn get_positions(ctx: Context<ReadElection>) -> Result<Vec<PositionSummary>> {
        instructions::queries::get_positions(ctx)
    }

    pub fn get_candidates(ctx: Context<ReadElection>, position: u8) -> Result<Vec<Candidate>> {
        instructions::queries::get_candidates(ctx, position)
    }

    /// Stored ballot of `voter`; only the voter or the owner may read it
    pub fn get_ballot(ctx: Context<ReadBallot>, voter: Pubkey) -> Result<Vec<u8>> {
        instructions::queries::get_ballot(ctx, voter)
    }

    pub fn get_election_stats(ctx: Context<ReadElection>) -> Result<ElectionStats> {
        instructions::queries::get_election_stats(ctx)
    }

    pub fn get_election_info(ctx: Context<ReadElection>) -> Result<ElectionInfo> {
        instructions::queries::get_election_info(ctx)
    }

    pub fn get_voter_status(ctx: Context<ReadVoter>, voter: Pubkey) -> Result<VoterStatus> {
        instructions::queries::get_voter_status(ctx, voter)
    }

    /// Winning candidate indices for one position (Ended only)
    pub fn get_winners(ctx: Context<ReadElection>, position: u8) -> Result<Vec<u8>> {
        instructions::queries::get_winners(ctx, position)
    }
}

use anchor_lang::prelude::*;
use crate::{constants::*, error::ElectionError, state::*};

// ============================================================================
// REGISTRY
// ============================================================================

/// Create the singleton registry
#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    /// Becomes the registry owner
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = 8 + Registry::INIT_SPACE,
        seeds = [REGISTRY_SEED],
        bump
    )]
    pub registry: Account<'info, Registry>,

    pub system_program: Program<'info, System>,
}

/// Owner-only registry configuration (fee, treasury, ownership)
#[derive(Accounts)]
pub struct UpdateRegistry<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump
    )]
    pub registry: Account<'info, Registry>,
}

/// Create a new election through the registry
#[derive(Accounts)]
#[instruction(title: String, positions: Vec<String>)]
pub struct CreateElection<'info> {
    /// Organizer paying the fee; becomes the election owner
    #[account(mut)]
    pub organizer: Signer<'info>,

    /// Registry - also escrows the payment for the duration of the call
    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump
    )]
    pub registry: Account<'info, Registry>,

    /// CHECK: only receives lamports; pinned to the configured treasury
    #[account(
        mut,
        address = registry.treasury @ ElectionError::InvalidTreasury
    )]
    pub treasury: UncheckedAccount<'info>,

    #[account(
        init,
        payer = organizer,
        space = Election::space(&title, &positions),
        seeds = [ELECTION_SEED, registry.election_count.to_le_bytes().as_ref()],
        bump
    )]
    pub election: Account<'info, Election>,

    #[account(
        init,
        payer = organizer,
        space = 8 + ElectionRecord::INIT_SPACE,
        seeds = [RECORD_SEED, election.key().as_ref()],
        bump
    )]
    pub record: Account<'info, ElectionRecord>,

    /// Global index page receiving this election
    #[account(
        init_if_needed,
        payer = organizer,
        space = 8 + IndexPage::INIT_SPACE,
        seeds = [
            INDEX_SEED,
            IndexPage::page_of(registry.election_count).to_le_bytes().as_ref()
        ],
        bump
    )]
    pub index_page: Account<'info, IndexPage>,

    #[account(
        init_if_needed,
        payer = organizer,
        space = 8 + OrganizerIndex::INIT_SPACE,
        seeds = [ORGANIZER_SEED, organizer.key().as_ref()],
        bump
    )]
    pub organizer_index: Account<'info, OrganizerIndex>,

    /// Organizer index page receiving this election
    #[account(
        init_if_needed,
        payer = organizer,
        space = 8 + IndexPage::INIT_SPACE,
        seeds = [
            ORGANIZER_PAGE_SEED,
            organizer.key().as_ref(),
            IndexPage::page_of(organizer_index.election_count).to_le_bytes().as_ref()
        ],
        bump
    )]
    pub organizer_page: Account<'info, IndexPage>,

    pub system_program: Program<'info, System>,
}

/// Read-only access to the registry
#[derive(Accounts)]
pub struct ReadRegistry<'info> {
    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry.bump
    )]
    pub registry: Account<'info, Registry>,
}

/// One global index page; absent for pages not yet written
#[derive(Accounts)]
#[instruction(page: u64)]
pub struct ReadIndexPage<'info> {
    #[account(
        seeds = [INDEX_SEED, page.to_le_bytes().as_ref()],
        bump
    )]
    pub index_page: Option<Account<'info, IndexPage>>,
}

/// The two global index pages covering a window starting at `offset`
#[derive(Accounts)]
#[instruction(offset: u64)]
pub struct ReadElectionWindow<'info> {
    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry.bump
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        seeds = [INDEX_SEED, IndexPage::page_of(offset).to_le_bytes().as_ref()],
        bump
    )]
    pub first_page: Option<Account<'info, IndexPage>>,

    #[account(
        seeds = [INDEX_SEED, (IndexPage::page_of(offset) + 1).to_le_bytes().as_ref()],
        bump
    )]
    pub second_page: Option<Account<'info, IndexPage>>,
}

/// One organizer's index; absent until their first election
#[derive(Accounts)]
#[instruction(organizer: Pubkey)]
pub struct ReadOrganizerIndex<'info> {
    #[account(
        seeds = [ORGANIZER_SEED, organizer.as_ref()],
        bump
    )]
    pub organizer_index: Option<Account<'info, OrganizerIndex>>,
}

/// One organizer's index and the two pages covering a window at `offset`
#[derive(Accounts)]
#[instruction(organizer: Pubkey, offset: u64)]
pub struct ReadOrganizer<'info> {
    #[account(
        seeds = [ORGANIZER_SEED, organizer.as_ref()],
        bump
    )]
    pub organizer_index: Option<Account<'info, OrganizerIndex>>,

    #[account(
        seeds = [
            ORGANIZER_PAGE_SEED,
            organizer.as_ref(),
            IndexPage::page_of(offset).to_le_bytes().as_ref()
        ],
        bump
    )]
    pub first_page: Option<Account<'info, IndexPage>>,

    #[account(
        seeds = [
            ORGANIZER_PAGE_SEED,
            organizer.as_ref(),
            (IndexPage::page_of(offset) + 1).to_le_bytes().as_ref()
        ],
        bump
    )]
    pub second_page: Option<Account<'info, IndexPage>>,
}

// ============================================================================
// ELECTION
// ============================================================================

/// Owner-only lifecycle changes that never grow the account
#[derive(Accounts)]
pub struct ManageElection<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [ELECTION_SEED, election.id.to_le_bytes().as_ref()],
        bump = election.bump
    )]
    pub election: Account<'info, Election>,
}

#[derive(Accounts)]
#[instruction(position: u8, name: String)]
pub struct AddCandidate<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [ELECTION_SEED, election.id.to_le_bytes().as_ref()],
        bump = election.bump,
        realloc = election.to_account_info().data_len() + Election::candidate_growth(&name),
        realloc::payer = owner,
        realloc::zero = false
    )]
    pub election: Account<'info, Election>,

    pub system_program: Program<'info, System>,
}

/// Remaining accounts: the `VoterRecord` address of each identity, in order
#[derive(Accounts)]
pub struct WhitelistVoters<'info> {
    /// Pays for the new voter records
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [ELECTION_SEED, election.id.to_le_bytes().as_ref()],
        bump = election.bump
    )]
    pub election: Account<'info, Election>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CastVote<'info> {
    pub voter: Signer<'info>,

    #[account(
        mut,
        seeds = [ELECTION_SEED, election.id.to_le_bytes().as_ref()],
        bump = election.bump
    )]
    pub election: Account<'info, Election>,

    /// Absent when the voter was never whitelisted
    #[account(
        mut,
        seeds = [VOTER_SEED, election.key().as_ref(), voter.key().as_ref()],
        bump
    )]
    pub voter_record: Option<Account<'info, VoterRecord>>,
}

/// Public read-only access to an election
#[derive(Accounts)]
pub struct ReadElection<'info> {
    #[account(
        seeds = [ELECTION_SEED, election.id.to_le_bytes().as_ref()],
        bump = election.bump
    )]
    pub election: Account<'info, Election>,
}

/// Public whitelist lookup for one identity
#[derive(Accounts)]
#[instruction(voter: Pubkey)]
pub struct ReadVoter<'info> {
    #[account(
        seeds = [ELECTION_SEED, election.id.to_le_bytes().as_ref()],
        bump = election.bump
    )]
    pub election: Account<'info, Election>,

    #[account(
        seeds = [VOTER_SEED, election.key().as_ref(), voter.as_ref()],
        bump
    )]
    pub voter_record: Option<Account<'info, VoterRecord>>,
}

/// Ballot lookup, restricted to the voter or the election owner
#[derive(Accounts)]
#[instruction(voter: Pubkey)]
pub struct ReadBallot<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [ELECTION_SEED, election.id.to_le_bytes().as_ref()],
        bump = election.bump
    )]
    pub election: Account<'info, Election>,

    #[account(
        seeds = [VOTER_SEED, election.key().as_ref(), voter.as_ref()],
        bump
    )]
    pub voter_record: Option<Account<'info, VoterRecord>>,
}

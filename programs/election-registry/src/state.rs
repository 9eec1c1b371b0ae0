use anchor_lang::prelude::*;

use crate::{constants::*, guard::ReentrancyLock};

const DISCRIMINATOR: usize = 8;
const PUBKEY: usize = 32;
const VEC_PREFIX: usize = 4;

fn string_space(value: &str) -> usize {
    VEC_PREFIX + value.len()
}

// ============================================================================
// REGISTRY - Factory configuration
// ============================================================================

#[account]
#[derive(InitSpace, Debug)]
pub struct Registry {
    /// Authority allowed to change the fee, treasury and owner
    pub owner: Pubkey,

    /// Receives every creation fee
    pub treasury: Pubkey,

    /// Lamports charged per created election
    pub creation_fee: u64,

    /// Elections created so far; also the id of the next one
    pub election_count: u64,

    pub lock: ReentrancyLock,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

// ============================================================================
// INDEX PAGE - Fixed-size chunk of an election index
// ============================================================================

/// Entry `i` of an index lives at slot `i % INDEX_PAGE_CAPACITY` of page
/// `i / INDEX_PAGE_CAPACITY`. Pages fill strictly in order.
#[account]
#[derive(InitSpace, Debug)]
pub struct IndexPage {
    #[max_len(31)]
    pub elections: Vec<Pubkey>,

    pub bump: u8,
}

impl IndexPage {
    pub fn page_of(position: u64) -> u64 {
        position / INDEX_PAGE_CAPACITY as u64
    }

    pub fn slot_of(position: u64) -> usize {
        (position % INDEX_PAGE_CAPACITY as u64) as usize
    }
}

// ============================================================================
// ELECTION RECORD - Registry-side metadata for one election
// ============================================================================

#[account]
#[derive(InitSpace, Debug)]
pub struct ElectionRecord {
    pub election: Pubkey,
    pub election_id: u64,
    pub organizer: Pubkey,

    #[max_len(64)]
    pub title: String,

    pub created_at: i64,

    /// Fee charged at creation; later fee changes never touch it
    pub fee_paid: u64,

    pub bump: u8,
}

// ============================================================================
// ORGANIZER INDEX - Counter over one organizer's index pages
// ============================================================================

#[account]
#[derive(InitSpace, Debug)]
pub struct OrganizerIndex {
    pub organizer: Pubkey,
    pub election_count: u64,
    pub bump: u8,
}

// ============================================================================
// VOTER RECORD - One whitelisted identity of one election
// ============================================================================

/// Exists only for whitelisted identities.
#[account]
#[derive(InitSpace, Debug)]
pub struct VoterRecord {
    pub election: Pubkey,
    pub voter: Pubkey,
    pub has_voted: bool,

    /// One candidate index per position, empty until the voter votes
    #[max_len(8)]
    pub ballot: Vec<u8>,

    pub bump: u8,
}

impl VoterRecord {
    pub fn address(election: &Pubkey, voter: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[VOTER_SEED, election.as_ref(), voter.as_ref()],
            &crate::ID,
        )
    }
}

// ============================================================================
// ELECTION - One independent election instance
// ============================================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElectionStatus {
    Draft,
    Active,
    Ended,
}

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    #[max_len(32)]
    pub name: String,
    pub identity: Pubkey,
    pub votes: u64,
}

impl Candidate {
    pub fn space(name: &str) -> usize {
        string_space(name) + PUBKEY + 8
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub title: String,
    pub candidates: Vec<Candidate>,
}

impl Position {
    fn space(title: &str) -> usize {
        string_space(title) + VEC_PREFIX
    }
}

/// Entry of the election-wide candidate uniqueness set
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidateKey {
    pub position: u8,
    pub identity: Pubkey,
}

/// Sized by its titles at creation and grown one candidate at a time.
/// Voters live in their own `VoterRecord` accounts.
#[account]
#[derive(Debug)]
pub struct Election {
    /// Position of this election in the registry's global index
    pub id: u64,

    /// Organizer who created the election
    pub owner: Pubkey,

    pub title: String,
    pub status: ElectionStatus,

    /// Only meaningful while Active
    pub paused: bool,

    /// Both set once, by `start_election`
    pub start_time: i64,
    pub end_time: i64,

    pub whitelisted: u64,
    pub total_votes: u64,

    /// Fixed at construction
    pub positions: Vec<Position>,

    /// Every (position, identity) registered so far
    pub candidate_keys: Vec<CandidateKey>,

    pub lock: ReentrancyLock,
    pub bump: u8,
}

impl Election {
    /// Space for a freshly created election with no candidates.
    pub fn space(title: &str, position_titles: &[String]) -> usize {
        DISCRIMINATOR
            + 8
            + PUBKEY
            + string_space(title)
            + 1
            + 1
            + 8
            + 8
            + 8
            + 8
            + VEC_PREFIX
            + position_titles.iter().map(|t| Position::space(t)).sum::<usize>()
            + VEC_PREFIX
            + ReentrancyLock::INIT_SPACE
            + 1
    }

    /// Extra space needed to add one candidate.
    pub fn candidate_growth(name: &str) -> usize {
        Candidate::space(name) + CandidateKey::INIT_SPACE
    }
}

// ============================================================================
// VIEW TYPES - Returned by read-only instructions
// ============================================================================

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Debug, PartialEq, Eq)]
pub struct PositionSummary {
    #[max_len(64)]
    pub title: String,
    pub candidate_count: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElectionStats {
    pub whitelisted: u64,
    pub votes_cast: u64,
    pub start_time: i64,
    pub end_time: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ElectionInfo {
    pub id: u64,
    pub owner: Pubkey,
    pub title: String,
    pub status: ElectionStatus,
    pub paused: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoterStatus {
    pub whitelisted: bool,
    pub has_voted: bool,
}

// List views answer through return data; a full result must fit.
const _: () = assert!(VEC_PREFIX + MAX_PAGE_SIZE * PUBKEY <= MAX_RETURN_DATA);
const _: () =
    assert!(VEC_PREFIX + MAX_CANDIDATES_PER_POSITION * Candidate::INIT_SPACE <= MAX_RETURN_DATA);
const _: () =
    assert!(VEC_PREFIX + MAX_POSITIONS * PositionSummary::INIT_SPACE <= MAX_RETURN_DATA);

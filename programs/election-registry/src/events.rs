use anchor_lang::prelude::*;

// ============================================================================
// REGISTRY EVENTS
// ============================================================================

#[event]
#[derive(Debug)]
pub struct RegistryInitialized {
    pub owner: Pubkey,
    pub treasury: Pubkey,
    pub creation_fee: u64,
}

#[event]
#[derive(Debug)]
pub struct ElectionCreated {
    pub election: Pubkey,
    pub election_id: u64,
    pub organizer: Pubkey,
    pub title: String,
    pub positions: Vec<String>,
    pub fee: u64,
    pub timestamp: i64,
}

#[event]
#[derive(Debug)]
pub struct RefundIssued {
    pub organizer: Pubkey,
    pub amount: u64,
}

#[event]
#[derive(Debug)]
pub struct CreationFeeUpdated {
    pub old_fee: u64,
    pub new_fee: u64,
}

#[event]
#[derive(Debug)]
pub struct TreasuryUpdated {
    pub old_treasury: Pubkey,
    pub new_treasury: Pubkey,
}

#[event]
#[derive(Debug)]
pub struct RegistryOwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

// ============================================================================
// ELECTION EVENTS
// ============================================================================

#[event]
#[derive(Debug)]
pub struct CandidateAdded {
    pub election_id: u64,
    pub position: u8,
    pub name: String,
    pub candidate: Pubkey,
}

#[event]
#[derive(Debug)]
pub struct VoterWhitelisted {
    pub election_id: u64,
    pub voter: Pubkey,
}

/// Summary of one `whitelist_voters` batch
#[event]
#[derive(Debug)]
pub struct VotersWhitelisted {
    pub election_id: u64,
    pub added: u64,
}

#[event]
#[derive(Debug)]
pub struct ElectionStarted {
    pub election_id: u64,
    pub start_time: i64,
    pub end_time: i64,
}

#[event]
#[derive(Debug)]
pub struct VoteCast {
    pub election_id: u64,
    pub voter: Pubkey,
    pub ballot: Vec<u8>,
    pub total_votes: u64,
}

#[event]
#[derive(Debug)]
pub struct ElectionPaused {
    pub election_id: u64,
    pub timestamp: i64,
}

#[event]
#[derive(Debug)]
pub struct ElectionResumed {
    pub election_id: u64,
    pub timestamp: i64,
}

#[event]
#[derive(Debug)]
pub struct WinnerDeclared {
    pub election_id: u64,
    pub position: u8,
    pub candidate_index: u8,
    pub candidate: Pubkey,
    pub name: String,
    pub votes: u64,
}

#[event]
#[derive(Debug)]
pub struct ElectionFinalized {
    pub election_id: u64,
    pub total_votes: u64,
    pub timestamp: i64,
}

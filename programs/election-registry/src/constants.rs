// ============================================================================
// SEEDS FOR PDA DERIVATION
// ============================================================================

pub const REGISTRY_SEED: &[u8] = b"registry";

pub const ELECTION_SEED: &[u8] = b"election";

pub const RECORD_SEED: &[u8] = b"election_record";

/// Global index page: [INDEX_SEED, page]
pub const INDEX_SEED: &[u8] = b"index";

pub const ORGANIZER_SEED: &[u8] = b"organizer";

/// Per-organizer index page: [ORGANIZER_PAGE_SEED, organizer, page]
pub const ORGANIZER_PAGE_SEED: &[u8] = b"organizer_page";

/// Whitelist entry and ballot: [VOTER_SEED, election, voter]
pub const VOTER_SEED: &[u8] = b"voter";

// ============================================================================
// STORAGE LIMITS
// ============================================================================

/// Maximum byte length of an election or position title
pub const MAX_TITLE_LEN: usize = 64;

/// Maximum byte length of a candidate name
pub const MAX_NAME_LEN: usize = 32;

/// Positions are fixed at construction, so this also bounds ballot length
pub const MAX_POSITIONS: usize = 8;

/// Keeps a full `get_candidates` result inside `MAX_RETURN_DATA`
pub const MAX_CANDIDATES_PER_POSITION: usize = 12;

/// Identities accepted by a single `whitelist_voters` call
pub const MAX_WHITELIST_BATCH: usize = 32;

/// Election keys held by one index page
pub const INDEX_PAGE_CAPACITY: usize = 31;

/// Largest number of keys any list view returns in one call
pub const MAX_PAGE_SIZE: usize = INDEX_PAGE_CAPACITY;

/// Runtime cap on instruction return data
pub const MAX_RETURN_DATA: usize = 1024;

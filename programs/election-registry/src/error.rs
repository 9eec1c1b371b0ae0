use anchor_lang::prelude::*;

#[error_code]
pub enum ElectionError {
    #[msg("Caller is not allowed to perform this operation")]
    Unauthorized,

    #[msg("Election is not in the Draft phase")]
    NotDraft,

    #[msg("Election is not active")]
    NotActive,

    #[msg("Election has already been started")]
    AlreadyStarted,

    #[msg("Voting period has already ended")]
    ElectionAlreadyEnded,

    #[msg("Voting period has not ended yet")]
    TooEarly,

    #[msg("Election is paused")]
    ElectionPaused,

    #[msg("Election is already paused")]
    AlreadyPaused,

    #[msg("Election is not paused")]
    NotPaused,

    #[msg("Election has not been finalized")]
    ElectionNotEnded,

    #[msg("Election title is required")]
    TitleRequired,

    #[msg("Title exceeds the maximum length")]
    TitleTooLong,

    #[msg("At least one position is required")]
    AtLeastOnePosition,

    #[msg("Position titles must not be empty")]
    EmptyPositionTitle,

    #[msg("Too many positions")]
    TooManyPositions,

    #[msg("Organizer cannot be the null identity")]
    InvalidOrganizer,

    #[msg("Position index is out of range")]
    InvalidPosition,

    #[msg("Candidate cannot be the null identity")]
    InvalidCandidate,

    #[msg("Candidate name is required")]
    NameRequired,

    #[msg("Candidate name exceeds the maximum length")]
    NameTooLong,

    #[msg("Position already holds the maximum number of candidates")]
    TooManyCandidates,

    #[msg("Whitelist batch is too large")]
    BatchTooLarge,

    #[msg("Duration must be greater than zero")]
    InvalidDuration,

    #[msg("Every position needs at least one candidate")]
    MissingCandidates,

    #[msg("Ballot length does not match the number of positions")]
    InvalidBallot,

    #[msg("Ballot selects a candidate that does not exist")]
    InvalidCandidateIndex,

    #[msg("Caller is not whitelisted")]
    NotWhitelisted,

    #[msg("Candidate already registered for this position")]
    CandidateAlreadyExists,

    #[msg("Caller has already voted")]
    AlreadyVoted,

    #[msg("Treasury cannot be the null identity")]
    InvalidTreasury,

    #[msg("Owner cannot be the null identity")]
    InvalidOwner,

    #[msg("Payment is below the creation fee")]
    InsufficientFee,

    #[msg("Forwarding the creation fee failed")]
    FeeTransferFailed,

    #[msg("Refunding the excess payment failed")]
    RefundFailed,

    #[msg("Voter account does not match the derived address")]
    VoterAccountMismatch,

    #[msg("An index page covering the requested range was not supplied")]
    MissingIndexPage,

    #[msg("Index page is full")]
    IndexPageFull,

    #[msg("Reentrant call rejected")]
    ReentrantCall,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}

/// Coarse classification of [`ElectionError`] for callers that branch on
/// the failure family rather than the exact reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authorization,
    State,
    Validation,
    Conflict,
    Funds,
    Runtime,
}

impl ElectionError {
    pub fn kind(&self) -> ErrorKind {
        use ElectionError::*;

        match self {
            Unauthorized | NotWhitelisted => ErrorKind::Authorization,
            NotDraft | NotActive | AlreadyStarted | ElectionAlreadyEnded | TooEarly
            | ElectionPaused | AlreadyPaused | NotPaused | ElectionNotEnded => ErrorKind::State,
            TitleRequired | TitleTooLong | AtLeastOnePosition | EmptyPositionTitle
            | TooManyPositions | InvalidOrganizer | InvalidPosition | InvalidCandidate
            | NameRequired | NameTooLong | TooManyCandidates | BatchTooLarge | InvalidDuration
            | MissingCandidates | InvalidBallot | InvalidCandidateIndex | InvalidTreasury
            | InvalidOwner | VoterAccountMismatch | MissingIndexPage => ErrorKind::Validation,
            CandidateAlreadyExists | AlreadyVoted => ErrorKind::Conflict,
            InsufficientFee | FeeTransferFailed | RefundFailed => ErrorKind::Funds,
            ReentrantCall | ArithmeticOverflow | IndexPageFull => ErrorKind::Runtime,
        }
    }
}

use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::ElectionError,
    events::{
        CandidateAdded, ElectionFinalized, ElectionPaused, ElectionResumed, ElectionStarted,
        VoteCast, VoterWhitelisted, VotersWhitelisted, WinnerDeclared,
    },
    guard::ReentrancyLock,
    state::*,
};

/// Events produced by one `whitelist_voters` call, in emission order.
#[derive(Debug)]
pub struct WhitelistOutcome {
    pub added: Vec<VoterWhitelisted>,
    pub summary: VotersWhitelisted,
}

/// Events produced by `finalize`, in emission order.
#[derive(Debug)]
pub struct Finalization {
    pub winners: Vec<WinnerDeclared>,
    pub finalized: ElectionFinalized,
}

pub(crate) fn validate_title(title: &str) -> Result<()> {
    require!(!title.is_empty(), ElectionError::TitleRequired);
    require!(title.len() <= MAX_TITLE_LEN, ElectionError::TitleTooLong);
    Ok(())
}

pub(crate) fn validate_positions(position_titles: &[String]) -> Result<()> {
    require!(!position_titles.is_empty(), ElectionError::AtLeastOnePosition);
    require!(
        position_titles.len() <= MAX_POSITIONS,
        ElectionError::TooManyPositions
    );
    for title in position_titles {
        require!(!title.is_empty(), ElectionError::EmptyPositionTitle);
        require!(title.len() <= MAX_TITLE_LEN, ElectionError::TitleTooLong);
    }
    Ok(())
}

/// Indices of every candidate holding the highest tally. Ties are all kept.
pub fn winning_indices(position: &Position) -> Vec<u8> {
    let Some(max) = position.candidates.iter().map(|c| c.votes).max() else {
        return Vec::new();
    };

    position
        .candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| candidate.votes == max)
        .map(|(index, _)| index as u8)
        .collect()
}

/// Whitelist and voting state of whoever `record` was looked up for.
pub fn voter_status(record: Option<&VoterRecord>) -> VoterStatus {
    record
        .map(|record| VoterStatus {
            whitelisted: true,
            has_voted: record.has_voted,
        })
        .unwrap_or_default()
}

impl VoterRecord {
    pub fn new(election: Pubkey, voter: Pubkey, bump: u8) -> Self {
        Self {
            election,
            voter,
            has_voted: false,
            ballot: Vec::new(),
            bump,
        }
    }
}

impl Election {
    pub fn new(
        id: u64,
        organizer: Pubkey,
        title: String,
        position_titles: Vec<String>,
        bump: u8,
    ) -> Result<Self> {
        require_keys_neq!(organizer, Pubkey::default(), ElectionError::InvalidOrganizer);
        validate_title(&title)?;
        validate_positions(&position_titles)?;

        Ok(Self {
            id,
            owner: organizer,
            title,
            status: ElectionStatus::Draft,
            paused: false,
            start_time: 0,
            end_time: 0,
            whitelisted: 0,
            total_votes: 0,
            positions: position_titles
                .into_iter()
                .map(|title| Position {
                    title,
                    candidates: Vec::new(),
                })
                .collect(),
            candidate_keys: Vec::new(),
            lock: ReentrancyLock::default(),
            bump,
        })
    }

    fn only_owner(&self, caller: Pubkey) -> Result<()> {
        require_keys_eq!(caller, self.owner, ElectionError::Unauthorized);
        Ok(())
    }

    fn require_status(&self, status: ElectionStatus, error: ElectionError) -> Result<()> {
        if self.status != status {
            return Err(error.into());
        }
        Ok(())
    }

    // ========================================================================
    // DRAFT PHASE
    // ========================================================================

    pub fn add_candidate(
        &mut self,
        caller: Pubkey,
        position: u8,
        name: String,
        identity: Pubkey,
    ) -> Result<CandidateAdded> {
        self.only_owner(caller)?;
        self.require_status(ElectionStatus::Draft, ElectionError::NotDraft)?;

        let slot = position as usize;
        require!(slot < self.positions.len(), ElectionError::InvalidPosition);
        require_keys_neq!(identity, Pubkey::default(), ElectionError::InvalidCandidate);
        require!(!name.is_empty(), ElectionError::NameRequired);
        require!(name.len() <= MAX_NAME_LEN, ElectionError::NameTooLong);

        let key = CandidateKey { position, identity };
        require!(
            !self.candidate_keys.contains(&key),
            ElectionError::CandidateAlreadyExists
        );
        let candidates = &mut self.positions[slot].candidates;
        require!(
            candidates.len() < MAX_CANDIDATES_PER_POSITION,
            ElectionError::TooManyCandidates
        );

        self.candidate_keys.push(key);
        candidates.push(Candidate {
            name: name.clone(),
            identity,
            votes: 0,
        });

        Ok(CandidateAdded {
            election_id: self.id,
            position,
            name,
            candidate: identity,
        })
    }

    /// Admits every net-new identity of the batch.
    ///
    /// Null identities, repeats within the batch and identities for which
    /// `is_whitelisted` answers true are skipped, never rejected. The caller
    /// creates one `VoterRecord` per returned `VoterWhitelisted`.
    pub fn whitelist_voters(
        &mut self,
        caller: Pubkey,
        identities: &[Pubkey],
        mut is_whitelisted: impl FnMut(&Pubkey) -> Result<bool>,
    ) -> Result<WhitelistOutcome> {
        self.only_owner(caller)?;
        self.require_status(ElectionStatus::Draft, ElectionError::NotDraft)?;
        require!(
            identities.len() <= MAX_WHITELIST_BATCH,
            ElectionError::BatchTooLarge
        );

        let mut seen: Vec<&Pubkey> = Vec::with_capacity(identities.len());
        let mut added = Vec::new();
        for identity in identities {
            if *identity == Pubkey::default() || seen.contains(&identity) {
                continue;
            }
            seen.push(identity);
            if is_whitelisted(identity)? {
                continue;
            }
            added.push(VoterWhitelisted {
                election_id: self.id,
                voter: *identity,
            });
        }

        self.whitelisted = self
            .whitelisted
            .checked_add(added.len() as u64)
            .ok_or(ElectionError::ArithmeticOverflow)?;

        let summary = VotersWhitelisted {
            election_id: self.id,
            added: added.len() as u64,
        };
        Ok(WhitelistOutcome { added, summary })
    }

    pub fn start(&mut self, caller: Pubkey, duration: u64, now: i64) -> Result<ElectionStarted> {
        self.only_owner(caller)?;
        self.require_status(ElectionStatus::Draft, ElectionError::AlreadyStarted)?;
        require!(duration > 0, ElectionError::InvalidDuration);
        require!(
            self.positions.iter().all(|p| !p.candidates.is_empty()),
            ElectionError::MissingCandidates
        );

        let end_time = i64::try_from(duration)
            .ok()
            .and_then(|duration| now.checked_add(duration))
            .ok_or(ElectionError::InvalidDuration)?;

        self.start_time = now;
        self.end_time = end_time;
        self.status = ElectionStatus::Active;

        Ok(ElectionStarted {
            election_id: self.id,
            start_time: self.start_time,
            end_time: self.end_time,
        })
    }

    // ========================================================================
    // ACTIVE PHASE
    // ========================================================================

    /// `record` is the voter's whitelist entry, `None` if they have none.
    pub fn vote(
        &mut self,
        voter: Pubkey,
        record: Option<&mut VoterRecord>,
        ballot: Vec<u8>,
        now: i64,
    ) -> Result<VoteCast> {
        self.lock.enter()?;
        let outcome = self.cast_ballot(voter, record, ballot, now);
        self.lock.release();
        outcome
    }

    /// Validates the whole ballot and precomputes every new tally before
    /// writing anything, so a rejected ballot leaves no trace.
    fn cast_ballot(
        &mut self,
        voter: Pubkey,
        record: Option<&mut VoterRecord>,
        ballot: Vec<u8>,
        now: i64,
    ) -> Result<VoteCast> {
        self.require_status(ElectionStatus::Active, ElectionError::NotActive)?;
        require!(!self.paused, ElectionError::ElectionPaused);
        require!(now <= self.end_time, ElectionError::ElectionAlreadyEnded);

        let record = record
            .filter(|record| record.voter == voter)
            .ok_or(ElectionError::NotWhitelisted)?;
        require!(!record.has_voted, ElectionError::AlreadyVoted);
        require!(
            ballot.len() == self.positions.len(),
            ElectionError::InvalidBallot
        );

        let mut tallies = Vec::with_capacity(ballot.len());
        for (position, &choice) in self.positions.iter().zip(&ballot) {
            let candidate = position
                .candidates
                .get(choice as usize)
                .ok_or(ElectionError::InvalidCandidateIndex)?;
            let tally = candidate
                .votes
                .checked_add(1)
                .ok_or(ElectionError::ArithmeticOverflow)?;
            tallies.push(tally);
        }
        let total_votes = self
            .total_votes
            .checked_add(1)
            .ok_or(ElectionError::ArithmeticOverflow)?;

        for ((position, &choice), tally) in self.positions.iter_mut().zip(&ballot).zip(tallies) {
            position.candidates[choice as usize].votes = tally;
        }
        record.has_voted = true;
        record.ballot = ballot.clone();
        self.total_votes = total_votes;

        Ok(VoteCast {
            election_id: self.id,
            voter,
            ballot,
            total_votes,
        })
    }

    /// The voting clock keeps running while paused.
    pub fn pause(&mut self, caller: Pubkey, now: i64) -> Result<ElectionPaused> {
        self.only_owner(caller)?;
        self.require_status(ElectionStatus::Active, ElectionError::NotActive)?;
        require!(!self.paused, ElectionError::AlreadyPaused);

        self.paused = true;
        Ok(ElectionPaused {
            election_id: self.id,
            timestamp: now,
        })
    }

    pub fn resume(&mut self, caller: Pubkey, now: i64) -> Result<ElectionResumed> {
        self.only_owner(caller)?;
        self.require_status(ElectionStatus::Active, ElectionError::NotActive)?;
        require!(self.paused, ElectionError::NotPaused);

        self.paused = false;
        Ok(ElectionResumed {
            election_id: self.id,
            timestamp: now,
        })
    }

    pub fn finalize(&mut self, caller: Pubkey, now: i64) -> Result<Finalization> {
        self.lock.enter()?;
        let outcome = self.close(caller, now);
        self.lock.release();
        outcome
    }

    fn close(&mut self, caller: Pubkey, now: i64) -> Result<Finalization> {
        self.only_owner(caller)?;
        self.require_status(ElectionStatus::Active, ElectionError::NotActive)?;
        require!(now >= self.end_time, ElectionError::TooEarly);

        let mut winners = Vec::new();
        for (slot, position) in self.positions.iter().enumerate() {
            for index in winning_indices(position) {
                let candidate = &position.candidates[index as usize];
                winners.push(WinnerDeclared {
                    election_id: self.id,
                    position: slot as u8,
                    candidate_index: index,
                    candidate: candidate.identity,
                    name: candidate.name.clone(),
                    votes: candidate.votes,
                });
            }
        }

        self.status = ElectionStatus::Ended;
        self.paused = false;

        Ok(Finalization {
            winners,
            finalized: ElectionFinalized {
                election_id: self.id,
                total_votes: self.total_votes,
                timestamp: now,
            },
        })
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn position_summaries(&self) -> Vec<PositionSummary> {
        self.positions
            .iter()
            .map(|position| PositionSummary {
                title: position.title.clone(),
                candidate_count: position.candidates.len() as u8,
            })
            .collect()
    }

    pub fn candidates(&self, position: u8) -> Result<Vec<Candidate>> {
        self.positions
            .get(position as usize)
            .map(|p| p.candidates.clone())
            .ok_or_else(|| ElectionError::InvalidPosition.into())
    }

    /// Empty when the voter is unknown or has not voted yet.
    pub fn ballot_of(
        &self,
        caller: Pubkey,
        voter: Pubkey,
        record: Option<&VoterRecord>,
    ) -> Result<Vec<u8>> {
        require!(
            caller == voter || caller == self.owner,
            ElectionError::Unauthorized
        );
        Ok(record
            .filter(|record| record.voter == voter)
            .map(|record| record.ballot.clone())
            .unwrap_or_default())
    }

    pub fn stats(&self) -> ElectionStats {
        ElectionStats {
            whitelisted: self.whitelisted,
            votes_cast: self.total_votes,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    pub fn info(&self) -> ElectionInfo {
        ElectionInfo {
            id: self.id,
            owner: self.owner,
            title: self.title.clone(),
            status: self.status,
            paused: self.paused,
        }
    }

    pub fn winners(&self, position: u8) -> Result<Vec<u8>> {
        self.require_status(ElectionStatus::Ended, ElectionError::ElectionNotEnded)?;
        let position = self
            .positions
            .get(position as usize)
            .ok_or(ElectionError::InvalidPosition)?;
        Ok(winning_indices(position))
    }
}

use std::collections::BTreeMap;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use election_registry::{
    constants::INDEX_PAGE_CAPACITY,
    lifecycle::{voter_status, winning_indices},
    registry::{read_window, window},
    transfer, Election, ElectionError, ElectionStatus, IndexPage, OrganizerIndex, Registry,
    VoterRecord,
};

const NOW: i64 = 1_717_000_000;
const DURATION: u64 = 86_400;
const FEE: u64 = 50_000_000;

fn key(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

fn election_key(id: u64) -> Pubkey {
    let mut bytes = [1u8; 32];
    bytes[..8].copy_from_slice(&id.to_le_bytes());
    Pubkey::new_from_array(bytes)
}

fn empty_page() -> IndexPage {
    IndexPage {
        elections: Vec::new(),
        bump: 0,
    }
}

/// Program state touched by `create_election`: the registry, its global
/// index pages and one index plus page list per organizer.
struct Directory {
    registry: Registry,
    pages: Vec<IndexPage>,
    organizers: BTreeMap<Pubkey, (OrganizerIndex, Vec<IndexPage>)>,
}

impl Directory {
    fn new() -> Self {
        Self {
            registry: Registry::new(key(9), key(8), FEE, 254).unwrap(),
            pages: Vec::new(),
            organizers: BTreeMap::new(),
        }
    }

    /// Applies the bookkeeping half of `create_election`.
    fn create(&mut self, organizer: Pubkey, title: &str, positions: &[&str]) -> (Pubkey, Election) {
        let positions: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
        self.registry.quote(title, &positions, FEE).unwrap();

        let count = self.registry.election_count;
        let election_key = election_key(count);
        let page = IndexPage::page_of(count) as usize;
        if self.pages.len() == page {
            self.pages.push(empty_page());
        }
        let id = self
            .registry
            .record_election(&mut self.pages[page], election_key)
            .unwrap();

        let (index, pages) = self.organizers.entry(organizer).or_insert_with(|| {
            (
                OrganizerIndex {
                    organizer: Pubkey::default(),
                    election_count: 0,
                    bump: 0,
                },
                Vec::new(),
            )
        });
        index.bind(organizer, 250);
        let page = IndexPage::page_of(index.election_count) as usize;
        if pages.len() == page {
            pages.push(empty_page());
        }
        index.record_election(&mut pages[page], election_key).unwrap();

        let election = Election::new(id, organizer, title.to_string(), positions, 255).unwrap();
        (election_key, election)
    }

    fn list(&self, offset: u64, limit: u64) -> Vec<Pubkey> {
        let (start, end) = window(self.registry.election_count, offset, limit);
        let first = IndexPage::page_of(offset) as usize;
        read_window([self.pages.get(first), self.pages.get(first + 1)], start, end).unwrap()
    }

    fn list_by(&self, organizer: Pubkey, offset: u64, limit: u64) -> Vec<Pubkey> {
        let Some((index, pages)) = self.organizers.get(&organizer) else {
            return Vec::new();
        };
        let (start, end) = window(index.election_count, offset, limit);
        let first = IndexPage::page_of(offset) as usize;
        read_window([pages.get(first), pages.get(first + 1)], start, end).unwrap()
    }
}

#[test]
fn end_to_end_election() {
    let organizer = key(1);
    let mut directory = Directory::new();
    let (election_key, mut election) =
        directory.create(organizer, "Club officers", &["President", "Secretary"]);

    election
        .add_candidate(organizer, 0, "Alice".into(), key(10))
        .unwrap();
    election
        .add_candidate(organizer, 0, "Bob".into(), key(11))
        .unwrap();
    election
        .add_candidate(organizer, 1, "Carol".into(), key(12))
        .unwrap();

    // Voter records live in their own accounts; the election only counts them
    let voters = [key(20), key(21), key(22)];
    let mut roll: BTreeMap<Pubkey, VoterRecord> = BTreeMap::new();
    let whitelisted = election
        .whitelist_voters(organizer, &voters, |voter| Ok(roll.contains_key(voter)))
        .unwrap();
    for added in &whitelisted.added {
        roll.insert(added.voter, VoterRecord::new(election_key, added.voter, 253));
    }
    assert_eq!(whitelisted.summary.added, 3);
    assert_eq!(election.stats().whitelisted, 3);

    election.start(organizer, DURATION, NOW).unwrap();

    let ballots = [vec![0, 0], vec![1, 0], vec![0, 0]];
    for (voter, ballot) in voters.iter().zip(ballots.iter()) {
        election
            .vote(*voter, roll.get_mut(voter), ballot.clone(), NOW + 60)
            .unwrap();
    }
    assert_eq!(election.stats().votes_cast, 3);
    assert!(voter_status(roll.get(&voters[1])).has_voted);
    assert_eq!(
        election
            .ballot_of(organizer, voters[1], roll.get(&voters[1]))
            .unwrap(),
        vec![1, 0]
    );

    let end = NOW + DURATION as i64;
    assert_eq!(
        election.finalize(organizer, end - 1).unwrap_err(),
        Error::from(ElectionError::TooEarly)
    );
    let outcome = election.finalize(organizer, end + 1).unwrap();
    assert_eq!(election.status, ElectionStatus::Ended);

    // Manual max-tally computation: President 2-1 for Alice, Secretary 3-0 for Carol.
    let declared: Vec<(u8, Pubkey, u64)> = outcome
        .winners
        .iter()
        .map(|w| (w.position, w.candidate, w.votes))
        .collect();
    assert_eq!(declared, vec![(0, key(10), 2), (1, key(12), 3)]);
    for (slot, position) in election.positions.iter().enumerate() {
        assert_eq!(election.winners(slot as u8).unwrap(), winning_indices(position));
    }

    assert_eq!(directory.list(0, 10), vec![election_key]);
    assert_eq!(directory.list_by(organizer, 0, 10), vec![election_key]);
}

#[test]
fn registry_indices_track_creation_order() {
    let (alice, bob) = (key(1), key(2));
    let mut directory = Directory::new();

    let (a1, first) = directory.create(alice, "A1", &["Seat"]);
    let (b1, second) = directory.create(bob, "B1", &["Seat"]);
    let (a2, third) = directory.create(alice, "A2", &["Seat"]);

    assert_eq!((first.id, second.id, third.id), (0, 1, 2));
    assert_eq!(directory.list_by(alice, 0, 10), vec![a1, a2]);
    assert_eq!(directory.list_by(bob, 0, 10), vec![b1]);
    assert!(directory.list_by(key(3), 0, 10).is_empty());

    assert_eq!(directory.list(1, 5), vec![b1, a2]);
    assert!(directory.list(3, 1).is_empty());
    assert!(directory.list(100, 100).is_empty());
}

#[test]
fn indices_span_pages_without_growing_any_account() {
    let organizer = key(1);
    let mut directory = Directory::new();
    let created: Vec<Pubkey> = (0..70)
        .map(|n| directory.create(organizer, &format!("E{n}"), &["Seat"]).0)
        .collect();

    assert_eq!(directory.registry.election_count, 70);
    assert_eq!(directory.pages.len(), 3);
    assert!(directory
        .pages
        .iter()
        .all(|page| page.elections.len() <= INDEX_PAGE_CAPACITY));

    // Every window is capped and walks the index in creation order
    let mut seen = Vec::new();
    let mut offset = 0;
    loop {
        let batch = directory.list(offset, 1_000);
        if batch.is_empty() {
            break;
        }
        assert!(batch.len() <= INDEX_PAGE_CAPACITY);
        offset += batch.len() as u64;
        seen.extend(batch);
    }
    assert_eq!(seen, created);
    assert_eq!(directory.list_by(organizer, 29, 5), created[29..34].to_vec());
}

#[test]
fn creation_payment_moves_exact_amounts() {
    let registry = Registry::new(key(9), key(8), FEE, 254).unwrap();
    let excess = 1_234;
    let settlement = registry
        .quote("Board", &["Chair".to_string()], FEE + excess)
        .unwrap();

    let program = Pubkey::new_from_array([42; 32]);
    let (escrow_key, treasury_key, organizer_key) = (key(50), key(51), key(52));
    let (mut escrow_lamports, mut treasury_lamports, mut organizer_lamports) =
        (1_000_000u64, 0u64, 10 * FEE);
    let (mut d1, mut d2, mut d3) = (Vec::<u8>::new(), Vec::<u8>::new(), Vec::<u8>::new());
    let escrow = AccountInfo::new(
        &escrow_key, false, true, &mut escrow_lamports, &mut d1, &program, false, 0,
    );
    let treasury = AccountInfo::new(
        &treasury_key, false, true, &mut treasury_lamports, &mut d2, &program, false, 0,
    );
    let organizer = AccountInfo::new(
        &organizer_key, true, true, &mut organizer_lamports, &mut d3, &program, false, 0,
    );

    // Payment enters the escrow, then leaves as fee and refund.
    transfer::move_lamports(&organizer, &escrow, FEE + excess, ElectionError::InsufficientFee)
        .unwrap();
    transfer::move_lamports(&escrow, &treasury, settlement.fee, ElectionError::FeeTransferFailed)
        .unwrap();
    transfer::move_lamports(&escrow, &organizer, settlement.refund, ElectionError::RefundFailed)
        .unwrap();

    assert_eq!(treasury.lamports(), FEE);
    assert_eq!(organizer.lamports(), 9 * FEE);
    assert_eq!(escrow.lamports(), 1_000_000);
    assert_eq!(settlement.refund, excess);
}

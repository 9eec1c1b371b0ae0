use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::ElectionError,
    events::{CreationFeeUpdated, RegistryOwnershipTransferred, TreasuryUpdated},
    guard::ReentrancyLock,
    lifecycle::{validate_positions, validate_title},
    state::{IndexPage, OrganizerIndex, Registry},
};

/// How one creation payment is split. `fee + refund` always equals the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSettlement {
    pub fee: u64,
    pub refund: u64,
}

/// Clamped `[start, end)` positions answering `(offset, limit)` over `total`
/// entries. Never longer than `MAX_PAGE_SIZE`; empty once `offset >= total`.
pub fn window(total: u64, offset: u64, limit: u64) -> (u64, u64) {
    if offset >= total {
        return (total, total);
    }
    let end = offset
        .saturating_add(limit.min(MAX_PAGE_SIZE as u64))
        .min(total);
    (offset, end)
}

/// Reads index positions `[start, end)`.
///
/// `pages` are the page holding `start` and the one after it; a window
/// never spans more than two.
pub fn read_window(pages: [Option<&IndexPage>; 2], start: u64, end: u64) -> Result<Vec<Pubkey>> {
    let first = IndexPage::page_of(start);
    let mut keys = Vec::with_capacity(end.saturating_sub(start) as usize);

    for position in start..end {
        let page = (IndexPage::page_of(position) - first) as usize;
        let key = pages
            .get(page)
            .copied()
            .flatten()
            .and_then(|page| page.elections.get(IndexPage::slot_of(position)))
            .ok_or(ElectionError::MissingIndexPage)?;
        keys.push(*key);
    }
    Ok(keys)
}

impl Registry {
    pub fn new(owner: Pubkey, treasury: Pubkey, creation_fee: u64, bump: u8) -> Result<Self> {
        require_keys_neq!(owner, Pubkey::default(), ElectionError::InvalidOwner);
        require_keys_neq!(treasury, Pubkey::default(), ElectionError::InvalidTreasury);

        Ok(Self {
            owner,
            treasury,
            creation_fee,
            election_count: 0,
            lock: ReentrancyLock::default(),
            bump,
        })
    }

    fn only_owner(&self, caller: Pubkey) -> Result<()> {
        require_keys_eq!(caller, self.owner, ElectionError::Unauthorized);
        Ok(())
    }

    /// Validates a creation request against the fee in force right now.
    pub fn quote(&self, title: &str, positions: &[String], payment: u64) -> Result<FeeSettlement> {
        validate_title(title)?;
        validate_positions(positions)?;
        require!(payment >= self.creation_fee, ElectionError::InsufficientFee);

        Ok(FeeSettlement {
            fee: self.creation_fee,
            refund: payment - self.creation_fee,
        })
    }

    /// Appends `election` to the global index and returns its id.
    ///
    /// `page` must be the index page `IndexPage::page_of(election_count)`.
    pub fn record_election(&mut self, page: &mut IndexPage, election: Pubkey) -> Result<u64> {
        let id = self.election_count;
        page.append(id, election)?;
        self.election_count = id
            .checked_add(1)
            .ok_or(ElectionError::ArithmeticOverflow)?;
        Ok(id)
    }

    pub fn set_creation_fee(&mut self, caller: Pubkey, new_fee: u64) -> Result<CreationFeeUpdated> {
        self.only_owner(caller)?;

        let old_fee = self.creation_fee;
        self.creation_fee = new_fee;
        Ok(CreationFeeUpdated { old_fee, new_fee })
    }

    pub fn set_treasury(&mut self, caller: Pubkey, new_treasury: Pubkey) -> Result<TreasuryUpdated> {
        self.only_owner(caller)?;
        require_keys_neq!(new_treasury, Pubkey::default(), ElectionError::InvalidTreasury);

        let old_treasury = self.treasury;
        self.treasury = new_treasury;
        Ok(TreasuryUpdated {
            old_treasury,
            new_treasury,
        })
    }

    pub fn transfer_ownership(
        &mut self,
        caller: Pubkey,
        new_owner: Pubkey,
    ) -> Result<RegistryOwnershipTransferred> {
        self.only_owner(caller)?;
        require_keys_neq!(new_owner, Pubkey::default(), ElectionError::InvalidOwner);

        let previous_owner = self.owner;
        self.owner = new_owner;
        Ok(RegistryOwnershipTransferred {
            previous_owner,
            new_owner,
        })
    }
}

impl IndexPage {
    /// Stores `election` as index entry `position`, which must be the next
    /// free slot of this page.
    pub fn append(&mut self, position: u64, election: Pubkey) -> Result<()> {
        require!(
            self.elections.len() < INDEX_PAGE_CAPACITY
                && self.elections.len() == IndexPage::slot_of(position),
            ElectionError::IndexPageFull
        );
        self.elections.push(election);
        Ok(())
    }
}

impl OrganizerIndex {
    /// Claims a freshly initialized index for `organizer`; no-op afterwards.
    pub fn bind(&mut self, organizer: Pubkey, bump: u8) {
        if self.organizer == Pubkey::default() {
            self.organizer = organizer;
            self.bump = bump;
        }
    }

    /// `page` must be the organizer page `IndexPage::page_of(election_count)`.
    pub fn record_election(&mut self, page: &mut IndexPage, election: Pubkey) -> Result<u64> {
        let position = self.election_count;
        page.append(position, election)?;
        self.election_count = position
            .checked_add(1)
            .ok_or(ElectionError::ArithmeticOverflow)?;
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    const FEE: u64 = 10_000_000;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn registry() -> Registry {
        Registry::new(key(1), key(2), FEE, 255).unwrap()
    }

    fn positions() -> Vec<String> {
        vec!["Chair".to_string(), "Secretary".to_string()]
    }

    fn empty_page() -> IndexPage {
        IndexPage {
            elections: Vec::new(),
            bump: 0,
        }
    }

    fn assert_fails<T: std::fmt::Debug>(result: Result<T>, expected: ElectionError) {
        assert_eq!(result.unwrap_err(), Error::from(expected));
    }

    /// Records `count` elections, returning the pages and keys in order.
    fn populated(count: u64) -> (Registry, Vec<IndexPage>, Vec<Pubkey>) {
        let mut registry = registry();
        let mut pages: Vec<IndexPage> = Vec::new();
        let mut created = Vec::new();
        for n in 0..count {
            let election = Pubkey::new_from_array([(n % 251) as u8 + 3; 32]);
            let page = IndexPage::page_of(registry.election_count) as usize;
            if pages.len() == page {
                pages.push(empty_page());
            }
            assert_eq!(registry.record_election(&mut pages[page], election).unwrap(), n);
            created.push(election);
        }
        (registry, pages, created)
    }

    fn read(registry: &Registry, pages: &[IndexPage], offset: u64, limit: u64) -> Vec<Pubkey> {
        let (start, end) = window(registry.election_count, offset, limit);
        let first = IndexPage::page_of(start) as usize;
        read_window([pages.get(first), pages.get(first + 1)], start, end).unwrap()
    }

    #[test]
    fn construction_rejects_null_identities() {
        assert_fails(
            Registry::new(key(1), Pubkey::default(), FEE, 0),
            ElectionError::InvalidTreasury,
        );
        assert_fails(
            Registry::new(Pubkey::default(), key(2), FEE, 0),
            ElectionError::InvalidOwner,
        );
    }

    #[test]
    fn quote_splits_payment_into_fee_and_refund() {
        let registry = registry();
        assert_eq!(
            registry.quote("Board", &positions(), FEE + 42).unwrap(),
            FeeSettlement { fee: FEE, refund: 42 }
        );
        assert_eq!(
            registry.quote("Board", &positions(), FEE).unwrap(),
            FeeSettlement { fee: FEE, refund: 0 }
        );
    }

    #[test]
    fn quote_validates_request() {
        let registry = registry();
        assert_fails(registry.quote("", &positions(), FEE), ElectionError::TitleRequired);
        assert_fails(registry.quote("Board", &[], FEE), ElectionError::AtLeastOnePosition);
        assert_fails(
            registry.quote("Board", &positions(), FEE - 1),
            ElectionError::InsufficientFee,
        );
    }

    #[test]
    fn fee_is_snapshotted_per_quote() {
        let mut registry = registry();
        let first = registry.quote("Board", &positions(), FEE * 2).unwrap();

        registry.set_creation_fee(key(1), FEE * 2).unwrap();
        let second = registry.quote("Board", &positions(), FEE * 2).unwrap();

        assert_eq!(first, FeeSettlement { fee: FEE, refund: FEE });
        assert_eq!(second, FeeSettlement { fee: FEE * 2, refund: 0 });
    }

    #[test]
    fn admin_updates_are_owner_only() {
        let mut registry = registry();
        assert_fails(registry.set_creation_fee(key(9), 1), ElectionError::Unauthorized);
        assert_fails(registry.set_treasury(key(9), key(3)), ElectionError::Unauthorized);
        assert_fails(
            registry.set_treasury(key(1), Pubkey::default()),
            ElectionError::InvalidTreasury,
        );

        let updated = registry.set_treasury(key(1), key(3)).unwrap();
        assert_eq!((updated.old_treasury, updated.new_treasury), (key(2), key(3)));
        let fee = registry.set_creation_fee(key(1), 5).unwrap();
        assert_eq!((fee.old_fee, fee.new_fee), (FEE, 5));
    }

    #[test]
    fn ownership_transfer_moves_admin_rights() {
        let mut registry = registry();
        assert_fails(
            registry.transfer_ownership(key(1), Pubkey::default()),
            ElectionError::InvalidOwner,
        );
        registry.transfer_ownership(key(1), key(4)).unwrap();

        assert_fails(registry.set_creation_fee(key(1), 0), ElectionError::Unauthorized);
        registry.set_creation_fee(key(4), 0).unwrap();
        assert_eq!(registry.creation_fee, 0);
    }

    #[test]
    fn index_fills_pages_in_order() {
        let (registry, pages, created) = populated(INDEX_PAGE_CAPACITY as u64 * 2 + 3);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].elections.len(), INDEX_PAGE_CAPACITY);
        assert_eq!(pages[2].elections, created[INDEX_PAGE_CAPACITY * 2..].to_vec());
        assert_eq!(registry.election_count, created.len() as u64);
    }

    #[test]
    fn append_rejects_wrong_or_full_page() {
        let mut page = empty_page();
        assert_fails(page.append(1, key(5)), ElectionError::IndexPageFull);

        for position in 0..INDEX_PAGE_CAPACITY as u64 {
            page.append(position, key(5)).unwrap();
        }
        assert_fails(
            page.append(INDEX_PAGE_CAPACITY as u64, key(5)),
            ElectionError::IndexPageFull,
        );
    }

    #[test]
    fn window_clamps_to_total_and_page_size() {
        let cap = MAX_PAGE_SIZE as u64;
        assert_eq!(window(5, 0, 2), (0, 2));
        assert_eq!(window(5, 3, 10), (3, 5));
        assert_eq!(window(5, 5, 1), (5, 5));
        assert_eq!(window(5, 7, 3), (5, 5));
        assert_eq!(window(5, 2, 0), (2, 2));
        assert_eq!(window(100, 10, u64::MAX), (10, 10 + cap));
        assert_eq!(window(u64::MAX, u64::MAX - 1, 5), (u64::MAX - 1, u64::MAX));
    }

    #[test]
    fn pagination_reads_across_page_boundaries() {
        let total = 50u64;
        let (registry, pages, created) = populated(total);

        for (offset, limit) in [(0, 2), (3, 10), (29, 5), (30, 31), (45, 100), (49, 1), (50, 1), (70, 3)] {
            let page = read(&registry, &pages, offset, limit);
            let expected = limit
                .min(MAX_PAGE_SIZE as u64)
                .min(total.saturating_sub(offset)) as usize;
            assert_eq!(page.len(), expected, "offset {offset} limit {limit}");
            if expected > 0 {
                let start = offset as usize;
                assert_eq!(page, created[start..start + expected].to_vec());
            }
        }
        assert_eq!(read(&registry, &pages, 0, 100).len(), MAX_PAGE_SIZE);
    }

    #[test]
    fn missing_page_is_reported() {
        let (registry, pages, _) = populated(40);
        let (start, end) = window(registry.election_count, 25, 10);
        assert_fails(
            read_window([pages.first(), None], start, end),
            ElectionError::MissingIndexPage,
        );
    }

    #[test]
    fn organizer_index_binds_once_and_counts() {
        let mut index = OrganizerIndex {
            organizer: Pubkey::default(),
            election_count: 0,
            bump: 0,
        };
        let mut page = empty_page();
        index.bind(key(5), 200);
        index.bind(key(6), 100);
        assert_eq!(index.record_election(&mut page, key(20)).unwrap(), 0);
        assert_eq!(index.record_election(&mut page, key(21)).unwrap(), 1);

        assert_eq!(index.organizer, key(5));
        assert_eq!(index.bump, 200);
        assert_eq!(index.election_count, 2);
        assert_eq!(page.elections, vec![key(20), key(21)]);
    }
}

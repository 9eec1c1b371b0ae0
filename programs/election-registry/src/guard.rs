use anchor_lang::prelude::*;

use crate::error::ElectionError;

/// Single-entry lock stored inside the account it protects.
///
/// Callers pair every successful `enter` with a `release`, including on the
/// failure path, so a rejected operation never leaves the account locked.
/// Accounts that make CPIs while held write the flag back to account data
/// first (see `create_election`).
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReentrancyLock {
    held: bool,
}

impl ReentrancyLock {
    pub fn enter(&mut self) -> Result<()> {
        require!(!self.held, ElectionError::ReentrantCall);
        self.held = true;
        Ok(())
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    #[test]
    fn nested_enter_is_rejected() {
        let mut lock = ReentrancyLock::default();
        lock.enter().unwrap();
        assert_eq!(lock.enter().unwrap_err(), Error::from(ElectionError::ReentrantCall));
        assert!(lock.is_held());

        lock.release();
        assert!(!lock.is_held());
        lock.enter().unwrap();
    }
}

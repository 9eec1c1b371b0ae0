use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::error::ElectionError;

/// Moves `amount` lamports from a signer into `escrow` through the system program.
pub fn deposit<'info>(
    payer: &AccountInfo<'info>,
    escrow: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    system_program::transfer(
        CpiContext::new(
            system_program.clone(),
            Transfer {
                from: payer.clone(),
                to: escrow.clone(),
            },
        ),
        amount,
    )
}

/// Debits a program-owned account and credits `to` by exactly `amount`.
///
/// Both balances are computed before either is written; on failure
/// `error` is returned and neither balance changes.
pub fn move_lamports(
    from: &AccountInfo,
    to: &AccountInfo,
    amount: u64,
    error: ElectionError,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let (debited, credited) = match (
        from.lamports().checked_sub(amount),
        to.lamports().checked_add(amount),
    ) {
        (Some(debited), Some(credited)) => (debited, credited),
        _ => return Err(error.into()),
    };

    **from.try_borrow_mut_lamports()? = debited;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}

/// Creates a program-owned account of `space` bytes at a PDA, paid by `payer`.
///
/// An address that already holds lamports cannot go through
/// `create_account`, so it is topped up to rent exemption, allocated and
/// assigned instead.
pub fn create_pda<'info>(
    payer: &AccountInfo<'info>,
    account: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    space: usize,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    let rent = Rent::get()?.minimum_balance(space);
    let signer = &[signer_seeds];

    if account.lamports() == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: account.clone(),
                },
                signer,
            ),
            rent,
            space as u64,
            &crate::ID,
        );
    }

    deposit(
        payer,
        account,
        system_program,
        rent.saturating_sub(account.lamports()),
    )?;
    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate {
                account_to_allocate: account.clone(),
            },
            signer,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system_program.clone(),
            Assign {
                account_to_assign: account.clone(),
            },
            signer,
        ),
        &crate::ID,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn with_accounts(
        from_balance: u64,
        to_balance: u64,
        test: impl FnOnce(&AccountInfo, &AccountInfo),
    ) {
        let owner = Pubkey::new_from_array([7; 32]);
        let from_key = Pubkey::new_from_array([1; 32]);
        let to_key = Pubkey::new_from_array([2; 32]);
        let (mut from_lamports, mut to_lamports) = (from_balance, to_balance);
        let (mut from_data, mut to_data) = (Vec::<u8>::new(), Vec::<u8>::new());

        let from = AccountInfo::new(
            &from_key,
            false,
            true,
            &mut from_lamports,
            &mut from_data,
            &owner,
            false,
            0,
        );
        let to = AccountInfo::new(
            &to_key,
            false,
            true,
            &mut to_lamports,
            &mut to_data,
            &owner,
            false,
            0,
        );
        test(&from, &to);
    }

    #[test]
    fn moves_exact_amount() {
        with_accounts(100, 5, |from, to| {
            move_lamports(from, to, 60, ElectionError::FeeTransferFailed).unwrap();
            assert_eq!(from.lamports(), 40);
            assert_eq!(to.lamports(), 65);
        });
    }

    #[test]
    fn failure_leaves_both_balances_untouched() {
        with_accounts(10, 5, |from, to| {
            let err = move_lamports(from, to, 11, ElectionError::RefundFailed).unwrap_err();
            assert_eq!(err, Error::from(ElectionError::RefundFailed));
            assert_eq!(from.lamports(), 10);
            assert_eq!(to.lamports(), 5);
        });
        with_accounts(10, u64::MAX, |from, to| {
            let err = move_lamports(from, to, 1, ElectionError::FeeTransferFailed).unwrap_err();
            assert_eq!(err, Error::from(ElectionError::FeeTransferFailed));
            assert_eq!(from.lamports(), 10);
        });
    }

    #[test]
    fn zero_amount_is_a_no_op() {
        with_accounts(0, 0, |from, to| {
            move_lamports(from, to, 0, ElectionError::RefundFailed).unwrap();
            assert_eq!((from.lamports(), to.lamports()), (0, 0));
        });
    }
}

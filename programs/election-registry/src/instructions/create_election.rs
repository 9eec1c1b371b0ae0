use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use crate::{
    contexts::{CreateElection, CreateElectionBumps},
    error::ElectionError,
    events::{ElectionCreated, RefundIssued},
    state::{Election, ElectionRecord},
    transfer,
};

/// Create an election, forward the fee to the treasury and refund any excess.
///
/// The payment is escrowed in the registry account first. All bookkeeping
/// (election, record, both indices) happens before the two outbound
/// transfers, and either transfer failing aborts the whole instruction.
pub fn handler(
    ctx: Context<CreateElection>,
    title: String,
    positions: Vec<String>,
    payment: u64,
) -> Result<()> {
    let accounts = ctx.accounts;
    accounts.registry.lock.enter()?;
    // The held flag must be in account data before the first CPI
    accounts.registry.exit(&crate::ID)?;

    let outcome = create(accounts, &ctx.bumps, title, positions, payment);
    accounts.registry.lock.release();
    outcome
}

fn create(
    accounts: &mut CreateElection,
    bumps: &CreateElectionBumps,
    title: String,
    positions: Vec<String>,
    payment: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let organizer = accounts.organizer.key();
    let election_key = accounts.election.key();

    // Fee is read once here; later fee updates never reach this election
    let settlement = accounts.registry.quote(&title, &positions, payment)?;

    transfer::deposit(
        &accounts.organizer.to_account_info(),
        &accounts.registry.to_account_info(),
        &accounts.system_program.to_account_info(),
        payment,
    )?;

    // =========================================================================
    // Bookkeeping
    // =========================================================================
    accounts.index_page.bump = bumps.index_page;
    let election_id = accounts
        .registry
        .record_election(&mut accounts.index_page, election_key)?;

    accounts.election.set_inner(Election::new(
        election_id,
        organizer,
        title.clone(),
        positions.clone(),
        bumps.election,
    )?);
    accounts.record.set_inner(ElectionRecord {
        election: election_key,
        election_id,
        organizer,
        title: title.clone(),
        created_at: clock.unix_timestamp,
        fee_paid: settlement.fee,
        bump: bumps.record,
    });

    accounts.organizer_page.bump = bumps.organizer_page;
    accounts
        .organizer_index
        .bind(organizer, bumps.organizer_index);
    accounts
        .organizer_index
        .record_election(&mut accounts.organizer_page, election_key)?;

    // =========================================================================
    // Outbound transfers
    // =========================================================================
    let escrow = accounts.registry.to_account_info();
    transfer::move_lamports(
        &escrow,
        &accounts.treasury.to_account_info(),
        settlement.fee,
        ElectionError::FeeTransferFailed,
    )?;
    transfer::move_lamports(
        &escrow,
        &accounts.organizer.to_account_info(),
        settlement.refund,
        ElectionError::RefundFailed,
    )?;

    emit!(ElectionCreated {
        election: election_key,
        election_id,
        organizer,
        title,
        positions,
        fee: settlement.fee,
        timestamp: clock.unix_timestamp,
    });
    if settlement.refund > 0 {
        emit!(RefundIssued {
            organizer,
            amount: settlement.refund,
        });
    }

    msg!("✅ Election #{} created: {}", election_id, election_key);
    msg!("   Organizer: {}", organizer);
    msg!("   Fee: {} lamports, refund: {} lamports", settlement.fee, settlement.refund);

    Ok(())
}

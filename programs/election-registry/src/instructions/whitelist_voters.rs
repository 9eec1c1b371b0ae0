use anchor_lang::prelude::*;
use anchor_lang::AccountSerialize;
use crate::{
    constants::VOTER_SEED,
    contexts::WhitelistVoters,
    error::ElectionError,
    state::VoterRecord,
    transfer,
};

/// `ctx.remaining_accounts[i]` is the voter record address of `identities[i]`.
/// Null identities still take a slot; their account is ignored.
pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, WhitelistVoters<'info>>,
    identities: Vec<Pubkey>,
) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let election_key = ctx.accounts.election.key();
    let slots = ctx.remaining_accounts;
    require!(
        slots.len() == identities.len(),
        ElectionError::VoterAccountMismatch
    );

    // (voter, slot, bump) of every record still to be created
    let mut pending: Vec<(Pubkey, usize, u8)> = Vec::new();
    let outcome = ctx
        .accounts
        .election
        .whitelist_voters(caller, &identities, |voter| {
            let slot = identities
                .iter()
                .position(|identity| identity == voter)
                .ok_or(ElectionError::VoterAccountMismatch)?;
            let (address, bump) = VoterRecord::address(&election_key, voter);
            require_keys_eq!(
                slots[slot].key(),
                address,
                ElectionError::VoterAccountMismatch
            );
            let whitelisted = slots[slot].owner == &crate::ID;
            if !whitelisted {
                pending.push((*voter, slot, bump));
            }
            Ok(whitelisted)
        })?;

    let payer = ctx.accounts.owner.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    for (voter, slot, bump) in pending {
        let account = &slots[slot];
        transfer::create_pda(
            &payer,
            account,
            &system_program,
            8 + VoterRecord::INIT_SPACE,
            &[VOTER_SEED, election_key.as_ref(), voter.as_ref(), &[bump]],
        )?;
        let mut data = account.try_borrow_mut_data()?;
        VoterRecord::new(election_key, voter, bump).try_serialize(&mut &mut data[..])?;
    }

    for whitelisted in outcome.added {
        emit!(whitelisted);
    }

    msg!(
        "✅ Whitelisted {} of {} submitted voters (total: {})",
        outcome.summary.added,
        identities.len(),
        ctx.accounts.election.whitelisted
    );
    emit!(outcome.summary);

    Ok(())
}

use anchor_lang::prelude::Pubkey;
use vsr_voting_power::state::*;

use super::{key, TestConfig, MANGO_MINT_PK, SECS_PER_YEAR};

#[allow(dead_code)]
pub struct VoterCookie {
    pub pubkey: Pubkey,
    pub authority: Pubkey,
    pub locked_amount: u64,
}

#[allow(dead_code)]
pub struct VoterStakeRegistryCookie {
    pub registrar: Pubkey,
    pub registrar_data: Registrar,
    pub voters: Vec<VoterCookie>,
}

#[allow(dead_code)]
/// A realm config of baseline 1, up to 3 extra, saturating after a year.
pub fn mock_registrar() -> Registrar {
    let mut registrar = Registrar::default();
    registrar.voting_mints[0] = VotingMintConfig {
        mint: *MANGO_MINT_PK,
        grant_authority: Pubkey::default(),
        baseline_vote_weight_scaled_factor: 1_000_000_000,
        max_extra_lockup_vote_weight_scaled_factor: 3_000_000_000,
        lockup_saturation_secs: SECS_PER_YEAR as u64,
        digit_shift: 0,
    };
    registrar
}

#[allow(dead_code)]
pub fn deposit(amount_native: u64, kind: LockupKind, now_ts: i64, seconds_left: i64) -> DepositEntry {
    DepositEntry {
        lockup: Lockup {
            start_ts: now_ts - 1000,
            end_ts: now_ts + seconds_left,
            kind,
        },
        amount_deposited_native: amount_native,
        amount_initially_locked_native: amount_native,
        is_used: true,
        allow_clawback: false,
        voting_mint_config_idx: 0,
    }
}

#[allow(dead_code)]
pub fn mock_voter(registrar: Pubkey, authority: Pubkey, voter_authority: Pubkey) -> Voter {
    Voter {
        registrar,
        authority,
        voter_authority,
        voter_bump: 255,
        voter_weight_record_bump: 254,
        ..Voter::default()
    }
}

/// A registrar and two voters with one-year cliff lockups of 1000 and 500
/// tokens, the first at full saturation and the second half way.
#[allow(dead_code)]
pub fn setup_mock_registrar_and_voters(
    test_config: &mut TestConfig,
    now_ts: i64,
) -> VoterStakeRegistryCookie {
    let registrar = key(1000);
    let registrar_data = mock_registrar();
    test_config.add_account(registrar, registrar_data.to_account_data());

    let mut voters = vec![];
    for (i, (locked_amount, seconds_left)) in [(1000, SECS_PER_YEAR), (500, SECS_PER_YEAR / 2)]
        .into_iter()
        .enumerate()
    {
        let authority = key(2000 + i as u16);
        let voter = key(3000 + i as u16);

        let mut voter_data = mock_voter(registrar, authority, authority);
        voter_data.deposits[0] = deposit(
            locked_amount * 1_000_000,
            LockupKind::Cliff,
            now_ts,
            seconds_left,
        );
        test_config.add_account(voter, voter_data.to_account_data());

        voters.push(VoterCookie {
            pubkey: voter,
            authority,
            locked_amount,
        });
    }

    VoterStakeRegistryCookie {
        registrar,
        registrar_data,
        voters,
    }
}

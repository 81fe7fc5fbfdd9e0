use anchor_lang::prelude::Pubkey;
use program_test::*;
use vsr_voting_power::layout::*;
use vsr_voting_power::report::WalletPowerReport;
use vsr_voting_power::state::*;
use vsr_voting_power::*;

mod program_test;

const NOW: i64 = 1_650_000_000;

fn config() -> EngineConfig {
    EngineConfig::at(NOW)
}

#[test]
fn test_basic() {
    init_logger();

    //
    // SETUP: mock registrar and voters
    //
    let mut test_config = TestConfig::default();
    let vsr = setup_mock_registrar_and_voters(&mut test_config, NOW);
    let accounts = ProgramAccounts::classify(&test_config.accounts);
    assert_eq!(accounts.voters.len(), 2);
    assert!(accounts.failures.is_empty());

    //
    // TEST: full saturation earns the max multiplier, half of it half the bonus
    //
    let registrar = accounts.require_registrar(&vsr.registrar).unwrap();
    assert_eq!(registrar.registrar, vsr.registrar_data);
    let aggregator = Aggregator::new(registrar, &config()).unwrap();

    let first = aggregator.aggregate(&vsr.voters[0].authority, &accounts);
    assert_eq!(first.status, PowerStatus::Known);
    assert_eq!(first.native_power, 4000.0);
    assert_eq!(first.delegated_power, 0.0);
    assert_eq!(first.deposits[0].voter, vsr.voters[0].pubkey);
    assert_eq!(first.deposits[0].deposit.multiplier, 4.0);

    let second = aggregator.aggregate(&vsr.voters[1].authority, &accounts);
    assert_eq!(second.total_power, vsr.voters[1].locked_amount as f64 * 2.5);
}

#[test]
fn test_single_unlocked_deposit() {
    let registrar = RegistrarAccount {
        address: key(1),
        registrar: mock_registrar(),
    };
    let wallet = key(2);
    let mut voter = mock_voter(key(1), wallet, wallet);
    voter.deposits[0] = deposit(200_000_000000, LockupKind::None, NOW, 0);
    let accounts = ProgramAccounts::classify(&[(key(3), voter.to_account_data())]);

    let result = Aggregator::new(&registrar, &config()).unwrap().aggregate(&wallet, &accounts);
    assert_eq!(result.total_power, 200000.0);
    assert_eq!(result.native_power, 200000.0);
    assert_eq!(result.deposits.len(), 1);
}

#[test]
fn test_unlocked_and_saturated_cliff_deposits() {
    let registrar = RegistrarAccount {
        address: key(1),
        registrar: mock_registrar(),
    };
    let wallet = key(2);
    let mut voter = mock_voter(key(1), wallet, wallet);
    voter.deposits[0] = deposit(100_000_000000, LockupKind::None, NOW, 0);
    voter.deposits[1] = deposit(50_000_000000, LockupKind::Cliff, NOW, SECS_PER_YEAR);
    let accounts = ProgramAccounts::classify(&[(key(3), voter.to_account_data())]);

    let result = Aggregator::new(&registrar, &config()).unwrap().aggregate(&wallet, &accounts);
    assert_eq!(result.total_power, 300000.0);
    let multipliers: Vec<f64> = result.deposits.iter().map(|d| d.deposit.multiplier).collect();
    assert_eq!(multipliers, vec![1.0, 4.0]);
}

#[test]
fn test_unused_and_empty_slots_contribute_nothing() {
    let registrar = RegistrarAccount {
        address: key(1),
        registrar: mock_registrar(),
    };
    let wallet = key(2);
    let mut voter = mock_voter(key(1), wallet, wallet);
    // closed slot with a stale amount
    voter.deposits[4] = DepositEntry {
        is_used: false,
        ..deposit(5_000_000000, LockupKind::Cliff, NOW, SECS_PER_YEAR)
    };
    voter.deposits[5] = deposit(0, LockupKind::None, NOW, 0);
    let accounts = ProgramAccounts::classify(&[(key(3), voter.to_account_data())]);

    let result = Aggregator::new(&registrar, &config()).unwrap().aggregate(&wallet, &accounts);
    assert_eq!(result.status, PowerStatus::Known);
    assert_eq!(result.total_power, 0.0);
    assert!(result.deposits.is_empty());
    assert_eq!(result.accounts.len(), 1);
}

#[test]
fn test_every_account_of_a_wallet_counts() {
    let registrar = RegistrarAccount {
        address: key(1),
        registrar: mock_registrar(),
    };
    let wallet = key(2);
    let mut a = mock_voter(key(1), wallet, wallet);
    a.deposits[0] = deposit(10_000000, LockupKind::None, NOW, 0);
    a.deposits[1] = deposit(20_000000, LockupKind::Cliff, NOW, SECS_PER_YEAR);
    let mut b = mock_voter(key(1), wallet, wallet);
    b.deposits[7] = deposit(1_000000, LockupKind::Constant, NOW, SECS_PER_YEAR / 2);
    let accounts = ProgramAccounts::classify(&[
        (key(10), a.to_account_data()),
        (key(11), b.to_account_data()),
    ]);

    let aggregator = Aggregator::new(&registrar, &config()).unwrap();
    let result = aggregator.aggregate(&wallet, &accounts);

    let a_total = aggregator.calculator().voter_total(&a).total_power;
    let b_total = aggregator.calculator().voter_total(&b).total_power;
    assert_eq!(a_total, 90.0);
    assert_eq!(b_total, 2.5);
    assert_eq!(result.total_power, a_total + b_total);

    let powers: Vec<(Pubkey, f64)> = result.accounts.iter().map(|a| (a.voter, a.power)).collect();
    assert_eq!(powers, vec![(key(10), 90.0), (key(11), 2.5)]);

    // same input, same answer
    assert_eq!(aggregator.aggregate(&wallet, &accounts), result);
}

#[test]
fn test_native_and_delegated_partition() {
    let registrar = RegistrarAccount {
        address: key(1),
        registrar: mock_registrar(),
    };
    let owner = key(2);
    let delegate = key(3);

    let mut own = mock_voter(key(1), owner, owner);
    own.deposits[0] = deposit(7_000000, LockupKind::None, NOW, 0);
    let mut delegated = mock_voter(key(1), owner, delegate);
    delegated.deposits[0] = deposit(5_000000, LockupKind::None, NOW, 0);
    let accounts = ProgramAccounts::classify(&[
        (key(10), own.to_account_data()),
        (key(11), delegated.to_account_data()),
    ]);

    let aggregator = Aggregator::new(&registrar, &config()).unwrap();
    let output = aggregator.aggregate_many(&[owner, delegate], &accounts);

    // the owner keeps native power over both of its accounts
    let owner_result = &output.results[&owner];
    assert_eq!(owner_result.native_power, 12.0);
    assert_eq!(owner_result.delegated_power, 0.0);
    assert!(owner_result
        .accounts
        .iter()
        .all(|account| account.source == PowerSource::Native));

    let delegate_result = &output.results[&delegate];
    assert_eq!(delegate_result.native_power, 0.0);
    assert_eq!(delegate_result.delegated_power, 5.0);
    assert_eq!(delegate_result.deposits[0].source, PowerSource::Delegated);
    assert_eq!(delegate_result.deposits[0].voter, key(11));
}

#[test]
fn test_undecodable_accounts_make_power_unknown() {
    init_logger();

    let registrar = RegistrarAccount {
        address: key(1),
        registrar: mock_registrar(),
    };
    let lost = key(2);
    let partial = key(3);

    let mut broken = mock_voter(key(1), lost, lost).to_account_data();
    broken[deposit_slot_offset(0) + LOCKUP_KIND] = 9;
    let mut broken_too = mock_voter(key(1), partial, partial).to_account_data();
    broken_too.truncate(VOTER_DEPOSITS + 10);
    let mut fine = mock_voter(key(1), partial, partial);
    fine.deposits[0] = deposit(3_000000, LockupKind::None, NOW, 0);

    let accounts = ProgramAccounts::classify(&[
        (key(10), broken),
        (key(11), broken_too),
        (key(12), fine.to_account_data()),
    ]);
    assert_eq!(accounts.failures.len(), 2);

    let output = Aggregator::new(&registrar, &config()).unwrap().aggregate_many(&[lost, partial], &accounts);
    assert_eq!(output.failures.len(), 2);

    let lost_result = &output.results[&lost];
    assert_eq!(lost_result.status, PowerStatus::Unknown);
    assert_eq!(lost_result.failed_accounts, vec![key(10)]);
    assert_eq!(WalletPowerReport::from(lost_result).total_power, None);

    let partial_result = &output.results[&partial];
    assert_eq!(partial_result.status, PowerStatus::Partial);
    assert_eq!(partial_result.total_power, 3.0);
    assert_eq!(partial_result.failed_accounts, vec![key(11)]);
}

#[test]
fn test_other_registrars_are_ignored() {
    let registrar = RegistrarAccount {
        address: key(1),
        registrar: mock_registrar(),
    };
    let wallet = key(2);
    let mut foreign = mock_voter(key(99), wallet, wallet);
    foreign.deposits[0] = deposit(1_000000, LockupKind::None, NOW, 0);
    let accounts = ProgramAccounts::classify(&[(key(10), foreign.to_account_data())]);

    let output = Aggregator::new(&registrar, &config()).unwrap().aggregate_many(&[wallet], &accounts);
    assert_eq!(output.foreign_accounts, 1);
    assert_eq!(output.results[&wallet].total_power, 0.0);
    assert_eq!(output.results[&wallet].status, PowerStatus::Known);
}

#[test]
fn test_parallel_matches_sequential() {
    let registrar = RegistrarAccount {
        address: key(1),
        registrar: mock_registrar(),
    };
    let wallets: Vec<Pubkey> = (0..12).map(|n| key(100 + n)).collect();
    let kinds = [
        LockupKind::None,
        LockupKind::Daily,
        LockupKind::Monthly,
        LockupKind::Cliff,
        LockupKind::Constant,
    ];

    let mut test_config = TestConfig::default();
    for n in 0..300u16 {
        let authority = wallets[n as usize % wallets.len()];
        let voter_authority = wallets[(n as usize * 5) % wallets.len()];
        let mut voter = mock_voter(key(1), authority, voter_authority);
        for slot in 0..(n as usize % 5) {
            voter.deposits[slot] = deposit(
                (n as u64 + 1) * 1_234_567 + slot as u64,
                kinds[(n as usize + slot) % kinds.len()],
                NOW,
                (n as i64 * 86_413) % (3 * SECS_PER_YEAR),
            );
        }
        let mut data = voter.to_account_data();
        if n % 37 == 0 {
            data[deposit_slot_offset(31) + LOCKUP_KIND] = 200;
        }
        test_config.add_account(key(1000 + n), data);
    }

    let sequential_accounts = ProgramAccounts::classify(&test_config.accounts);
    let parallel_accounts = ProgramAccounts::classify_par(&test_config.accounts);
    assert_eq!(sequential_accounts.voters, parallel_accounts.voters);
    assert_eq!(sequential_accounts.failures, parallel_accounts.failures);

    let aggregator = Aggregator::new(&registrar, &config()).unwrap();
    let sequential = aggregator.aggregate_many(&wallets, &sequential_accounts);
    let parallel = aggregator.aggregate_many_par(&wallets, &parallel_accounts);
    assert_eq!(sequential.results, parallel.results);
    assert_eq!(sequential.failures.len(), parallel.failures.len());
    assert!(sequential
        .results
        .values()
        .any(|result| result.status == PowerStatus::Partial));
}

#[test]
fn test_repeated_listing_counts_once() {
    let registrar = RegistrarAccount {
        address: key(1),
        registrar: mock_registrar(),
    };
    let wallet = key(2);
    let mut voter = mock_voter(key(1), wallet, wallet);
    voter.deposits[0] = deposit(10_000000, LockupKind::None, NOW, 0);
    let data = voter.to_account_data();

    // the same account on two overlapping pages
    let listing = vec![(key(10), data.clone()), (key(10), data)];
    let aggregator = Aggregator::new(&registrar, &config()).unwrap();
    for accounts in [
        ProgramAccounts::classify(&listing),
        ProgramAccounts::classify_par(&listing),
    ] {
        let result = aggregator.aggregate(&wallet, &accounts);
        assert_eq!(result.total_power, 10.0);
        assert_eq!(result.accounts.len(), 1);
        assert_eq!(result.deposits.len(), 1);
    }
}

#[test]
fn test_registrar_without_voting_mint_has_no_power() {
    let registrar = RegistrarAccount {
        address: key(1),
        registrar: Registrar::default(),
    };
    let funded = key(2);
    let empty = key(3);
    let mut voter = mock_voter(key(1), funded, funded);
    voter.deposits[0] = deposit(10_000000, LockupKind::None, NOW, 0);

    let mut test_config = TestConfig::default();
    test_config.add_account(key(1), registrar.registrar.to_account_data());
    test_config.add_account(key(10), voter.to_account_data());
    test_config.add_account(key(11), mock_voter(key(1), empty, empty).to_account_data());

    // neither wallet gets a result, funded or not
    let err = Aggregator::new(&registrar, &config()).err().unwrap();
    assert_eq!(err.kind, ConfigurationErrorKind::NoActiveVotingMint);
    assert_eq!(err.registrar, Some(key(1)));

    match evaluate_snapshot(
        &test_config.to_rpc_json(),
        &key(1),
        &[funded, empty],
        &config(),
    ) {
        Err(EngineError::Configuration(err)) => {
            assert_eq!(err.kind, ConfigurationErrorKind::NoActiveVotingMint)
        }
        other => panic!("unexpected {:?}", other),
    }
}

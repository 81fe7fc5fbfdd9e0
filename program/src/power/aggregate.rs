use super::calculator::{DepositPower, PowerCalculator};
use crate::accounts::{AccountFailure, ProgramAccounts, RegistrarAccount, VoterAccount};
use crate::config::EngineConfig;
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::Pubkey;
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};

/// How a Voter account's power reaches a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PowerSource {
    /// The wallet owns the deposits.
    Native,
    /// Another wallet owns the deposits and made this one its voter authority.
    Delegated,
}

impl PowerSource {
    /// An account whose authority is also its voter authority only ever
    /// counts as native.
    pub fn classify(header: &VoterHeader, wallet: &Pubkey) -> Option<Self> {
        if header.authority == *wallet {
            Some(PowerSource::Native)
        } else if header.voter_authority == *wallet && header.is_delegated() {
            Some(PowerSource::Delegated)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PowerSource::Native => "native",
            PowerSource::Delegated => "delegated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerStatus {
    /// Every matching account was evaluated.
    Known,
    /// Some matching accounts failed to decode; the totals cover the others.
    Partial,
    /// All matching accounts failed to decode; the totals mean nothing.
    Unknown,
}

impl PowerStatus {
    pub fn name(self) -> &'static str {
        match self {
            PowerStatus::Known => "known",
            PowerStatus::Partial => "partial",
            PowerStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountPower {
    pub voter: Pubkey,
    pub source: PowerSource,
    pub power: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalletDeposit {
    pub voter: Pubkey,
    pub source: PowerSource,
    pub deposit: DepositPower,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalletPowerResult {
    pub wallet: Pubkey,
    pub status: PowerStatus,
    pub native_power: f64,
    pub delegated_power: f64,
    pub total_power: f64,
    /// Every matching Voter account, sorted by address.
    pub accounts: Vec<AccountPower>,
    /// Every counted deposit, sorted by account address and slot.
    pub deposits: Vec<WalletDeposit>,
    /// Matching accounts that could not be evaluated.
    pub failed_accounts: Vec<Pubkey>,
}

#[derive(Debug, Clone, Default)]
pub struct AggregateOutput {
    pub results: BTreeMap<Pubkey, WalletPowerResult>,
    /// Accounts of the input that failed to decode.
    pub failures: Vec<AccountFailure>,
    /// Voter accounts of other registrars that were ignored.
    pub foreign_accounts: usize,
}

#[derive(Debug, Default)]
struct WalletAccumulator {
    accounts: Vec<AccountPower>,
    deposits: Vec<WalletDeposit>,
    failed_accounts: Vec<Pubkey>,
}

impl WalletAccumulator {
    fn merge(&mut self, other: WalletAccumulator) {
        self.accounts.extend(other.accounts);
        self.deposits.extend(other.deposits);
        self.failed_accounts.extend(other.failed_accounts);
    }

    fn finish(mut self, wallet: Pubkey) -> WalletPowerResult {
        self.accounts
            .sort_by(|a, b| (a.voter, a.source).cmp(&(b.voter, b.source)));
        self.deposits.sort_by(|a, b| {
            (a.voter, a.deposit.deposit_entry_index, a.source).cmp(&(
                b.voter,
                b.deposit.deposit_entry_index,
                b.source,
            ))
        });
        self.failed_accounts.sort();
        self.failed_accounts.dedup();

        let sum = |source: PowerSource| -> f64 {
            self.deposits
                .iter()
                .filter(|d| d.source == source)
                .map(|d| d.deposit.power)
                .sum()
        };
        let native_power = sum(PowerSource::Native);
        let delegated_power = sum(PowerSource::Delegated);

        let status = match (self.accounts.is_empty(), self.failed_accounts.is_empty()) {
            (_, true) => PowerStatus::Known,
            (false, false) => PowerStatus::Partial,
            (true, false) => PowerStatus::Unknown,
        };

        WalletPowerResult {
            wallet,
            status,
            native_power,
            delegated_power,
            total_power: native_power + delegated_power,
            accounts: self.accounts,
            deposits: self.deposits,
            failed_accounts: self.failed_accounts,
        }
    }
}

/// Per-worker accumulator; merged by concatenation, so workers never share.
#[derive(Debug, Default)]
struct PartialOutput {
    wallets: HashMap<Pubkey, WalletAccumulator>,
    foreign_accounts: usize,
}

impl PartialOutput {
    fn merge(mut self, other: PartialOutput) -> PartialOutput {
        for (wallet, accumulator) in other.wallets {
            self.wallets.entry(wallet).or_default().merge(accumulator);
        }
        self.foreign_accounts += other.foreign_accounts;
        self
    }
}

/// The wallets of `targets` that `header` routes power to.
fn routes(header: &VoterHeader, targets: &HashSet<Pubkey>) -> Vec<(Pubkey, PowerSource)> {
    [header.authority, header.voter_authority]
        .into_iter()
        .filter(|wallet| targets.contains(wallet))
        .filter_map(|wallet| PowerSource::classify(header, &wallet).map(|source| (wallet, source)))
        .fold(Vec::with_capacity(2), |mut routes, route| {
            if !routes.contains(&route) {
                routes.push(route);
            }
            routes
        })
}

/// Sums Voter power per wallet for one registrar.
///
/// A wallet may own any number of Voter accounts; all of them count. No
/// account is ever preferred over another.
pub struct Aggregator<'a> {
    registrar_address: Pubkey,
    calculator: PowerCalculator<'a>,
}

impl<'a> Aggregator<'a> {
    /// Fails for a registrar whose voting mints can't weigh deposits. Every
    /// wallet's power under it is unknown, so there is nothing to aggregate.
    pub fn new(
        registrar: &'a RegistrarAccount,
        config: &EngineConfig,
    ) -> Result<Self, ConfigurationError> {
        let calculator = PowerCalculator::new(&registrar.registrar, config).map_err(|err| {
            let err = err.for_registrar(registrar.address);
            warn!("cannot evaluate registrar: {}", err);
            err
        })?;
        Ok(Aggregator {
            registrar_address: registrar.address,
            calculator,
        })
    }

    pub fn calculator(&self) -> &PowerCalculator<'a> {
        &self.calculator
    }

    /// Native and delegated power of a single wallet.
    pub fn aggregate(&self, wallet: &Pubkey, accounts: &ProgramAccounts) -> WalletPowerResult {
        let mut output = self.aggregate_many(&[*wallet], accounts);
        output
            .results
            .remove(wallet)
            .unwrap_or_else(|| WalletAccumulator::default().finish(*wallet))
    }

    /// Evaluates every wallet of `wallets` in one pass over `accounts`.
    pub fn aggregate_many(&self, wallets: &[Pubkey], accounts: &ProgramAccounts) -> AggregateOutput {
        let targets: HashSet<Pubkey> = wallets.iter().copied().collect();
        let partial = accounts
            .voters
            .iter()
            .fold(PartialOutput::default(), |partial, account| {
                self.accumulate(&targets, partial, account)
            });
        self.finish(&targets, accounts, partial)
    }

    /// `aggregate_many` with the accounts split across the rayon thread pool.
    ///
    /// Each worker folds into its own accumulator and the accumulators are
    /// merged at the end. Results are sorted before summing, so they match
    /// the sequential version exactly.
    pub fn aggregate_many_par(
        &self,
        wallets: &[Pubkey],
        accounts: &ProgramAccounts,
    ) -> AggregateOutput {
        let targets: HashSet<Pubkey> = wallets.iter().copied().collect();
        let partial = accounts
            .voters
            .par_iter()
            .fold(PartialOutput::default, |partial, account| {
                self.accumulate(&targets, partial, account)
            })
            .reduce(PartialOutput::default, PartialOutput::merge);
        self.finish(&targets, accounts, partial)
    }

    fn accumulate(
        &self,
        targets: &HashSet<Pubkey>,
        mut partial: PartialOutput,
        account: &VoterAccount,
    ) -> PartialOutput {
        let header = account.voter.header();
        if header.registrar != self.registrar_address {
            partial.foreign_accounts += 1;
            return partial;
        }
        let routes = routes(&header, targets);
        if routes.is_empty() {
            return partial;
        }

        let total = self.calculator.voter_total(&account.voter);
        for (wallet, source) in routes {
            debug!(
                "voter {} -> {} ({}): {}",
                account.address,
                wallet,
                source.name(),
                total.total_power
            );
            let accumulator = partial.wallets.entry(wallet).or_default();
            accumulator.accounts.push(AccountPower {
                voter: account.address,
                source,
                power: total.total_power,
            });
            accumulator
                .deposits
                .extend(total.deposits.iter().map(|deposit| WalletDeposit {
                    voter: account.address,
                    source,
                    deposit: deposit.clone(),
                }));
        }
        partial
    }

    fn finish(
        &self,
        targets: &HashSet<Pubkey>,
        accounts: &ProgramAccounts,
        mut partial: PartialOutput,
    ) -> AggregateOutput {
        // voter accounts that failed to decode still count against the
        // wallets named in their header
        for failure in &accounts.failures {
            let header = match &failure.header {
                Some(header) if header.registrar == self.registrar_address => header,
                _ => continue,
            };
            for (wallet, _) in routes(header, targets) {
                partial
                    .wallets
                    .entry(wallet)
                    .or_default()
                    .failed_accounts
                    .push(failure.address);
            }
        }

        if partial.foreign_accounts > 0 {
            debug!(
                "ignored {} voter accounts of other registrars",
                partial.foreign_accounts
            );
        }

        let results = targets
            .iter()
            .map(|wallet| {
                let accumulator = partial.wallets.remove(wallet).unwrap_or_default();
                (*wallet, accumulator.finish(*wallet))
            })
            .collect();

        AggregateOutput {
            results,
            failures: accounts.failures.clone(),
            foreign_accounts: partial.foreign_accounts,
        }
    }
}

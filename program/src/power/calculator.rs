use super::multiplier::multiplier;
use crate::config::EngineConfig;
use crate::error::*;
use crate::state::*;
use log::trace;

/// Why a deposit slot does not count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Unused,
    ZeroAmount,
    /// Only with `EngineConfig::exclude_not_above_initial_lock`.
    NotAboveInitialLock,
}

/// The voting power of one counted deposit slot.
#[derive(Debug, Clone, PartialEq)]
pub struct DepositPower {
    pub deposit_entry_index: u8,
    /// The voting mint that was actually used, after any fallback.
    pub voting_mint_config_idx: u8,
    pub lockup: Lockup,
    pub amount_deposited_native: u64,
    /// `amount_deposited_native` in whole tokens.
    pub amount: f64,
    pub multiplier: f64,
    pub power: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DepositOutcome {
    Counted(DepositPower),
    Excluded(Exclusion),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoterTotal {
    pub total_power: f64,
    /// Counted deposits only, in slot order.
    pub deposits: Vec<DepositPower>,
}

/// Computes deposit and Voter power against one registrar at a fixed time.
#[derive(Debug, Clone, Copy)]
pub struct PowerCalculator<'a> {
    registrar: &'a Registrar,
    /// Weighs deposits whose voting mint index is not configured.
    fallback_mint: (usize, &'a VotingMintConfig),
    now_ts: i64,
    decimals_factor: f64,
    exclude_not_above_initial_lock: bool,
}

impl<'a> PowerCalculator<'a> {
    /// Fails when the registrar's voting mints can't weigh deposits; such a
    /// registrar yields no power at all, not zero power.
    ///
    /// The registrar's own debug time offset applies on top of the configured
    /// clock, as it does on chain.
    pub fn new(registrar: &'a Registrar, config: &EngineConfig) -> Result<Self, ConfigurationError> {
        registrar.validate()?;
        let fallback_mint = registrar.active_voting_mint().ok_or_else(|| {
            ConfigurationError::new(ConfigurationErrorKind::NoActiveVotingMint)
        })?;
        Ok(PowerCalculator {
            registrar,
            fallback_mint,
            now_ts: config
                .clock_unix_timestamp()
                .saturating_add(registrar.time_offset),
            decimals_factor: config.decimals_factor(),
            exclude_not_above_initial_lock: config.exclude_not_above_initial_lock,
        })
    }

    pub fn registrar(&self) -> &'a Registrar {
        self.registrar
    }

    pub fn now_ts(&self) -> i64 {
        self.now_ts
    }

    pub fn exclusion(&self, entry: &DepositEntry) -> Option<Exclusion> {
        if !entry.is_used {
            Some(Exclusion::Unused)
        } else if entry.amount_deposited_native == 0 {
            Some(Exclusion::ZeroAmount)
        } else if self.exclude_not_above_initial_lock
            && entry.amount_deposited_native <= entry.amount_initially_locked_native
        {
            Some(Exclusion::NotAboveInitialLock)
        } else {
            None
        }
    }

    pub fn deposit_power(&self, deposit_entry_index: u8, entry: &DepositEntry) -> DepositOutcome {
        if let Some(exclusion) = self.exclusion(entry) {
            return DepositOutcome::Excluded(exclusion);
        }

        let (mint_index, config) = self
            .registrar
            .configured_voting_mint(entry.voting_mint_config_idx)
            .unwrap_or(self.fallback_mint);
        let amount = entry.amount_deposited_native as f64 / self.decimals_factor;
        let multiplier = multiplier(&entry.lockup, config, self.now_ts);
        DepositOutcome::Counted(DepositPower {
            deposit_entry_index,
            voting_mint_config_idx: mint_index as u8,
            lockup: entry.lockup,
            amount_deposited_native: entry.amount_deposited_native,
            amount,
            multiplier,
            power: amount * multiplier,
        })
    }

    /// Sums the power of every counted slot of `voter`.
    pub fn voter_total(&self, voter: &Voter) -> VoterTotal {
        let mut total = VoterTotal::default();
        for (index, entry) in voter.deposits.iter().enumerate() {
            match self.deposit_power(index as u8, entry) {
                DepositOutcome::Counted(deposit) => {
                    total.total_power += deposit.power;
                    total.deposits.push(deposit);
                }
                DepositOutcome::Excluded(exclusion) => {
                    if *entry != DepositEntry::default() {
                        trace!(
                            "voter {}: skipping deposit {} ({:?})",
                            voter.authority,
                            index,
                            exclusion
                        );
                    }
                }
            }
        }
        total
    }
}

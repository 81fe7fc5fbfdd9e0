//! Serializable views of aggregation results, for callers that persist or
//! render them. Addresses are base58 strings.

use crate::power::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositReport {
    pub voter: String,
    /// "native" or "delegated"
    pub source: &'static str,
    pub deposit_entry_index: u8,
    pub voting_mint_config_idx: u8,
    pub lockup_kind: &'static str,
    pub lockup_start_ts: i64,
    pub lockup_end_ts: i64,
    pub amount_deposited_native: u64,
    pub amount: f64,
    pub multiplier: f64,
    pub power: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletPowerReport {
    pub wallet: String,
    /// "known", "partial" or "unknown"
    pub status: &'static str,

    /// Missing when the power is unknown, which is not the same as zero.
    pub native_power: Option<f64>,
    pub delegated_power: Option<f64>,
    pub total_power: Option<f64>,

    pub deposits: Vec<DepositReport>,
    pub failed_accounts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    pub account: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub wallets: Vec<WalletPowerReport>,
    pub failures: Vec<FailureReport>,
    pub foreign_accounts: usize,
}

impl From<&WalletDeposit> for DepositReport {
    fn from(deposit: &WalletDeposit) -> Self {
        let power = &deposit.deposit;
        DepositReport {
            voter: deposit.voter.to_string(),
            source: deposit.source.name(),
            deposit_entry_index: power.deposit_entry_index,
            voting_mint_config_idx: power.voting_mint_config_idx,
            lockup_kind: power.lockup.kind.name(),
            lockup_start_ts: power.lockup.start_ts,
            lockup_end_ts: power.lockup.end_ts,
            amount_deposited_native: power.amount_deposited_native,
            amount: power.amount,
            multiplier: power.multiplier,
            power: power.power,
        }
    }
}

impl From<&WalletPowerResult> for WalletPowerReport {
    fn from(result: &WalletPowerResult) -> Self {
        let known = |value: f64| (result.status != PowerStatus::Unknown).then_some(value);
        WalletPowerReport {
            wallet: result.wallet.to_string(),
            status: result.status.name(),
            native_power: known(result.native_power),
            delegated_power: known(result.delegated_power),
            total_power: known(result.total_power),
            deposits: result.deposits.iter().map(DepositReport::from).collect(),
            failed_accounts: result
                .failed_accounts
                .iter()
                .map(|address| address.to_string())
                .collect(),
        }
    }
}

impl From<&AggregateOutput> for AggregateReport {
    fn from(output: &AggregateOutput) -> Self {
        AggregateReport {
            wallets: output.results.values().map(WalletPowerReport::from).collect(),
            failures: output
                .failures
                .iter()
                .map(|failure| FailureReport {
                    account: failure.address.to_string(),
                    error: failure.error.to_string(),
                })
                .collect(),
            foreign_accounts: output.foreign_accounts,
        }
    }
}

impl AggregateReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

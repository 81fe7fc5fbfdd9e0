//! Voting power of wallets under a Voter Stake Registry (VSR) realm.
//!
//! Works off raw account bytes: decode the program's Voter and Registrar
//! accounts against their fixed layout, weigh every deposit by its lockup
//! multiplier and sum the result per wallet, split into native power (the
//! wallet's own deposits) and delegated power (deposits whose owner made the
//! wallet its voter authority).
//!
//! Fetching the accounts is left to the caller; `snapshot` reads the JSON a
//! `getProgramAccounts` call returns.

use anchor_lang::prelude::Pubkey;

pub use accounts::*;
pub use config::*;
pub use error::*;
pub use power::*;

pub mod accounts;
pub mod config;
pub mod error;
pub mod layout;
pub mod power;
pub mod report;
pub mod snapshot;
pub mod state;

#[macro_use]
extern crate static_assertions;

/// Evaluates `wallets` against the registrar at `registrar` using a
/// `getProgramAccounts` listing of the VSR program.
///
/// A registrar that is missing, undecodable or can't weigh deposits is an
/// error for the whole evaluation.
pub fn evaluate_snapshot(
    json: &str,
    registrar: &Pubkey,
    wallets: &[Pubkey],
    config: &EngineConfig,
) -> Result<AggregateOutput, EngineError> {
    let snapshot = snapshot::parse_program_accounts(json)?;
    let accounts = snapshot.classify();
    let registrar = accounts.require_registrar(registrar)?;
    let aggregator = Aggregator::new(registrar, config)?;
    Ok(aggregator.aggregate_many(wallets, &accounts))
}

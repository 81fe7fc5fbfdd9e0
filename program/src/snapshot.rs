//! Reads program account listings as returned by `getProgramAccounts`.
//!
//! Both the bare array and the full JSON-RPC response are accepted:
//!
//! ```text
//! [{ "pubkey": "...", "account": { "data": ["<base64>", "base64"], ... } }, ...]
//! { "jsonrpc": "2.0", "result": [ ... ], "id": 1 }
//! ```

use crate::accounts::ProgramAccounts;
use crate::error::*;
use anchor_lang::prelude::Pubkey;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::warn;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Response { result: Vec<KeyedAccount> },
    Accounts(Vec<KeyedAccount>),
}

#[derive(Deserialize)]
struct KeyedAccount {
    pubkey: String,
    account: AccountData,
}

#[derive(Deserialize)]
struct AccountData {
    /// `[data, encoding]`
    data: (String, String),
}

/// The accounts of a listing, split from the entries that could not be read.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub accounts: Vec<(Pubkey, Vec<u8>)>,
    pub rejected: Vec<SnapshotError>,
}

impl Snapshot {
    pub fn classify(&self) -> ProgramAccounts {
        ProgramAccounts::classify(&self.accounts)
    }

    pub fn classify_par(&self) -> ProgramAccounts {
        ProgramAccounts::classify_par(&self.accounts)
    }
}

fn read_entry(entry: KeyedAccount) -> Result<(Pubkey, Vec<u8>), SnapshotError> {
    let pubkey = Pubkey::from_str(&entry.pubkey).map_err(|_| SnapshotError::InvalidPubkey {
        value: entry.pubkey.clone(),
    })?;
    let (data, encoding) = entry.account.data;
    if encoding != "base64" {
        return Err(SnapshotError::UnsupportedEncoding { pubkey, encoding });
    }
    let data = STANDARD
        .decode(data)
        .map_err(|source| SnapshotError::Base64 { pubkey, source })?;
    Ok((pubkey, data))
}

/// Parses a `getProgramAccounts` listing.
///
/// Only a document that is not a listing at all is an error; entries with a
/// bad address or undecodable data end up in `Snapshot::rejected`.
pub fn parse_program_accounts(json: &str) -> Result<Snapshot, SnapshotError> {
    let entries = match serde_json::from_str(json)? {
        Listing::Response { result } => result,
        Listing::Accounts(accounts) => accounts,
    };

    let mut snapshot = Snapshot::default();
    for entry in entries {
        match read_entry(entry) {
            Ok(account) => snapshot.accounts.push(account),
            Err(err) => {
                warn!("rejecting snapshot entry: {}", err);
                snapshot.rejected.push(err);
            }
        }
    }
    Ok(snapshot)
}

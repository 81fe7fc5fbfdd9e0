use std::str::FromStr;

use anchor_lang::prelude::Pubkey;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lazy_static::lazy_static;

pub use vsr_client::*;

pub mod vsr_client;

lazy_static! {
    pub static ref MANGO_MINT_PK: Pubkey =
        Pubkey::from_str("MangoCzJ36AjZyKwVj3VnYU4GTonjfVEnJmvvWaxLac").unwrap();
}

pub const SECS_PER_YEAR: i64 = 365 * 24 * 60 * 60;

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Deterministic, distinct test addresses.
#[allow(dead_code)]
pub fn key(seed: u16) -> Pubkey {
    let mut bytes = [7u8; 32];
    bytes[..2].copy_from_slice(&seed.to_le_bytes());
    Pubkey::new_from_array(bytes)
}

/// The raw accounts of a mock VSR program.
#[derive(Default)]
pub struct TestConfig {
    pub accounts: Vec<(Pubkey, Vec<u8>)>,
}

impl TestConfig {
    #[allow(dead_code)]
    pub fn add_account(&mut self, address: Pubkey, data: Vec<u8>) {
        self.accounts.push((address, data));
    }

    /// The accounts as a `getProgramAccounts` response with base64 data.
    #[allow(dead_code)]
    pub fn to_rpc_json(&self) -> String {
        let result: Vec<serde_json::Value> = self
            .accounts
            .iter()
            .map(|(address, data)| {
                serde_json::json!({
                    "pubkey": address.to_string(),
                    "account": {
                        "data": [STANDARD.encode(data), "base64"],
                        "executable": false,
                        "lamports": 1_000_000,
                        "owner": "4Q6WW2ouZ6V3iaNm56MTd5n2tnTm4C5fiH8miFHnAFHo",
                        "rentEpoch": 0,
                    },
                })
            })
            .collect();
        serde_json::json!({ "jsonrpc": "2.0", "result": result, "id": 1 }).to_string()
    }
}

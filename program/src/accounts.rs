//! Splits the raw accounts of the Voter Stake Registry program by type.

use crate::error::*;
use crate::layout::{AccountKind, DISCRIMINATOR_SIZE};
use crate::state::*;
use anchor_lang::prelude::Pubkey;
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterAccount {
    pub address: Pubkey,
    pub voter: Voter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrarAccount {
    pub address: Pubkey,
    pub registrar: Registrar,
}

impl RegistrarAccount {
    pub fn decode(address: Pubkey, data: &[u8]) -> Result<Self, DecodeError> {
        let registrar = decode_registrar(data).map_err(|err| err.for_account(address))?;
        Ok(RegistrarAccount { address, registrar })
    }
}

/// An account that contributed no power, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFailure {
    pub address: Pubkey,
    /// Set when the Voter header was still readable.
    pub header: Option<VoterHeader>,
    pub error: AccountError,
}

/// The decoded contents of a program account listing, one entry per
/// account address.
#[derive(Debug, Clone, Default)]
pub struct ProgramAccounts {
    pub voters: Vec<VoterAccount>,
    pub registrars: Vec<RegistrarAccount>,
    pub failures: Vec<AccountFailure>,
}

enum Decoded {
    Voter(VoterAccount),
    Registrar(RegistrarAccount),
    Failed(AccountFailure),
}

impl Decoded {
    fn address(&self) -> Pubkey {
        match self {
            Decoded::Voter(voter) => voter.address,
            Decoded::Registrar(registrar) => registrar.address,
            Decoded::Failed(failure) => failure.address,
        }
    }
}

fn decode_account(address: Pubkey, data: &[u8]) -> Decoded {
    let result = match AccountKind::from_data(data) {
        Some(AccountKind::Voter) => decode_voter(data)
            .map(|voter| Decoded::Voter(VoterAccount { address, voter })),
        Some(AccountKind::Registrar) => decode_registrar(data)
            .map(|registrar| Decoded::Registrar(RegistrarAccount { address, registrar })),
        None if data.len() < DISCRIMINATOR_SIZE => Err(DecodeError::new(
            DecodeErrorKind::BufferTooShort {
                expected: DISCRIMINATOR_SIZE,
                actual: data.len(),
            },
        )
        .at(data.len())),
        None => Err(DecodeError::new(DecodeErrorKind::DiscriminatorMismatch {
            expected: AccountKind::Voter.discriminator(),
            actual: data[..DISCRIMINATOR_SIZE].to_vec(),
        })
        .at(0)),
    };

    result.unwrap_or_else(|err| {
        let header = decode_voter_header(data).ok();
        if header.is_some() {
            warn!("skipping voter account {}: {}", address, err);
        } else {
            debug!("skipping account {}: {}", address, err);
        }
        Decoded::Failed(AccountFailure {
            address,
            header,
            error: err.for_account(address).into(),
        })
    })
}

impl ProgramAccounts {
    /// Decodes every account, keyed by its discriminator.
    ///
    /// Undecodable accounts end up in `failures`; one bad account never
    /// stops the rest from being decoded. An address listed more than once
    /// (overlapping pages, merged snapshots) is kept at its first listing.
    pub fn classify(accounts: &[(Pubkey, Vec<u8>)]) -> Self {
        Self::from_decoded(
            accounts
                .iter()
                .map(|(address, data)| decode_account(*address, data)),
        )
    }

    /// Like `classify`, decoding on the rayon thread pool.
    pub fn classify_par(accounts: &[(Pubkey, Vec<u8>)]) -> Self {
        let decoded: Vec<Decoded> = accounts
            .par_iter()
            .map(|(address, data)| decode_account(*address, data))
            .collect();
        Self::from_decoded(decoded)
    }

    pub fn registrar(&self, address: &Pubkey) -> Option<&RegistrarAccount> {
        self.registrars.iter().find(|r| r.address == *address)
    }

    /// The registrar at `address`, or why it is not available.
    pub fn require_registrar(&self, address: &Pubkey) -> Result<&RegistrarAccount, AccountError> {
        if let Some(registrar) = self.registrar(address) {
            return Ok(registrar);
        }
        match self.failures.iter().find(|f| f.address == *address) {
            Some(failure) => Err(failure.error.clone()),
            None => Err(ConfigurationError::new(ConfigurationErrorKind::RegistrarNotFound)
                .for_registrar(*address)
                .into()),
        }
    }

    fn from_decoded(decoded: impl IntoIterator<Item = Decoded>) -> Self {
        let mut accounts = ProgramAccounts::default();
        let mut seen = HashSet::new();
        for decoded in decoded {
            let address = decoded.address();
            if !seen.insert(address) {
                warn!("ignoring repeated listing of account {}", address);
                continue;
            }
            match decoded {
                Decoded::Voter(voter) => accounts.voters.push(voter),
                Decoded::Registrar(registrar) => accounts.registrars.push(registrar),
                Decoded::Failed(failure) => accounts.failures.push(failure),
            }
        }
        accounts
    }
}

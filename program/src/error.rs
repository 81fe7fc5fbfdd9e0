use anchor_lang::prelude::Pubkey;
use thiserror::Error;

fn location(account: &Option<Pubkey>, offset: &Option<usize>) -> String {
    match (account, offset) {
        (Some(account), Some(offset)) => format!(" (account {}, offset {})", account, offset),
        (Some(account), None) => format!(" (account {})", account),
        (None, Some(offset)) => format!(" (offset {})", offset),
        (None, None) => String::new(),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("buffer too short: need {expected} bytes, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("discriminator mismatch: expected {expected:?}, got {actual:?}")]
    DiscriminatorMismatch { expected: [u8; 8], actual: Vec<u8> },

    #[error("invalid lockup kind tag {tag}")]
    InvalidLockupKind { tag: u8 },
}

/// A Voter or Registrar buffer that could not be decoded.
///
/// Fatal for that one account only: aggregation records it and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}{}", location(.account, .offset))]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub account: Option<Pubkey>,
    /// Byte offset into the account data where decoding failed.
    pub offset: Option<usize>,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind) -> Self {
        Self {
            kind,
            account: None,
            offset: None,
        }
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn for_account(mut self, account: Pubkey) -> Self {
        self.account = Some(account);
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationErrorKind {
    #[error("no voting mint has a nonzero baseline vote weight")]
    NoActiveVotingMint,

    #[error("voting mint {mint_index} has a lockup saturation of zero")]
    ZeroLockupSaturation { mint_index: usize },

    #[error("registrar account not found")]
    RegistrarNotFound,
}

/// A registrar whose voting mint configuration cannot produce a multiplier.
///
/// Never papered over with default factors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}{}", location(.registrar, &None))]
pub struct ConfigurationError {
    pub kind: ConfigurationErrorKind,
    pub registrar: Option<Pubkey>,
}

impl ConfigurationError {
    pub fn new(kind: ConfigurationErrorKind) -> Self {
        Self {
            kind,
            registrar: None,
        }
    }

    pub fn for_registrar(mut self, registrar: Pubkey) -> Self {
        self.registrar = Some(registrar);
        self
    }
}

/// Why a single account produced no power.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid account address {value:?}")]
    InvalidPubkey { value: String },

    #[error("account {pubkey} uses encoding {encoding:?}, only base64 is supported")]
    UnsupportedEncoding { pubkey: Pubkey, encoding: String },

    #[error("account {pubkey} data is not valid base64: {source}")]
    Base64 {
        pubkey: Pubkey,
        source: base64::DecodeError,
    },
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

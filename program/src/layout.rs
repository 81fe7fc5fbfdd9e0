//! Byte layout of the Voter Stake Registry accounts.
//!
//! All offsets are absolute offsets into the raw account data, i.e. they
//! include the 8 byte Anchor discriminator at the start of every account.
//! Integers are little-endian. Nothing in here parses anything; the decoders
//! in `state` read through these constants and nothing else.
//!
//! Voter:
//!
//! ```text
//!   [0..8]       discriminator
//!   [8..40]      registrar
//!   [40..72]     authority
//!   [72..104]    voter_authority
//!   [104]        voter_bump
//!   [105]        voter_weight_record_bump
//!   [106..112]   padding
//!   [112..2672]  deposits: 32 x DepositEntry (80 bytes each)
//!   [2672..2728] reserved
//! ```
//!
//! Registrar:
//!
//! ```text
//!   [0..8]       discriminator
//!   [8..40]      governance_program_id
//!   [40..72]     realm
//!   [72..104]    governing_token_mint
//!   [104..136]   realm_authority
//!   [136..168]   reserved
//!   [168..776]   voting_mints: 4 x VotingMintConfig (152 bytes each)
//!   [776..784]   time_offset
//!   [784]        bump
//!   [785..880]   reserved
//! ```

pub const DISCRIMINATOR_SIZE: usize = 8;
pub const PUBKEY_SIZE: usize = 32;

/// `sha256("account:Voter")[..8]`
pub const VOTER_DISCRIMINATOR: [u8; 8] = [241, 93, 35, 191, 254, 147, 17, 202];
/// `sha256("account:Registrar")[..8]`
pub const REGISTRAR_DISCRIMINATOR: [u8; 8] = [193, 202, 205, 51, 78, 168, 150, 128];

//
// Voter
//

pub const VOTER_REGISTRAR: usize = DISCRIMINATOR_SIZE;
pub const VOTER_AUTHORITY: usize = VOTER_REGISTRAR + PUBKEY_SIZE;
pub const VOTER_VOTER_AUTHORITY: usize = VOTER_AUTHORITY + PUBKEY_SIZE;
pub const VOTER_BUMP: usize = VOTER_VOTER_AUTHORITY + PUBKEY_SIZE;
pub const VOTER_WEIGHT_RECORD_BUMP: usize = VOTER_BUMP + 1;
/// End of the fixed header; enough to tell who a Voter belongs to.
pub const VOTER_HEADER_END: usize = VOTER_BUMP;

pub const MAX_DEPOSITS: usize = 32;
pub const VOTER_DEPOSITS: usize = 112;
pub const VOTER_DEPOSITS_END: usize = VOTER_DEPOSITS + MAX_DEPOSITS * DEPOSIT_ENTRY_SIZE;

/// Shortest buffer that still holds every deposit slot.
pub const VOTER_MIN_SIZE: usize = VOTER_DEPOSITS_END;
pub const VOTER_ACCOUNT_SIZE: usize = 2728;

//
// DepositEntry, relative to the start of its slot
//

pub const DEPOSIT_ENTRY_SIZE: usize = 80;

pub const LOCKUP_START_TS: usize = 0;
pub const LOCKUP_END_TS: usize = 8;
pub const LOCKUP_KIND: usize = 16;
pub const LOCKUP_SIZE: usize = 32;

pub const DEPOSIT_AMOUNT_DEPOSITED_NATIVE: usize = LOCKUP_SIZE;
pub const DEPOSIT_AMOUNT_INITIALLY_LOCKED_NATIVE: usize = DEPOSIT_AMOUNT_DEPOSITED_NATIVE + 8;
pub const DEPOSIT_IS_USED: usize = DEPOSIT_AMOUNT_INITIALLY_LOCKED_NATIVE + 8;
pub const DEPOSIT_ALLOW_CLAWBACK: usize = DEPOSIT_IS_USED + 1;
pub const DEPOSIT_VOTING_MINT_CONFIG_IDX: usize = DEPOSIT_ALLOW_CLAWBACK + 1;

//
// Registrar
//

pub const REGISTRAR_GOVERNANCE_PROGRAM_ID: usize = DISCRIMINATOR_SIZE;
pub const REGISTRAR_REALM: usize = REGISTRAR_GOVERNANCE_PROGRAM_ID + PUBKEY_SIZE;
pub const REGISTRAR_GOVERNING_TOKEN_MINT: usize = REGISTRAR_REALM + PUBKEY_SIZE;
pub const REGISTRAR_REALM_AUTHORITY: usize = REGISTRAR_GOVERNING_TOKEN_MINT + PUBKEY_SIZE;
pub const REGISTRAR_VOTING_MINTS: usize = REGISTRAR_REALM_AUTHORITY + 2 * PUBKEY_SIZE;

pub const MAX_VOTING_MINTS: usize = 4;
pub const VOTING_MINT_CONFIG_SIZE: usize = 152;
pub const REGISTRAR_VOTING_MINTS_END: usize =
    REGISTRAR_VOTING_MINTS + MAX_VOTING_MINTS * VOTING_MINT_CONFIG_SIZE;

pub const REGISTRAR_TIME_OFFSET: usize = REGISTRAR_VOTING_MINTS_END;
pub const REGISTRAR_BUMP: usize = REGISTRAR_TIME_OFFSET + 8;

pub const REGISTRAR_MIN_SIZE: usize = REGISTRAR_BUMP + 1;
pub const REGISTRAR_ACCOUNT_SIZE: usize = 880;

//
// VotingMintConfig, relative to the start of its entry
//

pub const VOTING_MINT_MINT: usize = 0;
pub const VOTING_MINT_GRANT_AUTHORITY: usize = PUBKEY_SIZE;
pub const VOTING_MINT_BASELINE_FACTOR: usize = 2 * PUBKEY_SIZE;
pub const VOTING_MINT_MAX_EXTRA_FACTOR: usize = VOTING_MINT_BASELINE_FACTOR + 8;
pub const VOTING_MINT_LOCKUP_SATURATION_SECS: usize = VOTING_MINT_MAX_EXTRA_FACTOR + 8;
pub const VOTING_MINT_DIGIT_SHIFT: usize = VOTING_MINT_LOCKUP_SATURATION_SECS + 8;

const_assert_eq!(VOTER_WEIGHT_RECORD_BUMP + 1 + 6, VOTER_DEPOSITS);
const_assert_eq!(VOTER_DEPOSITS_END, 2672);
const_assert!(VOTER_DEPOSITS_END <= VOTER_ACCOUNT_SIZE);
const_assert!(VOTER_DEPOSITS % 8 == 0);
const_assert!(DEPOSIT_ENTRY_SIZE % 8 == 0);
const_assert!(DEPOSIT_VOTING_MINT_CONFIG_IDX < DEPOSIT_ENTRY_SIZE);
const_assert!(LOCKUP_KIND < LOCKUP_SIZE);

const_assert_eq!(REGISTRAR_VOTING_MINTS, 168);
const_assert_eq!(REGISTRAR_VOTING_MINTS_END, 776);
const_assert!(REGISTRAR_MIN_SIZE <= REGISTRAR_ACCOUNT_SIZE);
const_assert!(VOTING_MINT_DIGIT_SHIFT < VOTING_MINT_CONFIG_SIZE);

/// Absolute offset of deposit slot `index` in a Voter account.
pub const fn deposit_slot_offset(index: usize) -> usize {
    VOTER_DEPOSITS + index * DEPOSIT_ENTRY_SIZE
}

/// Absolute offset of voting mint entry `index` in a Registrar account.
pub const fn voting_mint_offset(index: usize) -> usize {
    REGISTRAR_VOTING_MINTS + index * VOTING_MINT_CONFIG_SIZE
}

/// The account kinds the decoder knows about, keyed by discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Voter,
    Registrar,
}

impl AccountKind {
    pub fn discriminator(self) -> [u8; 8] {
        match self {
            AccountKind::Voter => VOTER_DISCRIMINATOR,
            AccountKind::Registrar => REGISTRAR_DISCRIMINATOR,
        }
    }

    pub fn from_data(data: &[u8]) -> Option<Self> {
        let discriminator = data.get(..DISCRIMINATOR_SIZE)?;
        if discriminator == VOTER_DISCRIMINATOR {
            Some(AccountKind::Voter)
        } else if discriminator == REGISTRAR_DISCRIMINATOR {
            Some(AccountKind::Registrar)
        } else {
            None
        }
    }
}

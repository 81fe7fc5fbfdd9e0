use super::*;
use crate::layout::*;

/// The wallet-identifying prefix of a Voter account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoterHeader {
    pub registrar: Pubkey,
    pub authority: Pubkey,
    pub voter_authority: Pubkey,
}

impl VoterHeader {
    pub fn is_delegated(&self) -> bool {
        self.authority != self.voter_authority
    }
}

/// One per (wallet, registrar) pair, owning up to 32 deposit slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voter {
    pub registrar: Pubkey,

    /// Wallet that owns the deposits.
    pub authority: Pubkey,

    /// Wallet that votes with the deposits; differs from `authority` when
    /// voting rights were delegated.
    pub voter_authority: Pubkey,

    pub voter_bump: u8,
    pub voter_weight_record_bump: u8,
    pub deposits: [DepositEntry; MAX_DEPOSITS],
}

impl Default for Voter {
    fn default() -> Self {
        Voter {
            registrar: Pubkey::default(),
            authority: Pubkey::default(),
            voter_authority: Pubkey::default(),
            voter_bump: 0,
            voter_weight_record_bump: 0,
            deposits: [DepositEntry::default(); MAX_DEPOSITS],
        }
    }
}

impl Voter {
    pub fn header(&self) -> VoterHeader {
        VoterHeader {
            registrar: self.registrar,
            authority: self.authority,
            voter_authority: self.voter_authority,
        }
    }

    pub fn is_delegated(&self) -> bool {
        self.header().is_delegated()
    }

    /// Used deposits with a nonzero amount, with their slot index.
    pub fn active_deposits(&self) -> impl Iterator<Item = (usize, &DepositEntry)> {
        self.deposits
            .iter()
            .enumerate()
            .filter(|(_, deposit)| deposit.is_active())
    }

    pub fn serialize_into(&self, data: &mut [u8]) -> Result<(), DecodeError> {
        ensure_len(data, VOTER_MIN_SIZE)?;
        self.write(data);
        Ok(())
    }

    /// Full-size account data, discriminator included.
    pub fn to_account_data(&self) -> Vec<u8> {
        let mut data = vec![0; VOTER_ACCOUNT_SIZE];
        self.write(&mut data);
        data
    }

    // `data` must be at least VOTER_MIN_SIZE long
    fn write(&self, data: &mut [u8]) {
        data.fill(0);
        write_bytes(data, 0, &VOTER_DISCRIMINATOR);
        write_bytes(data, VOTER_REGISTRAR, self.registrar.as_ref());
        write_bytes(data, VOTER_AUTHORITY, self.authority.as_ref());
        write_bytes(data, VOTER_VOTER_AUTHORITY, self.voter_authority.as_ref());
        write_bytes(
            data,
            VOTER_BUMP,
            &[self.voter_bump, self.voter_weight_record_bump],
        );
        for (index, deposit) in self.deposits.iter().enumerate() {
            deposit.write(data, deposit_slot_offset(index));
        }
    }
}

/// Reads only the registrar and the two wallets of a Voter.
///
/// Lets accounts that fail a full decode still be attributed to a wallet.
pub fn decode_voter_header(data: &[u8]) -> Result<VoterHeader, DecodeError> {
    ensure_len(data, VOTER_HEADER_END)?;
    ensure_discriminator(data, VOTER_DISCRIMINATOR)?;
    Ok(VoterHeader {
        registrar: read_pubkey(data, VOTER_REGISTRAR)?,
        authority: read_pubkey(data, VOTER_AUTHORITY)?,
        voter_authority: read_pubkey(data, VOTER_VOTER_AUTHORITY)?,
    })
}

/// Decodes Voter account data, discriminator included.
///
/// Fails on a short buffer, a foreign discriminator or an unknown lockup
/// kind in any of the 32 slots, used or not.
pub fn decode_voter(data: &[u8]) -> Result<Voter, DecodeError> {
    ensure_len(data, VOTER_MIN_SIZE)?;
    ensure_discriminator(data, VOTER_DISCRIMINATOR)?;

    let mut deposits = [DepositEntry::default(); MAX_DEPOSITS];
    for (index, deposit) in deposits.iter_mut().enumerate() {
        *deposit = decode_deposit_entry(data, deposit_slot_offset(index))?;
    }

    Ok(Voter {
        registrar: read_pubkey(data, VOTER_REGISTRAR)?,
        authority: read_pubkey(data, VOTER_AUTHORITY)?,
        voter_authority: read_pubkey(data, VOTER_VOTER_AUTHORITY)?,
        voter_bump: read_u8(data, VOTER_BUMP)?,
        voter_weight_record_bump: read_u8(data, VOTER_WEIGHT_RECORD_BUMP)?,
        deposits,
    })
}

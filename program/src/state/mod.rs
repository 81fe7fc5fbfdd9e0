//! Typed Voter Stake Registry accounts and their fixed-layout codecs.

use crate::error::*;
use anchor_lang::prelude::Pubkey;

pub use deposit_entry::*;
pub use lockup::*;
pub use registrar::*;
pub use voter::*;

mod deposit_entry;
mod lockup;
mod registrar;
mod voter;

fn too_short(data: &[u8], expected: usize) -> DecodeError {
    DecodeError::new(DecodeErrorKind::BufferTooShort {
        expected,
        actual: data.len(),
    })
}

pub(crate) fn ensure_len(data: &[u8], expected: usize) -> Result<(), DecodeError> {
    if data.len() < expected {
        return Err(too_short(data, expected).at(data.len()));
    }
    Ok(())
}

pub(crate) fn ensure_discriminator(data: &[u8], expected: [u8; 8]) -> Result<(), DecodeError> {
    let actual = &data[..expected.len().min(data.len())];
    if actual != expected {
        return Err(DecodeError::new(DecodeErrorKind::DiscriminatorMismatch {
            expected,
            actual: actual.to_vec(),
        })
        .at(0));
    }
    Ok(())
}

pub(crate) fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], DecodeError> {
    data.get(offset..offset + N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| too_short(data, offset + N).at(offset))
}

pub(crate) fn read_u8(data: &[u8], offset: usize) -> Result<u8, DecodeError> {
    Ok(read_array::<1>(data, offset)?[0])
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> Result<u64, DecodeError> {
    Ok(u64::from_le_bytes(read_array(data, offset)?))
}

pub(crate) fn read_i64(data: &[u8], offset: usize) -> Result<i64, DecodeError> {
    Ok(i64::from_le_bytes(read_array(data, offset)?))
}

pub(crate) fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey, DecodeError> {
    Ok(Pubkey::new_from_array(read_array(data, offset)?))
}

/// Copies `bytes` to `offset`; the caller has already checked the length.
pub(crate) fn write_bytes(data: &mut [u8], offset: usize, bytes: &[u8]) {
    data[offset..offset + bytes.len()].copy_from_slice(bytes);
}

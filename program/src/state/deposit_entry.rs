use super::*;
use crate::layout::*;

/// One lockup/deposit slot of a Voter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DepositEntry {
    pub lockup: Lockup,

    /// Amount in the deposit's mint, in native (smallest) units.
    pub amount_deposited_native: u64,

    /// Amount that was locked up when the lockup was created.
    pub amount_initially_locked_native: u64,

    /// Unused slots are zero-filled and carry no deposit.
    pub is_used: bool,
    pub allow_clawback: bool,

    /// Index into `Registrar::voting_mints`.
    pub voting_mint_config_idx: u8,
}

impl DepositEntry {
    /// Does this slot hold tokens at all?
    pub fn is_active(&self) -> bool {
        self.is_used && self.amount_deposited_native > 0
    }

    pub fn serialize_into(&self, data: &mut [u8], slot_offset: usize) -> Result<(), DecodeError> {
        ensure_len(data, slot_offset + DEPOSIT_ENTRY_SIZE)?;
        self.write(data, slot_offset);
        Ok(())
    }

    /// Writes the slot at `slot_offset`; `data` must hold the whole slot.
    pub(crate) fn write(&self, data: &mut [u8], slot_offset: usize) {
        data[slot_offset..slot_offset + DEPOSIT_ENTRY_SIZE].fill(0);
        self.lockup.serialize_into(data, slot_offset);
        write_bytes(
            data,
            slot_offset + DEPOSIT_AMOUNT_DEPOSITED_NATIVE,
            &self.amount_deposited_native.to_le_bytes(),
        );
        write_bytes(
            data,
            slot_offset + DEPOSIT_AMOUNT_INITIALLY_LOCKED_NATIVE,
            &self.amount_initially_locked_native.to_le_bytes(),
        );
        write_bytes(
            data,
            slot_offset + DEPOSIT_IS_USED,
            &[
                self.is_used as u8,
                self.allow_clawback as u8,
                self.voting_mint_config_idx,
            ],
        );
    }
}

/// Reads the deposit slot starting at `slot_offset`.
///
/// Only range and lockup tag checks happen here. Unused and empty slots are
/// decoded like any other; skipping them is up to the power calculation.
pub fn decode_deposit_entry(data: &[u8], slot_offset: usize) -> Result<DepositEntry, DecodeError> {
    ensure_len(data, slot_offset + DEPOSIT_ENTRY_SIZE)?;
    Ok(DepositEntry {
        lockup: Lockup::decode(data, slot_offset)?,
        amount_deposited_native: read_u64(data, slot_offset + DEPOSIT_AMOUNT_DEPOSITED_NATIVE)?,
        amount_initially_locked_native: read_u64(
            data,
            slot_offset + DEPOSIT_AMOUNT_INITIALLY_LOCKED_NATIVE,
        )?,
        is_used: read_u8(data, slot_offset + DEPOSIT_IS_USED)? != 0,
        allow_clawback: read_u8(data, slot_offset + DEPOSIT_ALLOW_CLAWBACK)? != 0,
        voting_mint_config_idx: read_u8(data, slot_offset + DEPOSIT_VOTING_MINT_CONFIG_IDX)?,
    })
}

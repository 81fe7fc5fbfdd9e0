use super::*;
use crate::layout::*;

pub const SECS_PER_DAY: i64 = 86_400;
/// An average month of 30.44 days.
pub const SECS_PER_MONTH: i64 = 2_630_016;

/// How the tokens of a deposit unlock.
///
/// The discriminant is the on-chain tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LockupKind {
    /// No lockup, tokens can be withdrawn at any time.
    #[default]
    None = 0,
    /// Vests in equal tranches once per day until `end_ts`.
    Daily = 1,
    /// Vests in equal tranches once per (average) month until `end_ts`.
    Monthly = 2,
    /// Everything unlocks at `end_ts`.
    Cliff = 3,
    /// Everything unlocks at `end_ts`, no vesting.
    Constant = 4,
}

impl LockupKind {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(LockupKind::None),
            1 => Some(LockupKind::Daily),
            2 => Some(LockupKind::Monthly),
            3 => Some(LockupKind::Cliff),
            4 => Some(LockupKind::Constant),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Length of one vesting period, zero for kinds that don't vest.
    pub fn period_secs(self) -> i64 {
        match self {
            LockupKind::Daily => SECS_PER_DAY,
            LockupKind::Monthly => SECS_PER_MONTH,
            LockupKind::None | LockupKind::Cliff | LockupKind::Constant => 0,
        }
    }

    pub fn is_vesting(self) -> bool {
        self.period_secs() > 0
    }

    pub fn name(self) -> &'static str {
        match self {
            LockupKind::None => "none",
            LockupKind::Daily => "daily",
            LockupKind::Monthly => "monthly",
            LockupKind::Cliff => "cliff",
            LockupKind::Constant => "constant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lockup {
    pub start_ts: i64,
    pub end_ts: i64,
    pub kind: LockupKind,
}

impl Lockup {
    /// True once `now` has reached `end_ts`, or always for `LockupKind::None`.
    pub fn expired(&self, now_ts: i64) -> bool {
        self.kind == LockupKind::None || now_ts >= self.end_ts
    }

    /// Seconds until `end_ts`, zero once expired.
    pub fn seconds_left(&self, now_ts: i64) -> u64 {
        if self.expired(now_ts) {
            return 0;
        }
        self.end_ts.saturating_sub(now_ts).max(0) as u64
    }

    pub(crate) fn decode(data: &[u8], slot_offset: usize) -> Result<Self, DecodeError> {
        let kind_offset = slot_offset + LOCKUP_KIND;
        let tag = read_u8(data, kind_offset)?;
        let kind = LockupKind::from_tag(tag).ok_or_else(|| {
            DecodeError::new(DecodeErrorKind::InvalidLockupKind { tag }).at(kind_offset)
        })?;
        Ok(Lockup {
            start_ts: read_i64(data, slot_offset + LOCKUP_START_TS)?,
            end_ts: read_i64(data, slot_offset + LOCKUP_END_TS)?,
            kind,
        })
    }

    pub(crate) fn serialize_into(&self, data: &mut [u8], slot_offset: usize) {
        write_bytes(data, slot_offset + LOCKUP_START_TS, &self.start_ts.to_le_bytes());
        write_bytes(data, slot_offset + LOCKUP_END_TS, &self.end_ts.to_le_bytes());
        write_bytes(data, slot_offset + LOCKUP_KIND, &[self.kind.tag()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lockup_kind_tags() {
        for tag in 0..5 {
            let kind = LockupKind::from_tag(tag).unwrap();
            assert_eq!(kind.tag(), tag);
        }
        assert_eq!(LockupKind::from_tag(5), None);
        assert_eq!(LockupKind::from_tag(255), None);
    }

    #[test]
    fn test_seconds_left() {
        let lockup = Lockup {
            start_ts: 1_000,
            end_ts: 2_000,
            kind: LockupKind::Cliff,
        };
        assert_eq!(lockup.seconds_left(500), 1_500);
        assert_eq!(lockup.seconds_left(1_999), 1);
        assert_eq!(lockup.seconds_left(2_000), 0);
        assert_eq!(lockup.seconds_left(9_000), 0);
        assert!(lockup.expired(2_000));

        let none = Lockup {
            kind: LockupKind::None,
            ..lockup
        };
        assert_eq!(none.seconds_left(500), 0);
        assert!(none.expired(500));
    }

    #[test]
    fn test_decode_rejects_unknown_kind() {
        let mut data = vec![0u8; LOCKUP_SIZE];
        data[LOCKUP_KIND] = 7;
        let err = Lockup::decode(&data, 0).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::InvalidLockupKind { tag: 7 });
        assert_eq!(err.offset, Some(LOCKUP_KIND));
    }
}

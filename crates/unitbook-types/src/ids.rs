//! Ordering keys used throughout UnitBook.
//!
//! Orders carry no identity beyond their arrival time: the [`Timestamp`]
//! is both the time-priority key inside a price level and the identity of
//! a resting entry.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// Arrival time of an order, as a monotonically increasing sequence number.
///
/// The order source guarantees that successive orders fed into one book
/// carry strictly increasing timestamps; the book re-checks this at
/// `submit` time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// The first timestamp handed out by a fresh order source.
    pub const FIRST: Self = Self(1);

    /// The following timestamp. Saturates at `u64::MAX`; the book rejects
    /// the repeated value as non-monotonic instead of wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Timestamp {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_next() {
        assert_eq!(Timestamp(5).next(), Timestamp(6));
        assert_eq!(Timestamp::FIRST.get(), 1);
    }

    #[test]
    fn timestamp_next_saturates_at_max() {
        assert_eq!(Timestamp(u64::MAX).next(), Timestamp(u64::MAX));
    }

    #[test]
    fn timestamp_ordering() {
        assert!(Timestamp(1) < Timestamp(2));
        assert_eq!(Timestamp::from(7), Timestamp(7));
    }

    #[test]
    fn timestamp_serializes_as_plain_number() {
        let json = serde_json::to_string(&Timestamp(42)).unwrap();
        assert_eq!(json, "42");
        let back: Timestamp = serde_json::from_str("42").unwrap();
        assert_eq!(back, Timestamp(42));
    }

    #[test]
    fn timestamp_display() {
        assert_eq!(format!("{}", Timestamp(3)), "t=3");
    }
}

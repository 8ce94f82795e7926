//! Resting book entries and the executions that consume them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Order, OrderSide, Timestamp};

/// A resting one-unit limit order: `(price, placed_at)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookEntry {
    pub price: Decimal,
    pub placed_at: Timestamp,
}

impl BookEntry {
    #[must_use]
    pub fn new(price: Decimal, placed_at: Timestamp) -> Self {
        Self { price, placed_at }
    }
}

impl std::fmt::Display for BookEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.price, self.placed_at)
    }
}

/// One unit changing hands during continuous matching.
///
/// The incoming order is never queued; the resting entry is removed from
/// the front of its side. The trade prints at the resting price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// The aggressive order that triggered the match.
    pub incoming: Order,
    /// The resting entry it executed against.
    pub resting: BookEntry,
    /// Which side the resting entry was on.
    pub resting_side: OrderSide,
}

impl Execution {
    /// Execution price (the resting entry's limit price).
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.resting.price
    }

    /// Returns `true` if the incoming order was buying.
    #[must_use]
    pub fn taker_is_buyer(&self) -> bool {
        self.incoming.side == OrderSide::Buy
    }
}

impl std::fmt::Display for Execution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} x {} {} @ {}",
            self.incoming, self.resting_side, self.resting.placed_at, self.resting.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_prints_at_resting_price() {
        let exec = Execution {
            incoming: Order::limit(Timestamp(2), OrderSide::Sell, Decimal::new(7400, 2)),
            resting: BookEntry::new(Decimal::new(7500, 2), Timestamp(1)),
            resting_side: OrderSide::Buy,
        };
        assert_eq!(exec.price(), Decimal::new(7500, 2));
        assert!(!exec.taker_is_buyer());
        let s = format!("{exec}");
        assert!(s.contains("74.00"));
        assert!(s.contains("@ 75.00"));
    }

    #[test]
    fn entry_display() {
        let entry = BookEntry::new(Decimal::new(7550, 2), Timestamp(3));
        assert_eq!(format!("{entry}"), "75.50 (t=3)");
    }
}

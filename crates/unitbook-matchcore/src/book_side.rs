//! One side of the order book.
//!
//! Entries are kept in a single [`VecDeque`] in priority order: the front
//! is the best entry and is the one executed or cleared first.
//!
//! - **Bids**: price descending, then timestamp ascending
//! - **Asks**: price ascending, then timestamp ascending

use std::collections::VecDeque;

use rust_decimal::Decimal;
use unitbook_types::{BookEntry, OrderSide, Result, UnitbookError};

/// All resting entries for one side, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSide {
    side: OrderSide,
    entries: VecDeque<BookEntry>,
}

impl BookSide {
    /// Create a new empty side.
    #[must_use]
    pub fn new(side: OrderSide) -> Self {
        Self {
            side,
            entries: VecDeque::new(),
        }
    }

    /// Build a side from entries that are already in priority order.
    ///
    /// # Errors
    /// `PriorityViolation` if any adjacent pair is out of order, including
    /// two entries with the same price and timestamp.
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn from_entries(side: OrderSide, entries: Vec<BookEntry>) -> Result<Self> {
        let this = Self {
            side,
            entries: entries.into(),
        };
        this.check_priority()?;
        Ok(this)
    }

    #[must_use]
    pub fn side(&self) -> OrderSide {
        self.side
    }

    /// Returns `true` if `a` must sit in front of `b` on this side.
    ///
    /// Better price wins; at an equal price the strictly earlier timestamp wins.
    #[must_use]
    pub fn outranks(&self, a: &BookEntry, b: &BookEntry) -> bool {
        let better_price = match self.side {
            OrderSide::Buy => a.price > b.price,
            OrderSide::Sell => a.price < b.price,
        };
        better_price || (a.price == b.price && a.placed_at < b.placed_at)
    }

    /// Insert an entry at its priority position. Returns the index it landed at.
    ///
    /// Walks past every resting entry the new one does not outrank, so an
    /// entry that ties on both price and timestamp goes behind the resting one.
    pub fn insert(&mut self, entry: BookEntry) -> usize {
        let pos = self
            .entries
            .partition_point(|resting| !self.outranks(&entry, resting));
        self.entries.insert(pos, entry);
        pos
    }

    /// Would an incoming opposite-side limit at `price` execute against the best entry?
    ///
    /// Resting asks are hit by bids at or above the best ask; resting bids
    /// by asks at or below the best bid. Always `false` on an empty side.
    #[must_use]
    pub fn is_marketable(&self, price: Decimal) -> bool {
        match (self.side, self.best_price()) {
            (OrderSide::Sell, Some(best)) => price >= best,
            (OrderSide::Buy, Some(best)) => price <= best,
            (_, None) => false,
        }
    }

    /// Remove and return the best entry.
    pub fn pop_best(&mut self) -> Option<BookEntry> {
        self.entries.pop_front()
    }

    /// Peek at the best entry without removing it.
    #[must_use]
    pub fn best(&self) -> Option<&BookEntry> {
        self.entries.front()
    }

    #[must_use]
    pub fn best_price(&self) -> Option<Decimal> {
        self.best().map(|e| e.price)
    }

    /// Iterate entries from best to worst.
    pub fn iter(&self) -> impl Iterator<Item = &BookEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verify that every adjacent pair is in strict priority order.
    pub fn check_priority(&self) -> Result<()> {
        for (i, (a, b)) in self.entries.iter().zip(self.entries.iter().skip(1)).enumerate() {
            if !self.outranks(a, b) {
                return Err(UnitbookError::PriorityViolation {
                    reason: format!(
                        "{} side: entry {i} [{a}] does not outrank entry {} [{b}]",
                        self.side,
                        i + 1
                    ),
                });
            }
        }
        Ok(())
    }
}

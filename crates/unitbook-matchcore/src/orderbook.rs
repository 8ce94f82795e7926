//! The single-asset unit order book.
//!
//! Two [`BookSide`]s, each a best-first sequence of `(price, timestamp)`:
//! - **Bids** (buys): highest price first, earliest timestamp first within a price
//! - **Asks** (sells): lowest price first, earliest timestamp first within a price
//!
//! Every order is one unit, so an execution consumes exactly one resting
//! entry and there is never a sweep across levels.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use unitbook_types::{
    BookEntry, Execution, Order, OrderKind, OrderSide, Result, Timestamp, UnitbookError,
};

use crate::book_side::BookSide;

/// What a single `submit` did to the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BookMutation {
    /// The order executed against the best opposite entry, which was removed.
    Matched(Execution),
    /// The limit order did not cross and now rests on its own side.
    Rested {
        side: OrderSide,
        entry: BookEntry,
        /// Queue position after insertion (0 = best).
        position: usize,
    },
    /// A market order found the opposite side empty. Both sides are
    /// unchanged, but the timestamp watermark still advances, so compare
    /// books with `==` (sides only) rather than field by field.
    Dropped { order: Order },
}

impl BookMutation {
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    #[must_use]
    pub fn is_rested(&self) -> bool {
        matches!(self, Self::Rested { .. })
    }

    #[must_use]
    pub fn is_dropped(&self) -> bool {
        matches!(self, Self::Dropped { .. })
    }
}

/// Plain copy of both sides, best first, for presentation and reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub bids: Vec<BookEntry>,
    pub asks: Vec<BookEntry>,
}

/// The order book for one asset.
#[derive(Debug, Clone)]
pub struct OrderBook {
    /// Buy side: highest price first.
    bids: BookSide,
    /// Sell side: lowest price first.
    asks: BookSide,
    /// Timestamp of the last order accepted by `submit`.
    last_placed_at: Option<Timestamp>,
}

impl OrderBook {
    /// Create a new empty order book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bids: BookSide::new(OrderSide::Buy),
            asks: BookSide::new(OrderSide::Sell),
            last_placed_at: None,
        }
    }

    /// Build a book directly from resting entries, best first on each side.
    ///
    /// The sides are checked for priority order but not against each
    /// other, so a crossed book (as it may stand before a call auction)
    /// can be built. Later submissions must come after the newest entry.
    /// `submit` never produces such a book, so this is fixture-only.
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn from_entries(bids: Vec<BookEntry>, asks: Vec<BookEntry>) -> Result<Self> {
        let bids = BookSide::from_entries(OrderSide::Buy, bids)?;
        let asks = BookSide::from_entries(OrderSide::Sell, asks)?;
        let last_placed_at = bids.iter().chain(asks.iter()).map(|e| e.placed_at).max();
        Ok(Self {
            bids,
            asks,
            last_placed_at,
        })
    }

    // =================================================================
    // Submission
    // =================================================================

    /// Feed one order into the book: match it against the best opposite
    /// entry if it can execute, otherwise queue it (limit) or drop it (market).
    ///
    /// # Errors
    /// - `NonPositivePrice` for a limit order priced at or below zero
    /// - `NonMonotonicTimestamp` if `placed_at` is not after the last accepted order
    ///
    /// Errors leave the book untouched. A dropped market order is not an
    /// error: it is reported as [`BookMutation::Dropped`].
    pub fn submit(&mut self, order: Order) -> Result<BookMutation> {
        order.validate()?;
        if let Some(last) = self.last_placed_at.filter(|last| order.placed_at <= *last) {
            return Err(UnitbookError::NonMonotonicTimestamp {
                got: order.placed_at,
                last,
            });
        }
        self.last_placed_at = Some(order.placed_at);

        let mutation = match order.kind {
            OrderKind::Market => self.execute_market(order),
            OrderKind::Limit { price } => self.execute_limit(order, price),
        };
        Ok(mutation)
    }

    fn execute_market(&mut self, order: Order) -> BookMutation {
        let resting_side = order.side.opposite();
        match self.side_mut(resting_side).pop_best() {
            Some(resting) => Self::matched(order, resting, resting_side),
            None => {
                tracing::warn!(
                    side = %order.side,
                    placed_at = order.placed_at.0,
                    "Market order could not be executed: no entries on {} side",
                    resting_side
                );
                BookMutation::Dropped { order }
            }
        }
    }

    fn execute_limit(&mut self, order: Order, price: Decimal) -> BookMutation {
        let resting_side = order.side.opposite();
        let opposite = self.side_mut(resting_side);
        if opposite.is_marketable(price) {
            if let Some(resting) = opposite.pop_best() {
                return Self::matched(order, resting, resting_side);
            }
        }

        let entry = BookEntry::new(price, order.placed_at);
        let position = self.side_mut(order.side).insert(entry);
        tracing::debug!(
            side = %order.side,
            price = %price,
            placed_at = order.placed_at.0,
            position,
            "Limit order rested"
        );
        BookMutation::Rested {
            side: order.side,
            entry,
            position,
        }
    }

    fn matched(order: Order, resting: BookEntry, resting_side: OrderSide) -> BookMutation {
        let execution = Execution {
            incoming: order,
            resting,
            resting_side,
        };
        tracing::debug!(
            incoming = %order,
            resting_placed_at = resting.placed_at.0,
            price = %resting.price,
            "Order matched"
        );
        BookMutation::Matched(execution)
    }

    /// Remove the best bid and best ask together, if both exist.
    pub(crate) fn pop_best_pair(&mut self) -> Option<(BookEntry, BookEntry)> {
        if self.bids.is_empty() || self.asks.is_empty() {
            return None;
        }
        let bid = self.bids.pop_best()?;
        let ask = self.asks.pop_best()?;
        Some((bid, ask))
    }

    fn side_mut(&mut self, side: OrderSide) -> &mut BookSide {
        match side {
            OrderSide::Buy => &mut self.bids,
            OrderSide::Sell => &mut self.asks,
        }
    }

    // =================================================================
    // Queries
    // =================================================================

    /// One side of the book.
    #[must_use]
    pub fn side(&self, side: OrderSide) -> &BookSide {
        match side {
            OrderSide::Buy => &self.bids,
            OrderSide::Sell => &self.asks,
        }
    }

    /// Best (highest) bid price, or `None` if no bids.
    #[must_use]
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.best_price()
    }

    /// Best (lowest) ask price, or `None` if no asks.
    #[must_use]
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.best_price()
    }

    /// Spread = best_ask - best_bid. `None` if either side is empty.
    #[must_use]
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Mid price = (best_bid + best_ask) / 2. `None` if either side is empty.
    #[must_use]
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }

    /// Returns `true` if the best bid is at or above the best ask.
    #[must_use]
    pub fn is_crossed(&self) -> bool {
        matches!((self.best_bid(), self.best_ask()), (Some(bid), Some(ask)) if bid >= ask)
    }

    /// Total number of entries currently in the book.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    /// Number of resting bids.
    #[must_use]
    pub fn bid_depth(&self) -> usize {
        self.bids.len()
    }

    /// Number of resting asks.
    #[must_use]
    pub fn ask_depth(&self) -> usize {
        self.asks.len()
    }

    /// Returns `true` if the book has no entries on either side.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Timestamp of the last order accepted by `submit` (or the newest fixture entry).
    #[must_use]
    pub fn last_placed_at(&self) -> Option<Timestamp> {
        self.last_placed_at
    }

    /// Iterate bids from best (highest) to worst.
    pub fn bids(&self) -> impl Iterator<Item = &BookEntry> {
        self.bids.iter()
    }

    /// Iterate asks from best (lowest) to worst.
    pub fn asks(&self) -> impl Iterator<Item = &BookEntry> {
        self.asks.iter()
    }

    #[must_use]
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: self.bids.iter().copied().collect(),
            asks: self.asks.iter().copied().collect(),
        }
    }

    /// Verify price-time priority on both sides.
    pub fn check_invariants(&self) -> Result<()> {
        self.bids.check_priority()?;
        self.asks.check_priority()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

/// Books are equal when they hold the same entries in the same order.
/// The timestamp watermark is bookkeeping and does not take part.
impl PartialEq for OrderBook {
    fn eq(&self, other: &Self) -> bool {
        self.bids == other.bids && self.asks == other.asks
    }
}

impl Eq for OrderBook {}

/// Side-by-side ladder: bid time, bid price, ask time, ask price.
impl fmt::Display for OrderBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>6} {:>10} | {:>6} {:>10}",
            "BID_T", "BID_PX", "ASK_T", "ASK_PX"
        )?;
        let mut bids = self.bids.iter();
        let mut asks = self.asks.iter();
        loop {
            let (bid, ask) = (bids.next(), asks.next());
            if bid.is_none() && ask.is_none() {
                break;
            }
            let cell = |e: Option<&BookEntry>| match e {
                Some(e) => (e.placed_at.0.to_string(), e.price.to_string()),
                None => ("-".to_string(), "-".to_string()),
            };
            let (bt, bp) = cell(bid);
            let (at, ap) = cell(ask);
            writeln!(f, "{bt:>6} {bp:>10} | {at:>6} {ap:>10}")?;
        }
        match self.spread() {
            Some(spread) => write!(f, "spread: {spread}"),
            None => write!(f, "spread: n/a"),
        }
    }
}

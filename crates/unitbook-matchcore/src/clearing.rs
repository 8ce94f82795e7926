//! Call-market clearing for the unit order book.
//!
//! The auction crosses the best bid with the best ask, one unit at a time,
//! for as long as the best bid is at or above the best ask. The last
//! crossing pair sets the uniform price: the midpoint of its bid and ask.
//!
//! The algorithm is deterministic: same book → same price, same residual book.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::OrderBook;

/// Result of a call-market clearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClearingResult {
    /// At least one bid/ask pair crossed.
    Equilibrium {
        /// Uniform clearing price = (last_bid + last_ask) / 2.
        price: Decimal,
        /// Number of units crossed (pairs removed from the book).
        matched_pairs: usize,
        /// Bid price of the last crossing pair.
        last_bid: Decimal,
        /// Ask price of the last crossing pair.
        last_ask: Decimal,
    },
    /// One side is empty or the best bid is below the best ask.
    NoEquilibrium,
}

impl ClearingResult {
    /// The clearing price, if there was an equilibrium.
    #[must_use]
    pub fn price(&self) -> Option<Decimal> {
        match self {
            Self::Equilibrium { price, .. } => Some(*price),
            Self::NoEquilibrium => None,
        }
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        match self {
            Self::Equilibrium { matched_pairs, .. } => *matched_pairs,
            Self::NoEquilibrium => 0,
        }
    }

    #[must_use]
    pub fn is_equilibrium(&self) -> bool {
        matches!(self, Self::Equilibrium { .. })
    }

    fn from_last_pair(matched_pairs: usize, last: Option<(Decimal, Decimal)>) -> Self {
        match last {
            Some((last_bid, last_ask)) => Self::Equilibrium {
                price: (last_bid + last_ask) / Decimal::TWO,
                matched_pairs,
                last_bid,
                last_ask,
            },
            None => Self::NoEquilibrium,
        }
    }
}

impl std::fmt::Display for ClearingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equilibrium {
                price,
                matched_pairs,
                ..
            } => write!(f, "equilibrium price {price} ({matched_pairs} crossed)"),
            Self::NoEquilibrium => write!(f, "no equilibrium"),
        }
    }
}

/// Compute the clearing outcome without touching the book.
///
/// Walks bids best-first and asks best-first in lockstep and stops at the
/// first pair where the bid is below the ask. Gives the same result that
/// [`clear_market`] would produce on the same book.
#[must_use]
pub fn compute_clearing_price(book: &OrderBook) -> ClearingResult {
    let mut matched_pairs = 0;
    let mut last = None;
    for (bid, ask) in book.bids().zip(book.asks()) {
        if bid.price < ask.price {
            break;
        }
        matched_pairs += 1;
        last = Some((bid.price, ask.price));
    }
    ClearingResult::from_last_pair(matched_pairs, last)
}

/// Run the call auction: remove crossing pairs from the book and price them.
///
/// Algorithm:
/// 1. Stop if either side is empty or best bid < best ask
/// 2. Record the best bid and best ask prices, pop both, go to 1
///
/// A book that never crossed is returned untouched as
/// [`ClearingResult::NoEquilibrium`]. Always terminates: every round
/// removes one entry from each side.
pub fn clear_market(book: &mut OrderBook) -> ClearingResult {
    let mut matched_pairs = 0;
    let mut last = None;

    while book.is_crossed() {
        let Some((bid, ask)) = book.pop_best_pair() else {
            break;
        };
        tracing::debug!(
            bid = %bid.price,
            bid_placed_at = bid.placed_at.0,
            ask = %ask.price,
            ask_placed_at = ask.placed_at.0,
            "Crossed pair cleared"
        );
        matched_pairs += 1;
        last = Some((bid.price, ask.price));
    }

    let result = ClearingResult::from_last_pair(matched_pairs, last);
    match result {
        ClearingResult::Equilibrium {
            price,
            matched_pairs,
            ..
        } => tracing::info!(
            price = %price,
            matched_pairs,
            remaining_bids = book.bid_depth(),
            remaining_asks = book.ask_depth(),
            "Call market cleared at equilibrium price"
        ),
        ClearingResult::NoEquilibrium => tracing::info!(
            best_bid = ?book.best_bid(),
            best_ask = ?book.best_ask(),
            "No equilibrium price: bids and asks do not cross"
        ),
    }
    result
}

//! Continuous double auction driver.
//!
//! Owns one [`OrderBook`] for the length of a run and pulls orders from an
//! [`OrderSource`]:
//!
//! ```text
//! source.next_order() → book.submit() → StepReport (+ spread)
//!     ... order_count times ...
//! clear_market(book) → ClearingResult → SimulationReport
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use unitbook_matchcore::{
    BookMutation, BookSnapshot, ClearingResult, OrderBook, book_root_hex, clear_market,
};
use unitbook_types::{Order, Result, SimulationConfig, Timestamp};

use crate::source::{OrderSource, RandomOrderSource};

/// What happened to one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub placed_at: Timestamp,
    pub order: Order,
    pub mutation: BookMutation,
    /// Spread after the order was applied; `None` while a side is empty.
    pub spread: Option<Decimal>,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub steps: Vec<StepReport>,
    pub matched: usize,
    pub rested: usize,
    pub dropped: usize,
    /// Book as it stood after the last order, before any clearing.
    pub book_before_clearing: BookSnapshot,
    /// Present when the run ended with a call auction.
    pub clearing: Option<ClearingResult>,
    pub final_book: BookSnapshot,
    /// Hex SHA-256 over the final book.
    pub book_root: String,
}

/// One simulation run over a single book.
pub struct Simulation<S: OrderSource = RandomOrderSource> {
    config: SimulationConfig,
    source: S,
    book: OrderBook,
    steps: Vec<StepReport>,
}

impl Simulation<RandomOrderSource> {
    /// A run driven by a [`RandomOrderSource`] built from the same config.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let source = RandomOrderSource::new(&config)?;
        Self::with_source(config, source)
    }
}

impl<S: OrderSource> Simulation<S> {
    pub fn with_source(config: SimulationConfig, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            book: OrderBook::new(),
            steps: Vec::new(),
        })
    }

    #[must_use]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Pull one order and apply it. `Ok(None)` once the source is exhausted.
    ///
    /// # Errors
    /// Propagates the book's rejection of an invalid or out-of-order order.
    pub fn step(&mut self) -> Result<Option<StepReport>> {
        let Some(order) = self.source.next_order() else {
            return Ok(None);
        };
        let mutation = self.book.submit(order)?;
        let spread = self.book.spread();

        match spread {
            Some(spread) => tracing::info!(
                t = order.placed_at.0,
                order = %order,
                spread = %spread,
                "At t = {}, the bid-ask spread is {}",
                order.placed_at.0,
                spread
            ),
            None => tracing::info!(
                t = order.placed_at.0,
                order = %order,
                "At t = {}, the bid-ask spread is undefined",
                order.placed_at.0
            ),
        }

        let report = StepReport {
            placed_at: order.placed_at,
            order,
            mutation,
            spread,
        };
        self.steps.push(report.clone());
        Ok(Some(report))
    }

    /// Run the call auction against the current book.
    pub fn clear(&mut self) -> ClearingResult {
        clear_market(&mut self.book)
    }

    /// Feed up to `order_count` orders, optionally clear, and summarize.
    pub fn run(&mut self) -> Result<SimulationReport> {
        for _ in 0..self.config.order_count {
            if self.step()?.is_none() {
                tracing::info!(
                    submitted = self.steps.len(),
                    "Order source exhausted before order_count"
                );
                break;
            }
        }

        let book_before_clearing = self.book.snapshot();
        let clearing = self.config.clear_at_end.then(|| self.clear());
        Ok(self.report(book_before_clearing, clearing))
    }

    fn report(
        &self,
        book_before_clearing: BookSnapshot,
        clearing: Option<ClearingResult>,
    ) -> SimulationReport {
        let count = |pred: fn(&BookMutation) -> bool| {
            self.steps.iter().filter(|s| pred(&s.mutation)).count()
        };
        let report = SimulationReport {
            steps: self.steps.clone(),
            matched: count(BookMutation::is_matched),
            rested: count(BookMutation::is_rested),
            dropped: count(BookMutation::is_dropped),
            book_before_clearing,
            clearing,
            final_book: self.book.snapshot(),
            book_root: book_root_hex(&self.book),
        };
        tracing::info!(
            orders = report.steps.len(),
            matched = report.matched,
            rested = report.rested,
            dropped = report.dropped,
            bids = self.book.bid_depth(),
            asks = self.book.ask_depth(),
            book_root = %report.book_root,
            "Simulation complete"
        );
        report
    }
}

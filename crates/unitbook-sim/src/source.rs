//! Order sources feeding the simulation, one order per call.
//!
//! A source must hand out strictly increasing timestamps within one run.
//! The book re-checks this and rejects a stream that goes backwards.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use unitbook_types::{Order, OrderRequest, OrderSide, Result, SimulationConfig, Timestamp};

/// Produces the next order of a run, or `None` when the stream is exhausted.
pub trait OrderSource {
    fn next_order(&mut self) -> Option<Order>;
}

// ---------------------------------------------------------------------------
// RandomOrderSource
// ---------------------------------------------------------------------------

/// Random one-unit orders on a fixed price grid.
///
/// Per order: market with probability `market_order_probability`, otherwise
/// limit; buy or sell with equal probability; limit prices uniform over
/// `min_price ..= max_price` in `price_tick` steps. Timestamps run 1, 2, 3, ...
#[derive(Debug)]
pub struct RandomOrderSource {
    rng: StdRng,
    next_placed_at: Timestamp,
    market_order_probability: f64,
    min_price: Decimal,
    price_tick: Decimal,
    price_steps: u64,
}

impl RandomOrderSource {
    /// Build a source from a config, seeded from `config.seed` when present.
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Build a source with an explicit seed, ignoring `config.seed`.
    pub fn seeded(config: &SimulationConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &SimulationConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rng,
            next_placed_at: Timestamp::FIRST,
            market_order_probability: config.market_order_probability,
            min_price: config.min_price,
            price_tick: config.price_tick,
            price_steps: config.price_steps()?,
        })
    }
}

impl OrderSource for RandomOrderSource {
    fn next_order(&mut self) -> Option<Order> {
        let placed_at = self.next_placed_at;
        self.next_placed_at = placed_at.next();

        let is_market = self.rng.gen_bool(self.market_order_probability);
        let side = if self.rng.gen_bool(0.5) {
            OrderSide::Buy
        } else {
            OrderSide::Sell
        };

        if is_market {
            return Some(Order::market(placed_at, side));
        }
        let step = self.rng.gen_range(0..=self.price_steps);
        let price = self.min_price + self.price_tick * Decimal::from(step);
        Some(Order::limit(placed_at, side, price))
    }
}

// ---------------------------------------------------------------------------
// ReplaySource
// ---------------------------------------------------------------------------

/// Replays a fixed list of orders, then reports exhaustion.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    orders: std::vec::IntoIter<Order>,
}

impl ReplaySource {
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: orders.into_iter(),
        }
    }

    /// Convert wire-form requests, failing on the first malformed one.
    pub fn from_requests(requests: Vec<OrderRequest>) -> Result<Self> {
        let orders = requests
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(orders))
    }

    /// Parse a JSON array of [`OrderRequest`]s.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let requests: Vec<OrderRequest> = serde_json::from_str(json)?;
        Self::from_requests(requests)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Orders not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.orders.len()
    }
}

impl OrderSource for ReplaySource {
    fn next_order(&mut self) -> Option<Order> {
        self.orders.next()
    }
}

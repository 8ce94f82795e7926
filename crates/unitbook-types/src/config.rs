//! Configuration for a UnitBook simulation run.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::{Result, UnitbookError, constants};

/// How the simulation binary emits its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    /// Human-readable log lines and a book ladder.
    #[default]
    Text,
    /// JSON log lines and a JSON report on stdout.
    Json,
}

/// Parameters of one simulated order stream.
///
/// Every field has a default, so a config file only needs the fields it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of orders to draw from the source.
    pub order_count: usize,
    /// Probability in `[0, 1]` that a generated order is a market order.
    pub market_order_probability: f64,
    /// Lowest generated limit price (inclusive).
    pub min_price: Decimal,
    /// Highest generated limit price (inclusive).
    pub max_price: Decimal,
    /// Price granularity of generated limit orders.
    pub price_tick: Decimal,
    /// RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Run a call-market clearing after the last order.
    pub clear_at_end: bool,
    pub log_format: LogFormat,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            order_count: constants::DEFAULT_ORDER_COUNT,
            market_order_probability: f64::from(constants::DEFAULT_MARKET_ORDER_PERCENT) / 100.0,
            min_price: Decimal::new(constants::DEFAULT_MIN_PRICE_CENTS, constants::PRICE_SCALE),
            max_price: Decimal::new(constants::DEFAULT_MAX_PRICE_CENTS, constants::PRICE_SCALE),
            price_tick: Decimal::new(constants::DEFAULT_PRICE_TICK_CENTS, constants::PRICE_SCALE),
            seed: None,
            clear_at_end: true,
            log_format: LogFormat::Text,
        }
    }
}

impl SimulationConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reject configurations the order source cannot draw from.
    ///
    /// # Errors
    /// `Configuration` describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.order_count == 0 {
            return Err(UnitbookError::Configuration(
                "order_count must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.market_order_probability) {
            return Err(UnitbookError::Configuration(format!(
                "market_order_probability must be within [0, 1], got {}",
                self.market_order_probability
            )));
        }
        if self.price_tick <= Decimal::ZERO {
            return Err(UnitbookError::Configuration(format!(
                "price_tick must be positive, got {}",
                self.price_tick
            )));
        }
        if self.min_price <= Decimal::ZERO {
            return Err(UnitbookError::Configuration(format!(
                "min_price must be positive, got {}",
                self.min_price
            )));
        }
        if self.min_price > self.max_price {
            return Err(UnitbookError::Configuration(format!(
                "price range is inverted: {} > {}",
                self.min_price, self.max_price
            )));
        }
        self.price_steps()?;
        Ok(())
    }

    /// Number of tick steps between `min_price` and `max_price`.
    ///
    /// # Errors
    /// `Configuration` if the count overflows `Decimal` or does not fit a `u64`.
    pub fn price_steps(&self) -> Result<u64> {
        let too_fine = || {
            UnitbookError::Configuration(format!(
                "price_tick {} is too fine for range {}..={}",
                self.price_tick, self.min_price, self.max_price
            ))
        };
        (self.max_price - self.min_price)
            .checked_div(self.price_tick)
            .ok_or_else(too_fine)?
            .floor()
            .to_u64()
            .ok_or_else(too_fine)
    }
}

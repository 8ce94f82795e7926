//! Error types for the UnitBook order book.
//!
//! All errors use the `UB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors (boundary validation)
//! - 5xx: Book / clearing errors
//! - 9xx: Configuration, I/O, serialization
//!
//! Dropped market orders and "no equilibrium" are **not** errors: they are
//! ordinary outcomes reported through `BookMutation` and `ClearingResult`.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::Timestamp;

/// Central error enum for all UnitBook operations.
#[derive(Debug, Error)]
pub enum UnitbookError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The order failed validation (missing price, stray price, bad value).
    #[error("UB_ERR_100: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// The order's timestamp does not come strictly after the last one
    /// accepted by the book.
    #[error("UB_ERR_101: Non-monotonic timestamp: got {got}, last accepted {last}")]
    NonMonotonicTimestamp { got: Timestamp, last: Timestamp },

    /// A limit order was priced at or below zero.
    #[error("UB_ERR_102: Non-positive limit price: {0}")]
    NonPositivePrice(Decimal),

    // =================================================================
    // Book Errors (5xx)
    // =================================================================
    /// A fixture handed to the book violates price-time priority.
    #[error("UB_ERR_500: Book out of priority order: {reason}")]
    PriorityViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Configuration error (invalid config file, out-of-range values).
    #[error("UB_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("UB_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// I/O error (reading config or replay files).
    #[error("UB_ERR_902: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, UnitbookError>;

impl From<std::io::Error> for UnitbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for UnitbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

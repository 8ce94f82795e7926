//! # unitbook-matchcore
//!
//! **Price-time priority matching for a one-unit-per-order book.**
//!
//! - **Continuous matching**: [`OrderBook::submit`] executes an incoming
//!   order against the single best opposite entry, or queues it
//! - **Call market**: [`clear_market`] crosses the book down to a uniform
//!   equilibrium price
//! - **No side effects** beyond the book itself and `tracing` events
//! - **Deterministic**: same order stream → same book → same
//!   [`compute_book_root`]
//!
//! The book is owned by its caller. Hosts sharing one book between tasks
//! must serialize access themselves.

pub mod book_side;
pub mod clearing;
pub mod determinism;
pub mod orderbook;

pub use book_side::BookSide;
pub use clearing::{ClearingResult, clear_market, compute_clearing_price};
pub use determinism::{book_root_hex, compute_book_root, verify_book_root};
pub use orderbook::{BookMutation, BookSnapshot, OrderBook};

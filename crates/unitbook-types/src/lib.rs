//! # unitbook-types
//!
//! Shared types, errors, and configuration for the **UnitBook** order book.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Ordering key**: [`Timestamp`]
//! - **Order model**: [`Order`], [`OrderKind`], [`OrderSide`], [`OrderType`], [`OrderRequest`]
//! - **Book model**: [`BookEntry`], [`Execution`]
//! - **Configuration**: [`SimulationConfig`], [`LogFormat`]
//! - **Errors**: [`UnitbookError`] with `UB_ERR_` prefix codes
//! - **Constants**: simulation defaults

pub mod config;
pub mod constants;
pub mod entry;
pub mod error;
pub mod ids;
pub mod order;

pub use config::*;
pub use entry::*;
pub use error::*;
pub use ids::*;
pub use order::*;

// Constants are accessed via `unitbook_types::constants::FOO`.

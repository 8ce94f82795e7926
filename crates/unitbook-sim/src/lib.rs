//! # unitbook-sim
//!
//! Drives a [`unitbook_matchcore::OrderBook`] with a stream of orders.
//!
//! - **OrderSource**: [`RandomOrderSource`] (seeded random stream) and
//!   [`ReplaySource`] (fixed list, e.g. from a JSON file)
//! - **Simulation**: submits orders one at a time, records the spread
//!   after each, and optionally runs a call auction at the end
//! - **Telemetry**: subscriber setup for the `unitbook-sim` binary
//!
//! ## Run Flow
//!
//! ```text
//! SimulationConfig → Simulation::new() → run() → SimulationReport
//! ```

pub mod simulation;
pub mod source;
pub mod telemetry;

pub use simulation::{Simulation, SimulationReport, StepReport};
pub use source::{OrderSource, RandomOrderSource, ReplaySource};
pub use telemetry::init_tracing;

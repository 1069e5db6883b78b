//! Headless career simulator for balance analysis.
//!
//! Plays many careers end to end against the synthetic dex, always pressing
//! the control the engine offers, and aggregates how far they get. Careers
//! go through the same `advance` the transports use, so numbers here match
//! real play.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{CareerOutcome, RunStats, SimReport};
pub use runner::{run_simulation, simulate_career};

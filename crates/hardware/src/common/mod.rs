//! Common types shared across the simulator.

/// Cycle-cost table and reserved supervisor-call numbers.
pub mod constants;
/// Faults, fatal errors, and clean termination statuses.
pub mod error;

pub use error::{Fault, SimError, Termination};

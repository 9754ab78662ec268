//! Simulation: program loading and the driver loop.

/// Flat-binary and ELF image loading.
pub mod loader;
/// The driver coupling harvest, scheme, decode, and execute.
pub mod simulator;

pub use simulator::Simulator;

//! Power modelling: the capacitor energy store and harvest traces.

/// Continuous capacitor model.
pub mod capacitor;
/// Piecewise-constant ambient-power traces.
pub mod harvest;

pub use capacitor::Capacitor;
pub use harvest::HarvestTrace;

//! Checkpoint schemes.
//!
//! A scheme is the policy half of the simulator: it owns the battery
//! capacitor, prices instruction execution, and decides when non-volatile
//! checkpoints and restores happen. The driver talks to it exclusively
//! through the [`EnergyScheme`] capability trait, so scheme state stays
//! opaque and new policies can be added behind [`SchemeKind`].

/// Checkpoint after every instruction while the penalty is affordable.
pub mod backup_every_cycle;
/// Checkpoint only when about to lose power.
pub mod on_demand_all_backup;

pub use backup_every_cycle::BackupEveryCycle;
pub use on_demand_all_backup::OnDemandAllBackup;

use crate::config::SchemeConfig;
use crate::power::Capacitor;
use crate::stats::StatsBundle;

/// The capability set the driver requires of a checkpoint scheme.
pub trait EnergyScheme {
    /// The power source the scheduler charges.
    fn battery(&self) -> &Capacitor;

    /// Mutable access to the power source, for harvesting.
    fn battery_mut(&mut self) -> &mut Capacitor;

    /// CPU clock frequency in hertz; converts cycle counts to simulated time.
    fn clock_frequency(&self) -> u32;

    /// Debits one instruction's energy from the battery and credits the
    /// instruction-energy statistics. Called exactly once per committed
    /// instruction.
    fn execute_instruction(&mut self, stats: &mut StatsBundle);

    /// True while enough energy is stored to execute at least one more
    /// instruction plus the scheme's pending backup/restore reserve.
    fn is_active(&self) -> bool;

    /// Whether a backup should be taken now, after the instruction that
    /// just committed.
    fn will_backup(&self, stats: &StatsBundle) -> bool;

    /// Performs a checkpoint: debits the backup energy and records the
    /// interval since the previous backup (or the period start). Returns
    /// the checkpoint's cycle cost.
    fn backup(&mut self, stats: &mut StatsBundle) -> u64;

    /// Performs a restore: debits the restore energy and opens a new
    /// active-period record. Returns the restore's cycle cost.
    fn restore(&mut self, stats: &mut StatsBundle) -> u64;

    /// Minimum stored energy at which a restore is worth attempting: the
    /// restore penalty plus the scheme's active reserve, so `is_active()`
    /// still holds once the restore has been debited.
    fn restart_threshold(&self) -> f64;
}

/// The closed set of scheme selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeKind {
    /// On-demand all backup: all state is non-volatile, checkpoint only
    /// when about to lose power.
    OnDemandAllBackup,
    /// Backup every cycle: incremental checkpoints after every instruction.
    BackupEveryCycle,
}

/// Instantiates the scheme named by `kind` with the given parameters.
pub fn build_scheme(kind: SchemeKind, params: &SchemeConfig) -> Box<dyn EnergyScheme> {
    match kind {
        SchemeKind::OnDemandAllBackup => Box::new(OnDemandAllBackup::new(params)),
        SchemeKind::BackupEveryCycle => Box::new(BackupEveryCycle::new(params)),
    }
}

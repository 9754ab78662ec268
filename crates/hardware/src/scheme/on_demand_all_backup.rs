//! On-demand all backup.
//!
//! Assumes every piece of architectural and application state is
//! non-volatile, so a checkpoint is purely an accounting event with a fixed
//! energy and time penalty. The policy is to keep executing while energy is
//! plentiful and take a single checkpoint at the moment the battery can no
//! longer sustain execution, just before the processor powers off.

use crate::config::SchemeConfig;
use crate::power::Capacitor;
use crate::scheme::EnergyScheme;
use crate::stats::StatsBundle;

/// The on-demand-all-backup scheme.
pub struct OnDemandAllBackup {
    battery: Capacitor,
    params: SchemeConfig,
    last_backup_cycle: u64,
}

impl OnDemandAllBackup {
    /// Creates the scheme with a fully-charged battery.
    pub fn new(params: &SchemeConfig) -> Self {
        Self {
            battery: Capacitor::new(params.capacitance, params.max_voltage),
            params: params.clone(),
            last_backup_cycle: 0,
        }
    }

    /// Energy that must stay in reserve for execution to continue: one
    /// instruction plus one backup plus one restore.
    fn active_reserve(&self) -> f64 {
        self.params.instruction_energy + self.params.backup_energy + self.params.restore_energy
    }
}

impl EnergyScheme for OnDemandAllBackup {
    fn battery(&self) -> &Capacitor {
        &self.battery
    }

    fn battery_mut(&mut self) -> &mut Capacitor {
        &mut self.battery
    }

    fn clock_frequency(&self) -> u32 {
        self.params.clock_frequency
    }

    fn execute_instruction(&mut self, stats: &mut StatsBundle) {
        self.battery.consume(self.params.instruction_energy);

        stats.active_period_mut().instruction_energy += self.params.instruction_energy;
        stats.ledger.energy_for_instructions += self.params.instruction_energy;
    }

    fn is_active(&self) -> bool {
        self.battery.energy_stored() > self.active_reserve()
    }

    fn will_backup(&self, _stats: &StatsBundle) -> bool {
        // About to lose power, and the checkpoint is still affordable.
        !self.is_active() && self.battery.energy_stored() > self.params.backup_energy
    }

    fn backup(&mut self, stats: &mut StatsBundle) -> u64 {
        // Architectural and application state stay in place: non-volatile.
        self.battery.consume(self.params.backup_energy);
        stats.ledger.energy_for_backups += self.params.backup_energy;

        let interval = stats.cpu.cycle_count - self.last_backup_cycle;
        stats.active_period_mut().backup_times.push(interval);
        self.last_backup_cycle = stats.cpu.cycle_count;

        self.params.backup_cycles
    }

    fn restore(&mut self, stats: &mut StatsBundle) -> u64 {
        // Nothing to copy back; pay the fixed penalty and start a new
        // active period.
        self.battery.consume(self.params.restore_energy);
        stats.ledger.energy_for_restores += self.params.restore_energy;

        stats.open_active_period();
        // Intervals in the new period are measured from its first cycle,
        // which is the current count plus the restore penalty.
        self.last_backup_cycle = stats.cpu.cycle_count + self.params.restore_cycles;

        self.params.restore_cycles
    }

    fn restart_threshold(&self) -> f64 {
        self.params.restore_energy + self.active_reserve()
    }
}

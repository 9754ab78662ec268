//! Backup every cycle.
//!
//! Models hardware that checkpoints incrementally after every committed
//! instruction, so the checkpoint penalty is of the same order as an
//! instruction. The upside is that almost no progress is lost on a power
//! failure; the downside is the constant checkpoint tax on throughput and
//! energy. Useful as the pessimistic bound when comparing policies.

use crate::config::SchemeConfig;
use crate::power::Capacitor;
use crate::scheme::EnergyScheme;
use crate::stats::StatsBundle;

/// The backup-every-cycle scheme.
pub struct BackupEveryCycle {
    battery: Capacitor,
    params: SchemeConfig,
    last_backup_cycle: u64,
}

impl BackupEveryCycle {
    /// Creates the scheme with a fully-charged battery.
    ///
    /// Callers normally pass [`SchemeConfig::incremental`] parameters;
    /// paper-sized monolithic checkpoints would make this policy spend
    /// nearly all of its energy checkpointing.
    pub fn new(params: &SchemeConfig) -> Self {
        Self {
            battery: Capacitor::new(params.capacitance, params.max_voltage),
            params: params.clone(),
            last_backup_cycle: 0,
        }
    }

    fn active_reserve(&self) -> f64 {
        self.params.instruction_energy + self.params.backup_energy + self.params.restore_energy
    }
}

impl EnergyScheme for BackupEveryCycle {
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
        self.battery.energy_stored() > self.params.backup_energy
    }

    fn backup(&mut self, stats: &mut StatsBundle) -> u64 {
        self.battery.consume(self.params.backup_energy);
        stats.ledger.energy_for_backups += self.params.backup_energy;

        let interval = stats.cpu.cycle_count - self.last_backup_cycle;
        stats.active_period_mut().backup_times.push(interval);
        self.last_backup_cycle = stats.cpu.cycle_count;

        self.params.backup_cycles
    }

    fn restore(&mut self, stats: &mut StatsBundle) -> u64 {
        self.battery.consume(self.params.restore_energy);
        stats.ledger.energy_for_restores += self.params.restore_energy;

        stats.open_active_period();
        self.last_backup_cycle = stats.cpu.cycle_count + self.params.restore_cycles;

        self.params.restore_cycles
    }

    fn restart_threshold(&self) -> f64 {
        self.params.restore_energy + self.active_reserve()
    }
}

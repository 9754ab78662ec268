//! Simulation statistics collection and reporting.
//!
//! This module tracks everything a run reports:
//! 1. **CPU counters:** Total cycles, committed instructions, and the program exit code.
//! 2. **Energy ledger:** Totals harvested and spent on instructions, backups, and restores.
//! 3. **Active periods:** One record per span of uninterrupted execution, with its
//!    instruction energy, instruction count, and backup intervals.
//! 4. **Memory counters:** Word-level load/store/fetch counts.
//!
//! The whole bundle serializes to JSON and round-trips through the pretty
//! printer, so persisted reports can be re-read for analysis.

use serde::{Deserialize, Serialize};

use crate::common::Termination;
use crate::memory::AccessCounts;

/// CPU-side counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuStats {
    /// Total simulated cycles: execution plus backup and restore penalties.
    pub cycle_count: u64,
    /// Committed instructions across all active periods.
    pub instruction_count: u64,
    /// Exit code left in r0 by the termination trap, when one was invoked.
    pub exit_code: Option<u32>,
}

/// Global energy totals, in joules.
///
/// Entries are accumulated in one canonical order per driver iteration
/// (harvest, instruction, backup, restore) so runs are bit-reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyLedger {
    /// Energy absorbed from the ambient source.
    pub energy_harvested: f64,
    /// Energy drawn by committed instructions.
    pub energy_for_instructions: f64,
    /// Energy drawn by checkpoints.
    pub energy_for_backups: f64,
    /// Energy drawn by restores.
    pub energy_for_restores: f64,
}

/// Statistics for one active period: a contiguous span of execution with no
/// intervening power-off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivePeriodStats {
    /// Energy drawn by this period's instructions, in joules.
    pub instruction_energy: f64,
    /// Instructions committed in this period.
    pub instruction_count: u64,
    /// Backup intervals: cycles elapsed since the previous backup, or since
    /// the start of the period for the first entry.
    pub backup_times: Vec<u64>,
}

/// All statistics for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsBundle {
    /// CPU-side counters.
    pub cpu: CpuStats,
    /// Global energy totals.
    pub ledger: EnergyLedger,
    /// Word-level memory transaction counts.
    pub memory: AccessCounts,
    /// Per-active-period records, in order. A new record is opened by every
    /// restore; the first is opened at construction.
    pub active_periods: Vec<ActivePeriodStats>,
}

impl Default for StatsBundle {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsBundle {
    /// Creates an empty bundle with the first active period open.
    pub fn new() -> Self {
        Self {
            cpu: CpuStats::default(),
            ledger: EnergyLedger::default(),
            memory: AccessCounts::default(),
            active_periods: vec![ActivePeriodStats::default()],
        }
    }

    /// The currently-open active period.
    pub fn active_period_mut(&mut self) -> &mut ActivePeriodStats {
        // The vector is never empty: one record is created at construction
        // and restores only append.
        if self.active_periods.is_empty() {
            self.active_periods.push(ActivePeriodStats::default());
        }
        let last = self.active_periods.len() - 1;
        &mut self.active_periods[last]
    }

    /// Opens a fresh active-period record.
    pub fn open_active_period(&mut self) {
        self.active_periods.push(ActivePeriodStats::default());
    }
}

/// The persisted result of a run: how it ended, plus the full statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// How the run terminated.
    pub status: Termination,
    /// The collected statistics.
    #[serde(flatten)]
    pub stats: StatsBundle,
}

impl RunReport {
    /// Renders the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a report back from JSON.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("==================================================");
        println!("status                  {}", self.status);
        if let Some(code) = self.stats.cpu.exit_code {
            println!("exit_code               {}", code);
        }
        println!("cycles                  {}", self.stats.cpu.cycle_count);
        println!("instructions            {}", self.stats.cpu.instruction_count);
        println!("active_periods          {}", self.stats.active_periods.len());
        let backups: usize = self
            .stats
            .active_periods
            .iter()
            .map(|p| p.backup_times.len())
            .sum();
        println!("backups                 {}", backups);
        println!("energy.harvested        {:.6e} J", self.stats.ledger.energy_harvested);
        println!(
            "energy.instructions     {:.6e} J",
            self.stats.ledger.energy_for_instructions
        );
        println!("energy.backups          {:.6e} J", self.stats.ledger.energy_for_backups);
        println!("energy.restores         {:.6e} J", self.stats.ledger.energy_for_restores);
        println!("==================================================");
    }
}

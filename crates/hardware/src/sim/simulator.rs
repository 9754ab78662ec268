//! The simulation driver.
//!
//! Owns the CPU, memory, statistics, and scheme side by side, and advances a
//! single monotonic simulated-time variable that serializes the three clocks
//! of the system: instruction cycles, harvest power, and backup/restore
//! penalties. Within each iteration, harvesting happens before consumption
//! and the scheme's policy decisions observe post-execute state, so a run is
//! fully deterministic.

use crate::common::{Fault, SimError, Termination};
use crate::config::Config;
use crate::core::Cpu;
use crate::exec;
use crate::isa::{decode, disasm};
use crate::memory::Memory;
use crate::power::HarvestTrace;
use crate::scheme::EnergyScheme;
use crate::stats::{RunReport, StatsBundle};

/// Top-level simulator: CPU and memory plus the power/state controller.
pub struct Simulator {
    /// CPU architectural state.
    pub cpu: Cpu,
    /// The memory image.
    pub memory: Memory,
    /// Statistics collected so far.
    pub stats: StatsBundle,
    scheme: Box<dyn EnergyScheme>,
    harvest: HarvestTrace,
    /// Simulated wall-clock time: cycles executed over the clock frequency,
    /// plus time spent waiting through off-periods.
    time: f64,
    /// Simulated time up to which the battery has been charged.
    charged_until: f64,
    cycle_limit: Option<u64>,
    off_deadline: f64,
    trace_instructions: bool,
}

impl Simulator {
    /// Creates a simulator over a loaded memory image.
    ///
    /// The caller sets the CPU entry state (PC and SP) afterwards, normally
    /// from [`crate::sim::loader::LoadedImage`].
    pub fn new(
        memory: Memory,
        scheme: Box<dyn EnergyScheme>,
        harvest: HarvestTrace,
        config: &Config,
    ) -> Self {
        Self {
            cpu: Cpu::new(),
            memory,
            stats: StatsBundle::new(),
            scheme,
            harvest,
            time: 0.0,
            charged_until: 0.0,
            cycle_limit: config.general.cycle_limit,
            off_deadline: config.general.off_deadline,
            trace_instructions: config.general.trace_instructions,
        }
    }

    /// The scheme driving this simulator.
    pub fn scheme(&self) -> &dyn EnergyScheme {
        self.scheme.as_ref()
    }

    /// Current simulated time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Adds executed cycles to the counter and to simulated time.
    fn advance(&mut self, cycles: u64) {
        self.stats.cpu.cycle_count += cycles;
        self.time += cycles as f64 / f64::from(self.scheme.clock_frequency());
    }

    /// Charges the battery with the ambient energy accumulated since the
    /// last charge point.
    fn charge_elapsed(&mut self) {
        if self.time > self.charged_until {
            let energy = self.harvest.integrate(self.charged_until, self.time);
            let gained = self.scheme.battery_mut().charge(energy);
            self.stats.ledger.energy_harvested += gained;
            self.charged_until = self.time;
        }
    }

    /// Executes one driver iteration.
    ///
    /// Returns `Ok(Some(status))` when the run has terminated cleanly,
    /// `Ok(None)` when there is more to do, and `Err` on a fatal fault.
    pub fn step(&mut self) -> Result<Option<Termination>, SimError> {
        self.charge_elapsed();

        if !self.scheme.is_active() {
            return self.power_off();
        }

        let pc = self.cpu.pc();
        let at_pc = |fault: Fault| SimError { pc, fault };

        let first = self.memory.fetch16(pc).map_err(at_pc)?;
        let second = if decode::is_wide(first) {
            self.memory.fetch16(pc.wrapping_add(2)).map_err(at_pc)?
        } else {
            0
        };
        let decoded = decode::decode(first, second).map_err(at_pc)?;

        if self.trace_instructions {
            println!(
                "[{:>10}] {:#010x}  {}",
                self.stats.cpu.cycle_count,
                pc,
                disasm::disassemble(&decoded)
            );
        }

        let cycles = exec::execute(&mut self.cpu, &mut self.memory, &decoded).map_err(at_pc)?;
        if !self.cpu.branch_taken {
            self.cpu.set_pc(pc.wrapping_add(decoded.size()));
        }

        self.scheme.execute_instruction(&mut self.stats);
        self.stats.cpu.instruction_count += 1;
        self.stats.active_period_mut().instruction_count += 1;
        self.advance(cycles);

        if let Some(code) = self.cpu.take_exit() {
            self.stats.cpu.exit_code = Some(code);
            return Ok(Some(Termination::Sentinel));
        }

        if self.scheme.will_backup(&self.stats) {
            let backup_cycles = self.scheme.backup(&mut self.stats);
            self.advance(backup_cycles);
        }

        if let Some(limit) = self.cycle_limit {
            if self.stats.cpu.cycle_count >= limit {
                return Ok(Some(Termination::CycleLimit));
            }
        }

        Ok(None)
    }

    /// The off sub-protocol: wait for the battery to reach the restart
    /// threshold, then restore.
    ///
    /// Time advances in quanta of one clock period, integrating the harvest
    /// trace exactly over each quantum. The wait ends in a stall when the
    /// trace's support is exhausted at zero power, when the battery is full
    /// yet still below the threshold, or when the off-period deadline
    /// elapses.
    fn power_off(&mut self) -> Result<Option<Termination>, SimError> {
        let quantum = 1.0 / f64::from(self.scheme.clock_frequency());
        let threshold = self.scheme.restart_threshold();
        let start = self.time;

        while self.scheme.battery().energy_stored() < threshold {
            if self.scheme.battery().is_full() {
                return Ok(Some(Termination::Stalled));
            }
            if self.harvest.power_at(self.time) == 0.0 && self.time >= self.harvest.end_time() {
                return Ok(Some(Termination::Stalled));
            }
            if self.time - start > self.off_deadline {
                return Ok(Some(Termination::Stalled));
            }

            let energy = self.harvest.integrate(self.time, self.time + quantum);
            let gained = self.scheme.battery_mut().charge(energy);
            self.stats.ledger.energy_harvested += gained;
            self.time += quantum;
            self.charged_until = self.time;
        }

        let restore_cycles = self.scheme.restore(&mut self.stats);
        self.advance(restore_cycles);

        Ok(None)
    }

    /// Runs until clean termination or a fatal fault.
    ///
    /// On clean termination the memory access counters are folded into the
    /// statistics and the full report is returned. On a fault the collected
    /// statistics remain readable through [`Simulator::stats`].
    pub fn run(&mut self) -> Result<RunReport, SimError> {
        loop {
            if let Some(status) = self.step()? {
                self.stats.memory = self.memory.counts;
                return Ok(RunReport {
                    status,
                    stats: self.stats.clone(),
                });
            }
        }
    }
}

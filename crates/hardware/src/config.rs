//! Configuration system for the simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline constants (memory map, scheme energy/timing parameters).
//! 2. **Structures:** Hierarchical config for general, memory, and scheme settings.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or via
//! `Config::default()`. Scheme parameters are expressed in SI units
//! throughout: joules, seconds, hertz, farads, volts.

use serde::Deserialize;

/// Default configuration constants for the simulator.
mod defaults {
    /// Base address of read-only memory (the program image).
    pub const ROM_BASE: u32 = 0x0000_0000;

    /// Size of read-only memory (128 KiB).
    pub const ROM_SIZE: usize = 128 * 1024;

    /// Base address of read-write memory.
    pub const RAM_BASE: u32 = 0x2000_0000;

    /// Size of read-write memory (64 KiB).
    pub const RAM_SIZE: usize = 64 * 1024;

    /// Longest simulated off-period before the run is declared stalled (s).
    pub const OFF_DEADLINE: f64 = 600.0;

    /// CPU clock frequency (Hz). The reference platform runs at 8 kHz.
    pub const CLOCK_FREQUENCY: u32 = 8_000;

    /// Capacitance of the energy-store capacitor (F).
    pub const CAPACITANCE: f64 = 470e-9;

    /// Maximum capacitor voltage (V).
    pub const MAX_VOLTAGE: f64 = 7.5;

    /// Energy drawn by one instruction (J): 31.25 pJ.
    pub const INSTRUCTION_ENERGY: f64 = 31.25e-12;

    /// Energy drawn by one checkpoint (J): 750 pJ.
    pub const BACKUP_ENERGY: f64 = 750e-12;

    /// Cycles consumed by one checkpoint.
    pub const BACKUP_CYCLES: u64 = 35;

    /// Energy drawn by one restore (J): 250 pJ.
    pub const RESTORE_ENERGY: f64 = 250e-12;

    /// Cycles consumed by one restore.
    pub const RESTORE_CYCLES: u64 = 35;

    /// Checkpoint energy for the incremental backup-every-cycle policy (J).
    pub const INCREMENTAL_BACKUP_ENERGY: f64 = 31.25e-12;

    /// Checkpoint cycles for the incremental backup-every-cycle policy.
    pub const INCREMENTAL_BACKUP_CYCLES: u64 = 2;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use ehsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.general.trace_instructions, false);
/// assert_eq!(config.memory.ram_base, 0x2000_0000);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use ehsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "cycle_limit": 100000 },
///     "memory": { "ram_size": 131072 },
///     "scheme": { "clock_frequency": 24000000 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.general.cycle_limit, Some(100000));
/// assert_eq!(config.memory.ram_size, 131072);
/// assert_eq!(config.scheme.clock_frequency, 24_000_000);
/// assert_eq!(config.memory.rom_base, 0);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory map configuration.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Scheme energy and timing parameters.
    #[serde(default)]
    pub scheme: SchemeConfig,
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Print one `cycle / pc / mnemonic` line per executed instruction.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Stop the run once the cycle counter reaches this value.
    #[serde(default)]
    pub cycle_limit: Option<u64>,

    /// Longest simulated off-period, in seconds, before the run stalls.
    #[serde(default = "GeneralConfig::default_off_deadline")]
    pub off_deadline: f64,
}

impl GeneralConfig {
    /// Returns the default off-period deadline in seconds.
    fn default_off_deadline() -> f64 {
        defaults::OFF_DEADLINE
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            cycle_limit: None,
            off_deadline: defaults::OFF_DEADLINE,
        }
    }
}

/// Memory map configuration.
///
/// Two regions are mapped: ROM holds the program image and faults on stores;
/// RAM is read-write. Both are word-addressable.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// ROM base address.
    #[serde(default = "MemoryConfig::default_rom_base")]
    pub rom_base: u32,

    /// ROM size in bytes.
    #[serde(default = "MemoryConfig::default_rom_size")]
    pub rom_size: usize,

    /// RAM base address.
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u32,

    /// RAM size in bytes.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,

    /// Initial stack pointer for images without a vector table.
    /// Defaults to the top of RAM if not set.
    #[serde(default)]
    pub initial_sp: Option<u32>,
}

impl MemoryConfig {
    /// Returns the default ROM base address.
    fn default_rom_base() -> u32 {
        defaults::ROM_BASE
    }

    /// Returns the default ROM size in bytes.
    fn default_rom_size() -> usize {
        defaults::ROM_SIZE
    }

    /// Returns the default RAM base address.
    fn default_ram_base() -> u32 {
        defaults::RAM_BASE
    }

    /// Returns the default RAM size in bytes.
    fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            rom_base: defaults::ROM_BASE,
            rom_size: defaults::ROM_SIZE,
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
            initial_sp: None,
        }
    }
}

/// Scheme energy and timing parameters.
///
/// The defaults are the on-demand-all-backup platform constants: an 8 kHz
/// core drawing 31.25 pJ per instruction from a 470 nF capacitor charged to
/// at most 7.5 V, with 750 pJ / 35-cycle checkpoints and 250 pJ / 35-cycle
/// restores.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeConfig {
    /// CPU clock frequency in hertz; converts cycle counts to simulated time.
    #[serde(default = "SchemeConfig::default_clock_frequency")]
    pub clock_frequency: u32,

    /// Capacitance of the battery capacitor, in farads.
    #[serde(default = "SchemeConfig::default_capacitance")]
    pub capacitance: f64,

    /// Maximum capacitor voltage, in volts.
    #[serde(default = "SchemeConfig::default_max_voltage")]
    pub max_voltage: f64,

    /// Energy drawn per committed instruction, in joules.
    #[serde(default = "SchemeConfig::default_instruction_energy")]
    pub instruction_energy: f64,

    /// Energy drawn per checkpoint, in joules.
    #[serde(default = "SchemeConfig::default_backup_energy")]
    pub backup_energy: f64,

    /// Cycles consumed per checkpoint.
    #[serde(default = "SchemeConfig::default_backup_cycles")]
    pub backup_cycles: u64,

    /// Energy drawn per restore, in joules.
    #[serde(default = "SchemeConfig::default_restore_energy")]
    pub restore_energy: f64,

    /// Cycles consumed per restore.
    #[serde(default = "SchemeConfig::default_restore_cycles")]
    pub restore_cycles: u64,
}

impl SchemeConfig {
    /// Returns the default clock frequency in hertz.
    fn default_clock_frequency() -> u32 {
        defaults::CLOCK_FREQUENCY
    }

    /// Returns the default capacitance in farads.
    fn default_capacitance() -> f64 {
        defaults::CAPACITANCE
    }

    /// Returns the default maximum capacitor voltage in volts.
    fn default_max_voltage() -> f64 {
        defaults::MAX_VOLTAGE
    }

    /// Returns the default per-instruction energy in joules.
    fn default_instruction_energy() -> f64 {
        defaults::INSTRUCTION_ENERGY
    }

    /// Returns the default per-checkpoint energy in joules.
    fn default_backup_energy() -> f64 {
        defaults::BACKUP_ENERGY
    }

    /// Returns the default per-checkpoint cycle cost.
    fn default_backup_cycles() -> u64 {
        defaults::BACKUP_CYCLES
    }

    /// Returns the default per-restore energy in joules.
    fn default_restore_energy() -> f64 {
        defaults::RESTORE_ENERGY
    }

    /// Returns the default per-restore cycle cost.
    fn default_restore_cycles() -> u64 {
        defaults::RESTORE_CYCLES
    }

    /// Parameters for the backup-every-cycle policy: checkpoints are
    /// incremental, so each one is as cheap as an instruction.
    pub fn incremental() -> Self {
        Self {
            backup_energy: defaults::INCREMENTAL_BACKUP_ENERGY,
            backup_cycles: defaults::INCREMENTAL_BACKUP_CYCLES,
            ..Self::default()
        }
    }
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            clock_frequency: defaults::CLOCK_FREQUENCY,
            capacitance: defaults::CAPACITANCE,
            max_voltage: defaults::MAX_VOLTAGE,
            instruction_energy: defaults::INSTRUCTION_ENERGY,
            backup_energy: defaults::BACKUP_ENERGY,
            backup_cycles: defaults::BACKUP_CYCLES,
            restore_energy: defaults::RESTORE_ENERGY,
            restore_cycles: defaults::RESTORE_CYCLES,
        }
    }
}

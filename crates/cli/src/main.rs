//! Energy-harvesting simulator CLI.
//!
//! This binary is the single entry point for simulation runs. It performs:
//! 1. **Input:** Loads a flat or ELF program image and an optional harvest trace.
//! 2. **Configuration:** Built-in defaults, an optional JSON config file, and flag overrides.
//! 3. **Output:** A human-readable summary plus a JSON statistics document.

use std::fs;
use std::process;

use clap::{Parser, ValueEnum};

use ehsim_core::config::{Config, SchemeConfig};
use ehsim_core::power::HarvestTrace;
use ehsim_core::scheme::{build_scheme, SchemeKind};
use ehsim_core::sim::loader;
use ehsim_core::{Memory, Simulator};

/// Process exit code for a stalled run.
const EXIT_STALLED: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "ehsim",
    author,
    version,
    about = "Energy-harvesting ARMv6-M simulator",
    long_about = "Execute an ARMv6-M binary on a capacitor-powered core, charging from an \
ambient harvest trace, and report forward progress per checkpoint scheme.\n\nExamples:\n  \
ehsim benchmarks/crc.bin\n  ehsim benchmarks/crc.bin --scheme odab --harvest traces/rf.txt\n  \
ehsim firmware.elf --cycles 2000000 --stats-out stats.json"
)]
struct Cli {
    /// Program image to execute (flat binary or ELF).
    binary: String,

    /// Checkpoint scheme.
    #[arg(long, value_enum, default_value_t = SchemeArg::Odab)]
    scheme: SchemeArg,

    /// Harvest trace file (`time_seconds power_watts` per line).
    #[arg(long)]
    harvest: Option<String>,

    /// Constant harvest power in watts, used when no trace is given.
    #[arg(long, default_value_t = 1.0)]
    power: f64,

    /// Stop after this many simulated cycles.
    #[arg(long)]
    cycles: Option<u64>,

    /// Write the statistics document to this path instead of stdout.
    #[arg(long)]
    stats_out: Option<String>,

    /// JSON configuration file (flags override its values).
    #[arg(long)]
    config: Option<String>,

    /// Print one line per executed instruction.
    #[arg(long)]
    trace: bool,
}

/// Scheme selection on the command line.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum SchemeArg {
    /// On-demand all backup: checkpoint only when about to lose power.
    Odab,
    /// Backup every cycle: incremental checkpoint after every instruction.
    BackupEveryCycle,
}

impl SchemeArg {
    fn kind(self) -> SchemeKind {
        match self {
            SchemeArg::Odab => SchemeKind::OnDemandAllBackup,
            SchemeArg::BackupEveryCycle => SchemeKind::BackupEveryCycle,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("\n[!] FATAL: Could not read config '{}': {}", path, e);
                process::exit(1);
            });
            serde_json::from_str::<Config>(&text).unwrap_or_else(|e| {
                eprintln!("\n[!] FATAL: Invalid config '{}': {}", path, e);
                process::exit(1);
            })
        }
        None => {
            let mut config = Config::default();
            // Incremental checkpoints are the sensible default for the
            // every-cycle policy; a config file still overrides this.
            if matches!(cli.scheme, SchemeArg::BackupEveryCycle) {
                config.scheme = SchemeConfig::incremental();
            }
            config
        }
    };
    if cli.cycles.is_some() {
        config.general.cycle_limit = cli.cycles;
    }
    if cli.trace {
        config.general.trace_instructions = true;
    }

    let harvest = match &cli.harvest {
        Some(path) => HarvestTrace::from_file(path).unwrap_or_else(|e| {
            eprintln!("\n[!] FATAL: Could not read harvest trace '{}': {}", path, e);
            process::exit(1);
        }),
        None => HarvestTrace::constant(cli.power),
    };

    let mut memory = Memory::new(&config.memory);
    let data = loader::load_binary(&cli.binary);
    let image = loader::load_program(&mut memory, &config, &data);

    println!("[*] Executing: {}", cli.binary);
    println!(
        "    scheme={:?}  entry={:#010x}  sp={:#010x}  clock={} Hz",
        cli.scheme, image.entry, image.initial_sp, config.scheme.clock_frequency
    );

    let scheme = build_scheme(cli.scheme.kind(), &config.scheme);
    let mut sim = Simulator::new(memory, scheme, harvest, &config);
    sim.cpu.set_pc(image.entry);
    sim.cpu.set_sp(image.initial_sp);

    let report = match sim.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("\n[!] FATAL: {}", e);
            sim.cpu.regs.dump();
            process::exit(1);
        }
    };

    report.print_summary();

    let json = report.to_json_pretty().unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not serialize statistics: {}", e);
        process::exit(1);
    });
    match &cli.stats_out {
        Some(path) => {
            if let Err(e) = fs::write(path, json + "\n") {
                eprintln!("\n[!] FATAL: Could not write '{}': {}", path, e);
                process::exit(1);
            }
            println!("[*] Statistics written to {}", path);
        }
        None => println!("{}", json),
    }

    match report.status {
        ehsim_core::common::Termination::Stalled => process::exit(EXIT_STALLED),
        _ => process::exit(0),
    }
}

//! Energy-harvesting ARMv6-M system simulator library.
//!
//! This crate implements a cycle-accurate ARMv6-M (Thumb) interpreter coupled
//! to an intermittent-power model. It provides:
//! 1. **Core:** CPU architectural state (r0-r15, APSR flags, IT state).
//! 2. **Memory:** Word-addressable ROM and RAM with access counters.
//! 3. **ISA:** Decoding, execution, and disassembly for the ARMv6-M Thumb subset.
//! 4. **Power:** A capacitor energy store and piecewise-constant harvest traces.
//! 5. **Schemes:** Pluggable checkpoint policies (on-demand all backup, backup every cycle).
//! 6. **Simulation:** Loader, configuration, driver loop, and statistics collection.

/// Common types and constants (faults, terminations, cycle costs, trap numbers).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// CPU architectural state (registers, flags, branch signalling).
pub mod core;
/// Execute units: one handler per operation tag, returning a cycle cost.
pub mod exec;
/// Instruction set (operation tags, decoder, disassembler).
pub mod isa;
/// Word-addressable memory image (ROM + RAM).
pub mod memory;
/// Capacitor model and harvest traces.
pub mod power;
/// Checkpoint schemes and the scheme capability trait.
pub mod scheme;
/// Binary loader and the simulation driver.
pub mod sim;
/// Statistics collection and the persisted run report.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// CPU architectural state; construct with `Cpu::new`.
pub use crate::core::Cpu;
/// Memory image; construct from a `MemoryConfig`.
pub use crate::memory::Memory;
/// Top-level driver coupling CPU, memory, scheme, and harvest trace.
pub use crate::sim::Simulator;

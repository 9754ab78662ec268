//! Fault and termination definitions.
//!
//! This module defines the error handling surface of the simulator:
//! 1. **Faults:** Conditions that abort execution (bad encodings, bad memory accesses).
//! 2. **Fatal errors:** A fault annotated with the program counter at which it occurred.
//! 3. **Terminations:** The clean ways a run can end; these are not errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A condition that makes further execution meaningless.
///
/// Faults are raised by the decoder and the execute units and reported with
/// the faulting address or encoding attached. The driver wraps them into a
/// [`SimError`] together with the current PC.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fault {
    /// Unknown or reserved instruction encoding.
    ///
    /// The associated value is the first halfword of the encoding.
    UnknownInstruction(u16),

    /// Structurally invalid instruction, e.g. an STM whose base register is
    /// in the transfer list but is not the lowest register stored.
    ///
    /// The associated value is the first halfword of the encoding.
    MalformedInstruction(u16),

    /// Load from an address outside every mapped region.
    UnmappedLoad(u32),

    /// Store to an address outside every mapped region.
    UnmappedStore(u32),

    /// Store into read-only memory.
    RomWrite(u32),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::UnknownInstruction(hw) => write!(f, "unknown instruction {:#06x}", hw),
            Fault::MalformedInstruction(hw) => write!(f, "malformed instruction {:#06x}", hw),
            Fault::UnmappedLoad(addr) => write!(f, "load from unmapped address {:#010x}", addr),
            Fault::UnmappedStore(addr) => write!(f, "store to unmapped address {:#010x}", addr),
            Fault::RomWrite(addr) => write!(f, "store to read-only address {:#010x}", addr),
        }
    }
}

impl std::error::Error for Fault {}

/// A fault together with the PC of the instruction that raised it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimError {
    /// Address of the faulting instruction.
    pub pc: u32,
    /// The underlying fault.
    pub fault: Fault,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at pc {:#010x}", self.fault, self.pc)
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.fault)
    }
}

/// The clean ways a simulation run can end.
///
/// None of these are errors: statistics are valid and complete for all three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The program invoked the exit trap; its r0 payload is recorded as the
    /// exit code in the statistics.
    Sentinel,
    /// The off sub-protocol exhausted the harvest trace (or its deadline)
    /// without the capacitor reaching the restart threshold.
    Stalled,
    /// The configured cycle limit was reached.
    CycleLimit,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Sentinel => write!(f, "sentinel"),
            Termination::Stalled => write!(f, "stalled"),
            Termination::CycleLimit => write!(f, "cycle_limit"),
        }
    }
}

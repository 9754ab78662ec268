//! CPU architectural state.
//!
//! This module holds everything the execute units mutate besides memory:
//! 1. **Registers:** Sixteen 32-bit general-purpose registers (r13 = SP, r14 = LR, r15 = PC).
//! 2. **Flags:** The APSR condition flags and the (always-set) EPSR Thumb bit.
//! 3. **Control:** PRIMASK and CONTROL special registers.
//! 4. **Signalling:** The branch-taken flag and the pending exit request.
//!
//! The CPU is an explicit context threaded through decode and execute, so
//! several simulators can coexist in one process and tests can construct
//! isolated instances.

/// Condition flags and condition-code evaluation.
pub mod apsr;
/// The general-purpose register file.
pub mod gpr;

pub use apsr::Apsr;
pub use gpr::Gpr;

/// CPU architectural state for one ARMv6-M core.
#[derive(Debug, Clone, Default)]
pub struct Cpu {
    /// General-purpose registers r0-r15.
    pub regs: Gpr,
    /// Application program status register (N, Z, C, V).
    pub apsr: Apsr,
    /// PRIMASK: configurable-priority interrupt masking.
    pub primask: bool,
    /// CONTROL special register.
    pub control: u32,
    /// EPSR Thumb bit. Always set on this profile; kept for MRS/MSR.
    pub epsr_t: bool,
    /// IT-block state (condition and mask). ARMv6-M has no IT instruction,
    /// so this stays empty; conditional execution still consults it.
    pub itstate: u8,
    /// Set by an execute unit when it has written a non-sequential PC.
    pub branch_taken: bool,
    exit_request: Option<u32>,
}

impl Cpu {
    /// Creates a CPU with all registers cleared and the Thumb bit set.
    pub fn new() -> Self {
        Self {
            epsr_t: true,
            ..Self::default()
        }
    }

    /// Address of the instruction being executed (or fetched next).
    #[inline]
    pub fn pc(&self) -> u32 {
        self.regs.read(gpr::PC)
    }

    /// Sets the PC. Bit 0 is stripped: the PC is always halfword aligned.
    #[inline]
    pub fn set_pc(&mut self, value: u32) {
        self.regs.write(gpr::PC, value & !1);
    }

    /// The architectural value of the PC as an operand: the address of the
    /// current instruction plus 4.
    #[inline]
    pub fn pc_operand(&self) -> u32 {
        self.pc().wrapping_add(4)
    }

    /// Current stack pointer.
    #[inline]
    pub fn sp(&self) -> u32 {
        self.regs.read(gpr::SP)
    }

    /// Sets the stack pointer.
    #[inline]
    pub fn set_sp(&mut self, value: u32) {
        self.regs.write(gpr::SP, value);
    }

    /// Current link register.
    #[inline]
    pub fn lr(&self) -> u32 {
        self.regs.read(gpr::LR)
    }

    /// Sets the link register.
    #[inline]
    pub fn set_lr(&mut self, value: u32) {
        self.regs.write(gpr::LR, value);
    }

    /// Redirects execution to `target` and flags the branch for the driver.
    /// Bit 0 of the target (the Thumb bit) is stripped.
    pub fn branch_to(&mut self, target: u32) {
        self.set_pc(target);
        self.branch_taken = true;
    }

    /// True while inside an IT block. Always false on this profile.
    #[inline]
    pub fn in_it_block(&self) -> bool {
        self.itstate & 0x0F != 0
    }

    /// Evaluates a condition code against the current flags, honouring an
    /// active IT block if one existed.
    pub fn condition_passed(&self, cond: u8) -> bool {
        self.apsr.condition_passed(cond)
    }

    /// Records the exit trap payload; the driver picks it up via [`Cpu::take_exit`].
    pub fn request_exit(&mut self, code: u32) {
        self.exit_request = Some(code);
    }

    /// Retrieves the exit code if the program has invoked the exit trap.
    pub fn take_exit(&mut self) -> Option<u32> {
        self.exit_request.take()
    }
}

//! Execute units.
//!
//! One handler per operation tag. A handler consumes a decoded record,
//! mutates CPU and memory state, and returns its cost in CPU cycles. A
//! handler that redirects control flow writes the new PC itself and raises
//! the CPU's branch-taken flag; for everything else the driver advances the
//! PC sequentially after the handler returns.

/// Data-processing handlers and flag helpers.
pub mod alu;
/// Branch and branch-exchange handlers.
pub mod branch;
/// Load/store handlers, including the multi-register transfers.
pub mod mem;
/// Hints, extend/reverse, CPS/MRS/MSR, and the supervisor call.
pub mod misc;

use crate::common::Fault;
use crate::core::Cpu;
use crate::isa::{Decoded, Op};
use crate::memory::Memory;

/// Executes one decoded instruction and returns its cycle cost.
///
/// Clears the branch-taken flag before dispatching, so after the call the
/// flag reflects this instruction only.
pub fn execute(cpu: &mut Cpu, memory: &mut Memory, d: &Decoded) -> Result<u64, Fault> {
    cpu.branch_taken = false;
    match d.op {
        Op::LslImm => Ok(alu::lsl_imm(cpu, d)),
        Op::LsrImm => Ok(alu::lsr_imm(cpu, d)),
        Op::AsrImm => Ok(alu::asr_imm(cpu, d)),
        Op::AddReg => Ok(alu::add_reg(cpu, d)),
        Op::SubReg => Ok(alu::sub_reg(cpu, d)),
        Op::AddImm3 => Ok(alu::add_imm3(cpu, d)),
        Op::SubImm3 => Ok(alu::sub_imm3(cpu, d)),
        Op::MovImm => Ok(alu::mov_imm(cpu, d)),
        Op::CmpImm => Ok(alu::cmp_imm(cpu, d)),
        Op::AddImm8 => Ok(alu::add_imm8(cpu, d)),
        Op::SubImm8 => Ok(alu::sub_imm8(cpu, d)),
        Op::And => Ok(alu::and(cpu, d)),
        Op::Eor => Ok(alu::eor(cpu, d)),
        Op::LslReg => Ok(alu::lsl_reg(cpu, d)),
        Op::LsrReg => Ok(alu::lsr_reg(cpu, d)),
        Op::AsrReg => Ok(alu::asr_reg(cpu, d)),
        Op::Adc => Ok(alu::adc(cpu, d)),
        Op::Sbc => Ok(alu::sbc(cpu, d)),
        Op::RorReg => Ok(alu::ror_reg(cpu, d)),
        Op::Tst => Ok(alu::tst(cpu, d)),
        Op::Rsb => Ok(alu::rsb(cpu, d)),
        Op::CmpReg => Ok(alu::cmp_reg(cpu, d)),
        Op::Cmn => Ok(alu::cmn(cpu, d)),
        Op::Orr => Ok(alu::orr(cpu, d)),
        Op::Mul => Ok(alu::mul(cpu, d)),
        Op::Bic => Ok(alu::bic(cpu, d)),
        Op::Mvn => Ok(alu::mvn(cpu, d)),
        Op::AddHi => Ok(alu::add_hi(cpu, d)),
        Op::CmpHi => Ok(alu::cmp_hi(cpu, d)),
        Op::MovHi => Ok(alu::mov_hi(cpu, d)),
        Op::Adr => Ok(alu::adr(cpu, d)),
        Op::AddSp => Ok(alu::add_sp(cpu, d)),
        Op::IncrSp => Ok(alu::incr_sp(cpu, d)),
        Op::DecrSp => Ok(alu::decr_sp(cpu, d)),
        Op::Bx => Ok(branch::bx(cpu, d)),
        Op::Blx => Ok(branch::blx(cpu, d)),
        Op::BCond => Ok(branch::b_cond(cpu, d)),
        Op::B => Ok(branch::b(cpu, d)),
        Op::Bl => Ok(branch::bl(cpu, d)),
        Op::LdrLit => mem::ldr_lit(cpu, memory, d),
        Op::StrReg => mem::str_r(cpu, memory, d),
        Op::StrhReg => mem::strh_r(cpu, memory, d),
        Op::StrbReg => mem::strb_r(cpu, memory, d),
        Op::LdrsbReg => mem::ldrsb_r(cpu, memory, d),
        Op::LdrReg => mem::ldr_r(cpu, memory, d),
        Op::LdrhReg => mem::ldrh_r(cpu, memory, d),
        Op::LdrbReg => mem::ldrb_r(cpu, memory, d),
        Op::LdrshReg => mem::ldrsh_r(cpu, memory, d),
        Op::StrImm => mem::str_i(cpu, memory, d),
        Op::LdrImm => mem::ldr_i(cpu, memory, d),
        Op::StrbImm => mem::strb_i(cpu, memory, d),
        Op::LdrbImm => mem::ldrb_i(cpu, memory, d),
        Op::StrhImm => mem::strh_i(cpu, memory, d),
        Op::LdrhImm => mem::ldrh_i(cpu, memory, d),
        Op::StrSp => mem::str_sp(cpu, memory, d),
        Op::LdrSp => mem::ldr_sp(cpu, memory, d),
        Op::Stm => mem::stm(cpu, memory, d),
        Op::Ldm => mem::ldm(cpu, memory, d),
        Op::Push => mem::push(cpu, memory, d),
        Op::Pop => mem::pop(cpu, memory, d),
        Op::Sxth => Ok(misc::sxth(cpu, d)),
        Op::Sxtb => Ok(misc::sxtb(cpu, d)),
        Op::Uxth => Ok(misc::uxth(cpu, d)),
        Op::Uxtb => Ok(misc::uxtb(cpu, d)),
        Op::Rev => Ok(misc::rev(cpu, d)),
        Op::Rev16 => Ok(misc::rev16(cpu, d)),
        Op::Revsh => Ok(misc::revsh(cpu, d)),
        Op::Svc => Ok(misc::svc(cpu, d)),
        Op::Nop | Op::Yield | Op::Wfe | Op::Wfi | Op::Sev => Ok(misc::hint(cpu, d)),
        Op::Cps => Ok(misc::cps(cpu, d)),
        Op::Mrs => Ok(misc::mrs(cpu, d)),
        Op::Msr => Ok(misc::msr(cpu, d)),
    }
}

//! Data-processing handlers.
//!
//! Flag behavior follows the architecture: the low-register arithmetic
//! forms set N/Z/C/V, the logical forms set N/Z (carry comes from the
//! shifter and is untouched here), shifts set N/Z and shift the last bit
//! out into C, and the high-register ADD/MOV forms set nothing.

use crate::common::constants::TIMING_BRANCH;
use crate::core::Cpu;
use crate::isa::Decoded;

/// Adds `a + b + carry_in`, returning `(result, carry_out, overflow)`.
#[inline]
pub fn add_with_carry(a: u32, b: u32, carry_in: bool) -> (u32, bool, bool) {
    let wide = u64::from(a) + u64::from(b) + u64::from(carry_in);
    let result = wide as u32;
    let carry = wide > u64::from(u32::MAX);
    let signed = i64::from(a as i32) + i64::from(b as i32) + i64::from(carry_in);
    let overflow = signed != i64::from(result as i32);
    (result, carry, overflow)
}

/// Performs a flag-setting addition and writes all four flags.
#[inline]
fn add_and_set_flags(cpu: &mut Cpu, a: u32, b: u32, carry_in: bool) -> u32 {
    let (result, carry, overflow) = add_with_carry(a, b, carry_in);
    cpu.apsr.set_nz(result);
    cpu.apsr.c = carry;
    cpu.apsr.v = overflow;
    result
}

/// Reads a register as an operand; r15 reads as the current PC plus 4.
#[inline]
fn value_of(cpu: &Cpu, r: u8) -> u32 {
    if r == 15 {
        cpu.pc_operand()
    } else {
        cpu.regs.read(r as usize)
    }
}

// LSL - Logical shift left by immediate (MOV register when the shift is 0)
pub fn lsl_imm(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let value = cpu.regs.read(d.rm as usize);
    let result = if d.imm == 0 {
        value
    } else {
        cpu.apsr.c = (value >> (32 - d.imm)) & 1 != 0;
        value << d.imm
    };
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// LSR - Logical shift right by immediate (a zero immediate encodes 32)
pub fn lsr_imm(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let value = cpu.regs.read(d.rm as usize);
    let shift = if d.imm == 0 { 32 } else { d.imm };
    let result = if shift == 32 {
        cpu.apsr.c = value & 0x8000_0000 != 0;
        0
    } else {
        cpu.apsr.c = (value >> (shift - 1)) & 1 != 0;
        value >> shift
    };
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// ASR - Arithmetic shift right by immediate (a zero immediate encodes 32)
pub fn asr_imm(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let value = cpu.regs.read(d.rm as usize);
    let shift = if d.imm == 0 { 32 } else { d.imm };
    let result = if shift == 32 {
        cpu.apsr.c = value & 0x8000_0000 != 0;
        ((value as i32) >> 31) as u32
    } else {
        cpu.apsr.c = (value >> (shift - 1)) & 1 != 0;
        ((value as i32) >> shift) as u32
    };
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// ADDS - Add two registers
pub fn add_reg(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = cpu.regs.read(d.rn as usize);
    let b = cpu.regs.read(d.rm as usize);
    let result = add_and_set_flags(cpu, a, b, false);
    cpu.regs.write(d.rd as usize, result);
    1
}

// SUBS - Subtract two registers
pub fn sub_reg(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = cpu.regs.read(d.rn as usize);
    let b = cpu.regs.read(d.rm as usize);
    let result = add_and_set_flags(cpu, a, !b, true);
    cpu.regs.write(d.rd as usize, result);
    1
}

// ADDS - Add a 3-bit immediate
pub fn add_imm3(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = cpu.regs.read(d.rn as usize);
    let result = add_and_set_flags(cpu, a, d.imm, false);
    cpu.regs.write(d.rd as usize, result);
    1
}

// SUBS - Subtract a 3-bit immediate
pub fn sub_imm3(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = cpu.regs.read(d.rn as usize);
    let result = add_and_set_flags(cpu, a, !d.imm, true);
    cpu.regs.write(d.rd as usize, result);
    1
}

// MOVS - Move an 8-bit immediate
pub fn mov_imm(cpu: &mut Cpu, d: &Decoded) -> u64 {
    cpu.apsr.set_nz(d.imm);
    cpu.regs.write(d.rd as usize, d.imm);
    1
}

// CMP - Compare against an 8-bit immediate
pub fn cmp_imm(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = cpu.regs.read(d.rn as usize);
    add_and_set_flags(cpu, a, !d.imm, true);
    1
}

// ADDS - Add an 8-bit immediate
pub fn add_imm8(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = cpu.regs.read(d.rd as usize);
    let result = add_and_set_flags(cpu, a, d.imm, false);
    cpu.regs.write(d.rd as usize, result);
    1
}

// SUBS - Subtract an 8-bit immediate
pub fn sub_imm8(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = cpu.regs.read(d.rd as usize);
    let result = add_and_set_flags(cpu, a, !d.imm, true);
    cpu.regs.write(d.rd as usize, result);
    1
}

// ANDS - Bitwise and
pub fn and(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let result = cpu.regs.read(d.rd as usize) & cpu.regs.read(d.rm as usize);
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// EORS - Bitwise exclusive or
pub fn eor(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let result = cpu.regs.read(d.rd as usize) ^ cpu.regs.read(d.rm as usize);
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// LSLS - Logical shift left by register
pub fn lsl_reg(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let mut result = cpu.regs.read(d.rd as usize);
    let shift = cpu.regs.read(d.rm as usize) & 0xFF;
    if shift > 0 {
        if shift < 32 {
            cpu.apsr.c = (result >> (32 - shift)) & 1 != 0;
            result <<= shift;
        } else {
            cpu.apsr.c = shift == 32 && result & 1 != 0;
            result = 0;
        }
    }
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// LSRS - Logical shift right by register
pub fn lsr_reg(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let mut result = cpu.regs.read(d.rd as usize);
    let shift = cpu.regs.read(d.rm as usize) & 0xFF;
    if shift > 0 {
        if shift < 32 {
            cpu.apsr.c = (result >> (shift - 1)) & 1 != 0;
            result >>= shift;
        } else {
            cpu.apsr.c = shift == 32 && result & 0x8000_0000 != 0;
            result = 0;
        }
    }
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// ASRS - Arithmetic shift right by register
pub fn asr_reg(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let mut result = cpu.regs.read(d.rd as usize);
    let shift = cpu.regs.read(d.rm as usize) & 0xFF;
    if shift > 0 {
        if shift < 32 {
            cpu.apsr.c = (result >> (shift - 1)) & 1 != 0;
            result = ((result as i32) >> shift) as u32;
        } else {
            cpu.apsr.c = result & 0x8000_0000 != 0;
            result = ((result as i32) >> 31) as u32;
        }
    }
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// ADCS - Add with carry
pub fn adc(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = cpu.regs.read(d.rd as usize);
    let b = cpu.regs.read(d.rm as usize);
    let carry = cpu.apsr.c;
    let result = add_and_set_flags(cpu, a, b, carry);
    cpu.regs.write(d.rd as usize, result);
    1
}

// SBCS - Subtract with carry
pub fn sbc(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = cpu.regs.read(d.rd as usize);
    let b = cpu.regs.read(d.rm as usize);
    let carry = cpu.apsr.c;
    let result = add_and_set_flags(cpu, a, !b, carry);
    cpu.regs.write(d.rd as usize, result);
    1
}

// RORS - Rotate right by register
pub fn ror_reg(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let mut result = cpu.regs.read(d.rd as usize);
    let shift = cpu.regs.read(d.rm as usize) & 0xFF;
    if shift > 0 {
        let rotation = shift & 0x1F;
        if rotation == 0 {
            cpu.apsr.c = result & 0x8000_0000 != 0;
        } else {
            result = result.rotate_right(rotation);
            cpu.apsr.c = result & 0x8000_0000 != 0;
        }
    }
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// TST - Test (and, discarding the result)
pub fn tst(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let result = cpu.regs.read(d.rd as usize) & cpu.regs.read(d.rm as usize);
    cpu.apsr.set_nz(result);
    1
}

// RSBS - Reverse subtract from zero (negate)
pub fn rsb(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = cpu.regs.read(d.rm as usize);
    let result = add_and_set_flags(cpu, !a, 0, true);
    cpu.regs.write(d.rd as usize, result);
    1
}

// CMP - Compare two registers
pub fn cmp_reg(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = cpu.regs.read(d.rd as usize);
    let b = cpu.regs.read(d.rm as usize);
    add_and_set_flags(cpu, a, !b, true);
    1
}

// CMN - Compare negative (add, discarding the result)
pub fn cmn(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = cpu.regs.read(d.rd as usize);
    let b = cpu.regs.read(d.rm as usize);
    add_and_set_flags(cpu, a, b, false);
    1
}

// ORRS - Bitwise or
pub fn orr(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let result = cpu.regs.read(d.rd as usize) | cpu.regs.read(d.rm as usize);
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// MULS - Multiply. Sets N and Z only; C and V are unaffected.
pub fn mul(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let result = cpu
        .regs
        .read(d.rn as usize)
        .wrapping_mul(cpu.regs.read(d.rd as usize));
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// BICS - Bit clear
pub fn bic(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let result = cpu.regs.read(d.rd as usize) & !cpu.regs.read(d.rm as usize);
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// MVNS - Bitwise not
pub fn mvn(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let result = !cpu.regs.read(d.rm as usize);
    cpu.apsr.set_nz(result);
    cpu.regs.write(d.rd as usize, result);
    1
}

// ADD - Add high registers; no flags. Writing the PC is a branch.
pub fn add_hi(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let result = value_of(cpu, d.rd).wrapping_add(value_of(cpu, d.rm));
    if d.rd == 15 {
        cpu.branch_to(result);
        return TIMING_BRANCH;
    }
    cpu.regs.write(d.rd as usize, result);
    1
}

// CMP - Compare high registers
pub fn cmp_hi(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let a = value_of(cpu, d.rn);
    let b = value_of(cpu, d.rm);
    add_and_set_flags(cpu, a, !b, true);
    1
}

// MOV - Move high registers; no flags. Writing the PC is a branch.
pub fn mov_hi(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let result = value_of(cpu, d.rm);
    if d.rd == 15 {
        cpu.branch_to(result);
        return TIMING_BRANCH;
    }
    cpu.regs.write(d.rd as usize, result);
    1
}

// ADR - Form a PC-relative address
pub fn adr(cpu: &mut Cpu, d: &Decoded) -> u64 {
    let base = cpu.pc_operand() & !3;
    cpu.regs.write(d.rd as usize, base.wrapping_add(d.imm));
    1
}

// ADD - Form an SP-relative address
pub fn add_sp(cpu: &mut Cpu, d: &Decoded) -> u64 {
    cpu.regs.write(d.rd as usize, cpu.sp().wrapping_add(d.imm));
    1
}

// ADD - Increment SP
pub fn incr_sp(cpu: &mut Cpu, d: &Decoded) -> u64 {
    cpu.set_sp(cpu.sp().wrapping_add(d.imm));
    1
}

// SUB - Decrement SP
pub fn decr_sp(cpu: &mut Cpu, d: &Decoded) -> u64 {
    cpu.set_sp(cpu.sp().wrapping_sub(d.imm));
    1
}

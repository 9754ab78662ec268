//! Data-processing execution tests.
//!
//! Deterministic edge cases for flag behavior: carry and overflow on the
//! arithmetic forms, shifter carry-out on the shift forms, and the N/Z-only
//! rule for MUL.

use crate::common::asm;
use crate::common::harness::{bare_cpu, exec_one};

// Boundary values every arithmetic test vector should be traceable to.
const NEG1: u32 = u32::MAX;
const I32_MIN: u32 = 0x8000_0000;
const I32_MAX: u32 = 0x7FFF_FFFF;

#[test]
fn adds_sets_result_and_clears_flags() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(0, 3);
    cpu.regs.write(1, 4);
    let cycles = exec_one(&mut cpu, &mut mem, asm::adds_reg(2, 0, 1));
    assert_eq!(cycles, 1);
    assert_eq!(cpu.regs.read(2), 7);
    assert!(!cpu.apsr.n && !cpu.apsr.z && !cpu.apsr.c && !cpu.apsr.v);
}

#[test]
fn adds_unsigned_wrap_sets_carry() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(0, NEG1);
    cpu.regs.write(1, 1);
    exec_one(&mut cpu, &mut mem, asm::adds_reg(2, 0, 1));
    assert_eq!(cpu.regs.read(2), 0);
    assert!(cpu.apsr.z && cpu.apsr.c);
    assert!(!cpu.apsr.v);
}

#[test]
fn adds_signed_overflow_sets_v() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(0, I32_MAX);
    cpu.regs.write(1, 1);
    exec_one(&mut cpu, &mut mem, asm::adds_reg(2, 0, 1));
    assert_eq!(cpu.regs.read(2), I32_MIN);
    assert!(cpu.apsr.n && cpu.apsr.v);
    assert!(!cpu.apsr.c);
}

#[test]
fn subs_borrow_clears_carry() {
    // 2 - 3: borrow, so C (not-borrow) is clear and the result is negative.
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(0, 2);
    cpu.regs.write(1, 3);
    exec_one(&mut cpu, &mut mem, asm::subs_reg(2, 0, 1));
    assert_eq!(cpu.regs.read(2), NEG1);
    assert!(cpu.apsr.n && !cpu.apsr.c && !cpu.apsr.z && !cpu.apsr.v);
}

#[test]
fn subs_equal_sets_zero_and_carry() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(0, 9);
    cpu.regs.write(1, 9);
    exec_one(&mut cpu, &mut mem, asm::subs_reg(2, 0, 1));
    assert!(cpu.apsr.z && cpu.apsr.c);
}

#[test]
fn subs_signed_overflow() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(0, I32_MIN);
    cpu.regs.write(1, 1);
    exec_one(&mut cpu, &mut mem, asm::subs_reg(2, 0, 1));
    assert_eq!(cpu.regs.read(2), I32_MAX);
    assert!(cpu.apsr.v && cpu.apsr.c && !cpu.apsr.n);
}

#[test]
fn cmp_immediate_discards_result() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(4, 10);
    exec_one(&mut cpu, &mut mem, asm::cmp_imm(4, 10));
    assert_eq!(cpu.regs.read(4), 10);
    assert!(cpu.apsr.z && cpu.apsr.c);
}

#[test]
fn adcs_chains_carry() {
    // Low-word add overflows, ADC folds the carry into the high word.
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(0, NEG1);
    cpu.regs.write(1, 1);
    exec_one(&mut cpu, &mut mem, asm::adds_reg(0, 0, 1));
    assert!(cpu.apsr.c);

    cpu.regs.write(2, 5);
    cpu.regs.write(3, 0);
    exec_one(&mut cpu, &mut mem, asm::adcs(2, 3));
    assert_eq!(cpu.regs.read(2), 6);
}

#[test]
fn sbcs_without_borrow() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.apsr.c = true;
    cpu.regs.write(0, 10);
    cpu.regs.write(1, 4);
    exec_one(&mut cpu, &mut mem, asm::sbcs(0, 1));
    assert_eq!(cpu.regs.read(0), 6);
}

#[test]
fn rsbs_negates() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(1, 5);
    exec_one(&mut cpu, &mut mem, asm::rsbs(0, 1));
    assert_eq!(cpu.regs.read(0), (-5i32) as u32);
    assert!(cpu.apsr.n && !cpu.apsr.c);
}

#[test]
fn movs_sets_nz_only() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.apsr.c = true;
    cpu.apsr.v = true;
    exec_one(&mut cpu, &mut mem, asm::movs(0, 0));
    assert!(cpu.apsr.z);
    assert!(cpu.apsr.c && cpu.apsr.v, "C and V survive a move");
}

#[test]
fn lsl_immediate_zero_is_register_move() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.apsr.c = false;
    cpu.regs.write(1, 0xABCD);
    exec_one(&mut cpu, &mut mem, asm::lsls_imm(0, 1, 0));
    assert_eq!(cpu.regs.read(0), 0xABCD);
    assert!(!cpu.apsr.c, "no shift, no carry-out");
}

#[test]
fn lsl_carries_out_last_bit() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(1, 0x8000_0001);
    exec_one(&mut cpu, &mut mem, asm::lsls_imm(0, 1, 1));
    assert_eq!(cpu.regs.read(0), 2);
    assert!(cpu.apsr.c);
}

#[test]
fn lsr_immediate_zero_means_thirty_two() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(1, I32_MIN);
    exec_one(&mut cpu, &mut mem, asm::lsrs_imm(0, 1, 0));
    assert_eq!(cpu.regs.read(0), 0);
    assert!(cpu.apsr.c && cpu.apsr.z);
}

#[test]
fn asr_immediate_zero_fills_with_sign() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(1, I32_MIN);
    exec_one(&mut cpu, &mut mem, asm::asrs_imm(0, 1, 0));
    assert_eq!(cpu.regs.read(0), NEG1);
    assert!(cpu.apsr.c && cpu.apsr.n);
}

#[test]
fn shift_by_register_over_thirty_two() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(0, NEG1);
    cpu.regs.write(1, 33);
    exec_one(&mut cpu, &mut mem, asm::lsls_reg(0, 1));
    assert_eq!(cpu.regs.read(0), 0);
    assert!(!cpu.apsr.c, "shift past 32 shifts out only zeros");
}

#[test]
fn shift_by_register_zero_preserves_carry() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.apsr.c = true;
    cpu.regs.write(0, 0x1234);
    cpu.regs.write(1, 0);
    exec_one(&mut cpu, &mut mem, asm::lsrs_reg(0, 1));
    assert_eq!(cpu.regs.read(0), 0x1234);
    assert!(cpu.apsr.c);
}

#[test]
fn ror_rotates_and_carries_bit31() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(0, 0x0000_0001);
    cpu.regs.write(1, 1);
    exec_one(&mut cpu, &mut mem, asm::rors(0, 1));
    assert_eq!(cpu.regs.read(0), I32_MIN);
    assert!(cpu.apsr.c);
}

#[test]
fn mul_leaves_c_and_v_alone() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.apsr.c = true;
    cpu.apsr.v = true;
    cpu.regs.write(0, 0x1_0000);
    cpu.regs.write(1, 0x1_0000);
    exec_one(&mut cpu, &mut mem, asm::muls(0, 1));
    assert_eq!(cpu.regs.read(0), 0, "wraps modulo 2^32");
    assert!(cpu.apsr.z);
    assert!(cpu.apsr.c && cpu.apsr.v, "MUL never touches C or V");
}

#[test]
fn logical_ops() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(0, 0b1100);
    cpu.regs.write(1, 0b1010);
    exec_one(&mut cpu, &mut mem, asm::ands(0, 1));
    assert_eq!(cpu.regs.read(0), 0b1000);

    cpu.regs.write(2, 0b1100);
    cpu.regs.write(3, 0b1010);
    exec_one(&mut cpu, &mut mem, asm::eors(2, 3));
    assert_eq!(cpu.regs.read(2), 0b0110);

    cpu.regs.write(4, 0b1100);
    exec_one(&mut cpu, &mut mem, asm::bics(4, 3));
    assert_eq!(cpu.regs.read(4), 0b0100);

    exec_one(&mut cpu, &mut mem, asm::mvns(5, 3));
    assert_eq!(cpu.regs.read(5), !0b1010u32);
    assert!(cpu.apsr.n);
}

#[test]
fn high_register_add_does_not_set_flags() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(8, NEG1);
    cpu.regs.write(1, 1);
    exec_one(&mut cpu, &mut mem, asm::add_hi(8, 1));
    assert_eq!(cpu.regs.read(8), 0);
    assert!(!cpu.apsr.z && !cpu.apsr.c, "high-register ADD is flagless");
}

#[test]
fn sp_arithmetic() {
    let (mut cpu, mut mem) = bare_cpu();
    let sp = cpu.sp();
    exec_one(&mut cpu, &mut mem, asm::decr_sp(4));
    assert_eq!(cpu.sp(), sp - 16);
    exec_one(&mut cpu, &mut mem, asm::incr_sp(4));
    assert_eq!(cpu.sp(), sp);

    exec_one(&mut cpu, &mut mem, asm::add_sp_imm(0, 2));
    assert_eq!(cpu.regs.read(0), sp + 8);
}

#[test]
fn adr_is_word_aligned_pc_relative() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.set_pc(0x102);
    exec_one(&mut cpu, &mut mem, asm::adr(0, 1));
    // Base is (0x102 + 4) aligned down to 0x104, plus 4.
    assert_eq!(cpu.regs.read(0), 0x108);
}

//! Branch execution tests: targets, link values, cycle costs, and the
//! branch-taken flag.

use crate::common::asm;
use crate::common::harness::{bare_cpu, exec_one, exec_wide};

#[test]
fn unconditional_branch() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.set_pc(0x100);
    let cycles = exec_one(&mut cpu, &mut mem, asm::b(-8));
    assert!(cpu.branch_taken);
    assert_eq!(cpu.pc(), 0x100 + 4 - 8);
    assert_eq!(cycles, 3);
}

#[test]
fn conditional_branch_taken_and_not() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.set_pc(0x100);
    cpu.apsr.z = false;
    let cycles = exec_one(&mut cpu, &mut mem, asm::beq(16));
    assert!(!cpu.branch_taken, "EQ fails with Z clear");
    assert_eq!(cycles, 1);
    assert_eq!(cpu.pc(), 0x100, "the driver advances a sequential PC");

    cpu.apsr.z = true;
    let cycles = exec_one(&mut cpu, &mut mem, asm::beq(16));
    assert!(cpu.branch_taken);
    assert_eq!(cpu.pc(), 0x114);
    assert_eq!(cycles, 3);
}

#[test]
fn signed_condition_codes() {
    let (mut cpu, mut mem) = bare_cpu();
    // 2 - 3 leaves N set, V clear: LT holds.
    cpu.regs.write(0, 2);
    cpu.regs.write(1, 3);
    exec_one(&mut cpu, &mut mem, asm::cmp_reg(0, 1));
    cpu.set_pc(0x100);
    exec_one(&mut cpu, &mut mem, asm::b_cond(0xB, 8)); // blt
    assert!(cpu.branch_taken);

    // 3 - 2: GE holds, LT does not.
    cpu.regs.write(0, 3);
    cpu.regs.write(1, 2);
    exec_one(&mut cpu, &mut mem, asm::cmp_reg(0, 1));
    cpu.set_pc(0x100);
    exec_one(&mut cpu, &mut mem, asm::b_cond(0xB, 8));
    assert!(!cpu.branch_taken);
    exec_one(&mut cpu, &mut mem, asm::b_cond(0xA, 8)); // bge
    assert!(cpu.branch_taken);
}

#[test]
fn branch_with_link() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.set_pc(0x200);
    let (first, second) = asm::bl(0x40);
    let cycles = exec_wide(&mut cpu, &mut mem, first, second);
    assert!(cpu.branch_taken);
    assert_eq!(cpu.pc(), 0x200 + 4 + 0x40);
    // The link points past the 4-byte encoding, with the Thumb bit set.
    assert_eq!(cpu.lr(), 0x205);
    assert_eq!(cycles, 4);
}

#[test]
fn branch_exchange_strips_thumb_bit() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.regs.write(3, 0x301);
    exec_one(&mut cpu, &mut mem, asm::bx(3));
    assert!(cpu.branch_taken);
    assert_eq!(cpu.pc(), 0x300);
}

#[test]
fn branch_link_exchange_register() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.set_pc(0x400);
    cpu.regs.write(4, 0x1001);
    let cycles = exec_one(&mut cpu, &mut mem, asm::blx_reg(4));
    assert_eq!(cpu.pc(), 0x1000);
    // The link points past the 2-byte encoding.
    assert_eq!(cpu.lr(), 0x403);
    assert_eq!(cycles, 4);
}

#[test]
fn mov_to_pc_is_a_branch() {
    let (mut cpu, mut mem) = bare_cpu();
    cpu.set_lr(0x501);
    let cycles = exec_one(&mut cpu, &mut mem, asm::mov_hi(15, 14));
    assert!(cpu.branch_taken);
    assert_eq!(cpu.pc(), 0x500);
    assert_eq!(cycles, 3);
}

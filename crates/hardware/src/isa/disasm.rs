//! Instruction disassembler.
//!
//! Converts a decoded record into a human-readable mnemonic string for
//! trace output and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use ehsim_core::isa::{decode, disasm};
//!
//! let d = decode(0x2007, 0).unwrap(); // movs r0, #7
//! assert_eq!(disasm::disassemble(&d), "movs r0, #0x7");
//! ```

use crate::isa::{Decoded, Op};

/// Condition-code mnemonic suffixes, indexed by condition number.
const COND_NAMES: [&str; 14] = [
    "eq", "ne", "cs", "cc", "mi", "pl", "vs", "vc", "hi", "ls", "ge", "lt", "gt", "le",
];

/// Register name, using the conventional aliases for r13-r15.
fn reg(idx: u8) -> String {
    match idx {
        13 => "sp".to_string(),
        14 => "lr".to_string(),
        15 => "pc".to_string(),
        r => format!("r{}", r),
    }
}

/// Formats a register-list bitmap as `{r0, r1, lr}`.
fn reg_list(rlist: u16) -> String {
    let names: Vec<String> = (0..16).filter(|i| rlist & (1 << i) != 0).map(|i| reg(i as u8)).collect();
    format!("{{{}}}", names.join(", "))
}

/// Disassembles a decoded instruction into a mnemonic string.
pub fn disassemble(d: &Decoded) -> String {
    let rd = reg(d.rd);
    let rn = reg(d.rn);
    let rm = reg(d.rm);
    let imm = d.imm;
    match d.op {
        Op::LslImm if imm == 0 => format!("movs {}, {}", rd, rm),
        Op::LslImm => format!("lsls {}, {}, #{}", rd, rm, imm),
        Op::LsrImm => format!("lsrs {}, {}, #{}", rd, rm, if imm == 0 { 32 } else { imm }),
        Op::AsrImm => format!("asrs {}, {}, #{}", rd, rm, if imm == 0 { 32 } else { imm }),
        Op::AddReg => format!("adds {}, {}, {}", rd, rn, rm),
        Op::SubReg => format!("subs {}, {}, {}", rd, rn, rm),
        Op::AddImm3 => format!("adds {}, {}, #{}", rd, rn, imm),
        Op::SubImm3 => format!("subs {}, {}, #{}", rd, rn, imm),
        Op::MovImm => format!("movs {}, #{:#x}", rd, imm),
        Op::CmpImm => format!("cmp {}, #{:#x}", rn, imm),
        Op::AddImm8 => format!("adds {}, #{:#x}", rd, imm),
        Op::SubImm8 => format!("subs {}, #{:#x}", rd, imm),
        Op::And => format!("ands {}, {}", rd, rm),
        Op::Eor => format!("eors {}, {}", rd, rm),
        Op::LslReg => format!("lsls {}, {}", rd, rm),
        Op::LsrReg => format!("lsrs {}, {}", rd, rm),
        Op::AsrReg => format!("asrs {}, {}", rd, rm),
        Op::Adc => format!("adcs {}, {}", rd, rm),
        Op::Sbc => format!("sbcs {}, {}", rd, rm),
        Op::RorReg => format!("rors {}, {}", rd, rm),
        Op::Tst => format!("tst {}, {}", rd, rm),
        Op::Rsb => format!("rsbs {}, {}, #0", rd, rm),
        Op::CmpReg => format!("cmp {}, {}", rd, rm),
        Op::Cmn => format!("cmn {}, {}", rd, rm),
        Op::Orr => format!("orrs {}, {}", rd, rm),
        Op::Mul => format!("muls {}, {}", rd, rm),
        Op::Bic => format!("bics {}, {}", rd, rm),
        Op::Mvn => format!("mvns {}, {}", rd, rm),
        Op::AddHi => format!("add {}, {}", rd, rm),
        Op::CmpHi => format!("cmp {}, {}", rn, rm),
        Op::MovHi => format!("mov {}, {}", rd, rm),
        Op::Bx => format!("bx {}", rm),
        Op::Blx => format!("blx {}", rm),
        Op::LdrLit => format!("ldr {}, [pc, #{:#x}]", rd, imm),
        Op::StrReg => format!("str {}, [{}, {}]", rd, rn, rm),
        Op::StrhReg => format!("strh {}, [{}, {}]", rd, rn, rm),
        Op::StrbReg => format!("strb {}, [{}, {}]", rd, rn, rm),
        Op::LdrsbReg => format!("ldrsb {}, [{}, {}]", rd, rn, rm),
        Op::LdrReg => format!("ldr {}, [{}, {}]", rd, rn, rm),
        Op::LdrhReg => format!("ldrh {}, [{}, {}]", rd, rn, rm),
        Op::LdrbReg => format!("ldrb {}, [{}, {}]", rd, rn, rm),
        Op::LdrshReg => format!("ldrsh {}, [{}, {}]", rd, rn, rm),
        Op::StrImm => format!("str {}, [{}, #{:#x}]", rd, rn, imm),
        Op::LdrImm => format!("ldr {}, [{}, #{:#x}]", rd, rn, imm),
        Op::StrbImm => format!("strb {}, [{}, #{:#x}]", rd, rn, imm),
        Op::LdrbImm => format!("ldrb {}, [{}, #{:#x}]", rd, rn, imm),
        Op::StrhImm => format!("strh {}, [{}, #{:#x}]", rd, rn, imm),
        Op::LdrhImm => format!("ldrh {}, [{}, #{:#x}]", rd, rn, imm),
        Op::StrSp => format!("str {}, [sp, #{:#x}]", rd, imm),
        Op::LdrSp => format!("ldr {}, [sp, #{:#x}]", rd, imm),
        Op::Adr => format!("adr {}, #{:#x}", rd, imm),
        Op::AddSp => format!("add {}, sp, #{:#x}", rd, imm),
        Op::IncrSp => format!("add sp, #{:#x}", imm),
        Op::DecrSp => format!("sub sp, #{:#x}", imm),
        Op::Stm => format!("stm {}!, {}", rn, reg_list(d.rlist)),
        Op::Ldm => format!("ldm {}!, {}", rn, reg_list(d.rlist)),
        Op::Push => format!("push {}", reg_list(d.rlist)),
        Op::Pop => format!("pop {}", reg_list(d.rlist)),
        Op::Sxth => format!("sxth {}, {}", rd, rm),
        Op::Sxtb => format!("sxtb {}, {}", rd, rm),
        Op::Uxth => format!("uxth {}, {}", rd, rm),
        Op::Uxtb => format!("uxtb {}, {}", rd, rm),
        Op::Rev => format!("rev {}, {}", rd, rm),
        Op::Rev16 => format!("rev16 {}, {}", rd, rm),
        Op::Revsh => format!("revsh {}, {}", rd, rm),
        Op::BCond => {
            let suffix = COND_NAMES.get(d.cond as usize).copied().unwrap_or("??");
            format!("b{} #{}", suffix, imm as i32)
        }
        Op::B => format!("b #{}", imm as i32),
        Op::Bl => format!("bl #{}", imm as i32),
        Op::Svc => format!("svc #{:#x}", imm),
        Op::Nop => "nop".to_string(),
        Op::Yield => "yield".to_string(),
        Op::Wfe => "wfe".to_string(),
        Op::Wfi => "wfi".to_string(),
        Op::Sev => "sev".to_string(),
        Op::Cps => format!("cps{} i", if imm == 0 { "ie" } else { "id" }),
        Op::Mrs => format!("mrs {}, #{}", rd, imm),
        Op::Msr => format!("msr #{}, {}", imm, rn),
    }
}

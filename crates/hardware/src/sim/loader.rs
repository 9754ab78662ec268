//! Program image loading.
//!
//! This module places a program into the simulated memory before the first
//! step. It accepts:
//! 1. **ELF:** `PT_LOAD` segments are copied to their physical addresses; the
//!    entry point comes from the ELF header (Thumb bit stripped) and the
//!    initial SP from configuration.
//! 2. **Flat images:** copied to the ROM base. An image that begins with a
//!    vector table (the reset vector has its Thumb bit set) supplies its own
//!    initial SP and entry; a headerless image starts at the ROM base with
//!    the configured SP.

use std::fs;
use std::process;

use goblin::elf::program_header::PT_LOAD;
use goblin::elf::Elf;

use crate::config::Config;
use crate::memory::Memory;

/// Where execution begins once an image is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedImage {
    /// Initial program counter (halfword aligned).
    pub entry: u32,
    /// Initial stack pointer.
    pub initial_sp: u32,
}

/// Loads a binary file from disk into a byte vector.
///
/// Exits the process with an error message if the file cannot be read.
///
/// # Arguments
///
/// * `path` - Path to the binary file.
///
/// # Returns
///
/// The raw bytes of the file.
pub fn load_binary(path: &str) -> Vec<u8> {
    fs::read(path).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not read file '{}': {}", path, e);
        process::exit(1);
    })
}

/// Places a program image into memory and returns its entry state.
///
/// ELF images are detected by magic; anything else is treated as a flat
/// image at the ROM base. Exits the process on a structurally invalid ELF.
///
/// # Arguments
///
/// * `memory` - The memory image to populate.
/// * `config` - Memory-map configuration (ROM base, fallback SP).
/// * `data` - The raw program bytes.
pub fn load_program(memory: &mut Memory, config: &Config, data: &[u8]) -> LoadedImage {
    let default_sp = config
        .memory
        .initial_sp
        .unwrap_or_else(|| memory.ram_top());

    if data.starts_with(b"\x7fELF") {
        return load_elf(memory, data, default_sp);
    }

    memory.load_image_at(memory.rom_base(), data);

    // A vector table stores the initial SP in word 0 and the reset vector,
    // with its Thumb bit set, in word 1.
    if data.len() >= 8 {
        let sp = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let reset = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        if reset & 1 == 1 {
            return LoadedImage {
                entry: reset & !1,
                initial_sp: sp,
            };
        }
    }

    LoadedImage {
        entry: memory.rom_base(),
        initial_sp: default_sp,
    }
}

/// Copies the `PT_LOAD` segments of an ELF image into memory.
fn load_elf(memory: &mut Memory, data: &[u8], default_sp: u32) -> LoadedImage {
    let elf = Elf::parse(data).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Invalid ELF image: {}", e);
        process::exit(1);
    });

    for ph in &elf.program_headers {
        if ph.p_type != PT_LOAD || ph.p_filesz == 0 {
            continue;
        }
        let start = ph.p_offset as usize;
        let end = start + ph.p_filesz as usize;
        let Some(segment) = data.get(start..end) else {
            eprintln!("\n[!] FATAL: ELF segment extends past end of file");
            process::exit(1);
        };
        memory.load_image_at(ph.p_paddr as u32, segment);
    }

    LoadedImage {
        entry: (elf.header.e_entry as u32) & !1,
        initial_sp: default_sp,
    }
}

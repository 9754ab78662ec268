//! Word-addressable memory image.
//!
//! Two regions are mapped: ROM (the program image, read-only after loading)
//! and RAM. The interface is word-granular; the execute units synthesize
//! byte and halfword accesses with read-modify-write sequences, so every
//! transaction observable here is an aligned 32-bit load or store. Access
//! counters record those transactions for the run report.

use serde::{Deserialize, Serialize};

use crate::common::Fault;
use crate::config::MemoryConfig;

/// Counts of word-level memory transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCounts {
    /// Data loads (including the read halves of sub-word stores when they
    /// are not flagged as read-modify-write).
    pub loads: u64,
    /// Data stores.
    pub stores: u64,
    /// Reads performed as the first half of a read-modify-write splice.
    pub rmw_reads: u64,
    /// Instruction fetches.
    pub fetches: u64,
}

/// The simulated memory: a ROM region and a RAM region.
#[derive(Debug, Clone)]
pub struct Memory {
    rom: Vec<u32>,
    ram: Vec<u32>,
    rom_base: u32,
    ram_base: u32,
    /// Word-transaction counters.
    pub counts: AccessCounts,
}

impl Memory {
    /// Creates a zero-filled memory from a memory-map configuration.
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            rom: vec![0; config.rom_size / 4],
            ram: vec![0; config.ram_size / 4],
            rom_base: config.rom_base,
            ram_base: config.ram_base,
            counts: AccessCounts::default(),
        }
    }

    /// ROM base address.
    pub fn rom_base(&self) -> u32 {
        self.rom_base
    }

    /// RAM base address.
    pub fn ram_base(&self) -> u32 {
        self.ram_base
    }

    /// First address past the top of RAM.
    pub fn ram_top(&self) -> u32 {
        self.ram_base + (self.ram.len() * 4) as u32
    }

    #[inline]
    fn rom_index(&self, addr: u32) -> Option<usize> {
        let off = addr.wrapping_sub(self.rom_base) as usize;
        (off / 4 < self.rom.len()).then(|| off / 4)
    }

    #[inline]
    fn ram_index(&self, addr: u32) -> Option<usize> {
        let off = addr.wrapping_sub(self.ram_base) as usize;
        (off / 4 < self.ram.len()).then(|| off / 4)
    }

    fn read_word(&self, addr: u32) -> Option<u32> {
        if let Some(i) = self.ram_index(addr) {
            return Some(self.ram[i]);
        }
        self.rom_index(addr).map(|i| self.rom[i])
    }

    /// Loads the word at `addr`.
    ///
    /// `rmw` marks the read as the first half of a read-modify-write splice,
    /// which is counted separately from data loads.
    ///
    /// # Arguments
    ///
    /// * `addr` - Word-aligned address.
    /// * `rmw` - True when the load is part of a read-modify-write sequence.
    pub fn load(&mut self, addr: u32, rmw: bool) -> Result<u32, Fault> {
        debug_assert_eq!(addr & 3, 0, "word load from unaligned address");
        let word = self.read_word(addr).ok_or(Fault::UnmappedLoad(addr))?;
        if rmw {
            self.counts.rmw_reads += 1;
        } else {
            self.counts.loads += 1;
        }
        Ok(word)
    }

    /// Stores a word at `addr`. Stores into ROM fault.
    ///
    /// # Arguments
    ///
    /// * `addr` - Word-aligned address.
    /// * `word` - The value to store.
    pub fn store(&mut self, addr: u32, word: u32) -> Result<(), Fault> {
        debug_assert_eq!(addr & 3, 0, "word store to unaligned address");
        if let Some(i) = self.ram_index(addr) {
            self.ram[i] = word;
            self.counts.stores += 1;
            return Ok(());
        }
        if self.rom_index(addr).is_some() {
            return Err(Fault::RomWrite(addr));
        }
        Err(Fault::UnmappedStore(addr))
    }

    /// Fetches the instruction halfword at `addr` (halfword aligned).
    pub fn fetch16(&mut self, addr: u32) -> Result<u16, Fault> {
        let word = self
            .read_word(addr & !3)
            .ok_or(Fault::UnmappedLoad(addr))?;
        self.counts.fetches += 1;
        let half = if addr & 2 == 0 { word } else { word >> 16 };
        Ok(half as u16)
    }

    /// Copies raw bytes into memory at `addr`, crossing the ROM/RAM write
    /// protection. Used by the loader to place the program image; not
    /// reachable from executing code.
    pub fn load_image_at(&mut self, addr: u32, bytes: &[u8]) {
        for (i, &b) in bytes.iter().enumerate() {
            let byte_addr = addr + i as u32;
            let lane = (byte_addr & 3) * 8;
            let word_addr = byte_addr & !3;
            let slot = if let Some(i) = self.ram_index(word_addr) {
                &mut self.ram[i]
            } else if let Some(i) = self.rom_index(word_addr) {
                &mut self.rom[i]
            } else {
                continue;
            };
            *slot = (*slot & !(0xFF << lane)) | (u32::from(b) << lane);
        }
    }
}

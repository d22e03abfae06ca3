//! Cartridge image: ROM bytes, external RAM, and the banking controller.

use crate::mbc::Mbc;
use crate::memory_map::*;
use std::fmt;

/// Failures reported by `Machine::insert_rom`. Nothing else in the core
/// fails: out-of-range accesses are defined as 0xFF reads or dropped writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartridgeError {
    /// The header names an MBC chip this core does not implement.
    RomNotSupported,
    /// The image is too short for a header, or the header's ROM-bank count
    /// points past the provided bytes.
    InvalidRom,
}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartridgeError::RomNotSupported => write!(f, "ROM is not supported"),
            CartridgeError::InvalidRom => write!(f, "ROM image is inconsistent with its header"),
        }
    }
}

impl std::error::Error for CartridgeError {}

/// An inserted cartridge: the immutable ROM image, the (possibly
/// battery-backed) external RAM, and the MBC translating addresses into both.
#[derive(Debug, Clone)]
pub struct Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    mbc: Mbc,
}

impl Cartridge {
    pub fn new() -> Self {
        Cartridge {
            rom: Vec::new(),
            ram: Vec::new(),
            mbc: Mbc::RomOnly,
        }
    }

    /// Validates the header and takes ownership of the ROM image.
    pub fn load(&mut self, rom: Vec<u8>) -> Result<(), CartridgeError> {
        if rom.len() < HEADER_END {
            log::warn!("rejecting ROM: {} bytes is too short for a header", rom.len());
            return Err(CartridgeError::InvalidRom);
        }

        let mbc = match Mbc::from_header(rom[HEADER_MBC_TYPE]) {
            Some(mbc) => mbc,
            None => {
                log::warn!(
                    "rejecting ROM: unsupported cartridge type {:#04X}",
                    rom[HEADER_MBC_TYPE]
                );
                return Err(CartridgeError::RomNotSupported);
            }
        };

        let declared = Self::decode_rom_banks(rom[HEADER_ROM_BANKS]) as usize * ROM_BANK_SIZE;
        if declared > rom.len() {
            log::warn!(
                "rejecting ROM: header declares {} bytes but image holds {}",
                declared,
                rom.len()
            );
            return Err(CartridgeError::InvalidRom);
        }

        self.rom = rom;
        self.mbc = mbc;
        Ok(())
    }

    /// Restores external RAM from a previously exported vector. Call before
    /// `power_on`; the power-on resize preserves the restored prefix.
    pub fn load_ram(&mut self, ram: Vec<u8>) {
        self.ram = ram;
    }

    /// Resets banking state and sizes external RAM from the header.
    pub fn power_on(&mut self) {
        if let Some(mbc) = self
            .rom
            .get(HEADER_MBC_TYPE)
            .and_then(|&code| Mbc::from_header(code))
        {
            self.mbc = mbc;
        }

        let ram_banks = self.ram_bank_count();
        self.ram.resize(EXT_RAM_BANK_SIZE * (ram_banks + 1), 0);

        log::info!(
            "cartridge: {} rom_banks:{} ram_banks:{}",
            self.mbc.name(),
            self.rom_bank_count(),
            ram_banks
        );
    }

    pub fn rom_bank_count(&self) -> usize {
        self.rom
            .get(HEADER_ROM_BANKS)
            .map(|&code| Self::decode_rom_banks(code))
            .unwrap_or(0)
    }

    pub fn ram_bank_count(&self) -> usize {
        match self.rom.get(HEADER_RAM_BANKS) {
            Some(0x01) | Some(0x02) => 1,
            Some(0x03) => 4,
            Some(0x04) => 16,
            Some(0x05) => 8,
            _ => 0,
        }
    }

    fn decode_rom_banks(code: u8) -> usize {
        match code {
            0x01 => 4,
            0x02 => 8,
            0x03 => 16,
            0x04 => 32,
            0x05 => 64,
            0x06 => 128,
            0x07 => 256,
            0x08 => 512,
            0x52 => 72,
            0x53 => 80,
            0x54 => 96,
            _ => 0,
        }
    }

    /// Reads a byte from the ROM window (0000-7FFF) or the external-RAM
    /// window (A000-BFFF). Anything the banks do not cover reads 0xFF.
    pub fn read(&self, addr: u16) -> u8 {
        if addr <= ROM_BANK_N_END {
            self.rom.get(self.mbc.rom_index(addr)).copied().unwrap_or(0xFF)
        } else {
            self.ram.get(self.mbc.ram_index(addr)).copied().unwrap_or(0xFF)
        }
    }

    /// Writes either reach the MBC control registers (ROM window) or the
    /// currently mapped RAM bank. Out-of-range RAM writes are dropped.
    pub fn write(&mut self, addr: u16, value: u8) {
        if addr <= ROM_BANK_N_END {
            self.mbc.control_write(addr, value);
        } else {
            let index = self.mbc.ram_index(addr);
            if let Some(slot) = self.ram.get_mut(index) {
                *slot = value;
            }
        }
    }

    /// Exports external RAM for the host's save-persistence collaborator.
    pub fn ram(&self) -> &[u8] {
        &self.ram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom_with_header(mbc: u8, rom_banks: u8, ram_banks: u8, size: usize) -> Vec<u8> {
        let mut rom = vec![0u8; size];
        rom[HEADER_MBC_TYPE] = mbc;
        rom[HEADER_ROM_BANKS] = rom_banks;
        rom[HEADER_RAM_BANKS] = ram_banks;
        rom
    }

    #[test]
    fn rejects_unsupported_mbc() {
        let mut cart = Cartridge::new();
        let rom = rom_with_header(0x0F, 0x00, 0x00, 0x8000); // MBC3+TIMER
        assert_eq!(cart.load(rom), Err(CartridgeError::RomNotSupported));
    }

    #[test]
    fn rejects_truncated_image() {
        let mut cart = Cartridge::new();
        assert_eq!(cart.load(vec![0u8; 0x100]), Err(CartridgeError::InvalidRom));

        // Header claims 8 banks but only 2 are present.
        let rom = rom_with_header(0x01, 0x02, 0x00, 0x8000);
        assert_eq!(cart.load(rom), Err(CartridgeError::InvalidRom));
    }

    #[test]
    fn ram_is_sized_from_header_at_power_on() {
        let mut cart = Cartridge::new();
        cart.load(rom_with_header(0x03, 0x01, 0x03, 4 * ROM_BANK_SIZE))
            .unwrap();
        cart.power_on();
        assert_eq!(cart.ram().len(), EXT_RAM_BANK_SIZE * 5); // 4 banks + 1
    }

    #[test]
    fn load_ram_survives_power_on() {
        let mut cart = Cartridge::new();
        cart.load(rom_with_header(0x03, 0x01, 0x02, 4 * ROM_BANK_SIZE))
            .unwrap();
        let mut saved = vec![0u8; EXT_RAM_BANK_SIZE * 2];
        saved[0x0042] = 0xAB;
        cart.load_ram(saved);
        cart.power_on();
        assert_eq!(cart.read(0xA042), 0xAB);
    }

    #[test]
    fn banked_read_follows_mbc1_select() {
        let mut cart = Cartridge::new();
        let mut rom = rom_with_header(0x01, 0x02, 0x00, 8 * ROM_BANK_SIZE);
        for bank in 0..8 {
            rom[bank * ROM_BANK_SIZE] = bank as u8;
        }
        let expected_low = rom[0x1000];
        cart.load(rom).unwrap();
        cart.power_on();

        cart.write(0x2000, 0x05);
        assert_eq!(cart.read(0x4000), 5);
        // The low window never moves.
        assert_eq!(cart.read(0x1000), expected_low);

        cart.write(0x2000, 0x00);
        assert_eq!(cart.read(0x4000), 1);
    }

    #[test]
    fn out_of_range_rom_reads_are_defined() {
        let mut cart = Cartridge::new();
        cart.load(rom_with_header(0x01, 0x00, 0x00, 0x8000)).unwrap();
        cart.power_on();
        // Select a bank past the end of the 32 KiB image.
        cart.write(0x2000, 0x1F);
        assert_eq!(cart.read(0x7FFF), 0xFF);
    }
}

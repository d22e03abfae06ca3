//! The composed machine and its host-facing API.

use crate::cartridge::CartridgeError;
use crate::cpu::Cpu;
use crate::joypad::{Button, Joypad};
use crate::memory_bus::MemoryBus;
use crate::memory_map;
use crate::ppu::{Ppu, SCREEN_SIZE};
use crate::timer::Timer;

/// The emulated handheld: CPU, input latch, timer, and pixel pipeline in
/// lockstep around a shared address space.
///
/// The host drives `tick` at the machine-cycle rate and collaborates through
/// the edges: ROM bytes in via `insert_rom`, the framebuffer out via
/// `screen`, button state via `set_button`, and save RAM via
/// `load_ram`/`ram`.
pub struct Machine {
    bus: MemoryBus,
    cpu: Cpu,
    joypad: Joypad,
    timer: Timer,
    ppu: Ppu,
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            bus: MemoryBus::new(),
            cpu: Cpu::new(),
            joypad: Joypad::new(),
            timer: Timer::new(),
            ppu: Ppu::new(),
        }
    }

    /// Inserts a ROM image, validating its header.
    pub fn insert_rom(&mut self, rom: Vec<u8>) -> Result<(), CartridgeError> {
        self.bus.insert_rom(rom)
    }

    /// Restores battery-backed cartridge RAM. Call before `power_on`.
    pub fn load_ram(&mut self, ram: Vec<u8>) {
        self.bus.load_ram(ram);
    }

    /// Resets every component to its post-boot state.
    pub fn power_on(&mut self) {
        log::debug!("machine: power on");
        self.bus.power_on();
        self.cpu.power_on();
        self.joypad.power_on();
        self.timer.power_on();
        self.ppu.power_on();
    }

    /// Records host-side button state.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.joypad.set(button, pressed);
    }

    /// Advances the machine by one cycle.
    ///
    /// The stepping order is part of the contract: interrupt flags raised by
    /// the timer or the pixel pipeline are latched for the CPU's next cycle,
    /// never the current one.
    pub fn tick(&mut self) {
        self.cpu.tick(&mut self.bus);
        self.joypad.tick(&mut self.bus);
        self.timer.tick(&mut self.bus);
        self.ppu.tick(&mut self.bus);
    }

    /// The current framebuffer of 2-bit shades, row-major 160x144.
    pub fn screen(&self) -> &[u8; SCREEN_SIZE] {
        self.ppu.screen()
    }

    /// Exports cartridge RAM for save persistence.
    pub fn ram(&self) -> &[u8] {
        self.bus.cartridge_ram()
    }

    /// True exactly between frames; the safe moment to read `screen`.
    pub fn is_frame_ready(&self) -> bool {
        self.ppu.lx() == 0 && self.bus.read_byte(memory_map::LY_ADDR) == 0
    }

    /// Read-only peek into the address space.
    pub fn mem(&self, addr: u16) -> u8 {
        self.bus.read_byte(addr)
    }

    /// Register and flag introspection.
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }
}

impl Default for Machine {
    fn default() -> Self {
        Machine::new()
    }
}

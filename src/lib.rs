//! Emulation core for the original DMG handheld.
//!
//! The [`Machine`] composes the CPU interpreter, memory bus with bank
//! switching, scanline pixel pipeline, divider/timer, and button latch, and
//! advances them in lockstep one machine cycle per [`Machine::tick`]. The
//! host owns pacing, presentation, persistence, and the input event source.

pub mod cartridge;
pub mod cpu;
pub mod joypad;
pub mod machine;
pub mod mbc;
pub mod memory_bus;
pub mod memory_map;
pub mod ppu;
pub mod timer;

pub use cartridge::CartridgeError;
pub use joypad::Button;
pub use machine::Machine;
pub use ppu::{SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};

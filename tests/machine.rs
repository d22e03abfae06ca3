//! Whole-machine scenarios driven through the host API only.

use mochi::{Button, CartridgeError, Machine};

const ROM_BANK: usize = 0x4000;
const DOTS_PER_FRAME: u32 = 450 * 154;

fn rom_image(mbc: u8, rom_banks_code: u8, ram_banks_code: u8, banks: usize) -> Vec<u8> {
    let mut rom = vec![0u8; banks * ROM_BANK];
    rom[0x0147] = mbc;
    rom[0x0148] = rom_banks_code;
    rom[0x0149] = ram_banks_code;
    rom
}

fn with_program(mut rom: Vec<u8>, program: &[u8]) -> Vec<u8> {
    rom[0x0100..0x0100 + program.len()].copy_from_slice(program);
    rom
}

fn boot(rom: Vec<u8>) -> Machine {
    let mut machine = Machine::new();
    machine.insert_rom(rom).unwrap();
    machine.power_on();
    machine
}

fn run(machine: &mut Machine, ticks: u32) {
    for _ in 0..ticks {
        machine.tick();
    }
}

#[test]
fn nop_sled_spins_at_the_entry_point() {
    // 0x100 bytes of NOP followed by JP 0x0100.
    let rom = with_program(rom_image(0x00, 0x00, 0x00, 2), &[0xC3, 0x00, 0x01]);
    let mut machine = boot(rom);
    run(&mut machine, 1000);
    assert_eq!(machine.cpu().pc(), 0x0100);
    assert_eq!(machine.mem(0xFF0F), 0x00);
}

#[test]
fn mbc1_bank_switch_through_executed_stores() {
    let mut rom = rom_image(0x01, 0x02, 0x00, 8);
    rom[5 * ROM_BANK] = 0x77;
    rom[ROM_BANK] = 0x11;
    let rom = with_program(
        rom,
        &[
            0x3E, 0x05, // LD A, 0x05
            0xEA, 0x00, 0x20, // LD (0x2000), A   select bank 5
            0xFA, 0x00, 0x40, // LD A, (0x4000)
            0xEA, 0x00, 0xC0, // LD (0xC000), A
            0x3E, 0x00, // LD A, 0x00
            0xEA, 0x00, 0x20, // LD (0x2000), A   zero maps to bank 1
            0xFA, 0x00, 0x40, // LD A, (0x4000)
            0xEA, 0x01, 0xC0, // LD (0xC001), A
            0x76, // HALT
        ],
    );

    let mut machine = boot(rom);
    run(&mut machine, 300);
    assert!(machine.cpu().halted());
    assert_eq!(machine.mem(0xC000), 0x77);
    assert_eq!(machine.mem(0xC001), 0x11);
}

#[test]
fn vblank_flag_rises_once_in_the_first_70224_cycles() {
    let rom = with_program(rom_image(0x00, 0x00, 0x00, 2), &[0xC3, 0x00, 0x01]);
    let mut machine = boot(rom);

    let mut risings = 0;
    let mut previous = false;
    for _ in 0..70_224u32 {
        machine.tick();
        let set = machine.mem(0xFF0F) & 0x01 != 0;
        if set && !previous {
            risings += 1;
        }
        previous = set;
    }
    assert_eq!(risings, 1);
}

#[test]
fn frame_ready_exactly_at_the_frame_boundary() {
    let rom = with_program(rom_image(0x00, 0x00, 0x00, 2), &[0xC3, 0x00, 0x01]);
    let mut machine = boot(rom);

    assert!(machine.is_frame_ready());
    machine.tick();
    assert!(!machine.is_frame_ready());

    run(&mut machine, DOTS_PER_FRAME - 2);
    assert!(!machine.is_frame_ready());
    machine.tick();
    assert!(machine.is_frame_ready());
    machine.tick();
    assert!(!machine.is_frame_ready());
}

#[test]
fn button_press_reaches_p1_and_raises_the_interrupt() {
    let rom = with_program(
        rom_image(0x00, 0x00, 0x00, 2),
        &[
            0x3E, 0x10, // LD A, 0x10   select the action group
            0xE0, 0x00, // LDH (0x00), A
            0x18, 0xFE, // JR self
        ],
    );
    let mut machine = boot(rom);
    machine.set_button(Button::Start, true);
    run(&mut machine, 100);

    // Start is bit 3 of the selected nibble, active low.
    assert_eq!(machine.mem(0xFF00), 0x17);
    assert_eq!(machine.mem(0xFF0F) & 0x10, 0x10);

    machine.set_button(Button::Start, false);
    run(&mut machine, 10);
    assert_eq!(machine.mem(0xFF00), 0x1F);
}

#[test]
fn cartridge_ram_round_trips_through_save_and_restore() {
    let program = [
        0x3E, 0x5A, // LD A, 0x5A
        0xEA, 0x00, 0xA0, // LD (0xA000), A
        0x76, // HALT
    ];
    let rom = with_program(rom_image(0x03, 0x00, 0x02, 2), &program);

    let mut machine = boot(rom.clone());
    run(&mut machine, 100);
    assert_eq!(machine.mem(0xA000), 0x5A);
    let saved = machine.ram().to_vec();
    assert_eq!(saved[0], 0x5A);

    let mut restored = Machine::new();
    restored.insert_rom(rom).unwrap();
    restored.load_ram(saved);
    restored.power_on();
    assert_eq!(restored.mem(0xA000), 0x5A);
}

#[test]
fn header_validation_rejects_bad_images() {
    let mut machine = Machine::new();
    assert_eq!(
        machine.insert_rom(rom_image(0x11, 0x00, 0x00, 2)), // MBC3
        Err(CartridgeError::RomNotSupported)
    );
    assert_eq!(
        machine.insert_rom(vec![0u8; 0x40]),
        Err(CartridgeError::InvalidRom)
    );
    // Header claims more banks than the image holds.
    assert_eq!(
        machine.insert_rom(rom_image(0x01, 0x05, 0x00, 8)),
        Err(CartridgeError::InvalidRom)
    );
    assert!(machine.insert_rom(rom_image(0x00, 0x00, 0x00, 2)).is_ok());
}

// src/cpu/execute.rs
//
// The main opcode dispatch. PC has already advanced past the instruction's
// full encoding when an arm runs, so control-flow arms overwrite PC and
// fall-through arms leave it alone. Cycle costs come from the metadata
// table in `instruction.rs`.

use super::constants::*;
use super::Cpu;
use crate::memory_bus::MemoryBus;

impl Cpu {
    pub(super) fn execute(&mut self, opcode: u8, bus: &mut MemoryBus) {
        match opcode {
            // --- 0x00: misc / 16-bit loads / rotates ---
            0x00 => {} // NOP
            0x01 => {
                let v = self.read_d16(bus);
                self.set_bc(v);
            }
            0x02 => bus.write_byte(self.get_bc(), self.a),
            0x03 => self.set_bc(self.get_bc().wrapping_add(1)),
            0x04 => self.b = self.inc_u8(self.b),
            0x05 => self.b = self.dec_u8(self.b),
            0x06 => self.b = self.read_d8(bus),
            0x07 => self.a = self.rlc(self.a, false),
            0x08 => {
                let addr = self.read_d16(bus);
                bus.write_word(addr, self.sp);
            }
            0x09 => self.add_hl(self.get_bc()),
            0x0A => self.a = bus.read_byte(self.get_bc()),
            0x0B => self.set_bc(self.get_bc().wrapping_sub(1)),
            0x0C => self.c = self.inc_u8(self.c),
            0x0D => self.c = self.dec_u8(self.c),
            0x0E => self.c = self.read_d8(bus),
            0x0F => self.a = self.rrc(self.a, false),

            0x10 => self.halted = true, // STOP, treated as HALT
            0x11 => {
                let v = self.read_d16(bus);
                self.set_de(v);
            }
            0x12 => bus.write_byte(self.get_de(), self.a),
            0x13 => self.set_de(self.get_de().wrapping_add(1)),
            0x14 => self.d = self.inc_u8(self.d),
            0x15 => self.d = self.dec_u8(self.d),
            0x16 => self.d = self.read_d8(bus),
            0x17 => self.a = self.rl(self.a, false),
            0x18 => {
                let offset = self.read_r8(bus);
                self.pc = self.pc.wrapping_add(offset as u16);
            }
            0x19 => self.add_hl(self.get_de()),
            0x1A => self.a = bus.read_byte(self.get_de()),
            0x1B => self.set_de(self.get_de().wrapping_sub(1)),
            0x1C => self.e = self.inc_u8(self.e),
            0x1D => self.e = self.dec_u8(self.e),
            0x1E => self.e = self.read_d8(bus),
            0x1F => self.a = self.rr(self.a, false),

            0x20 => {
                let offset = self.read_r8(bus);
                if !self.get_flag(FLAG_Z) {
                    self.pc = self.pc.wrapping_add(offset as u16);
                }
            }
            0x21 => {
                let v = self.read_d16(bus);
                self.set_hl(v);
            }
            0x22 => {
                let hl = self.get_hl();
                bus.write_byte(hl, self.a);
                self.set_hl(hl.wrapping_add(1));
            }
            0x23 => self.set_hl(self.get_hl().wrapping_add(1)),
            0x24 => self.h = self.inc_u8(self.h),
            0x25 => self.h = self.dec_u8(self.h),
            0x26 => self.h = self.read_d8(bus),
            0x27 => self.daa(),
            0x28 => {
                let offset = self.read_r8(bus);
                if self.get_flag(FLAG_Z) {
                    self.pc = self.pc.wrapping_add(offset as u16);
                }
            }
            0x29 => self.add_hl(self.get_hl()),
            0x2A => {
                let hl = self.get_hl();
                self.a = bus.read_byte(hl);
                self.set_hl(hl.wrapping_add(1));
            }
            0x2B => self.set_hl(self.get_hl().wrapping_sub(1)),
            0x2C => self.l = self.inc_u8(self.l),
            0x2D => self.l = self.dec_u8(self.l),
            0x2E => self.l = self.read_d8(bus),
            0x2F => {
                self.a = !self.a;
                self.set_flag(FLAG_N, true);
                self.set_flag(FLAG_H, true);
            }

            0x30 => {
                let offset = self.read_r8(bus);
                if !self.get_flag(FLAG_C) {
                    self.pc = self.pc.wrapping_add(offset as u16);
                }
            }
            0x31 => self.sp = self.read_d16(bus),
            0x32 => {
                let hl = self.get_hl();
                bus.write_byte(hl, self.a);
                self.set_hl(hl.wrapping_sub(1));
            }
            0x33 => self.sp = self.sp.wrapping_add(1),
            0x34 => {
                let hl = self.get_hl();
                let v = bus.read_byte(hl);
                let v = self.inc_u8(v);
                bus.write_byte(hl, v);
            }
            0x35 => {
                let hl = self.get_hl();
                let v = bus.read_byte(hl);
                let v = self.dec_u8(v);
                bus.write_byte(hl, v);
            }
            0x36 => {
                let v = self.read_d8(bus);
                bus.write_byte(self.get_hl(), v);
            }
            0x37 => {
                self.set_flag(FLAG_N, false);
                self.set_flag(FLAG_H, false);
                self.set_flag(FLAG_C, true);
            }
            0x38 => {
                let offset = self.read_r8(bus);
                if self.get_flag(FLAG_C) {
                    self.pc = self.pc.wrapping_add(offset as u16);
                }
            }
            0x39 => self.add_hl(self.sp),
            0x3A => {
                let hl = self.get_hl();
                self.a = bus.read_byte(hl);
                self.set_hl(hl.wrapping_sub(1));
            }
            0x3B => self.sp = self.sp.wrapping_sub(1),
            0x3C => self.a = self.inc_u8(self.a),
            0x3D => self.a = self.dec_u8(self.a),
            0x3E => self.a = self.read_d8(bus),
            0x3F => {
                let carry = self.get_flag(FLAG_C);
                self.set_flag(FLAG_N, false);
                self.set_flag(FLAG_H, false);
                self.set_flag(FLAG_C, !carry);
            }

            // --- 0x40-0x7F: 8-bit register moves (HALT in the middle) ---
            0x40 => self.b = self.b,
            0x41 => self.b = self.c,
            0x42 => self.b = self.d,
            0x43 => self.b = self.e,
            0x44 => self.b = self.h,
            0x45 => self.b = self.l,
            0x46 => self.b = bus.read_byte(self.get_hl()),
            0x47 => self.b = self.a,
            0x48 => self.c = self.b,
            0x49 => self.c = self.c,
            0x4A => self.c = self.d,
            0x4B => self.c = self.e,
            0x4C => self.c = self.h,
            0x4D => self.c = self.l,
            0x4E => self.c = bus.read_byte(self.get_hl()),
            0x4F => self.c = self.a,

            0x50 => self.d = self.b,
            0x51 => self.d = self.c,
            0x52 => self.d = self.d,
            0x53 => self.d = self.e,
            0x54 => self.d = self.h,
            0x55 => self.d = self.l,
            0x56 => self.d = bus.read_byte(self.get_hl()),
            0x57 => self.d = self.a,
            0x58 => self.e = self.b,
            0x59 => self.e = self.c,
            0x5A => self.e = self.d,
            0x5B => self.e = self.e,
            0x5C => self.e = self.h,
            0x5D => self.e = self.l,
            0x5E => self.e = bus.read_byte(self.get_hl()),
            0x5F => self.e = self.a,

            0x60 => self.h = self.b,
            0x61 => self.h = self.c,
            0x62 => self.h = self.d,
            0x63 => self.h = self.e,
            0x64 => self.h = self.h,
            0x65 => self.h = self.l,
            0x66 => self.h = bus.read_byte(self.get_hl()),
            0x67 => self.h = self.a,
            0x68 => self.l = self.b,
            0x69 => self.l = self.c,
            0x6A => self.l = self.d,
            0x6B => self.l = self.e,
            0x6C => self.l = self.h,
            0x6D => self.l = self.l,
            0x6E => self.l = bus.read_byte(self.get_hl()),
            0x6F => self.l = self.a,

            0x70 => bus.write_byte(self.get_hl(), self.b),
            0x71 => bus.write_byte(self.get_hl(), self.c),
            0x72 => bus.write_byte(self.get_hl(), self.d),
            0x73 => bus.write_byte(self.get_hl(), self.e),
            0x74 => bus.write_byte(self.get_hl(), self.h),
            0x75 => bus.write_byte(self.get_hl(), self.l),
            0x76 => self.halted = true, // HALT
            0x77 => bus.write_byte(self.get_hl(), self.a),
            0x78 => self.a = self.b,
            0x79 => self.a = self.c,
            0x7A => self.a = self.d,
            0x7B => self.a = self.e,
            0x7C => self.a = self.h,
            0x7D => self.a = self.l,
            0x7E => self.a = bus.read_byte(self.get_hl()),
            0x7F => self.a = self.a,

            // --- 0x80-0xBF: accumulator arithmetic ---
            0x80 => self.add_a(self.b, false),
            0x81 => self.add_a(self.c, false),
            0x82 => self.add_a(self.d, false),
            0x83 => self.add_a(self.e, false),
            0x84 => self.add_a(self.h, false),
            0x85 => self.add_a(self.l, false),
            0x86 => {
                let v = bus.read_byte(self.get_hl());
                self.add_a(v, false);
            }
            0x87 => self.add_a(self.a, false),
            0x88 => self.add_a(self.b, true),
            0x89 => self.add_a(self.c, true),
            0x8A => self.add_a(self.d, true),
            0x8B => self.add_a(self.e, true),
            0x8C => self.add_a(self.h, true),
            0x8D => self.add_a(self.l, true),
            0x8E => {
                let v = bus.read_byte(self.get_hl());
                self.add_a(v, true);
            }
            0x8F => self.add_a(self.a, true),

            0x90 => self.sub_a(self.b, false),
            0x91 => self.sub_a(self.c, false),
            0x92 => self.sub_a(self.d, false),
            0x93 => self.sub_a(self.e, false),
            0x94 => self.sub_a(self.h, false),
            0x95 => self.sub_a(self.l, false),
            0x96 => {
                let v = bus.read_byte(self.get_hl());
                self.sub_a(v, false);
            }
            0x97 => self.sub_a(self.a, false),
            0x98 => self.sub_a(self.b, true),
            0x99 => self.sub_a(self.c, true),
            0x9A => self.sub_a(self.d, true),
            0x9B => self.sub_a(self.e, true),
            0x9C => self.sub_a(self.h, true),
            0x9D => self.sub_a(self.l, true),
            0x9E => {
                let v = bus.read_byte(self.get_hl());
                self.sub_a(v, true);
            }
            0x9F => self.sub_a(self.a, true),

            0xA0 => self.and_a(self.b),
            0xA1 => self.and_a(self.c),
            0xA2 => self.and_a(self.d),
            0xA3 => self.and_a(self.e),
            0xA4 => self.and_a(self.h),
            0xA5 => self.and_a(self.l),
            0xA6 => {
                let v = bus.read_byte(self.get_hl());
                self.and_a(v);
            }
            0xA7 => self.and_a(self.a),
            0xA8 => self.xor_a(self.b),
            0xA9 => self.xor_a(self.c),
            0xAA => self.xor_a(self.d),
            0xAB => self.xor_a(self.e),
            0xAC => self.xor_a(self.h),
            0xAD => self.xor_a(self.l),
            0xAE => {
                let v = bus.read_byte(self.get_hl());
                self.xor_a(v);
            }
            0xAF => self.xor_a(self.a),

            0xB0 => self.or_a(self.b),
            0xB1 => self.or_a(self.c),
            0xB2 => self.or_a(self.d),
            0xB3 => self.or_a(self.e),
            0xB4 => self.or_a(self.h),
            0xB5 => self.or_a(self.l),
            0xB6 => {
                let v = bus.read_byte(self.get_hl());
                self.or_a(v);
            }
            0xB7 => self.or_a(self.a),
            0xB8 => self.cp_a(self.b),
            0xB9 => self.cp_a(self.c),
            0xBA => self.cp_a(self.d),
            0xBB => self.cp_a(self.e),
            0xBC => self.cp_a(self.h),
            0xBD => self.cp_a(self.l),
            0xBE => {
                let v = bus.read_byte(self.get_hl());
                self.cp_a(v);
            }
            0xBF => self.cp_a(self.a),

            // --- 0xC0-0xFF: control flow, stack, immediates ---
            0xC0 => {
                if !self.get_flag(FLAG_Z) {
                    self.pc = self.pop_word(bus);
                }
            }
            0xC1 => {
                let v = self.pop_word(bus);
                self.set_bc(v);
            }
            0xC2 => {
                let target = self.read_d16(bus);
                if !self.get_flag(FLAG_Z) {
                    self.pc = target;
                }
            }
            0xC3 => self.pc = self.read_d16(bus),
            0xC4 => {
                if !self.get_flag(FLAG_Z) {
                    self.call(bus);
                }
            }
            0xC5 => self.push_word(self.get_bc(), bus),
            0xC6 => {
                let v = self.read_d8(bus);
                self.add_a(v, false);
            }
            0xC7 => self.rst(0x0000, bus),
            0xC8 => {
                if self.get_flag(FLAG_Z) {
                    self.pc = self.pop_word(bus);
                }
            }
            0xC9 => self.pc = self.pop_word(bus),
            0xCA => {
                let target = self.read_d16(bus);
                if self.get_flag(FLAG_Z) {
                    self.pc = target;
                }
            }
            0xCB => {} // prefix, dispatched in step()
            0xCC => {
                if self.get_flag(FLAG_Z) {
                    self.call(bus);
                }
            }
            0xCD => self.call(bus),
            0xCE => {
                let v = self.read_d8(bus);
                self.add_a(v, true);
            }
            0xCF => self.rst(0x0008, bus),

            0xD0 => {
                if !self.get_flag(FLAG_C) {
                    self.pc = self.pop_word(bus);
                }
            }
            0xD1 => {
                let v = self.pop_word(bus);
                self.set_de(v);
            }
            0xD2 => {
                let target = self.read_d16(bus);
                if !self.get_flag(FLAG_C) {
                    self.pc = target;
                }
            }
            0xD4 => {
                if !self.get_flag(FLAG_C) {
                    self.call(bus);
                }
            }
            0xD5 => self.push_word(self.get_de(), bus),
            0xD6 => {
                let v = self.read_d8(bus);
                self.sub_a(v, false);
            }
            0xD7 => self.rst(0x0010, bus),
            0xD8 => {
                if self.get_flag(FLAG_C) {
                    self.pc = self.pop_word(bus);
                }
            }
            0xD9 => {
                // RETI
                self.pc = self.pop_word(bus);
                self.ime = true;
            }
            0xDA => {
                let target = self.read_d16(bus);
                if self.get_flag(FLAG_C) {
                    self.pc = target;
                }
            }
            0xDC => {
                if self.get_flag(FLAG_C) {
                    self.call(bus);
                }
            }
            0xDE => {
                let v = self.read_d8(bus);
                self.sub_a(v, true);
            }
            0xDF => self.rst(0x0018, bus),

            0xE0 => {
                let offset = self.read_d8(bus);
                bus.write_byte(0xFF00 + offset as u16, self.a);
            }
            0xE1 => {
                let v = self.pop_word(bus);
                self.set_hl(v);
            }
            0xE2 => bus.write_byte(0xFF00 + self.c as u16, self.a),
            0xE5 => self.push_word(self.get_hl(), bus),
            0xE6 => {
                let v = self.read_d8(bus);
                self.and_a(v);
            }
            0xE7 => self.rst(0x0020, bus),
            0xE8 => {
                let offset = self.read_r8(bus);
                self.sp = self.add_sp_r8(offset);
            }
            0xE9 => self.pc = self.get_hl(),
            0xEA => {
                let addr = self.read_d16(bus);
                bus.write_byte(addr, self.a);
            }
            0xEE => {
                let v = self.read_d8(bus);
                self.xor_a(v);
            }
            0xEF => self.rst(0x0028, bus),

            0xF0 => {
                let offset = self.read_d8(bus);
                self.a = bus.read_byte(0xFF00 + offset as u16);
            }
            0xF1 => {
                let v = self.pop_word(bus);
                self.set_af(v);
            }
            0xF2 => self.a = bus.read_byte(0xFF00 + self.c as u16),
            0xF3 => self.ime = false, // DI
            0xF5 => self.push_word(self.get_af(), bus),
            0xF6 => {
                let v = self.read_d8(bus);
                self.or_a(v);
            }
            0xF7 => self.rst(0x0030, bus),
            0xF8 => {
                let offset = self.read_r8(bus);
                let result = self.add_sp_r8(offset);
                self.set_hl(result);
            }
            0xF9 => self.sp = self.get_hl(),
            0xFA => {
                let addr = self.read_d16(bus);
                self.a = bus.read_byte(addr);
            }
            0xFB => self.ime = true, // EI
            0xFE => {
                let v = self.read_d8(bus);
                self.cp_a(v);
            }
            0xFF => self.rst(0x0038, bus),

            // Unused opcodes: one-byte no-ops.
            0xD3 | 0xDB | 0xDD | 0xE3 | 0xE4 | 0xEB | 0xEC | 0xED | 0xF4 | 0xFC | 0xFD => {}
        }
    }

    /// CALL: PC already points past the three-byte encoding, so it is the
    /// return address.
    #[inline(always)]
    fn call(&mut self, bus: &mut MemoryBus) {
        let target = self.read_d16(bus);
        self.push_word(self.pc, bus);
        self.pc = target;
    }

    /// RST: one-byte call to a fixed vector.
    #[inline(always)]
    fn rst(&mut self, vector: u16, bus: &mut MemoryBus) {
        self.push_word(self.pc, bus);
        self.pc = vector;
    }
}

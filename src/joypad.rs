use crate::memory_bus::MemoryBus;
use crate::memory_map::{JOYPAD_INTERRUPT_BIT, P1_JOYP_ADDR};

/// The eight digital inputs of the handheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

const BUTTON_COUNT: usize = 8;

/// Button latch for the P1/JOYP register.
///
/// The host flips button state through `set`; each machine cycle `tick`
/// reads the selection bits the program wrote to P1, folds the pressed
/// buttons into the low nibble (pressed = bit cleared), and latches the
/// result back. A released-to-pressed transition on any button raises the
/// joypad interrupt.
#[derive(Debug, Clone, Default)]
pub struct Joypad {
    state: [bool; BUTTON_COUNT],
    prev: [bool; BUTTON_COUNT],
}

impl Joypad {
    pub fn new() -> Self {
        Joypad::default()
    }

    pub fn power_on(&mut self) {
        self.state = [false; BUTTON_COUNT];
        self.prev = [false; BUTTON_COUNT];
    }

    /// Records host-side button state. Takes effect at the next tick.
    pub fn set(&mut self, button: Button, pressed: bool) {
        self.state[button as usize] = pressed;
    }

    /// Latches the P1 register and raises the joypad interrupt on fresh
    /// presses.
    pub fn tick(&mut self, bus: &mut MemoryBus) {
        let selection = bus.read_byte(P1_JOYP_ADDR) & 0x30;
        let p14 = selection & 0x10 == 0; // direction pad selected
        let p15 = selection & 0x20 == 0; // action buttons selected

        let down = |b: Button| self.state[b as usize];
        let mut buttons = 0u8;
        buttons |= (((p14 && down(Button::Right)) || (p15 && down(Button::A))) as u8) << 0;
        buttons |= (((p14 && down(Button::Left)) || (p15 && down(Button::B))) as u8) << 1;
        buttons |= (((p14 && down(Button::Up)) || (p15 && down(Button::Select))) as u8) << 2;
        buttons |= (((p14 && down(Button::Down)) || (p15 && down(Button::Start))) as u8) << 3;

        bus.internal_write_joyp(selection | (!buttons & 0x0F));

        let fresh_press = self
            .state
            .iter()
            .zip(self.prev.iter())
            .any(|(&now, &was)| now && !was);
        if fresh_press {
            bus.request_interrupt(JOYPAD_INTERRUPT_BIT);
        }
        self.prev = self.state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_map::IF_ADDR;

    fn bus() -> MemoryBus {
        let mut bus = MemoryBus::new();
        bus.power_on();
        bus.write_byte(IF_ADDR, 0x00);
        bus
    }

    #[test]
    fn direction_pad_reads_through_selection() {
        let mut bus = bus();
        let mut pad = Joypad::new();
        pad.set(Button::Down, true);

        // Bit 4 low selects the direction pad; Down is bit 3, active low.
        bus.write_byte(P1_JOYP_ADDR, 0x20);
        pad.tick(&mut bus);
        assert_eq!(bus.read_byte(P1_JOYP_ADDR), 0x20 | 0x07);

        // With the action group selected instead, Down disappears.
        bus.write_byte(P1_JOYP_ADDR, 0x10);
        pad.tick(&mut bus);
        assert_eq!(bus.read_byte(P1_JOYP_ADDR), 0x10 | 0x0F);
    }

    #[test]
    fn press_edge_raises_interrupt_once() {
        let mut bus = bus();
        let mut pad = Joypad::new();

        pad.set(Button::Start, true);
        pad.tick(&mut bus);
        assert_eq!(bus.read_byte(IF_ADDR) & 0x10, 0x10);

        // Held button is not a new edge.
        bus.write_byte(IF_ADDR, 0x00);
        pad.tick(&mut bus);
        assert_eq!(bus.read_byte(IF_ADDR) & 0x10, 0x00);

        // Release and press again: new edge.
        pad.set(Button::Start, false);
        pad.tick(&mut bus);
        pad.set(Button::Start, true);
        pad.tick(&mut bus);
        assert_eq!(bus.read_byte(IF_ADDR) & 0x10, 0x10);
    }

    #[test]
    fn edge_fires_even_when_group_is_deselected() {
        let mut bus = bus();
        let mut pad = Joypad::new();
        bus.write_byte(P1_JOYP_ADDR, 0x30); // neither group selected
        pad.set(Button::A, true);
        pad.tick(&mut bus);
        assert_eq!(bus.read_byte(IF_ADDR) & 0x10, 0x10);
        assert_eq!(bus.read_byte(P1_JOYP_ADDR), 0x30 | 0x0F);
    }
}

use crate::cpu::{Bus, Interrupt, IF_ADDR, IE_ADDR};

use super::{MEMORY_SIZE, ROM_WINDOW};

pub(super) const JOYP: u16 = 0xFF00;
pub(super) const LCDC: u16 = 0xFF40;
pub(super) const STAT: u16 = 0xFF41;
pub(super) const LY: u16 = 0xFF44;
pub(super) const LYC: u16 = 0xFF45;
const BGP: u16 = 0xFF47;

/// Joypad inputs. D-pad and action buttons sit on separate P1 select lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
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

impl Button {
    /// Whether the button is read through the d-pad select line (P14).
    fn is_dpad(self) -> bool {
        matches!(self, Button::Right | Button::Left | Button::Up | Button::Down)
    }

    /// Bit in the low nibble of P1.
    fn line(self) -> u8 {
        match self {
            Button::Right | Button::A => 0x01,
            Button::Left | Button::B => 0x02,
            Button::Up | Button::Select => 0x04,
            Button::Down | Button::Start => 0x08,
        }
    }
}

/// Flat 64 KiB bus behind the CPU.
///
/// The cartridge image is mapped read-only at 0x0000-0x7FFF without any
/// bank switching. IF and IE are kept outside the flat array so their
/// unused bits can be modelled.
pub struct Memory {
    memory: [u8; MEMORY_SIZE],
    if_reg: u8,
    ie_reg: u8,
    // P1 select bits (5 = buttons, 4 = d-pad, 0 selects) and pressed masks
    // (bit set = pressed).
    joyp_select: u8,
    joyp_buttons: u8,
    joyp_dpad: u8,
}

impl Default for Memory {
    fn default() -> Self {
        let mut memory = Self {
            memory: [0; MEMORY_SIZE],
            if_reg: 0,
            ie_reg: 0,
            joyp_select: 0x30,
            joyp_buttons: 0,
            joyp_dpad: 0,
        };
        memory.apply_post_boot_io_state();
        memory
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// I/O register values left behind by the DMG boot ROM.
    fn apply_post_boot_io_state(&mut self) {
        self.memory[LCDC as usize] = 0x91;
        self.memory[STAT as usize] = 0x85;
        self.memory[BGP as usize] = 0xFC;
        // Lower five bits only; reads OR in 0xE0.
        self.if_reg = 0x01;
        self.ie_reg = 0x00;
    }

    /// Map a cartridge image into the ROM window. Bytes past 0x7FFF are
    /// ignored. Returns the number of bytes mapped.
    pub fn load_rom(&mut self, rom: &[u8]) -> usize {
        let len = rom.len().min(ROM_WINDOW);
        self.memory[..len].copy_from_slice(&rom[..len]);
        self.memory[len..ROM_WINDOW].fill(0);
        len
    }

    pub fn press(&mut self, button: Button) {
        let before = self.read_joyp();
        let line = button.line();
        if button.is_dpad() {
            self.joyp_dpad |= line;
        } else {
            self.joyp_buttons |= line;
        }
        self.raise_joypad_on_fall(before);
    }

    pub fn release(&mut self, button: Button) {
        let line = button.line();
        if button.is_dpad() {
            self.joyp_dpad &= !line;
        } else {
            self.joyp_buttons &= !line;
        }
    }

    /// Set an IF bit.
    pub fn request_interrupt(&mut self, interrupt: Interrupt) {
        self.if_reg |= interrupt.bit();
    }

    /// Direct access for collaborators that own registers the CPU can only
    /// read (LY, the STAT mode bits).
    #[inline]
    pub(super) fn io(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    #[inline]
    pub(super) fn set_io(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    /// The joypad interrupt fires when a selected P1 input line falls from
    /// high to low.
    fn raise_joypad_on_fall(&mut self, before: u8) {
        let fallen = before & !self.read_joyp() & 0x0F;
        if fallen != 0 {
            self.request_interrupt(Interrupt::Joypad);
        }
    }

    fn read_joyp(&self) -> u8 {
        let select = self.joyp_select & 0x30;
        let mut low = 0x0F;
        if select & 0x10 == 0 {
            low &= !self.joyp_dpad;
        }
        if select & 0x20 == 0 {
            low &= !self.joyp_buttons;
        }
        0xC0 | select | (low & 0x0F)
    }
}

impl Bus for Memory {
    fn read8(&mut self, addr: u16) -> u8 {
        match addr {
            0xE000..=0xFDFF => self.memory[(addr - 0x2000) as usize],
            JOYP => self.read_joyp(),
            IF_ADDR => self.if_reg | 0xE0,
            IE_ADDR => self.ie_reg,
            _ => self.memory[addr as usize],
        }
    }

    fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            // No bank controller: ROM writes are dropped.
            0x0000..=0x7FFF => {}
            0xE000..=0xFDFF => self.memory[(addr - 0x2000) as usize] = value,
            JOYP => {
                let before = self.read_joyp();
                self.joyp_select = value & 0x30;
                self.raise_joypad_on_fall(before);
            }
            // Mode and coincidence bits are owned by the video timing.
            STAT => {
                let stat = &mut self.memory[STAT as usize];
                *stat = (*stat & 0x07) | (value & 0x78) | 0x80;
            }
            LY => {}
            IF_ADDR => self.if_reg = value & 0x1F,
            IE_ADDR => self.ie_reg = value,
            _ => self.memory[addr as usize] = value,
        }
    }

    /// STOP ends as soon as any input line is held.
    fn stop_wake(&mut self) -> bool {
        self.joyp_buttons | self.joyp_dpad != 0
    }
}

use super::decode::{Cond, R16Stack, R16, R8};
use super::{Bus, Cpu, Flags};

impl Cpu {
    #[inline]
    pub(super) fn read_r8<B: Bus>(&mut self, bus: &mut B, reg: R8) -> u8 {
        match reg {
            R8::B => self.regs.b(),
            R8::C => self.regs.c(),
            R8::D => self.regs.d(),
            R8::E => self.regs.e(),
            R8::H => self.regs.h(),
            R8::L => self.regs.l(),
            R8::HlInd => bus.read8(self.regs.hl()),
            R8::A => self.regs.a(),
        }
    }

    #[inline]
    pub(super) fn write_r8<B: Bus>(&mut self, bus: &mut B, reg: R8, value: u8) {
        match reg {
            R8::B => self.regs.set_b(value),
            R8::C => self.regs.set_c(value),
            R8::D => self.regs.set_d(value),
            R8::E => self.regs.set_e(value),
            R8::H => self.regs.set_h(value),
            R8::L => self.regs.set_l(value),
            R8::HlInd => bus.write8(self.regs.hl(), value),
            R8::A => self.regs.set_a(value),
        }
    }

    #[inline]
    pub(super) fn read_r16(&self, reg: R16) -> u16 {
        match reg {
            R16::BC => self.regs.bc(),
            R16::DE => self.regs.de(),
            R16::HL => self.regs.hl(),
            R16::SP => self.regs.sp,
        }
    }

    #[inline]
    pub(super) fn write_r16(&mut self, reg: R16, value: u16) {
        match reg {
            R16::BC => self.regs.set_bc(value),
            R16::DE => self.regs.set_de(value),
            R16::HL => self.regs.set_hl(value),
            R16::SP => self.regs.sp = value,
        }
    }

    #[inline]
    pub(super) fn read_r16_stack(&self, reg: R16Stack) -> u16 {
        match reg {
            R16Stack::BC => self.regs.bc(),
            R16Stack::DE => self.regs.de(),
            R16Stack::HL => self.regs.hl(),
            R16Stack::AF => self.regs.af(),
        }
    }

    #[inline]
    pub(super) fn write_r16_stack(&mut self, reg: R16Stack, value: u16) {
        match reg {
            R16Stack::BC => self.regs.set_bc(value),
            R16Stack::DE => self.regs.set_de(value),
            R16Stack::HL => self.regs.set_hl(value),
            R16Stack::AF => self.regs.set_af(value),
        }
    }

    #[inline]
    pub(super) fn condition(&self, cc: Cond) -> bool {
        let flags = self.regs.flags();
        match cc {
            Cond::NZ => !flags.contains(Flags::Z),
            Cond::Z => flags.contains(Flags::Z),
            Cond::NC => !flags.contains(Flags::C),
            Cond::C => flags.contains(Flags::C),
        }
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        if self.halt_bug {
            // The first fetch after the HALT bug does not advance PC.
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Push a word: SP drops by two, high byte lands at SP+1, low at SP.
    #[inline]
    pub(super) fn push16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read16(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }
}

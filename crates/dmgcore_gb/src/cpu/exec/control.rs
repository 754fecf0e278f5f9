use crate::cpu::decode::Cond;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    #[inline]
    fn taken(&self, cond: Option<Cond>) -> bool {
        cond.map_or(true, |cc| self.condition(cc))
    }

    /// JR / JR cc. The displacement is relative to the address following
    /// the operand and wraps around the 16-bit address space.
    pub(super) fn exec_jr<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) -> bool {
        let offset = self.fetch8(bus) as i8;
        let taken = self.taken(cond);
        if taken {
            self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
        }
        taken
    }

    pub(super) fn exec_jp<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) -> bool {
        let addr = self.fetch16(bus);
        let taken = self.taken(cond);
        if taken {
            self.regs.pc = addr;
        }
        taken
    }

    /// CALL / CALL cc. Pushes the address of the byte after the operand.
    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) -> bool {
        let addr = self.fetch16(bus);
        let taken = self.taken(cond);
        if taken {
            let ret = self.regs.pc;
            self.push16(bus, ret);
            self.regs.pc = addr;
        }
        taken
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) -> bool {
        let taken = self.taken(cond);
        if taken {
            self.regs.pc = self.pop16(bus);
        }
        taken
    }

    /// RETI enables IME immediately, unlike EI.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop16(bus);
        self.ime = true;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
    }

    /// RST n: push the current PC and jump to one of the eight fixed
    /// vectors 0x00, 0x08, ..., 0x38.
    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u8) {
        let ret = self.regs.pc;
        self.push16(bus, ret);
        self.regs.pc = vector as u16;
    }
}

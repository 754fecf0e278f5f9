use crate::cpu::decode::{R16, R8};
use crate::cpu::{alu, Bus, Cpu};

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, r: R8) {
        let value = self.read_r8(bus, r);
        let out = alu::inc8(value, self.regs.flags());
        self.write_r8(bus, r, out.value);
        self.regs.set_flags(out.flags);
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, r: R8) {
        let value = self.read_r8(bus, r);
        let out = alu::dec8(value, self.regs.flags());
        self.write_r8(bus, r, out.value);
        self.regs.set_flags(out.flags);
    }

    // 16-bit INC/DEC touch no flags.
    pub(super) fn exec_inc16(&mut self, rr: R16) {
        let value = self.read_r16(rr).wrapping_add(1);
        self.write_r16(rr, value);
    }

    pub(super) fn exec_dec16(&mut self, rr: R16) {
        let value = self.read_r16(rr).wrapping_sub(1);
        self.write_r16(rr, value);
    }
}

use crate::cpu::decode::{ShiftOp, R8};
use crate::cpu::{alu, Bus, Cpu};

impl Cpu {
    pub(super) fn exec_shift<B: Bus>(&mut self, bus: &mut B, op: ShiftOp, r: R8) {
        let value = self.read_r8(bus, r);
        let out = alu::shift(op, value, self.regs.flags());
        self.write_r8(bus, r, out.value);
        self.regs.set_flags(out.flags);
    }

    pub(super) fn exec_bit<B: Bus>(&mut self, bus: &mut B, bit: u8, r: R8) {
        let value = self.read_r8(bus, r);
        let flags = alu::bit(bit, value, self.regs.flags());
        self.regs.set_flags(flags);
    }

    pub(super) fn exec_res<B: Bus>(&mut self, bus: &mut B, bit: u8, r: R8) {
        let value = self.read_r8(bus, r);
        self.write_r8(bus, r, value & !(1 << bit));
    }

    pub(super) fn exec_set<B: Bus>(&mut self, bus: &mut B, bit: u8, r: R8) {
        let value = self.read_r8(bus, r);
        self.write_r8(bus, r, value | (1 << bit));
    }
}

use crate::cpu::decode::R16Stack;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, rr: R16Stack) {
        let value = self.read_r16_stack(rr);
        self.push16(bus, value);
    }

    /// POP AF drops the low nibble of F through `Registers::set_af`.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, rr: R16Stack) {
        let value = self.pop16(bus);
        self.write_r16_stack(rr, value);
    }
}

use crate::cpu::decode::{R16Mem, R16, R8};
use crate::cpu::{alu, Bus, Cpu, IO_BASE};

impl Cpu {
    pub(super) fn exec_ld_r16_imm<B: Bus>(&mut self, bus: &mut B, rr: R16) {
        let value = self.fetch16(bus);
        self.write_r16(rr, value);
    }

    pub(super) fn exec_ld_r8_imm<B: Bus>(&mut self, bus: &mut B, r: R8) {
        let value = self.fetch8(bus);
        self.write_r8(bus, r, value);
    }

    pub(super) fn exec_ld_r8_r8<B: Bus>(&mut self, bus: &mut B, dst: R8, src: R8) {
        let value = self.read_r8(bus, src);
        self.write_r8(bus, dst, value);
    }

    /// Resolve an indirect operand, applying the HL post-increment or
    /// post-decrement.
    fn indirect_addr(&mut self, mem: R16Mem) -> u16 {
        match mem {
            R16Mem::BC => self.regs.bc(),
            R16Mem::DE => self.regs.de(),
            R16Mem::HlInc => {
                let addr = self.regs.hl();
                self.regs.set_hl(addr.wrapping_add(1));
                addr
            }
            R16Mem::HlDec => {
                let addr = self.regs.hl();
                self.regs.set_hl(addr.wrapping_sub(1));
                addr
            }
        }
    }

    pub(super) fn exec_ld_mem_a<B: Bus>(&mut self, bus: &mut B, mem: R16Mem) {
        let addr = self.indirect_addr(mem);
        bus.write8(addr, self.regs.a());
    }

    pub(super) fn exec_ld_a_mem<B: Bus>(&mut self, bus: &mut B, mem: R16Mem) {
        let addr = self.indirect_addr(mem);
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    pub(super) fn exec_ld_imm16_sp<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        bus.write16(addr, self.regs.sp);
    }

    pub(super) fn exec_ldh_imm_a<B: Bus>(&mut self, bus: &mut B) {
        let offset = self.fetch8(bus);
        bus.write8(IO_BASE | offset as u16, self.regs.a());
    }

    pub(super) fn exec_ldh_a_imm<B: Bus>(&mut self, bus: &mut B) {
        let offset = self.fetch8(bus);
        let value = bus.read8(IO_BASE | offset as u16);
        self.regs.set_a(value);
    }

    pub(super) fn exec_ldh_c_a<B: Bus>(&mut self, bus: &mut B) {
        bus.write8(IO_BASE | self.regs.c() as u16, self.regs.a());
    }

    pub(super) fn exec_ldh_a_c<B: Bus>(&mut self, bus: &mut B) {
        let value = bus.read8(IO_BASE | self.regs.c() as u16);
        self.regs.set_a(value);
    }

    pub(super) fn exec_ld_abs_a<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        bus.write8(addr, self.regs.a());
    }

    pub(super) fn exec_ld_a_abs<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    pub(super) fn exec_ld_hl_sp_imm<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.fetch8(bus);
        let (result, flags) = alu::add16_signed(self.regs.sp, imm);
        self.regs.set_hl(result);
        self.regs.set_flags(flags);
    }
}

use crate::cpu::decode::{AluOp, ShiftOp, R16};
use crate::cpu::{alu, Bus, Cpu, Flags};

impl Cpu {
    /// 8-bit ALU on A. `CP` only updates flags.
    pub(super) fn exec_alu(&mut self, op: AluOp, value: u8) {
        let a = self.regs.a();
        let carry = self.flag(Flags::C);
        let out = match op {
            AluOp::Add => alu::add8(a, value, false),
            AluOp::Adc => alu::add8(a, value, carry),
            AluOp::Sub | AluOp::Cp => alu::sub8(a, value, false),
            AluOp::Sbc => alu::sub8(a, value, carry),
            AluOp::And => alu::and8(a, value),
            AluOp::Xor => alu::xor8(a, value),
            AluOp::Or => alu::or8(a, value),
        };

        if op != AluOp::Cp {
            self.regs.set_a(out.value);
        }
        self.regs.set_flags(out.flags);
    }

    pub(super) fn exec_rotate_a(&mut self, op: ShiftOp) {
        debug_assert!(matches!(
            op,
            ShiftOp::Rlc | ShiftOp::Rrc | ShiftOp::Rl | ShiftOp::Rr
        ));
        let out = alu::rotate_a(op, self.regs.a(), self.regs.flags());
        self.regs.set_a(out.value);
        self.regs.set_flags(out.flags);
    }

    pub(super) fn exec_add_hl(&mut self, rr: R16) {
        let value = self.read_r16(rr);
        let (result, flags) = alu::add16(self.regs.hl(), value, self.regs.flags());
        self.regs.set_hl(result);
        self.regs.set_flags(flags);
    }

    pub(super) fn exec_add_sp_imm<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.fetch8(bus);
        let (result, flags) = alu::add16_signed(self.regs.sp, imm);
        self.regs.sp = result;
        self.regs.set_flags(flags);
    }

    pub(super) fn exec_daa(&mut self) {
        let out = alu::daa(self.regs.a(), self.regs.flags());
        self.regs.set_a(out.value);
        self.regs.set_flags(out.flags);
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.set_a(!self.regs.a());
        self.set_flag(Flags::N, true);
        self.set_flag(Flags::H, true);
    }

    pub(super) fn exec_scf(&mut self) {
        self.set_flag(Flags::C, true);
        self.set_flag(Flags::N, false);
        self.set_flag(Flags::H, false);
    }

    pub(super) fn exec_ccf(&mut self) {
        let carry = self.flag(Flags::C);
        self.set_flag(Flags::C, !carry);
        self.set_flag(Flags::N, false);
        self.set_flag(Flags::H, false);
    }
}

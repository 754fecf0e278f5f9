mod alu;
mod cb;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::decode::Instr;
use super::{Bus, Cpu};

impl Cpu {
    /// Execute one decoded instruction whose opcode byte(s) have already
    /// been fetched.
    ///
    /// Returns whether a conditional instruction took its branch; every
    /// unconditional instruction reports `true` so the caller can pick the
    /// matching cost from the table entry.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, instr: Instr) -> bool {
        match instr {
            Instr::Nop => {}
            Instr::Stop => self.exec_stop(bus),
            Instr::Halt => self.exec_halt(bus),
            Instr::Di => self.exec_di(),
            Instr::Ei => self.exec_ei(),
            Instr::Daa => self.exec_daa(),
            Instr::Cpl => self.exec_cpl(),
            Instr::Scf => self.exec_scf(),
            Instr::Ccf => self.exec_ccf(),

            Instr::LdR16Imm(rr) => self.exec_ld_r16_imm(bus, rr),
            Instr::LdMemA(mem) => self.exec_ld_mem_a(bus, mem),
            Instr::LdAMem(mem) => self.exec_ld_a_mem(bus, mem),
            Instr::LdImm16Sp => self.exec_ld_imm16_sp(bus),
            Instr::IncR16(rr) => self.exec_inc16(rr),
            Instr::DecR16(rr) => self.exec_dec16(rr),
            Instr::AddHl(rr) => self.exec_add_hl(rr),

            Instr::IncR8(r) => self.exec_inc8(bus, r),
            Instr::DecR8(r) => self.exec_dec8(bus, r),
            Instr::LdR8Imm(r) => self.exec_ld_r8_imm(bus, r),
            Instr::LdR8R8(dst, src) => self.exec_ld_r8_r8(bus, dst, src),
            Instr::RotateA(op) => self.exec_rotate_a(op),

            Instr::AluR8(op, r) => {
                let value = self.read_r8(bus, r);
                self.exec_alu(op, value);
            }
            Instr::AluImm(op) => {
                let value = self.fetch8(bus);
                self.exec_alu(op, value);
            }

            Instr::Jr => return self.exec_jr(bus, None),
            Instr::JrCond(cc) => return self.exec_jr(bus, Some(cc)),
            Instr::Jp => return self.exec_jp(bus, None),
            Instr::JpCond(cc) => return self.exec_jp(bus, Some(cc)),
            Instr::JpHl => self.regs.pc = self.regs.hl(),
            Instr::Call => return self.exec_call(bus, None),
            Instr::CallCond(cc) => return self.exec_call(bus, Some(cc)),
            Instr::Ret => return self.exec_ret(bus, None),
            Instr::RetCond(cc) => return self.exec_ret(bus, Some(cc)),
            Instr::Reti => self.exec_reti(bus),
            Instr::Rst(vector) => self.exec_rst(bus, vector),
            Instr::Push(rr) => self.exec_push(bus, rr),
            Instr::Pop(rr) => self.exec_pop(bus, rr),

            Instr::LdhImmA => self.exec_ldh_imm_a(bus),
            Instr::LdhAImm => self.exec_ldh_a_imm(bus),
            Instr::LdhCA => self.exec_ldh_c_a(bus),
            Instr::LdhAC => self.exec_ldh_a_c(bus),
            Instr::LdAbsA => self.exec_ld_abs_a(bus),
            Instr::LdAAbs => self.exec_ld_a_abs(bus),
            Instr::AddSpImm => self.exec_add_sp_imm(bus),
            Instr::LdHlSpImm => self.exec_ld_hl_sp_imm(bus),
            Instr::LdSpHl => self.regs.sp = self.regs.hl(),

            Instr::Shift(op, r) => self.exec_shift(bus, op, r),
            Instr::Bit(bit, r) => self.exec_bit(bus, bit, r),
            Instr::Res(bit, r) => self.exec_res(bus, bit, r),
            Instr::Set(bit, r) => self.exec_set(bus, bit, r),

            // The dispatcher resolves 0xCB through the secondary table before
            // calling here.
            Instr::Prefix => {}
            Instr::Undocumented(opcode) => self.exec_undocumented(opcode),
        }
        true
    }
}

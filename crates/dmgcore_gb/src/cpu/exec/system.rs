use crate::cpu::{Bus, Cpu, Diagnostic, Interrupts, IE_ADDR, IF_ADDR};

impl Cpu {
    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) {
        if !self.ime {
            // HALT bug: with IME clear and an interrupt already pending the
            // CPU does not halt, and the next opcode fetch does not advance
            // PC.
            let pending = bus.read8(IE_ADDR) & bus.read8(IF_ADDR) & Interrupts::all().bits();
            if pending != 0 {
                self.halt_bug = true;
                return;
            }
        }
        self.halted = true;
    }

    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) {
        // STOP is a 2-byte instruction; the padding byte is fetched and
        // discarded.
        let _padding = self.fetch8(bus);
        self.stopped = true;
        self.halted = false;
        log::debug!("GB CPU: STOP at PC=0x{:04X}", self.regs.pc.wrapping_sub(2));
    }

    pub(super) fn exec_di(&mut self) {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
    }

    pub(super) fn exec_ei(&mut self) {
        self.ime_enable_pending = true;
    }

    pub(super) fn exec_undocumented(&mut self, opcode: u8) {
        if !self.config.strict {
            return;
        }
        let address = self.regs.pc.wrapping_sub(1);
        let diagnostic = Diagnostic::UndocumentedOpcode { opcode, address };
        log::warn!("GB CPU: {diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Advance the EI pipeline by one instruction boundary.
    ///
    /// The instruction that executes EI arms the delay; IME flips on once
    /// the instruction after it has completed.
    #[inline]
    pub(in crate::cpu) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}

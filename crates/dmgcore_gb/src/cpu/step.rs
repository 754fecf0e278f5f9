use super::clock::Cost;
use super::decode::{PRIMARY, SECONDARY};
use super::{Bus, Cpu, RunState};

impl Cpu {
    /// Execute one step: a single instruction (or one idle HALT cycle),
    /// followed by the interrupt check, then record the step's cost.
    ///
    /// Returns `true` when the CPU is running after the step, `false` while
    /// it is halted or stopped and needs an external event to resume.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> bool {
        if self.stopped {
            if !bus.stop_wake() {
                // STOP freezes the system clock entirely.
                self.clock.advance(Cost::ZERO);
                return false;
            }
            self.stopped = false;
            log::debug!("GB CPU: leaving STOP at PC=0x{:04X}", self.regs.pc);
        }

        let mut cost = if self.halted {
            self.stats.halted_steps += 1;
            Cost::from_mcycles(1)
        } else {
            let cost = self.execute_next(bus);
            self.apply_ime_delay();
            cost
        };

        if let Some(entry) = self.service_interrupts(bus) {
            cost += entry;
        }
        self.clock.advance(cost);

        self.run_state() == RunState::Running
    }

    /// Fetch, decode and execute the instruction at PC.
    fn execute_next<B: Bus>(&mut self, bus: &mut B) -> Cost {
        if self.config.trace {
            let line = self.trace_line(bus);
            let (text, _) = super::disassemble(bus, self.regs.pc);
            log::trace!("{line} {text}");
        }

        let opcode = self.fetch8(bus);
        let entry = if opcode == 0xCB {
            let sub = self.fetch8(bus);
            self.stats.record_secondary(sub);
            &SECONDARY[sub as usize]
        } else {
            self.stats.record_primary(opcode);
            &PRIMARY[opcode as usize]
        };

        let taken = self.execute(bus, entry.instr);
        entry.cost(taken)
    }
}

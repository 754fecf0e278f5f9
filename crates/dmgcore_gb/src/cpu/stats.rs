use super::decode::{Instr, PRIMARY, SECONDARY};
use super::interrupts::Interrupt;

/// Execution counters owned by one [`Cpu`](super::Cpu).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecStats {
    /// Instructions executed (a prefixed instruction counts once).
    pub instructions: u64,
    /// Steps spent idling in HALT.
    pub halted_steps: u64,
    primary: [u64; 256],
    secondary: [u64; 256],
    interrupts: [u64; 5],
}

impl Default for ExecStats {
    fn default() -> Self {
        Self {
            instructions: 0,
            halted_steps: 0,
            primary: [0; 256],
            secondary: [0; 256],
            interrupts: [0; 5],
        }
    }
}

impl ExecStats {
    pub(super) fn record_primary(&mut self, opcode: u8) {
        self.instructions += 1;
        self.primary[opcode as usize] += 1;
    }

    pub(super) fn record_secondary(&mut self, opcode: u8) {
        self.instructions += 1;
        self.secondary[opcode as usize] += 1;
    }

    pub(super) fn record_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupts[interrupt.index()] += 1;
    }

    #[inline]
    pub fn primary_count(&self, opcode: u8) -> u64 {
        self.primary[opcode as usize]
    }

    #[inline]
    pub fn secondary_count(&self, opcode: u8) -> u64 {
        self.secondary[opcode as usize]
    }

    #[inline]
    pub fn interrupt_count(&self, interrupt: Interrupt) -> u64 {
        self.interrupts[interrupt.index()]
    }

    /// The `limit` most executed instructions, most frequent first.
    ///
    /// `0xCB` itself is never listed; prefixed instructions appear under
    /// their own decoded form.
    pub fn hottest(&self, limit: usize) -> Vec<(Instr, u64)> {
        let primary = PRIMARY.iter().zip(self.primary.iter());
        let secondary = SECONDARY.iter().zip(self.secondary.iter());
        let mut counts: Vec<(Instr, u64)> = primary
            .chain(secondary)
            .filter(|(entry, count)| **count > 0 && entry.instr != Instr::Prefix)
            .map(|(entry, &count)| (entry.instr, count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(limit);
        counts
    }
}

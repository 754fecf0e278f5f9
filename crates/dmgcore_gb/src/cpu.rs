mod alu;
mod bus;
mod clock;
mod config;
pub mod decode;
mod diagnostics;
mod exec;
mod helpers;
mod interrupts;
mod regs;
mod stats;
mod step;
mod trace;

pub use bus::{Bus, IE_ADDR, IF_ADDR, IO_BASE};
pub use clock::{Clock, Cost, TICKS_PER_MCYCLE};
pub use config::CpuConfig;
pub use decode::{disassemble, Instr, Opcode, PRIMARY, SECONDARY};
pub use diagnostics::Diagnostic;
pub use interrupts::{Interrupt, Interrupts, INTERRUPT_ENTRY_COST};
pub use regs::{Flags, RegisterPair, Registers};
pub use stats::ExecStats;
pub use trace::TraceLine;

/// Run state of the processor.
///
/// `Halted` and `Stopped` are left only through an external event: an
/// enabled interrupt becoming pending, or for `Stopped` the bus's wake
/// signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunState {
    Running,
    Halted,
    Stopped,
}

/// Game Boy CPU core (LR35902 / SM83).
///
/// Owns the register file, the interrupt master enable, the run state and
/// the clock counters. Memory is only reached through a [`Bus`] passed into
/// each call.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    halted: bool,
    stopped: bool,
    /// Set when HALT was executed with IME clear and an interrupt already
    /// pending: the next opcode fetch does not advance PC.
    halt_bug: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    clock: Clock,
    stats: ExecStats,
    diagnostics: Vec<Diagnostic>,
    config: CpuConfig,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            regs: Registers::post_boot(config.entry_point),
            ime: config.ime_on_power_on,
            halted: false,
            stopped: false,
            halt_bug: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            clock: Clock::new(),
            stats: ExecStats::default(),
            diagnostics: Vec::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Read-only register snapshot for debuggers and tracers.
    #[inline]
    pub fn registers(&self) -> Registers {
        self.regs
    }

    #[inline]
    pub fn run_state(&self) -> RunState {
        if self.stopped {
            RunState::Stopped
        } else if self.halted {
            RunState::Halted
        } else {
            RunState::Running
        }
    }

    #[inline]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Clock ticks elapsed since construction.
    #[inline]
    pub fn total_ticks(&self) -> u64 {
        self.clock.total_ticks()
    }

    #[inline]
    pub fn stats(&self) -> &ExecStats {
        &self.stats
    }

    /// Drain the diagnostics recorded in strict mode.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    #[inline]
    pub fn flag(&self, flag: Flags) -> bool {
        self.regs.flags().contains(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        let mut flags = self.regs.flags();
        flags.set(flag, value);
        self.regs.set_flags(flags);
    }

    /// Capture a trace line for the instruction about to execute.
    pub fn trace_line<B: Bus + ?Sized>(&self, bus: &mut B) -> TraceLine {
        TraceLine::capture(&self.regs, bus)
    }
}

#[cfg(test)]
mod tests;

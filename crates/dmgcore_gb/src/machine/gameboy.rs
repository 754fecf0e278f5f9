use crate::cpu::{Cpu, CpuConfig, RunState};

use super::{Button, Memory, VideoTiming, TICKS_PER_FRAME};

/// High-level Game Boy machine.
///
/// Owns the CPU, the memory bus and the LCD timing and wires them together
/// for each step. None of the parts refers back to another; the CPU sees
/// memory only through the `&mut` bus handed to `Cpu::step`, and the video
/// timing pulls the CPU's tick total afterwards.
pub struct GameBoy {
    pub cpu: Cpu,
    pub memory: Memory,
    video: VideoTiming,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            cpu: Cpu::with_config(config),
            memory: Memory::new(),
            video: VideoTiming::new(),
        }
    }

    /// Map a ROM image at 0x0000. Returns the number of bytes mapped.
    pub fn load_rom(&mut self, rom: &[u8]) -> usize {
        self.memory.load_rom(rom)
    }

    #[inline]
    pub fn video(&self) -> &VideoTiming {
        &self.video
    }

    /// Execute one CPU step and let the LCD timing catch up with it.
    ///
    /// Returns `true` while the CPU is running (see [`Cpu::step`]).
    pub fn step(&mut self) -> bool {
        let running = self.cpu.step(&mut self.memory);
        self.video.catch_up(self.cpu.total_ticks(), &mut self.memory);
        running
    }

    /// Run for one frame's worth of clock ticks (70224).
    ///
    /// Returns the ticks actually elapsed. This can fall short of a frame
    /// only when the CPU sits in STOP with no input held, since the clock
    /// does not advance then.
    pub fn run_frame(&mut self) -> u64 {
        let start = self.cpu.total_ticks();
        let target = start + TICKS_PER_FRAME;
        while self.cpu.total_ticks() < target {
            let before = self.cpu.total_ticks();
            self.step();
            if self.cpu.run_state() == RunState::Stopped && self.cpu.total_ticks() == before {
                break;
            }
        }
        self.cpu.total_ticks() - start
    }

    pub fn press(&mut self, button: Button) {
        self.memory.press(button);
    }

    pub fn release(&mut self, button: Button) {
        self.memory.release(button);
    }
}

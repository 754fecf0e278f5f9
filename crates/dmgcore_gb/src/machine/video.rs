use crate::cpu::Interrupt;

use super::memory::{Memory, LCDC, LY, LYC, STAT};
use super::TICKS_PER_FRAME;

const TICKS_PER_LINE: u32 = 456;
const VBLANK_LINE: u32 = 144;
const OAM_SCAN_TICKS: u32 = 80;
const TRANSFER_TICKS: u32 = 172;

/// PPU mode as reported in STAT bits 0-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LcdMode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

/// LCD timing without pixel output.
///
/// Pulls the CPU's cumulative tick count and catches up one tick at a time,
/// keeping LY and the STAT mode/coincidence bits current and raising the
/// VBlank and STAT interrupts.
#[derive(Clone, Debug, Default)]
pub struct VideoTiming {
    /// Position within the frame, in ticks.
    dot: u32,
    /// CPU tick total this timing has been advanced to.
    synced: u64,
    /// ORed STAT interrupt sources as of the last tick; the interrupt fires
    /// on its rising edge.
    stat_line: bool,
    frames: u64,
}

impl VideoTiming {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn ly(&self) -> u8 {
        (self.dot / TICKS_PER_LINE) as u8
    }

    pub fn mode(&self) -> LcdMode {
        if self.dot / TICKS_PER_LINE >= VBLANK_LINE {
            return LcdMode::VBlank;
        }
        match self.dot % TICKS_PER_LINE {
            t if t < OAM_SCAN_TICKS => LcdMode::OamScan,
            t if t < OAM_SCAN_TICKS + TRANSFER_TICKS => LcdMode::Transfer,
            _ => LcdMode::HBlank,
        }
    }

    /// Frames completed, counted at each VBlank entry.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance to the CPU's cumulative tick total `now`.
    pub fn catch_up(&mut self, now: u64, memory: &mut Memory) {
        let elapsed = now.saturating_sub(self.synced);
        self.synced = self.synced.max(now);

        if memory.io(LCDC) & 0x80 == 0 {
            // LCD off: LY is held at 0 and timing restarts when it is
            // switched back on.
            self.dot = 0;
            self.stat_line = false;
            memory.set_io(LY, 0);
            self.update_status(memory, false);
            return;
        }

        for _ in 0..elapsed {
            self.tick(memory);
        }
    }

    fn tick(&mut self, memory: &mut Memory) {
        let old_ly = self.dot / TICKS_PER_LINE;
        self.dot = (self.dot + 1) % TICKS_PER_FRAME as u32;
        let new_ly = self.dot / TICKS_PER_LINE;
        memory.set_io(LY, new_ly as u8);

        if old_ly < VBLANK_LINE && new_ly >= VBLANK_LINE {
            memory.request_interrupt(Interrupt::VBlank);
            self.frames += 1;
            log::debug!("GB PPU: VBlank edge, frame {}", self.frames);
        }

        self.update_status(memory, true);
    }

    /// Recompute STAT bits 0-2 and the STAT interrupt line.
    fn update_status(&mut self, memory: &mut Memory, lcd_on: bool) {
        let mode = if lcd_on { self.mode() } else { LcdMode::HBlank };
        let coincidence = memory.io(LY) == memory.io(LYC);

        let mut stat = memory.io(STAT) & !0x07;
        stat |= mode as u8;
        if coincidence {
            stat |= 0x04;
        }
        memory.set_io(STAT, stat);

        if !lcd_on {
            return;
        }

        let line = (stat & 0x40 != 0 && coincidence)
            || (stat & 0x20 != 0 && mode == LcdMode::OamScan)
            || (stat & 0x10 != 0 && mode == LcdMode::VBlank)
            || (stat & 0x08 != 0 && mode == LcdMode::HBlank);

        if line && !self.stat_line {
            memory.request_interrupt(Interrupt::LcdStat);
            log::debug!(
                "GB PPU: STAT rising edge (STAT=0x{:02X} LY={} mode={:?})",
                stat,
                memory.io(LY),
                mode
            );
        }
        self.stat_line = line;
    }
}

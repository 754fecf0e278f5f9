use bitflags::bitflags;

use super::clock::Cost;
use super::{Bus, Cpu, IE_ADDR, IF_ADDR};

bitflags! {
    /// Interrupt request lines as laid out in IE (0xFFFF) and IF (0xFF0F).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Interrupts: u8 {
        const VBLANK = 0x01;
        const LCD_STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

/// Cost of the interrupt entry sequence, charged on top of the instruction
/// that completed before it.
pub const INTERRUPT_ENTRY_COST: Cost = Cost::from_mcycles(5);

/// A single interrupt source, in priority order (VBlank highest).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    /// Bit position in IE/IF.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }

    #[inline]
    pub const fn mask(self) -> Interrupts {
        Interrupts::from_bits_truncate(self.bit())
    }

    /// Fixed dispatch address: 0x40, 0x48, 0x50, 0x58, 0x60.
    #[inline]
    pub const fn vector(self) -> u16 {
        0x0040 + (self.index() as u16) * 8
    }

    /// The highest-priority source among `pending`, if any.
    pub fn highest_priority(pending: Interrupts) -> Option<Interrupt> {
        if pending.is_empty() {
            return None;
        }
        Self::ALL
            .get(pending.bits().trailing_zeros() as usize)
            .copied()
    }
}

impl Cpu {
    /// Check IE & IF at an instruction boundary and dispatch at most one
    /// interrupt.
    ///
    /// A pending-and-enabled line always wakes the CPU from HALT, even with
    /// IME clear; only the dispatch itself is gated by IME. Returns the
    /// entry cost when a dispatch happened.
    pub(in crate::cpu) fn service_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<Cost> {
        let ie = bus.read8(IE_ADDR);
        let iflags = bus.read8(IF_ADDR);
        let pending = Interrupts::from_bits_truncate(ie & iflags);
        let interrupt = Interrupt::highest_priority(pending)?;

        if self.halted {
            self.halted = false;
            log::debug!("GB CPU: leaving HALT on {interrupt:?}");
        }
        if !self.ime {
            return None;
        }

        self.ime = false;
        // A dispatch straight out of the HALT bug returns to the HALT itself
        // and never carries the repeated fetch into the handler.
        let pc = if self.halt_bug {
            self.halt_bug = false;
            self.regs.pc.wrapping_sub(1)
        } else {
            self.regs.pc
        };
        let [lo, hi] = pc.to_le_bytes();

        // The high byte lands first and may overwrite IE when SP was 0, so
        // the line is picked again after that write. The low byte write
        // never retargets the dispatch.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        let armed = Interrupts::from_bits_truncate(bus.read8(IE_ADDR) & iflags);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);

        let Some(interrupt) = Interrupt::highest_priority(armed) else {
            log::debug!("GB CPU interrupt cancelled by IE write during push, pc=0x{pc:04X}");
            self.regs.pc = 0x0000;
            return Some(INTERRUPT_ENTRY_COST);
        };

        bus.write8(IF_ADDR, iflags & !interrupt.bit());
        self.regs.pc = interrupt.vector();
        self.stats.record_interrupt(interrupt);

        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X} IF=0x{:02X} IE=0x{:02X}",
            interrupt,
            interrupt.vector(),
            pc,
            self.regs.sp,
            iflags & Interrupts::all().bits(),
            ie,
        );
        Some(INTERRUPT_ENTRY_COST)
    }
}

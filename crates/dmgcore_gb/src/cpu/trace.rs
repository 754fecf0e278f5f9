use std::fmt;

use super::{Bus, Registers};

/// Register snapshot plus the four bytes at PC, printed in the line format
/// used by common reference CPU logs:
///
/// `A:01 F:B0 B:00 C:13 D:00 E:D8 H:01 L:4D SP:FFFE PC:0100 PCMEM:00,C3,13,02`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceLine {
    pub regs: Registers,
    pub pcmem: [u8; 4],
}

impl TraceLine {
    pub fn capture<B: Bus + ?Sized>(regs: &Registers, bus: &mut B) -> Self {
        let mut pcmem = [0; 4];
        for (offset, byte) in pcmem.iter_mut().enumerate() {
            *byte = bus.read8(regs.pc.wrapping_add(offset as u16));
        }
        Self { regs: *regs, pcmem }
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.regs;
        write!(
            f,
            "A:{:02X} F:{:02X} B:{:02X} C:{:02X} D:{:02X} E:{:02X} H:{:02X} L:{:02X} SP:{:04X} PC:{:04X} PCMEM:{:02X},{:02X},{:02X},{:02X}",
            r.a(),
            r.flags().bits(),
            r.b(),
            r.c(),
            r.d(),
            r.e(),
            r.h(),
            r.l(),
            r.sp,
            r.pc,
            self.pcmem[0],
            self.pcmem[1],
            self.pcmem[2],
            self.pcmem[3],
        )
    }
}

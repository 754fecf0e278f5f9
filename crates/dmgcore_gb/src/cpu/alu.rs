//! Flag rules for the arithmetic, logic and bit operations.
//!
//! Every helper is a pure function of its inputs (including the incoming
//! flags where an operation preserves some of them) so the rules can be
//! checked exhaustively without a bus.

use super::decode::ShiftOp;
use super::regs::Flags;

/// Result byte plus the complete new flag set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AluOut {
    pub value: u8,
    pub flags: Flags,
}

#[inline]
fn zero(value: u8) -> Flags {
    if value == 0 {
        Flags::Z
    } else {
        Flags::empty()
    }
}

/// ADD/ADC. Half-carry and carry come from the untruncated sum.
pub fn add8(a: u8, value: u8, carry_in: bool) -> AluOut {
    let carry = carry_in as u8;
    let half = (a & 0x0F) + (value & 0x0F) + carry;
    let full = a as u16 + value as u16 + carry as u16;
    let result = full as u8;

    let mut flags = zero(result);
    flags.set(Flags::H, half > 0x0F);
    flags.set(Flags::C, full > 0xFF);
    AluOut {
        value: result,
        flags,
    }
}

/// SUB/SBC/CP. Half-carry is a borrow into bit 4, carry a borrow from bit 8.
pub fn sub8(a: u8, value: u8, carry_in: bool) -> AluOut {
    let carry = carry_in as i16;
    let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry;
    let full = a as i16 - value as i16 - carry;
    let result = full as u8;

    let mut flags = zero(result) | Flags::N;
    flags.set(Flags::H, half < 0);
    flags.set(Flags::C, full < 0);
    AluOut {
        value: result,
        flags,
    }
}

pub fn and8(a: u8, value: u8) -> AluOut {
    let result = a & value;
    AluOut {
        value: result,
        flags: zero(result) | Flags::H,
    }
}

pub fn or8(a: u8, value: u8) -> AluOut {
    let result = a | value;
    AluOut {
        value: result,
        flags: zero(result),
    }
}

pub fn xor8(a: u8, value: u8) -> AluOut {
    let result = a ^ value;
    AluOut {
        value: result,
        flags: zero(result),
    }
}

/// INC r. C is carried over from `flags`.
pub fn inc8(value: u8, flags: Flags) -> AluOut {
    let result = value.wrapping_add(1);
    let mut out = zero(result) | (flags & Flags::C);
    out.set(Flags::H, (value & 0x0F) == 0x0F);
    AluOut {
        value: result,
        flags: out,
    }
}

/// DEC r. C is carried over from `flags`.
pub fn dec8(value: u8, flags: Flags) -> AluOut {
    let result = value.wrapping_sub(1);
    let mut out = zero(result) | Flags::N | (flags & Flags::C);
    out.set(Flags::H, (value & 0x0F) == 0);
    AluOut {
        value: result,
        flags: out,
    }
}

/// ADD HL,rr: Z untouched, N cleared, H from bit 11, C from bit 15.
pub fn add16(hl: u16, value: u16, flags: Flags) -> (u16, Flags) {
    let mut out = flags & Flags::Z;
    out.set(Flags::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
    out.set(Flags::C, hl as u32 + value as u32 > 0xFFFF);
    (hl.wrapping_add(value), out)
}

/// ADD SP,r8 and LD HL,SP+r8: Z and N cleared, H and C from the low byte.
pub fn add16_signed(base: u16, imm8: u8) -> (u16, Flags) {
    let offset = imm8 as i8 as i16 as u16;
    let mut out = Flags::empty();
    out.set(Flags::H, (base & 0x000F) + (offset & 0x000F) > 0x000F);
    out.set(Flags::C, (base & 0x00FF) + (offset & 0x00FF) > 0x00FF);
    (base.wrapping_add(offset), out)
}

/// Decimal adjust after a BCD addition or subtraction. N is preserved.
pub fn daa(a: u8, flags: Flags) -> AluOut {
    let subtract = flags.contains(Flags::N);
    let mut adjust: u8 = if flags.contains(Flags::C) { 0x60 } else { 0x00 };
    if flags.contains(Flags::H) {
        adjust |= 0x06;
    }

    let result = if subtract {
        a.wrapping_sub(adjust)
    } else {
        if (a & 0x0F) > 0x09 {
            adjust |= 0x06;
        }
        if a > 0x99 {
            adjust |= 0x60;
        }
        a.wrapping_add(adjust)
    };

    let mut out = zero(result) | (flags & Flags::N);
    out.set(Flags::C, adjust >= 0x60);
    AluOut {
        value: result,
        flags: out,
    }
}

/// Rotate/shift/swap of the prefixed table. Z reflects the result.
pub fn shift(op: ShiftOp, value: u8, flags: Flags) -> AluOut {
    let carry_in = flags.contains(Flags::C);
    let (result, carry_out) = match op {
        ShiftOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
        ShiftOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
        ShiftOp::Rl => ((value << 1) | carry_in as u8, value & 0x80 != 0),
        ShiftOp::Rr => ((value >> 1) | ((carry_in as u8) << 7), value & 0x01 != 0),
        ShiftOp::Sla => (value << 1, value & 0x80 != 0),
        ShiftOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
        ShiftOp::Swap => (value.rotate_left(4), false),
        ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
    };

    let mut out = zero(result);
    out.set(Flags::C, carry_out);
    AluOut {
        value: result,
        flags: out,
    }
}

/// RLCA/RRCA/RLA/RRA: same data path as the prefixed forms but Z is
/// always cleared.
pub fn rotate_a(op: ShiftOp, a: u8, flags: Flags) -> AluOut {
    let out = shift(op, a, flags);
    AluOut {
        value: out.value,
        flags: out.flags - Flags::Z,
    }
}

/// BIT b,r: Z set when the bit is clear, N cleared, H set, C preserved.
pub fn bit(index: u8, value: u8, flags: Flags) -> Flags {
    let mut out = Flags::H | (flags & Flags::C);
    out.set(Flags::Z, value & (1 << index) == 0);
    out
}

//! Opcode tables for the primary and `0xCB`-prefixed instruction sets.
//!
//! Both tables are built at compile time from the standard `x/y/z` bit
//! decomposition of the opcode byte (`x = op >> 6`, `y = (op >> 3) & 7`,
//! `z = op & 7`). Each entry records the decoded instruction, its encoded
//! length and its cost in machine cycles.

use std::fmt;

use super::clock::Cost;
use super::Bus;

/// 8-bit operand in the standard register order used by the opcode tables:
/// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum R8 {
    B,
    C,
    D,
    E,
    H,
    L,
    HlInd,
    A,
}

impl R8 {
    pub const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => R8::B,
            1 => R8::C,
            2 => R8::D,
            3 => R8::E,
            4 => R8::H,
            5 => R8::L,
            6 => R8::HlInd,
            _ => R8::A,
        }
    }

    #[inline]
    pub const fn is_memory(self) -> bool {
        matches!(self, R8::HlInd)
    }
}

/// Register pair operand of 16-bit loads and arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum R16 {
    BC,
    DE,
    HL,
    SP,
}

impl R16 {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => R16::BC,
            1 => R16::DE,
            2 => R16::HL,
            _ => R16::SP,
        }
    }
}

/// Register pair operand of PUSH/POP (AF takes the place of SP).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum R16Stack {
    BC,
    DE,
    HL,
    AF,
}

impl R16Stack {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => R16Stack::BC,
            1 => R16Stack::DE,
            2 => R16Stack::HL,
            _ => R16Stack::AF,
        }
    }
}

/// Indirect address operand of `LD (rr),A` / `LD A,(rr)`, including the
/// post-increment and post-decrement HL forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum R16Mem {
    BC,
    DE,
    HlInc,
    HlDec,
}

impl R16Mem {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => R16Mem::BC,
            1 => R16Mem::DE,
            2 => R16Mem::HlInc,
            _ => R16Mem::HlDec,
        }
    }
}

/// Branch condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cond {
    NZ,
    Z,
    NC,
    C,
}

impl Cond {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Cond::NZ,
            1 => Cond::Z,
            2 => Cond::NC,
            _ => Cond::C,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }
}

/// Rotate/shift family shared by the accumulator forms and the prefixed
/// table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => ShiftOp::Rlc,
            1 => ShiftOp::Rrc,
            2 => ShiftOp::Rl,
            3 => ShiftOp::Rr,
            4 => ShiftOp::Sla,
            5 => ShiftOp::Sra,
            6 => ShiftOp::Swap,
            _ => ShiftOp::Srl,
        }
    }
}

/// One decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instr {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    Daa,
    Cpl,
    Scf,
    Ccf,

    LdR16Imm(R16),
    LdMemA(R16Mem),
    LdAMem(R16Mem),
    LdImm16Sp,
    IncR16(R16),
    DecR16(R16),
    AddHl(R16),

    IncR8(R8),
    DecR8(R8),
    LdR8Imm(R8),
    LdR8R8(R8, R8),
    /// RLCA, RRCA, RLA, RRA.
    RotateA(ShiftOp),

    AluR8(AluOp, R8),
    AluImm(AluOp),

    Jr,
    JrCond(Cond),
    Jp,
    JpCond(Cond),
    JpHl,
    Call,
    CallCond(Cond),
    Ret,
    RetCond(Cond),
    Reti,
    Rst(u8),
    Push(R16Stack),
    Pop(R16Stack),

    LdhImmA,
    LdhAImm,
    LdhCA,
    LdhAC,
    LdAbsA,
    LdAAbs,
    AddSpImm,
    LdHlSpImm,
    LdSpHl,

    /// The `0xCB` escape byte.
    Prefix,
    /// One of the byte values the hardware never issues.
    Undocumented(u8),

    Shift(ShiftOp, R8),
    Bit(u8, R8),
    Res(u8, R8),
    Set(u8, R8),
}

impl Instr {
    /// Decode a byte from the primary table.
    pub const fn primary(opcode: u8) -> Instr {
        let x = opcode >> 6;
        let y = (opcode >> 3) & 0x07;
        let z = opcode & 0x07;
        let p = y >> 1;
        let q = y & 1;

        match x {
            0 => match z {
                0 => match y {
                    0 => Instr::Nop,
                    1 => Instr::LdImm16Sp,
                    2 => Instr::Stop,
                    3 => Instr::Jr,
                    _ => Instr::JrCond(Cond::from_index(y - 4)),
                },
                1 => {
                    if q == 0 {
                        Instr::LdR16Imm(R16::from_index(p))
                    } else {
                        Instr::AddHl(R16::from_index(p))
                    }
                }
                2 => {
                    if q == 0 {
                        Instr::LdMemA(R16Mem::from_index(p))
                    } else {
                        Instr::LdAMem(R16Mem::from_index(p))
                    }
                }
                3 => {
                    if q == 0 {
                        Instr::IncR16(R16::from_index(p))
                    } else {
                        Instr::DecR16(R16::from_index(p))
                    }
                }
                4 => Instr::IncR8(R8::from_index(y)),
                5 => Instr::DecR8(R8::from_index(y)),
                6 => Instr::LdR8Imm(R8::from_index(y)),
                _ => match y {
                    0 => Instr::RotateA(ShiftOp::Rlc),
                    1 => Instr::RotateA(ShiftOp::Rrc),
                    2 => Instr::RotateA(ShiftOp::Rl),
                    3 => Instr::RotateA(ShiftOp::Rr),
                    4 => Instr::Daa,
                    5 => Instr::Cpl,
                    6 => Instr::Scf,
                    _ => Instr::Ccf,
                },
            },
            1 => {
                if opcode == 0x76 {
                    Instr::Halt
                } else {
                    Instr::LdR8R8(R8::from_index(y), R8::from_index(z))
                }
            }
            2 => Instr::AluR8(AluOp::from_index(y), R8::from_index(z)),
            _ => match z {
                0 => match y {
                    0..=3 => Instr::RetCond(Cond::from_index(y)),
                    4 => Instr::LdhImmA,
                    5 => Instr::AddSpImm,
                    6 => Instr::LdhAImm,
                    _ => Instr::LdHlSpImm,
                },
                1 => {
                    if q == 0 {
                        Instr::Pop(R16Stack::from_index(p))
                    } else {
                        match p {
                            0 => Instr::Ret,
                            1 => Instr::Reti,
                            2 => Instr::JpHl,
                            _ => Instr::LdSpHl,
                        }
                    }
                }
                2 => match y {
                    0..=3 => Instr::JpCond(Cond::from_index(y)),
                    4 => Instr::LdhCA,
                    5 => Instr::LdAbsA,
                    6 => Instr::LdhAC,
                    _ => Instr::LdAAbs,
                },
                3 => match y {
                    0 => Instr::Jp,
                    1 => Instr::Prefix,
                    6 => Instr::Di,
                    7 => Instr::Ei,
                    _ => Instr::Undocumented(opcode),
                },
                4 => match y {
                    0..=3 => Instr::CallCond(Cond::from_index(y)),
                    _ => Instr::Undocumented(opcode),
                },
                5 => {
                    if q == 0 {
                        Instr::Push(R16Stack::from_index(p))
                    } else if p == 0 {
                        Instr::Call
                    } else {
                        Instr::Undocumented(opcode)
                    }
                }
                6 => Instr::AluImm(AluOp::from_index(y)),
                _ => Instr::Rst(y * 8),
            },
        }
    }

    /// Decode the byte following a `0xCB` prefix.
    pub const fn secondary(opcode: u8) -> Instr {
        let y = (opcode >> 3) & 0x07;
        let target = R8::from_index(opcode);
        match opcode >> 6 {
            0 => Instr::Shift(ShiftOp::from_index(y), target),
            1 => Instr::Bit(y, target),
            2 => Instr::Res(y, target),
            _ => Instr::Set(y, target),
        }
    }

    /// Encoded length in bytes, prefix byte included for the `0xCB` set.
    pub const fn length(self) -> u8 {
        match self {
            Instr::LdR16Imm(_)
            | Instr::LdImm16Sp
            | Instr::Jp
            | Instr::JpCond(_)
            | Instr::Call
            | Instr::CallCond(_)
            | Instr::LdAbsA
            | Instr::LdAAbs => 3,
            Instr::Stop
            | Instr::LdR8Imm(_)
            | Instr::AluImm(_)
            | Instr::Jr
            | Instr::JrCond(_)
            | Instr::LdhImmA
            | Instr::LdhAImm
            | Instr::AddSpImm
            | Instr::LdHlSpImm
            | Instr::Shift(..)
            | Instr::Bit(..)
            | Instr::Res(..)
            | Instr::Set(..) => 2,
            _ => 1,
        }
    }

    /// Machine cycles when the instruction does not branch (or is not a
    /// conditional instruction at all).
    pub const fn mcycles(self) -> u32 {
        match self {
            Instr::LdR16Imm(_) => 3,
            Instr::LdMemA(_) | Instr::LdAMem(_) => 2,
            Instr::LdImm16Sp => 5,
            Instr::IncR16(_) | Instr::DecR16(_) | Instr::AddHl(_) => 2,
            Instr::IncR8(r) | Instr::DecR8(r) => {
                if r.is_memory() {
                    3
                } else {
                    1
                }
            }
            Instr::LdR8Imm(r) => {
                if r.is_memory() {
                    3
                } else {
                    2
                }
            }
            Instr::LdR8R8(dst, src) => {
                if dst.is_memory() || src.is_memory() {
                    2
                } else {
                    1
                }
            }
            Instr::AluR8(_, r) => {
                if r.is_memory() {
                    2
                } else {
                    1
                }
            }
            Instr::AluImm(_) => 2,
            Instr::Jr => 3,
            Instr::JrCond(_) => 2,
            Instr::Jp => 4,
            Instr::JpCond(_) => 3,
            Instr::Call => 6,
            Instr::CallCond(_) => 3,
            Instr::Ret | Instr::Reti => 4,
            Instr::RetCond(_) => 2,
            Instr::Rst(_) | Instr::Push(_) => 4,
            Instr::Pop(_) => 3,
            Instr::LdhImmA | Instr::LdhAImm => 3,
            Instr::LdhCA | Instr::LdhAC => 2,
            Instr::LdAbsA | Instr::LdAAbs => 4,
            Instr::AddSpImm => 4,
            Instr::LdHlSpImm => 3,
            Instr::LdSpHl => 2,
            Instr::Shift(_, r) | Instr::Res(_, r) | Instr::Set(_, r) => {
                if r.is_memory() {
                    4
                } else {
                    2
                }
            }
            Instr::Bit(_, r) => {
                if r.is_memory() {
                    3
                } else {
                    2
                }
            }
            _ => 1,
        }
    }

    /// Machine cycles when a conditional instruction takes its branch.
    pub const fn mcycles_taken(self) -> u32 {
        match self {
            Instr::JrCond(_) => 3,
            Instr::JpCond(_) => 4,
            Instr::CallCond(_) => 6,
            Instr::RetCond(_) => 5,
            other => other.mcycles(),
        }
    }
}

/// One entry of a dispatch table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opcode {
    pub instr: Instr,
    pub length: u8,
    mcycles: u8,
    mcycles_taken: u8,
}

impl Opcode {
    const fn new(instr: Instr) -> Self {
        Self {
            instr,
            length: instr.length(),
            mcycles: instr.mcycles() as u8,
            mcycles_taken: instr.mcycles_taken() as u8,
        }
    }

    /// Whether the cost depends on a runtime condition.
    #[inline]
    pub const fn is_conditional(&self) -> bool {
        self.mcycles != self.mcycles_taken
    }

    #[inline]
    pub const fn cost(&self, taken: bool) -> Cost {
        if taken {
            Cost::from_mcycles(self.mcycles_taken as u32)
        } else {
            Cost::from_mcycles(self.mcycles as u32)
        }
    }
}

const fn build_table(prefixed: bool) -> [Opcode; 256] {
    let mut table = [Opcode::new(Instr::Nop); 256];
    let mut i = 0;
    while i < 256 {
        let instr = if prefixed {
            Instr::secondary(i as u8)
        } else {
            Instr::primary(i as u8)
        };
        table[i] = Opcode::new(instr);
        i += 1;
    }
    table
}

/// Primary opcode table.
///
/// The `0xCB` entry only accounts for the prefix byte itself; the full cost
/// of a prefixed instruction is carried by its `SECONDARY` entry.
pub static PRIMARY: [Opcode; 256] = build_table(false);

/// `0xCB`-prefixed opcode table. Lengths and costs include the prefix.
pub static SECONDARY: [Opcode; 256] = build_table(true);

impl fmt::Display for R8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            R8::B => "B",
            R8::C => "C",
            R8::D => "D",
            R8::E => "E",
            R8::H => "H",
            R8::L => "L",
            R8::HlInd => "(HL)",
            R8::A => "A",
        };
        f.write_str(name)
    }
}

impl fmt::Display for R16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            R16::BC => "BC",
            R16::DE => "DE",
            R16::HL => "HL",
            R16::SP => "SP",
        };
        f.write_str(name)
    }
}

impl fmt::Display for R16Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            R16Stack::BC => "BC",
            R16Stack::DE => "DE",
            R16Stack::HL => "HL",
            R16Stack::AF => "AF",
        };
        f.write_str(name)
    }
}

impl fmt::Display for R16Mem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            R16Mem::BC => "(BC)",
            R16Mem::DE => "(DE)",
            R16Mem::HlInc => "(HL+)",
            R16Mem::HlDec => "(HL-)",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cond::NZ => "NZ",
            Cond::Z => "Z",
            Cond::NC => "NC",
            Cond::C => "C",
        };
        f.write_str(name)
    }
}

impl AluOp {
    fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD A,",
            AluOp::Adc => "ADC A,",
            AluOp::Sub => "SUB ",
            AluOp::Sbc => "SBC A,",
            AluOp::And => "AND ",
            AluOp::Xor => "XOR ",
            AluOp::Or => "OR ",
            AluOp::Cp => "CP ",
        }
    }
}

impl ShiftOp {
    fn mnemonic(self) -> &'static str {
        match self {
            ShiftOp::Rlc => "RLC",
            ShiftOp::Rrc => "RRC",
            ShiftOp::Rl => "RL",
            ShiftOp::Rr => "RR",
            ShiftOp::Sla => "SLA",
            ShiftOp::Sra => "SRA",
            ShiftOp::Swap => "SWAP",
            ShiftOp::Srl => "SRL",
        }
    }
}

/// Mnemonic with immediate operands shown as placeholders (`d8`, `a16`, ...).
impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instr::Nop => write!(f, "NOP"),
            Instr::Stop => write!(f, "STOP"),
            Instr::Halt => write!(f, "HALT"),
            Instr::Di => write!(f, "DI"),
            Instr::Ei => write!(f, "EI"),
            Instr::Daa => write!(f, "DAA"),
            Instr::Cpl => write!(f, "CPL"),
            Instr::Scf => write!(f, "SCF"),
            Instr::Ccf => write!(f, "CCF"),
            Instr::LdR16Imm(rr) => write!(f, "LD {rr},d16"),
            Instr::LdMemA(mem) => write!(f, "LD {mem},A"),
            Instr::LdAMem(mem) => write!(f, "LD A,{mem}"),
            Instr::LdImm16Sp => write!(f, "LD (a16),SP"),
            Instr::IncR16(rr) => write!(f, "INC {rr}"),
            Instr::DecR16(rr) => write!(f, "DEC {rr}"),
            Instr::AddHl(rr) => write!(f, "ADD HL,{rr}"),
            Instr::IncR8(r) => write!(f, "INC {r}"),
            Instr::DecR8(r) => write!(f, "DEC {r}"),
            Instr::LdR8Imm(r) => write!(f, "LD {r},d8"),
            Instr::LdR8R8(dst, src) => write!(f, "LD {dst},{src}"),
            Instr::RotateA(op) => write!(f, "{}A", op.mnemonic()),
            Instr::AluR8(op, r) => write!(f, "{}{r}", op.mnemonic()),
            Instr::AluImm(op) => write!(f, "{}d8", op.mnemonic()),
            Instr::Jr => write!(f, "JR r8"),
            Instr::JrCond(cc) => write!(f, "JR {cc},r8"),
            Instr::Jp => write!(f, "JP a16"),
            Instr::JpCond(cc) => write!(f, "JP {cc},a16"),
            Instr::JpHl => write!(f, "JP HL"),
            Instr::Call => write!(f, "CALL a16"),
            Instr::CallCond(cc) => write!(f, "CALL {cc},a16"),
            Instr::Ret => write!(f, "RET"),
            Instr::RetCond(cc) => write!(f, "RET {cc}"),
            Instr::Reti => write!(f, "RETI"),
            Instr::Rst(vector) => write!(f, "RST {vector:02X}H"),
            Instr::Push(rr) => write!(f, "PUSH {rr}"),
            Instr::Pop(rr) => write!(f, "POP {rr}"),
            Instr::LdhImmA => write!(f, "LDH (a8),A"),
            Instr::LdhAImm => write!(f, "LDH A,(a8)"),
            Instr::LdhCA => write!(f, "LD (C),A"),
            Instr::LdhAC => write!(f, "LD A,(C)"),
            Instr::LdAbsA => write!(f, "LD (a16),A"),
            Instr::LdAAbs => write!(f, "LD A,(a16)"),
            Instr::AddSpImm => write!(f, "ADD SP,r8"),
            Instr::LdHlSpImm => write!(f, "LD HL,SP+r8"),
            Instr::LdSpHl => write!(f, "LD SP,HL"),
            Instr::Prefix => write!(f, "PREFIX CB"),
            Instr::Undocumented(op) => write!(f, "DB {op:02X}H"),
            Instr::Shift(op, r) => write!(f, "{} {r}", op.mnemonic()),
            Instr::Bit(bit, r) => write!(f, "BIT {bit},{r}"),
            Instr::Res(bit, r) => write!(f, "RES {bit},{r}"),
            Instr::Set(bit, r) => write!(f, "SET {bit},{r}"),
        }
    }
}

/// Disassemble the instruction at `addr`, substituting immediate operands.
///
/// Returns the text and the encoded length. Reads go through the bus, so
/// callers should only use this on buses without read side effects.
pub fn disassemble<B: Bus + ?Sized>(bus: &mut B, addr: u16) -> (String, u8) {
    let opcode = bus.read8(addr);
    let entry = if opcode == 0xCB {
        &SECONDARY[bus.read8(addr.wrapping_add(1)) as usize]
    } else {
        &PRIMARY[opcode as usize]
    };
    let next = addr.wrapping_add(entry.length as u16);
    let imm8 = bus.read8(addr.wrapping_add(1));
    let imm16 = bus.read16(addr.wrapping_add(1));

    let template = entry.instr.to_string();
    let text = match entry.instr {
        Instr::Jr | Instr::JrCond(_) => {
            let target = next.wrapping_add(imm8 as i8 as u16);
            template.replace("r8", &format!("${target:04X}"))
        }
        Instr::AddSpImm | Instr::LdHlSpImm => {
            template.replace("r8", &format!("{}", imm8 as i8))
        }
        _ => template
            .replace("d16", &format!("${imm16:04X}"))
            .replace("a16", &format!("${imm16:04X}"))
            .replace("d8", &format!("${imm8:02X}"))
            .replace("a8", &format!("$FF{imm8:02X}")),
    };
    (text, entry.length)
}

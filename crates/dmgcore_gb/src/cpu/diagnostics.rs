use std::fmt;

/// Event surfaced to test tooling when strict mode is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// One of the byte values the hardware never issues was executed
    /// (as a no-op).
    UndocumentedOpcode { opcode: u8, address: u16 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UndocumentedOpcode { opcode, address } => {
                write!(f, "undocumented opcode 0x{opcode:02X} at 0x{address:04X}")
            }
        }
    }
}

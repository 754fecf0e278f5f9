//! Game Boy (DMG) CPU core with the minimal collaborators needed to run it.

pub mod cpu;
pub mod machine;

pub use cpu::Cpu;
pub use machine::GameBoy;

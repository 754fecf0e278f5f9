mod gameboy;
mod memory;
mod video;

pub use gameboy::GameBoy;
pub use memory::{Button, Memory};
pub use video::{LcdMode, VideoTiming};

/// Total addressable memory for the Game Boy (64 KiB).
const MEMORY_SIZE: usize = 0x10000;

/// Size of the cartridge ROM window (0x0000-0x7FFF).
pub const ROM_WINDOW: usize = 0x8000;

/// Clock ticks per LCD frame (154 lines of 456 ticks).
pub const TICKS_PER_FRAME: u64 = 70_224;

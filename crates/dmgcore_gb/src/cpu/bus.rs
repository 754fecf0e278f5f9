/// Address of the interrupt-enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;
/// Address of the interrupt-flag register (IF), i.e. the pending bits.
pub const IF_ADDR: u16 = 0xFF0F;
/// Base of the high I/O window used by `LDH`.
pub const IO_BASE: u16 = 0xFF00;

/// Abstraction over the Game Boy bus (memory and IO).
///
/// The CPU never touches memory directly; every access goes through this
/// trait. Words are little-endian: the low byte lives at `addr` and the
/// high byte at `addr + 1` (wrapping at the top of the address space).
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }

    /// External wake signal for the STOP state.
    ///
    /// On hardware STOP is left when a joypad line goes low. Buses that
    /// model the joypad override this; the default never wakes.
    fn stop_wake(&mut self) -> bool {
        false
    }
}

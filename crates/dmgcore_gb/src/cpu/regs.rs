use bitflags::bitflags;

bitflags! {
    /// Condition bits held in the upper nibble of F.
    ///
    /// Layout (bit index in the byte, from MSB to LSB):
    /// - bit 7: Z (zero)
    /// - bit 6: N (subtract)
    /// - bit 5: H (half carry)
    /// - bit 4: C (carry)
    /// - bits 0–3 are always zero.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const Z = 0x80;
        const N = 0x40;
        const H = 0x20;
        const C = 0x10;
    }
}

/// A 16-bit register pair that can also be addressed as two 8-bit halves.
///
/// The halves are derived with shifts and masks, so the layout does not
/// depend on host endianness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegisterPair(u16);

impl RegisterPair {
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn set(&mut self, value: u16) {
        self.0 = value;
    }

    #[inline]
    pub const fn hi(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn lo(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn set_hi(&mut self, value: u8) {
        self.0 = (self.0 & 0x00FF) | ((value as u16) << 8);
    }

    #[inline]
    pub fn set_lo(&mut self, value: u8) {
        self.0 = (self.0 & 0xFF00) | value as u16;
    }
}

/// Register file of the LR35902.
///
/// `af`, `bc`, `de` and `hl` are full pairs; the 8-bit registers are the
/// halves of those pairs (A = high half of AF, F = low half, and so on).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub af: RegisterPair,
    pub bc: RegisterPair,
    pub de: RegisterPair,
    pub hl: RegisterPair,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    /// Register values left behind by the DMG boot ROM when it hands
    /// control to the cartridge.
    pub const fn post_boot(pc: u16) -> Self {
        Self {
            af: RegisterPair::new(0x01B0),
            bc: RegisterPair::new(0x0013),
            de: RegisterPair::new(0x00D8),
            hl: RegisterPair::new(0x014D),
            sp: 0xFFFE,
            pc,
        }
    }

    #[inline]
    pub fn a(&self) -> u8 {
        self.af.hi()
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.af.set_hi(value);
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.af.lo())
    }

    #[inline]
    pub fn set_flags(&mut self, flags: Flags) {
        self.af.set_lo(flags.bits());
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.bc.hi()
    }

    #[inline]
    pub fn set_b(&mut self, value: u8) {
        self.bc.set_hi(value);
    }

    #[inline]
    pub fn c(&self) -> u8 {
        self.bc.lo()
    }

    #[inline]
    pub fn set_c(&mut self, value: u8) {
        self.bc.set_lo(value);
    }

    #[inline]
    pub fn d(&self) -> u8 {
        self.de.hi()
    }

    #[inline]
    pub fn set_d(&mut self, value: u8) {
        self.de.set_hi(value);
    }

    #[inline]
    pub fn e(&self) -> u8 {
        self.de.lo()
    }

    #[inline]
    pub fn set_e(&mut self, value: u8) {
        self.de.set_lo(value);
    }

    #[inline]
    pub fn h(&self) -> u8 {
        self.hl.hi()
    }

    #[inline]
    pub fn set_h(&mut self, value: u8) {
        self.hl.set_hi(value);
    }

    #[inline]
    pub fn l(&self) -> u8 {
        self.hl.lo()
    }

    #[inline]
    pub fn set_l(&mut self, value: u8) {
        self.hl.set_lo(value);
    }

    #[inline]
    pub fn af(&self) -> u16 {
        self.af.get()
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        // Lower 4 bits of F are always zero.
        self.af.set(value & 0xFFF0);
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        self.bc.get()
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        self.bc.set(value);
    }

    #[inline]
    pub fn de(&self) -> u16 {
        self.de.get()
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        self.de.set(value);
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.hl.get()
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.hl.set(value);
    }
}

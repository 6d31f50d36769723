use std::fmt;

/// A raw 16 bit Chip-8 opcode, stored big-endian in memory.
///
/// Decoding matches on `nibbles()`; the remaining accessors pull out operands.
/// ```text
/// [o x y n]
/// [o _ k k]   kk: 8-bit immediate
/// [o a d r]   addr: 12-bit address
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (self.nibble(3), self.x(), self.y(), self.n())
    }

    fn nibble(self, index: u32) -> u8 {
        (self.0 >> (index * 4) & 0xF) as u8
    }

    /// `[_x__]` register Vx, or the upper end of V0..=Vx
    pub fn x(self) -> u8 {
        self.nibble(2)
    }

    /// `[__y_]` register Vy
    pub fn y(self) -> u8 {
        self.nibble(1)
    }

    /// `[___n]`
    pub fn n(self) -> u8 {
        self.nibble(0)
    }

    /// `[__kk]`
    pub fn kk(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// `[_adr]`
    pub fn addr(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

use std::fmt;

/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, stored big-endian.
/// Their behavior is cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within the 0x0, 0x8 and 0xE categories
/// - `(_, _, n, n)` specific behavior within the 0xF category
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` represent a 12-bit address
/// - `(_, _, n, n)` encodes some data that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` refers to the the register Vy
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Combines two subsequent bytes of memory into an opcode.
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Opcode(u16::from_be_bytes([high, low]))
    }

    /// Returns the Opcode's component nibbles.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (self.kind(), self.x(), self.y(), self.n())
    }

    /// The Opcode's most significant nibble.
    /// `[k___]`
    pub fn kind(self) -> u8 {
        ((self.0 & 0xF000) >> 12) as u8
    }

    /// The Opcode's second nibble.
    /// `[_x__]`
    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    /// The Opcode's third nibble.
    /// `[__y_]`
    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }

    /// The Opcode's fourth nibble.
    /// `[___n]`
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// The Opcode's least significant byte.
    /// `[__kk]`
    pub fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// The Opcode without its most significant nibble.
    /// `[_adr]`
    pub fn addr(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(op: u16) -> Self {
        Opcode(op)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

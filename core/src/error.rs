use std::io;

use thiserror::Error;

/// Everything that can go wrong while loading or running a program.
///
/// Load-time errors leave the previous program in place.
/// Run-time errors raised by an instruction are returned from `Chip8::step` after that
/// instruction has been skipped, so the caller decides whether to halt or keep going. A fetch
/// that runs off the end of memory never gets past the pc, so it repeats on every later step
/// until the machine is reset.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("unable to read ROM: {0}")]
    RomUnreadable(#[from] io::Error),

    #[error("ROM is {size} bytes but at most {max} fit in memory")]
    RomTooLarge { size: usize, max: usize },

    #[error("unknown opcode {opcode:04X} at {addr:04X}")]
    UnknownOpcode { opcode: u16, addr: u16 },

    #[error("call at {addr:04X} overflows the stack")]
    StackOverflow { addr: u16 },

    #[error("return at {addr:04X} with an empty stack")]
    StackUnderflow { addr: u16 },

    #[error("address {addr:#06X} is outside of memory")]
    MemoryOutOfRange { addr: usize },

    #[error("{0:#04X} is not a keypad key")]
    InvalidKey(u8),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;

impl Chip8Error {
    /// Whether the error only reports something odd about the program while the machine ran on
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Chip8Error::UnknownOpcode { .. })
    }
}

use log::error;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_START, MEMORY_SIZE, PIXEL_OFF, PROGRAM_START,
    SPRITE_SHEET, STACK_SIZE,
};
use crate::error::{Chip8Error, Result};
use crate::opcode::Opcode;

/// The FrameBuffer is indexed as [y][x]; every cell is either `PIXEL_ON` or `PIXEL_OFF`
pub type FrameBuffer = [[u32; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Whether the CPU is free to fetch, or parked on an `Fx0A` until some key goes down
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Running,
    WaitingForKey(u8),
}

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack (0..=16)
///
/// Timers
/// - 2 8-bit timers (delay & sound)
///
/// ## Memory
/// - 16 slot stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the sprite sheet
///     - 0x200.. holds the ROM
/// - 32x64 frame buffer
///
/// ## Input
/// - 16 flags tracking the pressed status of keys 0..F
/// - Emulation parks in `Mode::WaitingForKey` until one of them is set
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub pressed_keys: [bool; 16],
    pub mode: Mode,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[PIXEL_OFF; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            pressed_keys: [false; 16],
            mode: Mode::Running,
        }
    }

    /// Borrow `len` bytes of memory starting at `addr`.
    pub fn read(&self, addr: usize, len: usize) -> Result<&[u8]> {
        Self::check_range(addr, len)?;
        Ok(&self.memory[addr..addr + len])
    }

    /// Copy `bytes` into memory starting at `addr`; nothing is written unless all of it fits.
    pub fn write(&mut self, addr: usize, bytes: &[u8]) -> Result<()> {
        Self::check_range(addr, bytes.len())?;
        self.memory[addr..addr + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn check_range(addr: usize, len: usize) -> Result<()> {
        match addr.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(()),
            _ => {
                let addr = addr.max(MEMORY_SIZE);
                error!("memory access at {:#06X} is out of range", addr);
                Err(Chip8Error::MemoryOutOfRange { addr })
            }
        }
    }

    /// The opcode currently pointed at by the pc.
    pub fn fetch(&self) -> Result<Opcode> {
        let bytes = self.read(self.pc as usize, 2)?;
        Ok(Opcode::from_bytes(bytes[0], bytes[1]))
    }

    /// Store a return address; fails if all stack slots are taken.
    pub fn push(&mut self, addr: u16) -> Result<()> {
        if self.sp as usize >= STACK_SIZE {
            error!("stack overflow calling from {:04X}", self.pc);
            return Err(Chip8Error::StackOverflow { addr: self.pc });
        }
        self.stack[self.sp as usize] = addr;
        self.sp += 1;
        Ok(())
    }

    /// Take the most recent return address; fails if the stack is empty.
    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            error!("stack underflow returning from {:04X}", self.pc);
            return Err(Chip8Error::StackUnderflow { addr: self.pc });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Whether a key is down; keys past 0xF don't exist on the keypad.
    pub fn key(&self, key: u8) -> Result<bool> {
        self.pressed_keys
            .get(key as usize)
            .copied()
            .ok_or(Chip8Error::InvalidKey(key))
    }

    /// The lowest numbered key that is down, if any
    pub fn first_pressed_key(&self) -> Option<u8> {
        self.pressed_keys
            .iter()
            .position(|&pressed| pressed)
            .map(|key| key as u8)
    }

    /// Set VF
    pub fn set_flag(&mut self, flag: bool) {
        self.v[0xF] = flag as u8;
    }

    pub fn clear_screen(&mut self) {
        self.frame_buffer = [[PIXEL_OFF; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.draw_flag = true;
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

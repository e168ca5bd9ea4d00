use std::io::Read;

use log::{debug, trace, warn};
use rand::rngs::StdRng;

use crate::constants::{MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START};
use crate::entropy::{self, Entropy};
use crate::error::{Chip8Error, Result};
use crate::instruction::from_op;
use crate::state::{FrameBuffer, Mode, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - an `entropy` source for the random instruction
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU and its timers, together or apart
/// - inspecting its frame buffer for rendering by some display
///
/// The host owns the pacing: it calls `step` as often as it likes and may touch the keypad and
/// read the frame buffer in between calls.
pub struct Chip8<R = StdRng> {
    state: State,
    entropy: R,
}

impl Chip8<StdRng> {
    /// A machine whose random numbers are seeded from the clock
    pub fn new() -> Self {
        Self::with_entropy(entropy::from_time())
    }

    /// A machine whose random numbers are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_entropy(entropy::from_seed(seed))
    }
}

impl Default for Chip8<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Entropy> Chip8<R> {
    pub fn with_entropy(entropy: R) -> Self {
        Chip8 {
            state: State::new(),
            entropy,
        }
    }

    /// Load a rom into memory at 0x200, replacing whatever program was there before
    ///
    /// # Arguments
    /// * `rom` the raw program; at most `MAX_ROM_SIZE` bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..].fill(0);
        self.state.write(start, rom)?;
        debug!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE);
        // Read one byte past the limit so oversized ROMs are caught instead of truncated
        reader
            .take(MAX_ROM_SIZE as u64 + 1)
            .read_to_end(&mut rom)?;
        self.load_rom(&rom)
    }

    /// Advances the CPU by a single instruction and both timers by a single tick.
    ///
    /// Errors are reported after the timers have ticked. An instruction that faults has already
    /// been skipped so calling `step` again carries on with the next one. A fetch past the end of
    /// memory leaves the pc where it is, so every later `step` fails the same way until `reset`.
    pub fn step(&mut self) -> Result<()> {
        let result = self.advance_cpu();
        self.advance_timers();
        result
    }

    /// Advances the CPU by a single cycle
    /// - if awaiting a keypress, checks the keypad and otherwise does nothing
    /// - gets and executes the next opcode
    pub fn advance_cpu(&mut self) -> Result<()> {
        if let Mode::WaitingForKey(register) = self.state.mode {
            if let Some(key) = self.state.first_pressed_key() {
                debug!("key {:X} stored in V{:X}", key, register);
                self.state.v[register as usize] = key;
                self.state.mode = Mode::Running;
            }
            return Ok(());
        }

        let addr = self.state.pc;
        let op = self.state.fetch()?;
        trace!(
            "{} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            addr
        );
        self.state.pc += 0x2;

        match from_op(op) {
            Some(operation) => operation(op, &mut self.state, &mut self.entropy),
            None => {
                warn!("skipping unknown opcode {} at {:04X}", op, addr);
                Err(Chip8Error::UnknownOpcode { opcode: op.0, addr })
            }
        }
    }

    /// Decrements both timers, stopping at 0
    pub fn advance_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Back to the power-on state; the loaded program is cleared too
    pub fn reset(&mut self) {
        self.state = State::new();
    }

    /// The current contents of the display
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn, and marks it as drawn
    pub fn get_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad key, 0x0..=0xF
    /// * `pressed` whether it is held down
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<()> {
        let slot = self
            .state
            .pressed_keys
            .get_mut(key as usize)
            .ok_or(Chip8Error::InvalidKey(key))?;
        *slot = pressed;
        Ok(())
    }

    /// Replace the pressed status of every key at once
    pub fn set_keys(&mut self, keys: [bool; 16]) {
        self.state.pressed_keys = keys;
    }

    pub fn key_press(&mut self, key: u8) -> Result<()> {
        self.set_key(key, true)
    }

    pub fn key_release(&mut self, key: u8) -> Result<()> {
        self.set_key(key, false)
    }

    /// Whether the buzzer should be sounding
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.state.v
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn program_counter(&self) -> u16 {
        self.state.pc
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn memory(&self) -> &[u8; MEMORY_SIZE] {
        &self.state.memory
    }

    /// The whole machine state, for debuggers and tests
    pub fn state(&self) -> &State {
        &self.state
    }
}

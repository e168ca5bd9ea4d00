use log::debug;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE, FONT_START, PIXEL_ON};
use crate::entropy::Entropy;
use crate::error::Result;
use crate::opcode::Opcode;
use crate::state::{Mode, State};

// Every operation runs after the pc has been bumped past its own opcode,
// so a skip is one more bump.

/// clear
pub fn clr(_op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.clear_screen();
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.pc = state.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.pc = op.addr();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.push(state.pc)?;
    state.pc = op.addr();
    Ok(())
}

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc += 0x2;
    }
}

/// if Vx == kk then pc += 2
pub fn ske(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let condition = state.v[op.x() as usize] == op.kk();
    skip_if(state, condition);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let condition = state.v[op.x() as usize] != op.kk();
    skip_if(state, condition);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let condition = state.v[op.x() as usize] == state.v[op.y() as usize];
    skip_if(state, condition);
    Ok(())
}

/// Vx = kk
pub fn load(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.v[op.x() as usize] = op.kk();
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it, VF is untouched
pub fn add(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let x = op.x() as usize;
    state.v[x] = state.v[x].wrapping_add(op.kk());
    Ok(())
}

/// Vx = Vy
pub fn mv(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.v[op.x() as usize] = state.v[op.y() as usize];
    Ok(())
}

/// Vx |= Vy
pub fn or(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.v[op.x() as usize] |= state.v[op.y() as usize];
    Ok(())
}

/// Vx &= Vy
pub fn and(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.v[op.x() as usize] &= state.v[op.y() as usize];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.v[op.x() as usize] ^= state.v[op.y() as usize];
    Ok(())
}

/// Writes the flag before the result so that an operation targeting VF keeps its result
fn flag_then_store(state: &mut State, x: usize, flag: bool, result: u8) {
    state.set_flag(flag);
    state.v[x] = result;
}

/// Vx += Vy; VF = carry
pub fn addr(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let x = op.x() as usize;
    let (res, carry) = state.v[x].overflowing_add(state.v[op.y() as usize]);
    flag_then_store(state, x, carry, res);
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let x = op.x() as usize;
    let (vx, vy) = (state.v[x], state.v[op.y() as usize]);
    flag_then_store(state, x, vx > vy, vx.wrapping_sub(vy));
    Ok(())
}

/// Vx >>= 1; VF = lsb
pub fn shr(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let x = op.x() as usize;
    let vx = state.v[x];
    flag_then_store(state, x, vx & 0x1 == 0x1, vx >> 1);
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let x = op.x() as usize;
    let (vx, vy) = (state.v[x], state.v[op.y() as usize]);
    flag_then_store(state, x, vy > vx, vy.wrapping_sub(vx));
    Ok(())
}

/// Vx <<= 1; VF = msb
pub fn shl(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let x = op.x() as usize;
    let vx = state.v[x];
    flag_then_store(state, x, vx & 0x80 == 0x80, vx << 1);
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let condition = state.v[op.x() as usize] != state.v[op.y() as usize];
    skip_if(state, condition);
    Ok(())
}

/// I = addr
pub fn loadi(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.i = op.addr();
    Ok(())
}

/// PC = V0 + addr
/// Always V0, never Vx
pub fn jumpi(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.pc = u16::from(state.v[0x0]) + op.addr();
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(op: Opcode, state: &mut State, entropy: &mut dyn Entropy) -> Result<()> {
    state.v[op.x() as usize] = entropy.next_byte() & op.kk();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer.
/// The start position wraps onto the screen and so does every pixel drawn from it.
/// Sets VF if any lit pixel is erased
pub fn draw(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let mut sprite = [0u8; 0xF];
    let rows = op.n() as usize;
    sprite[..rows].copy_from_slice(state.read(state.i as usize, rows)?);

    let origin_x = state.v[op.x() as usize] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[op.y() as usize] as usize % DISPLAY_HEIGHT;
    let mut collision = false;

    for (row, byte) in sprite[..rows].iter().enumerate() {
        let y = (origin_y + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            if byte & (0x80 >> bit) == 0 {
                continue;
            }
            let x = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel = &mut state.frame_buffer[y][x];
            collision |= *pixel == PIXEL_ON;
            *pixel ^= PIXEL_ON;
        }
    }

    state.set_flag(collision);
    state.draw_flag = true;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let pressed = state.key(state.v[op.x() as usize])?;
    skip_if(state, pressed);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let pressed = state.key(state.v[op.x() as usize])?;
    skip_if(state, !pressed);
    Ok(())
}

/// Vx = DT
pub fn moved(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.v[op.x() as usize] = state.delay_timer;
    Ok(())
}

/// await keypress for Vx
/// Takes the lowest pressed key straight away if there is one, otherwise parks the CPU
pub fn keyd(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    match state.first_pressed_key() {
        Some(key) => state.v[op.x() as usize] = key,
        None => {
            debug!("waiting for a key to store in V{:X}", op.x());
            state.mode = Mode::WaitingForKey(op.x());
        }
    }
    Ok(())
}

/// DT = Vx
pub fn loads(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.delay_timer = state.v[op.x() as usize];
    Ok(())
}

/// ST = Vx
pub fn ld(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.sound_timer = state.v[op.x() as usize];
    Ok(())
}

/// I += Vx
pub fn addi(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x() as usize]));
    Ok(())
}

/// I = FONT_START + Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    state.i = FONT_START + u16::from(state.v[op.x() as usize]) * FONT_GLYPH_SIZE;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let vx = state.v[op.x() as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state.write(state.i as usize, &digits)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let registers = state.v;
    state.write(state.i as usize, &registers[..=op.x() as usize])
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: Opcode, state: &mut State, _entropy: &mut dyn Entropy) -> Result<()> {
    let count = op.x() as usize + 1;
    let mut loaded = [0u8; 16];
    loaded[..count].copy_from_slice(state.read(state.i as usize, count)?);
    state.v[..count].copy_from_slice(&loaded[..count]);
    Ok(())
}

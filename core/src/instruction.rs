use crate::entropy::Entropy;
use crate::error::Result;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// Executes a single decoded instruction against the machine state
pub type Operation = fn(op: Opcode, state: &mut State, entropy: &mut dyn Entropy) -> Result<()>;

/// Selects the correct Operation for a given Opcode
///
/// The most significant nibble picks the category. Categories 0x0, 0x8 and 0xE are then narrowed
/// by their least significant nibble and 0xF by its least significant byte; every other category
/// holds a single operation. Returns `None` for anything that doesn't name an operation.
pub fn from_op(op: Opcode) -> Option<Operation> {
    let operation: Operation = match op.kind() {
        0x0 => match op.n() {
            0x0 => clr,
            0xE => rts,
            _ => return None,
        },
        0x1 => jump,
        0x2 => call,
        0x3 => ske,
        0x4 => skne,
        0x5 => skre,
        0x6 => load,
        0x7 => add,
        0x8 => match op.n() {
            0x0 => mv,
            0x1 => or,
            0x2 => and,
            0x3 => xor,
            0x4 => addr,
            0x5 => sub,
            0x6 => shr,
            0x7 => subn,
            0xE => shl,
            _ => return None,
        },
        0x9 => skrne,
        0xA => loadi,
        0xB => jumpi,
        0xC => rand,
        0xD => draw,
        0xE => match op.n() {
            0xE => skpr,
            0x1 => skup,
            _ => return None,
        },
        0xF => match op.kk() {
            0x07 => moved,
            0x0A => keyd,
            0x15 => loads,
            0x18 => ld,
            0x1E => addi,
            0x29 => ldspr,
            0x33 => bcd,
            0x55 => stor,
            0x65 => read,
            _ => return None,
        },
        _ => unreachable!("an opcode's top nibble is at most 0xF"),
    };
    Some(operation)
}

pub use chip8::Chip8;
pub use entropy::Entropy;
pub use error::{Chip8Error, Result};
pub use state::{FrameBuffer, Mode};

mod chip8;
pub mod constants;
pub mod entropy;
mod error;
mod instruction;
pub mod opcode;
mod operations;
pub mod state;

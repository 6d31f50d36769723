pub use chip8::{Chip8, Cycle};
pub use error::{Chip8Error, Result};
pub use framebuffer::FrameBuffer;
pub use instruction::Instruction;
pub use keypad::{Keypad, Keys};
pub use memory::Memory;
pub use scheduler::{Report, Scheduler};
pub use state::State;

mod chip8;
pub mod constants;
mod error;
mod framebuffer;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod scheduler;
mod state;

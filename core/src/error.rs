use std::io;

use thiserror::Error;

/// Every failure the interpreter can report.
///
/// None of these are recoverable: once one is returned the machine is halted and
/// the run should be torn down.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("memory access out of bounds at {address:#06X}")]
    OutOfBounds { address: usize },

    #[error("unknown opcode {opcode:#06X} at {pc:#06X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("stack overflow: call at {pc:#06X} with a full call stack")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#06X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("ROM is {size} bytes but at most {max} fit in memory")]
    RomTooLarge { size: usize, max: usize },

    #[error("unable to read ROM")]
    RomRead(#[from] io::Error),

    #[error("interpreter halted after a fatal error")]
    Halted,
}

pub type Result<T> = std::result::Result<T, Chip8Error>;

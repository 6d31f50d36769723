use crate::constants::{PROGRAM_START, STACK_DEPTH};
use crate::framebuffer::FrameBuffer;
use crate::memory::Memory;

/// Everything a running Chip8 program can observe or change.
///
/// - `v`: V0..VE are general purpose; VF doubles as the carry, borrow and
///   collision flag
/// - `i`: the index register; only its low 12 bits reach memory
/// - `pc`: address of the next opcode, starting at `PROGRAM_START`
/// - `sp`: how many `stack` entries hold return addresses
/// - `delay_timer` / `sound_timer`: count down to 0 at 60Hz; a tone sounds
///   while `sound_timer` is non-zero
/// - `awaiting_key`: set by Fx0A to the register the next key press lands in;
///   no opcodes run until it clears
#[derive(Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub awaiting_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            awaiting_key: None,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

use std::time::Duration;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// 4K of addressable memory, 0x000..=0xFFF
pub const MEMORY_SIZE: usize = 4096;
pub const MAX_ADDRESS: u16 = (MEMORY_SIZE - 1) as u16;

/// ROMs are loaded (and execution starts) here
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const STACK_DEPTH: usize = 16;

/// VF doubles as the carry, borrow and collision flag
pub const FLAG: usize = 0xF;

pub const TIMER_FREQUENCY: u32 = 60;
pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 700;

/// Upper bound on how much elapsed time a single scheduler advance will replay
pub const MAX_CATCH_UP: Duration = Duration::from_millis(250);

/// Address of the first glyph of the sprite sheet
pub const FONT_BASE: u16 = 0x000;
pub const GLYPH_HEIGHT: u16 = 5;

/// # Sprite Sheet
/// Hexadecimal digits 0..F, each 8 pixels wide and 5 tall.
///
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

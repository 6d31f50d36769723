use std::ops::Range;

use crate::constants::{FONT_BASE, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Chip8Error, Result};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - `0x000..0x050` the sprite sheet
/// - `0x200..0x1000` the loaded ROM followed by free space
///
/// Every access is bounds checked; nothing outside `0x000..=0xFFF` is readable or
/// writable and a failed multi-byte access leaves memory untouched.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet installed.
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let font = FONT_BASE as usize;
        bytes[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    pub fn read(&self, address: u16) -> Result<u8> {
        self.bytes
            .get(address as usize)
            .copied()
            .ok_or(Chip8Error::OutOfBounds {
                address: address as usize,
            })
    }

    pub fn write(&mut self, address: u16, value: u8) -> Result<()> {
        let cell = self
            .bytes
            .get_mut(address as usize)
            .ok_or(Chip8Error::OutOfBounds {
                address: address as usize,
            })?;
        *cell = value;
        Ok(())
    }

    /// Reads `len` bytes starting at `address`.
    pub fn slice(&self, address: u16, len: usize) -> Result<&[u8]> {
        let range = Self::range(address, len)?;
        Ok(&self.bytes[range])
    }

    /// Mutable view of `len` bytes starting at `address`.
    pub fn slice_mut(&mut self, address: u16, len: usize) -> Result<&mut [u8]> {
        let range = Self::range(address, len)?;
        Ok(&mut self.bytes[range])
    }

    /// Gets the big-endian word at `address`.
    ///
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch_word(&self, address: u16) -> Result<u16> {
        let word = self.slice(address, 2)?;
        Ok(u16::from_be_bytes([word[0], word[1]]))
    }

    /// Copies a ROM into memory at `PROGRAM_START`.
    ///
    /// ROMs that don't fit are rejected outright rather than truncated.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        self.slice_mut(PROGRAM_START, rom.len())?
            .copy_from_slice(rom);
        Ok(())
    }

    fn range(address: u16, len: usize) -> Result<Range<usize>> {
        let start = address as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            // report the first address that doesn't exist
            return Err(Chip8Error::OutOfBounds {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

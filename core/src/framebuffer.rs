use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # FrameBuffer
/// The 64x32 monochrome display, one cell per pixel holding 0 (off) or 1 (on).
///
/// Cells are indexed as `[y][x]`. The contents only change through `clear` and
/// `blit`, and persist between cycles.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    cells: [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            cells: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// The pixel at (x, y); coordinates past the edge wrap.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.cells[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH] = value & 0x1;
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8; DISPLAY_WIDTH]> {
        self.cells.iter()
    }

    /// XORs an 8 pixel wide sprite onto the display with its top left corner at (x, y).
    ///
    /// Each byte of `sprite` is one row, most significant bit leftmost. Pixels that
    /// fall off the right or bottom edge wrap around to the opposite side.
    ///
    /// Returns whether any lit pixel was switched off.
    pub fn blit(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (y as usize + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                let px = (x as usize + bit) % DISPLAY_WIDTH;
                let pixel = (byte >> (7 - bit)) & 0x1;
                let cell = &mut self.cells[py][px];
                if pixel & *cell == 1 {
                    collision = true;
                }
                *cell ^= pixel;
            }
        }
        collision
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

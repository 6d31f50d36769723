use sdl2::pixels::PixelFormatEnum;

use chipvm_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chipvm_core::FrameBuffer;

const BYTES_PER_PIXEL: usize = 3;

/// # Display
/// An sdl2 window showing a FrameBuffer as white-on-black pixels, each one
/// `scale` screen pixels wide.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Opens a centered, vsynced window sized for the 64x32 screen.
    pub fn new(sdl: &sdl2::Sdl, title: &str, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                title,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let mut canvas = window
            .into_canvas()
            .present_vsync()
            .build()
            .map_err(|e| e.to_string())?;
        canvas.clear();
        canvas.present();

        Ok(Display { canvas })
    }

    /// Expands a FrameBuffer into RGB24 bytes, row after row.
    ///
    /// Each cell becomes three equal channel bytes: 0 when off, 255 when on.
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .rows()
            .flat_map(|row| row.iter())
            .flat_map(|pixel| std::iter::repeat(pixel * 255).take(BYTES_PER_PIXEL))
            .collect()
    }

    /// Uploads `frame` to a streaming texture stretched over the whole window.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame);
        // rows may be padded, so copy them one at a time
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            let row_len = DISPLAY_WIDTH * BYTES_PER_PIXEL;
            for (y, row) in pixels.chunks(row_len).enumerate() {
                buffer[y * pitch..y * pitch + row_len].copy_from_slice(row);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

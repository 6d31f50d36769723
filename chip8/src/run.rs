use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chipvm_core::{Chip8, Keys, Scheduler};
use display::Display;

use crate::audio::Beeper;
use crate::keymap::keymap;

/// How long the event loop rests between iterations
const IDLE: Duration = Duration::from_millis(1);

pub struct Options<'a> {
    pub rom: &'a Path,
    pub instructions_per_second: u32,
    pub scale: u32,
    pub mute: bool,
}

pub fn run(options: &Options) -> anyhow::Result<()> {
    let mut chip8: Chip8 = Chip8::new();

    // Load ROM before touching any devices so a bad ROM fails fast
    let file = File::open(options.rom)
        .with_context(|| format!("unable to open {}", options.rom.display()))?;
    chip8
        .load_rom(&mut BufReader::new(file))
        .with_context(|| format!("unable to load {}", options.rom.display()))?;

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, "chipvm", options.scale).map_err(|e| anyhow!(e))?;
    let mut beeper = if options.mute {
        None
    } else {
        Some(Beeper::new(&sdl).map_err(|e| anyhow!(e))?)
    };
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    let mut keys = Keys::new();
    let mut scheduler = Scheduler::new(options.instructions_per_second);
    info!(
        "running {} at {} instructions per second",
        options.rom.display(),
        options.instructions_per_second
    );

    let mut last_cycle: Instant = Instant::now();
    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        keys.press(kc)
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        keys.release(kc)
                    }
                }
                _ => continue,
            };
        }

        // Update state
        let current_time = Instant::now();
        scheduler
            .advance(&mut chip8, &keys, current_time - last_cycle)
            .context("interpreter halted")?;
        last_cycle = current_time;

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(frame).map_err(|e| anyhow!(e))?;
        }
        if let Some(beeper) = beeper.as_mut() {
            beeper.set_active(chip8.sound_active());
        }

        std::thread::sleep(IDLE);
    }

    info!("quitting");
    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use chipvm_core::constants::DEFAULT_INSTRUCTIONS_PER_SECOND;

mod audio;
mod keymap;
mod run;

/// Runs a CHIP-8 ROM.
///
/// Keypad keys are mapped to the left hand side of a QWERTY keyboard
/// (1234 / QWER / ASDF / ZXCV). Escape quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(short, long, default_value_t = DEFAULT_INSTRUCTIONS_PER_SECOND)]
    ips: u32,

    /// Size of each CHIP-8 pixel on screen
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Don't play the sound timer's tone
    #[arg(short, long)]
    mute: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    run::run(&run::Options {
        rom: &args.rom,
        instructions_per_second: args.ips,
        scale: args.scale,
        mute: args.mute,
    })
}

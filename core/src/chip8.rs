use std::io::Read;

use log::{debug, error, info, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::{Chip8Error, Result};
use crate::framebuffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::operations::{execute, Flow};
use crate::state::State;

/// What a single call to `advance_cpu` did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cycle {
    /// An instruction ran.
    Executed(Instruction),
    /// Still waiting on Fx0A; no key was held.
    AwaitingKey,
    /// A held key satisfied a pending Fx0A.
    KeyReceived(u8),
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - whether the frame buffer changed since it was last handed out
///  - the random source for Cxkk
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the CPU by one instruction
/// - advancing its timers by one 60Hz tick
/// - inspecting its frame buffer for rendering by some display
/// - inspecting its sound timer for some audio device
///
/// After any error the machine is halted and every later `advance_cpu` fails.
pub struct Chip8 {
    state: State,
    draw_flag: bool,
    halted: bool,
    rng: Box<dyn RngCore>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(Box::new(StdRng::from_entropy()))
    }

    /// A Chip8 drawing Cxkk's random bytes from `rng`.
    pub fn with_rng(rng: Box<dyn RngCore>) -> Self {
        Chip8 {
            state: State::new(),
            draw_flag: false,
            halted: false,
            rng,
        }
    }

    /// Load a rom from a source file
    ///
    /// The whole ROM is read and size checked before anything is copied, so a
    /// failed load leaves memory as it was.
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_rom_bytes(&rom)
    }

    pub fn load_rom_bytes(&mut self, rom: &[u8]) -> Result<()> {
        self.state.memory.load_rom(rom)?;
        info!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Advances the CPU by a single cycle
    /// - if awaiting a keypress, polls `keypad` once and resumes if a key is held
    /// - otherwise gets and executes the next opcode
    pub fn advance_cpu(&mut self, keypad: &dyn Keypad) -> Result<Cycle> {
        if self.halted {
            return Err(Chip8Error::Halted);
        }
        let result = self.cycle(keypad);
        if let Err(ref e) = result {
            error!("halting: {}", e);
            self.halted = true;
        }
        result
    }

    fn cycle(&mut self, keypad: &dyn Keypad) -> Result<Cycle> {
        if let Some(register) = self.state.awaiting_key {
            return Ok(match keypad.first_held() {
                Some(key) => {
                    debug!("key {:X} received into V{:X}", key, register);
                    self.state.v[register as usize] = key;
                    self.state.awaiting_key = None;
                    self.state.pc = self.state.pc.wrapping_add(2);
                    Cycle::KeyReceived(key)
                }
                None => Cycle::AwaitingKey,
            });
        }

        let pc = self.state.pc;
        let op = self.state.memory.fetch_word(pc)?;
        let instruction = Instruction::decode(op, pc)?;
        trace!("{:04X} {} {}", pc, Opcode(op), instruction);

        let flow = execute(instruction, &mut self.state, keypad, self.rng.as_mut())?;
        if flow == Flow::Wait {
            debug!("V{:X} awaiting key at {:04X}", Opcode(op).x(), pc);
        }
        self.state.pc = flow.next_pc(pc);
        if instruction.redraws() {
            self.draw_flag = true;
        }
        Ok(Cycle::Executed(instruction))
    }

    /// Decrements both timers towards 0; called at 60Hz.
    pub fn advance_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Returns the FrameBuffer if the display should be redrawn, unsetting the draw flag
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.draw_flag {
            self.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// Whether a tone should currently be audible.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.state.awaiting_key.is_some()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_ROM_SIZE;
    use crate::keypad::Keys;

    fn chip8_with(rom: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_rng(Box::new(StdRng::seed_from_u64(0)));
        chip8.load_rom_bytes(rom).unwrap();
        chip8
    }

    #[test]
    fn test_starts_at_program_start() {
        let chip8 = Chip8::new();
        assert_eq!(chip8.state().pc, 0x200);
        assert_eq!(chip8.state().sp, 0);
        assert_eq!(chip8.state().v, [0; 16]);
    }

    #[test]
    fn test_load_rom_from_reader() {
        let mut chip8 = Chip8::new();
        let mut rom: &[u8] = &[0x00, 0xE0, 0x12, 0x00];
        chip8.load_rom(&mut rom).unwrap();
        assert_eq!(chip8.state().memory.fetch_word(0x202).unwrap(), 0x1200);
    }

    #[test]
    fn test_load_rom_rejects_oversized_rom() {
        let mut chip8 = Chip8::new();
        let rom = vec![0x12; MAX_ROM_SIZE + 1];
        let result = chip8.load_rom(&mut rom.as_slice());
        assert!(matches!(result, Err(Chip8Error::RomTooLarge { .. })));
        assert_eq!(chip8.state().memory.read(0x200).unwrap(), 0x00);
    }

    #[test]
    fn test_cycles_while_no_register_needs_key() {
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        let cycle = chip8.advance_cpu(&Keys::new()).unwrap();
        assert_eq!(cycle, Cycle::Executed(Instruction::Clear));
        assert_eq!(chip8.state().pc, 0x202);
    }

    #[test]
    fn test_draw_flag_handoff() {
        // LD V0, 0x00; DRW V0, V0, 5
        let mut chip8 = chip8_with(&[0x60, 0x00, 0xD0, 0x05]);
        let keys = Keys::new();
        chip8.advance_cpu(&keys).unwrap();
        assert!(chip8.take_frame().is_none());
        chip8.advance_cpu(&keys).unwrap();
        let frame = chip8.take_frame().unwrap();
        assert_eq!(frame.get(0, 0), 1);
        assert!(chip8.take_frame().is_none());
    }

    #[test]
    fn test_doesnt_cycle_while_register_needs_key() {
        // LD V1, K
        let mut chip8 = chip8_with(&[0xF1, 0x0A, 0x00, 0xE0]);
        let keys = Keys::new();
        chip8.advance_cpu(&keys).unwrap();
        assert!(chip8.is_awaiting_key());
        for _ in 0..10 {
            assert_eq!(chip8.advance_cpu(&keys).unwrap(), Cycle::AwaitingKey);
        }
        assert_eq!(chip8.state().pc, 0x200);
    }

    #[test]
    fn test_captures_key_presses() {
        let mut chip8 = chip8_with(&[0xF1, 0x0A, 0x00, 0xE0]);
        let mut keys = Keys::new();
        chip8.advance_cpu(&keys).unwrap();
        keys.press(0xE);
        assert_eq!(chip8.advance_cpu(&keys).unwrap(), Cycle::KeyReceived(0xE));
        assert!(!chip8.is_awaiting_key());
        assert_eq!(chip8.state().v[0x1], 0xE);
        assert_eq!(chip8.state().pc, 0x202);
        assert_eq!(
            chip8.advance_cpu(&keys).unwrap(),
            Cycle::Executed(Instruction::Clear)
        );
    }

    #[test]
    fn test_timers_decay_to_zero() {
        let mut chip8 = Chip8::new();
        chip8.state_mut().delay_timer = 5;
        chip8.state_mut().sound_timer = 2;
        assert!(chip8.sound_active());
        for _ in 0..5 {
            chip8.advance_timers();
        }
        assert_eq!(chip8.state().delay_timer, 0);
        assert_eq!(chip8.sound_timer(), 0);
        assert!(!chip8.sound_active());
        chip8.advance_timers();
        assert_eq!(chip8.state().delay_timer, 0);
    }

    #[test]
    fn test_unknown_opcode_halts() {
        let mut chip8 = chip8_with(&[0xFF, 0xFF]);
        let keys = Keys::new();
        assert!(matches!(
            chip8.advance_cpu(&keys),
            Err(Chip8Error::UnknownOpcode { opcode: 0xFFFF, pc: 0x200 })
        ));
        assert!(chip8.is_halted());
        assert!(matches!(chip8.advance_cpu(&keys), Err(Chip8Error::Halted)));
    }

    #[test]
    fn test_fetch_past_end_of_memory() {
        // JP 0xFFF
        let mut chip8 = chip8_with(&[0x1F, 0xFF]);
        let keys = Keys::new();
        chip8.advance_cpu(&keys).unwrap();
        assert!(matches!(
            chip8.advance_cpu(&keys),
            Err(Chip8Error::OutOfBounds { address: 0x1000 })
        ));
    }
}

use rand::{Rng, RngCore};

use crate::constants::{FLAG, FONT_BASE, GLYPH_HEIGHT, MAX_ADDRESS, STACK_DEPTH};
use crate::error::{Chip8Error, Result};
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::state::State;

/// Where the program counter goes once an instruction has executed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// pc += 2
    Next,
    /// pc += 4
    Skip,
    /// pc = addr
    Jump(u16),
    /// pc stays put until a key is pressed
    Wait,
}

impl Flow {
    pub fn next_pc(self, pc: u16) -> u16 {
        match self {
            Flow::Next => pc.wrapping_add(2),
            Flow::Skip => pc.wrapping_add(4),
            Flow::Jump(addr) => addr,
            Flow::Wait => pc,
        }
    }

    fn skip_if(condition: bool) -> Self {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

/// Runs a single instruction against `state`.
///
/// The program counter is left alone; the returned `Flow` says how to move it.
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    keypad: &dyn Keypad,
    rng: &mut dyn RngCore,
) -> Result<Flow> {
    use Instruction::*;

    match instruction {
        Clear => Ok(clr(state)),
        Return => rts(state),
        Jump(addr) => Ok(Flow::Jump(addr)),
        Call(addr) => call(state, addr),
        SkipEqual(x, kk) => Ok(Flow::skip_if(state.v[x as usize] == kk)),
        SkipNotEqual(x, kk) => Ok(Flow::skip_if(state.v[x as usize] != kk)),
        SkipRegistersEqual(x, y) => Ok(Flow::skip_if(state.v[x as usize] == state.v[y as usize])),
        Load(x, kk) => Ok(load(state, x, kk)),
        Add(x, kk) => Ok(add(state, x, kk)),
        Move(x, y) => Ok(mv(state, x, y)),
        Or(x, y) => Ok(or(state, x, y)),
        And(x, y) => Ok(and(state, x, y)),
        Xor(x, y) => Ok(xor(state, x, y)),
        AddRegisters(x, y) => Ok(addr(state, x, y)),
        Sub(x, y) => Ok(sub(state, x, y)),
        ShiftRight(x) => Ok(shr(state, x)),
        SubNegated(x, y) => Ok(subn(state, x, y)),
        ShiftLeft(x) => Ok(shl(state, x)),
        SkipRegistersNotEqual(x, y) => {
            Ok(Flow::skip_if(state.v[x as usize] != state.v[y as usize]))
        }
        LoadIndex(addr) => Ok(loadi(state, addr)),
        JumpOffset(addr) => Ok(Flow::Jump(u16::from(state.v[0x0]) + addr)),
        Random(x, kk) => Ok(rnd(state, rng, x, kk)),
        Draw(x, y, n) => draw(state, x, y, n),
        SkipPressed(x) => Ok(Flow::skip_if(keypad.is_key_held(state.v[x as usize]))),
        SkipNotPressed(x) => Ok(Flow::skip_if(!keypad.is_key_held(state.v[x as usize]))),
        LoadDelay(x) => Ok(moved(state, x)),
        AwaitKey(x) => Ok(keyd(state, x)),
        SetDelay(x) => Ok(loads(state, x)),
        SetSound(x) => Ok(ld(state, x)),
        AddIndex(x) => Ok(addi(state, x)),
        LoadGlyph(x) => Ok(ldspr(state, x)),
        Bcd(x) => bcd(state, x),
        Store(x) => stor(state, x),
        Read(x) => read(state, x),
    }
}

/// The address I points at; bits above the 12th are ignored.
fn index(state: &State) -> u16 {
    state.i & MAX_ADDRESS
}

/// clear
fn clr(state: &mut State) -> Flow {
    state.frame_buffer.clear();
    Flow::Next
}

/// PC = STACK.pop()
/// The stored address already points past the call.
fn rts(state: &mut State) -> Result<Flow> {
    if state.sp == 0 {
        return Err(Chip8Error::StackUnderflow { pc: state.pc });
    }
    state.sp -= 1;
    Ok(Flow::Jump(state.stack[state.sp as usize]))
}

/// STACK.push(PC + 2); PC = addr
fn call(state: &mut State, addr: u16) -> Result<Flow> {
    if state.sp as usize >= STACK_DEPTH {
        return Err(Chip8Error::StackOverflow { pc: state.pc });
    }
    state.stack[state.sp as usize] = state.pc.wrapping_add(2);
    state.sp += 1;
    Ok(Flow::Jump(addr))
}

/// Vx = kk
fn load(state: &mut State, x: u8, kk: u8) -> Flow {
    state.v[x as usize] = kk;
    Flow::Next
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
fn add(state: &mut State, x: u8, kk: u8) -> Flow {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
    Flow::Next
}

/// Vx = Vy
fn mv(state: &mut State, x: u8, y: u8) -> Flow {
    state.v[x as usize] = state.v[y as usize];
    Flow::Next
}

/// Vx |= Vy
fn or(state: &mut State, x: u8, y: u8) -> Flow {
    state.v[x as usize] |= state.v[y as usize];
    Flow::Next
}

/// Vx &= Vy
fn and(state: &mut State, x: u8, y: u8) -> Flow {
    state.v[x as usize] &= state.v[y as usize];
    Flow::Next
}

/// Vx ^= Vy
fn xor(state: &mut State, x: u8, y: u8) -> Flow {
    state.v[x as usize] ^= state.v[y as usize];
    Flow::Next
}

// The flag setting ALU operations write VF before Vx, so when x is F the result
// replaces the flag.

/// VF = carry; Vx += Vy
fn addr(state: &mut State, x: u8, y: u8) -> Flow {
    let (x, y) = (x as usize, y as usize);
    let (_, carry) = state.v[x].overflowing_add(state.v[y]);
    state.v[FLAG] = carry as u8;
    state.v[x] = state.v[x].wrapping_add(state.v[y]);
    Flow::Next
}

/// VF = Vx > Vy; Vx -= Vy
fn sub(state: &mut State, x: u8, y: u8) -> Flow {
    let (x, y) = (x as usize, y as usize);
    state.v[FLAG] = (state.v[x] > state.v[y]) as u8;
    state.v[x] = state.v[x].wrapping_sub(state.v[y]);
    Flow::Next
}

/// VF = lsb; Vx >>= 1
fn shr(state: &mut State, x: u8) -> Flow {
    let x = x as usize;
    state.v[FLAG] = state.v[x] & 0x1;
    state.v[x] >>= 1;
    Flow::Next
}

/// VF = Vy > Vx; Vx = Vy - Vx
fn subn(state: &mut State, x: u8, y: u8) -> Flow {
    let (x, y) = (x as usize, y as usize);
    state.v[FLAG] = (state.v[y] > state.v[x]) as u8;
    state.v[x] = state.v[y].wrapping_sub(state.v[x]);
    Flow::Next
}

/// VF = msb; Vx <<= 1
fn shl(state: &mut State, x: u8) -> Flow {
    let x = x as usize;
    state.v[FLAG] = (state.v[x] >> 7) & 0x1;
    state.v[x] <<= 1;
    Flow::Next
}

/// I = addr
fn loadi(state: &mut State, addr: u16) -> Flow {
    state.i = addr;
    Flow::Next
}

/// Vx = rand_byte & kk
fn rnd(state: &mut State, rng: &mut dyn RngCore, x: u8, kk: u8) -> Flow {
    let rand_byte: u8 = rng.gen();
    state.v[x as usize] = rand_byte & kk;
    Flow::Next
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer.
/// Sets VF if any pixels were erased
fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<Flow> {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    let sprite = state.memory.slice(index(state), n as usize)?;
    let collision = state.frame_buffer.blit(vx, vy, sprite);
    state.v[FLAG] = collision as u8;
    Ok(Flow::Next)
}

/// Vx = DT
fn moved(state: &mut State, x: u8) -> Flow {
    state.v[x as usize] = state.delay_timer;
    Flow::Next
}

/// await keypress for Vx
fn keyd(state: &mut State, x: u8) -> Flow {
    state.awaiting_key = Some(x);
    Flow::Wait
}

/// DT = Vx
fn loads(state: &mut State, x: u8) -> Flow {
    state.delay_timer = state.v[x as usize];
    Flow::Next
}

/// ST = Vx
fn ld(state: &mut State, x: u8) -> Flow {
    state.sound_timer = state.v[x as usize];
    Flow::Next
}

/// VF = I + Vx overflows 12 bits; I += Vx
fn addi(state: &mut State, x: u8) -> Flow {
    let x = x as usize;
    let end = u32::from(state.i) + u32::from(state.v[x]);
    state.v[FLAG] = (end > u32::from(MAX_ADDRESS)) as u8;
    state.i = state.i.wrapping_add(u16::from(state.v[x]));
    Flow::Next
}

/// I = FONT_BASE + Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
fn ldspr(state: &mut State, x: u8) -> Flow {
    state.i = FONT_BASE + u16::from(state.v[x as usize]) * GLYPH_HEIGHT;
    Flow::Next
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
fn bcd(state: &mut State, x: u8) -> Result<Flow> {
    let value = state.v[x as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    let address = index(state);
    state.memory.slice_mut(address, 3)?.copy_from_slice(&digits);
    Ok(Flow::Next)
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, x: u8) -> Result<Flow> {
    let len = x as usize + 1;
    let address = index(state);
    state
        .memory
        .slice_mut(address, len)?
        .copy_from_slice(&state.v[..len]);
    Ok(Flow::Next)
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: u8) -> Result<Flow> {
    let len = x as usize + 1;
    let bytes = state.memory.slice(index(state), len)?;
    state.v[..len].copy_from_slice(bytes);
    Ok(Flow::Next)
}

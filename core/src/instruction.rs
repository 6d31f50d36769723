use std::fmt;

use crate::error::{Chip8Error, Result};
use crate::opcode::Opcode;

/// A decoded opcode.
///
/// Register operands are register indices (`x`, `y`), not their values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SkipEqual(u8, u8),
    /// 4xkk
    SkipNotEqual(u8, u8),
    /// 5xy0
    SkipRegistersEqual(u8, u8),
    /// 6xkk
    Load(u8, u8),
    /// 7xkk
    Add(u8, u8),
    /// 8xy0
    Move(u8, u8),
    /// 8xy1
    Or(u8, u8),
    /// 8xy2
    And(u8, u8),
    /// 8xy3
    Xor(u8, u8),
    /// 8xy4
    AddRegisters(u8, u8),
    /// 8xy5
    Sub(u8, u8),
    /// 8xy6
    ShiftRight(u8),
    /// 8xy7
    SubNegated(u8, u8),
    /// 8xyE
    ShiftLeft(u8),
    /// 9xy0
    SkipRegistersNotEqual(u8, u8),
    /// Annn
    LoadIndex(u16),
    /// Bnnn
    JumpOffset(u16),
    /// Cxkk
    Random(u8, u8),
    /// Dxyn
    Draw(u8, u8, u8),
    /// Ex9E
    SkipPressed(u8),
    /// ExA1
    SkipNotPressed(u8),
    /// Fx07
    LoadDelay(u8),
    /// Fx0A
    AwaitKey(u8),
    /// Fx15
    SetDelay(u8),
    /// Fx18
    SetSound(u8),
    /// Fx1E
    AddIndex(u8),
    /// Fx29
    LoadGlyph(u8),
    /// Fx33
    Bcd(u8),
    /// Fx55
    Store(u8),
    /// Fx65
    Read(u8),
}

impl Instruction {
    /// Selects the Instruction for a given Opcode fetched from `pc`.
    pub fn decode(raw: u16, pc: u16) -> Result<Self> {
        use Instruction::*;

        let op = Opcode(raw);
        let (x, y, n) = (op.x(), op.y(), op.n());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, ..) => Jump(op.addr()),
            (0x2, ..) => Call(op.addr()),
            (0x3, ..) => SkipEqual(x, op.kk()),
            (0x4, ..) => SkipNotEqual(x, op.kk()),
            (0x5, .., 0x0) => SkipRegistersEqual(x, y),
            (0x6, ..) => Load(x, op.kk()),
            (0x7, ..) => Add(x, op.kk()),
            (0x8, .., 0x0) => Move(x, y),
            (0x8, .., 0x1) => Or(x, y),
            (0x8, .., 0x2) => And(x, y),
            (0x8, .., 0x3) => Xor(x, y),
            (0x8, .., 0x4) => AddRegisters(x, y),
            (0x8, .., 0x5) => Sub(x, y),
            (0x8, .., 0x6) => ShiftRight(x),
            (0x8, .., 0x7) => SubNegated(x, y),
            (0x8, .., 0xE) => ShiftLeft(x),
            (0x9, .., 0x0) => SkipRegistersNotEqual(x, y),
            (0xA, ..) => LoadIndex(op.addr()),
            (0xB, ..) => JumpOffset(op.addr()),
            (0xC, ..) => Random(x, op.kk()),
            (0xD, ..) => Draw(x, y, n),
            (0xE, _, 0x9, 0xE) => SkipPressed(x),
            (0xE, _, 0xA, 0x1) => SkipNotPressed(x),
            (0xF, _, 0x0, 0x7) => LoadDelay(x),
            (0xF, _, 0x0, 0xA) => AwaitKey(x),
            (0xF, _, 0x1, 0x5) => SetDelay(x),
            (0xF, _, 0x1, 0x8) => SetSound(x),
            (0xF, _, 0x1, 0xE) => AddIndex(x),
            (0xF, _, 0x2, 0x9) => LoadGlyph(x),
            (0xF, _, 0x3, 0x3) => Bcd(x),
            (0xF, _, 0x5, 0x5) => Store(x),
            (0xF, _, 0x6, 0x5) => Read(x),
            _ => return Err(Chip8Error::UnknownOpcode { opcode: raw, pc }),
        };
        Ok(instruction)
    }

    /// Whether executing this instruction changes the frame buffer.
    pub fn redraws(&self) -> bool {
        matches!(self, Instruction::Clear | Instruction::Draw(..))
    }
}

/// Mnemonic form, e.g. `DRW V1, V2, 5`
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(addr) => write!(f, "JP {:#05X}", addr),
            Call(addr) => write!(f, "CALL {:#05X}", addr),
            SkipEqual(x, kk) => write!(f, "SE V{:X}, {:#04X}", x, kk),
            SkipNotEqual(x, kk) => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            SkipRegistersEqual(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            Load(x, kk) => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Add(x, kk) => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Move(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddRegisters(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(x) => write!(f, "SHR V{:X}", x),
            SubNegated(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(x) => write!(f, "SHL V{:X}", x),
            SkipRegistersNotEqual(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(addr) => write!(f, "LD I, {:#05X}", addr),
            JumpOffset(addr) => write!(f, "JP V0, {:#05X}", addr),
            Random(x, kk) => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipPressed(x) => write!(f, "SKP V{:X}", x),
            SkipNotPressed(x) => write!(f, "SKNP V{:X}", x),
            LoadDelay(x) => write!(f, "LD V{:X}, DT", x),
            AwaitKey(x) => write!(f, "LD V{:X}, K", x),
            SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            SetSound(x) => write!(f, "LD ST, V{:X}", x),
            AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            LoadGlyph(x) => write!(f, "LD F, V{:X}", x),
            Bcd(x) => write!(f, "LD B, V{:X}", x),
            Store(x) => write!(f, "LD [I], V{:X}", x),
            Read(x) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

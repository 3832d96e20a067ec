// This code is licensed under MIT license (see LICENSE for details)
//! Contains the definition of a Chip-8 [Insn] and the decoder that produces it

use super::{Adr, Nib, Reg};
use std::fmt::Display;

/// One decoded Chip-8 instruction: an operation tag plus the operand fields
/// that operation uses.
///
/// Decoded fresh from the fetched word each cycle; carries no persistent
/// state. A word that matches no documented operation decodes to
/// [Insn::unknown] rather than disappearing into a fallthrough — the
/// dispatcher's `match` is exhaustive, so every variant must be handled
/// somewhere.
#[allow(non_camel_case_types, missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Insn {
    /// | 00e0 | Clear screen memory to 0s
    cls,
    /// | 00ee | Return from subroutine
    ret,
    /// | 1nnn | Jumps to an absolute address
    jmp { nnn: Adr },
    /// | 2nnn | Pushes pc onto the stack, then jumps to nnn
    call { nnn: Adr },
    /// | 3xkk | Skips next instruction if register X == kk
    seb { x: Reg, kk: u8 },
    /// | 4xkk | Skips next instruction if register X != kk
    sneb { x: Reg, kk: u8 },
    /// | 5xy0 | Skip next instruction if vX == vY
    se { x: Reg, y: Reg },
    /// | 6xkk | Loads immediate byte kk into register vX
    movb { x: Reg, kk: u8 },
    /// | 7xkk | Adds immediate byte kk to register vX
    addb { x: Reg, kk: u8 },
    /// | 8xy0 | Loads the value of vY into vX
    mov { x: Reg, y: Reg },
    /// | 8xy1 | Performs bitwise or of vX and vY, and stores the result in vX
    or { x: Reg, y: Reg },
    /// | 8xy2 | Performs bitwise and of vX and vY, and stores the result in vX
    and { x: Reg, y: Reg },
    /// | 8xy3 | Performs bitwise xor of vX and vY, and stores the result in vX
    xor { x: Reg, y: Reg },
    /// | 8xy4 | Performs addition of vX and vY; sets vF = carry
    add { x: Reg, y: Reg },
    /// | 8xy5 | Performs subtraction of vX and vY; sets vF = no borrow
    sub { x: Reg, y: Reg },
    /// | 8xy6 | Shifts vX right one bit; sets vF = shifted-out bit
    shr { x: Reg, y: Reg },
    /// | 8xy7 | Performs subtraction of vY and vX; sets vF = no borrow
    bsub { x: Reg, y: Reg },
    /// | 8xyE | Shifts vX left one bit; sets vF = shifted-out bit
    shl { x: Reg, y: Reg },
    /// | 9xy0 | Skip next instruction if vX != vY
    sne { x: Reg, y: Reg },
    /// | Annn | Load address nnn into register I
    movi { nnn: Adr },
    /// | Bnnn | Jump to nnn + v0
    jmpr { nnn: Adr },
    /// | Cxkk | Stores a random number & the provided byte into vX
    rand { x: Reg, kk: u8 },
    /// | Dxyn | Draws n-byte sprite to the screen at coordinates (vX, vY)
    draw { x: Reg, y: Reg, n: Nib },
    /// | Ex9E | Skip next instruction if key == vX
    sek { x: Reg },
    /// | ExA1 | Skip next instruction if key != vX
    snek { x: Reg },
    /// | Fx07 | Set vX to value in delay timer
    getdt { x: Reg },
    /// | Fx0A | Wait for input, store key in vX
    waitk { x: Reg },
    /// | Fx15 | Set delay timer to the value in vX
    setdt { x: Reg },
    /// | Fx18 | Set sound timer to the value in vX
    setst { x: Reg },
    /// | Fx1E | Add vX to I
    addi { x: Reg },
    /// | Fx29 | Load the font sprite for digit vX into I
    font { x: Reg },
    /// | Fx33 | BCD convert vX into memory at I..I+3
    bcd { x: Reg },
    /// | Fx55 | Store registers v0..=vX into memory at I
    dmao { x: Reg },
    /// | Fx65 | Load registers v0..=vX from memory at I
    dmai { x: Reg },
    /// A word that matches none of the above
    unknown { word: u16 },
}

impl Insn {
    /// Decodes one instruction word.
    ///
    /// The top nibble selects the operation family; families 0x0, 0x5, 0x8,
    /// 0xE and 0xF are disambiguated by their low bits, and any unmatched
    /// sub-opcode becomes [Insn::unknown].
    /// # Examples
    /// ```rust
    /// # use ocho::*;
    /// assert_eq!(Insn::decode(0x00e0), Insn::cls);
    /// assert_eq!(Insn::decode(0x6a42), Insn::movb { x: 0xa, kk: 0x42 });
    /// assert_eq!(Insn::decode(0x8ab8), Insn::unknown { word: 0x8ab8 });
    /// ```
    pub fn decode(word: u16) -> Insn {
        use Insn::*;
        let nnn = word & 0x0fff;
        let kk = (word & 0x00ff) as u8;
        let x = (word >> 8 & 0xf) as Reg;
        let y = (word >> 4 & 0xf) as Reg;
        let n = (word & 0xf) as Nib;
        match word >> 12 {
            0x0 => match word {
                0x00e0 => cls,
                0x00ee => ret,
                _ => unknown { word },
            },
            0x1 => jmp { nnn },
            0x2 => call { nnn },
            0x3 => seb { x, kk },
            0x4 => sneb { x, kk },
            0x5 if n == 0 => se { x, y },
            0x6 => movb { x, kk },
            0x7 => addb { x, kk },
            0x8 => match n {
                0x0 => mov { x, y },
                0x1 => or { x, y },
                0x2 => and { x, y },
                0x3 => xor { x, y },
                0x4 => add { x, y },
                0x5 => sub { x, y },
                0x6 => shr { x, y },
                0x7 => bsub { x, y },
                0xe => shl { x, y },
                _ => unknown { word },
            },
            0x9 if n == 0 => sne { x, y },
            0xa => movi { nnn },
            0xb => jmpr { nnn },
            0xc => rand { x, kk },
            0xd => draw { x, y, n },
            0xe => match kk {
                0x9e => sek { x },
                0xa1 => snek { x },
                _ => unknown { word },
            },
            0xf => match kk {
                0x07 => getdt { x },
                0x0a => waitk { x },
                0x15 => setdt { x },
                0x18 => setst { x },
                0x1e => addi { x },
                0x29 => font { x },
                0x33 => bcd { x },
                0x55 => dmao { x },
                0x65 => dmai { x },
                _ => unknown { word },
            },
            _ => unknown { word },
        }
    }
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::cls               => write!(f, "cls    "),
            Insn::ret               => write!(f, "ret    "),
            Insn::jmp { nnn }       => write!(f, "jmp    {nnn:03x}"),
            Insn::call { nnn }      => write!(f, "call   {nnn:03x}"),
            Insn::seb { x, kk }     => write!(f, "se     #{kk:02x}, v{x:X}"),
            Insn::sneb { x, kk }    => write!(f, "sne    #{kk:02x}, v{x:X}"),
            Insn::se { x, y }       => write!(f, "se     v{y:X}, v{x:X}"),
            Insn::movb { x, kk }    => write!(f, "mov    #{kk:02x}, v{x:X}"),
            Insn::addb { x, kk }    => write!(f, "add    #{kk:02x}, v{x:X}"),
            Insn::mov { x, y }      => write!(f, "mov    v{y:X}, v{x:X}"),
            Insn::or { x, y }       => write!(f, "or     v{y:X}, v{x:X}"),
            Insn::and { x, y }      => write!(f, "and    v{y:X}, v{x:X}"),
            Insn::xor { x, y }      => write!(f, "xor    v{y:X}, v{x:X}"),
            Insn::add { x, y }      => write!(f, "add    v{y:X}, v{x:X}"),
            Insn::sub { x, y }      => write!(f, "sub    v{y:X}, v{x:X}"),
            Insn::shr { x, y: _ }   => write!(f, "shr    v{x:X}"),
            Insn::bsub { x, y }     => write!(f, "bsub   v{y:X}, v{x:X}"),
            Insn::shl { x, y: _ }   => write!(f, "shl    v{x:X}"),
            Insn::sne { x, y }      => write!(f, "sne    v{y:X}, v{x:X}"),
            Insn::movi { nnn }      => write!(f, "mov    ${nnn:03x}, I"),
            Insn::jmpr { nnn }      => write!(f, "jmp    ${nnn:03x}+v0"),
            Insn::rand { x, kk }    => write!(f, "rand   #{kk:02x}, v{x:X}"),
            Insn::draw { x, y, n }  => write!(f, "draw   #{n:x}, v{x:X}, v{y:X}"),
            Insn::sek { x }         => write!(f, "sek    v{x:X}"),
            Insn::snek { x }        => write!(f, "snek   v{x:X}"),
            Insn::getdt { x }       => write!(f, "mov    DT, v{x:X}"),
            Insn::waitk { x }       => write!(f, "waitk  v{x:X}"),
            Insn::setdt { x }       => write!(f, "mov    v{x:X}, DT"),
            Insn::setst { x }       => write!(f, "mov    v{x:X}, ST"),
            Insn::addi { x }        => write!(f, "add    v{x:X}, I"),
            Insn::font { x }        => write!(f, "font   v{x:X}, I"),
            Insn::bcd { x }         => write!(f, "bcd    v{x:X}, &I"),
            Insn::dmao { x }        => write!(f, "dmao   v{x:X}"),
            Insn::dmai { x }        => write!(f, "dmai   v{x:X}"),
            Insn::unknown { word }  => write!(f, "db     {word:04x}"),
        }
    }
}

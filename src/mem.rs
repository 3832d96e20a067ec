// This code is licensed under MIT license (see LICENSE for details)

//! The [Mem] is the machine's 4096-byte address space
//!
//! Addresses `0x000..0x200` are reserved for the interpreter; the built-in
//! hexadecimal font lives there, starting at [FONT_ADDR]. Program images are
//! loaded at [LOAD_ADDR] and may extend to the end of memory.

use crate::error::{Error, Result};

/// Total bytes of addressable memory
pub const MEM_SIZE: usize = 0x1000;
/// Address where program images are loaded
pub const LOAD_ADDR: u16 = 0x200;
/// Address of the built-in hexadecimal font
pub const FONT_ADDR: u16 = 0x050;
/// Height in bytes of one font glyph
pub const FONT_HEIGHT: u16 = 5;

/// 5-byte glyphs for the hex digits 0..=F, one bit row per byte
const FONT: [u8; 80] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// The machine's flat byte-addressable memory.
///
/// Every access is validated against `0x000..=0xFFF`; there is no growth and
/// no aliasing outside the backing array.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mem {
    #[cfg_attr(feature = "serde", serde(with = "serde_bytes_array"))]
    bytes: [u8; MEM_SIZE],
}

impl Mem {
    /// Constructs a new Mem with the font glyphs preloaded at [FONT_ADDR]
    /// # Examples
    /// ```rust
    /// # use ocho::*;
    /// let mem = Mem::new();
    /// assert_eq!(mem.read(0x050).unwrap(), 0xf0); // top row of glyph '0'
    /// ```
    pub fn new() -> Self {
        let mut bytes = [0; MEM_SIZE];
        bytes[FONT_ADDR as usize..FONT_ADDR as usize + FONT.len()].copy_from_slice(&FONT);
        Mem { bytes }
    }

    /// Reads one byte. Fails [Error::OutOfBounds] past 0xFFF.
    pub fn read(&self, addr: u16) -> Result<u8> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(Error::OutOfBounds { addr })
    }

    /// Writes one byte. Fails [Error::OutOfBounds] past 0xFFF.
    pub fn write(&mut self, addr: u16, value: u8) -> Result<()> {
        match self.bytes.get_mut(addr as usize) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(Error::OutOfBounds { addr }),
        }
    }

    /// Reads a big-endian instruction word. Both bytes are bounds-checked.
    /// # Examples
    /// ```rust
    /// # use ocho::*;
    /// let mut mem = Mem::new();
    /// mem.load_image(&[0x12, 0x34]).unwrap();
    /// assert_eq!(mem.read_word(0x200).unwrap(), 0x1234);
    /// ```
    pub fn read_word(&self, addr: u16) -> Result<u16> {
        let hi = self.read(addr)?;
        let lo = self.read(addr.wrapping_add(1))?;
        Ok(u16::from_be_bytes([hi, lo]))
    }

    /// Copies a program image into memory starting at [LOAD_ADDR].
    ///
    /// The whole program region is zeroed first, so loading a second image
    /// leaves no residue from the first. Fails [Error::ImageTooLarge] if the
    /// image would extend past 0xFFF, without touching memory.
    pub fn load_image(&mut self, image: &[u8]) -> Result<()> {
        let start = LOAD_ADDR as usize;
        if image.len() > MEM_SIZE - start {
            return Err(Error::ImageTooLarge { size: image.len() });
        }
        self.bytes[start..].fill(0);
        self.bytes[start..start + image.len()].copy_from_slice(image);
        Ok(())
    }

    /// Gets the `n`-byte sprite starting at `addr`, for the draw instruction.
    pub fn sprite(&self, addr: u16, n: u8) -> Result<&[u8]> {
        let start = addr as usize;
        self.bytes
            .get(start..start + n as usize)
            .ok_or(Error::OutOfBounds { addr })
    }

    /// Address of the built-in font glyph for `digit` (masked to its low nibble)
    pub fn font_sprite(digit: u8) -> u16 {
        FONT_ADDR + FONT_HEIGHT * (digit & 0xf) as u16
    }
}

impl Default for Mem {
    fn default() -> Self {
        Mem::new()
    }
}

impl std::fmt::Debug for Mem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mem").field("len", &MEM_SIZE).finish_non_exhaustive()
    }
}

#[cfg(feature = "serde")]
mod serde_bytes_array {
    use super::MEM_SIZE;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; MEM_SIZE], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_bytes(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<[u8; MEM_SIZE], D::Error> {
        let vec = Vec::<u8>::deserialize(de)?;
        vec.try_into()
            .map_err(|_| serde::de::Error::custom("memory image must be 4096 bytes"))
    }
}

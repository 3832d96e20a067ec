// This code is licensed under MIT license (see LICENSE for details)

//! Error type for ocho

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for ocho.
///
/// [Error::OutOfBounds], [Error::StackOverflow] and [Error::StackUnderflow]
/// are fatal: the machine latches [crate::cpu::flags::Status::Halted] before
/// returning them, and will not execute further cycles until reset.
/// [Error::UnknownInstruction] is not fatal; the driver decides whether to
/// stop or to carry on past the offending word.
#[derive(Debug, Error)]
pub enum Error {
    /// Fetch or data access outside 0x000..=0xFFF
    #[error("address {addr:03x} is outside addressable memory")]
    OutOfBounds {
        /// The offending address
        addr: u16,
    },
    /// A 17th nested call was attempted
    #[error("call stack overflow at depth {depth}")]
    StackOverflow {
        /// Call depth at the time of the overflow
        depth: usize,
    },
    /// `00EE` was executed with an empty call stack
    #[error("return with empty call stack")]
    StackUnderflow,
    /// A program image would extend past the end of memory
    #[error("image of {size} bytes does not fit in program memory")]
    ImageTooLarge {
        /// Size of the rejected image
        size: usize,
    },
    /// A word that decodes to no documented operation
    #[error("opcode {word:04x} not recognized")]
    UnknownInstruction {
        /// The offending word
        word: u16,
    },
    /// Tried to press or release a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// True for the conditions that stop the machine for good
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::OutOfBounds { .. } | Error::StackOverflow { .. } | Error::StackUnderflow
        )
    }
}

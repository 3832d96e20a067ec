// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements a Chip-8 interpreter: a 4096-byte address space, a
//! 16-register CPU with a 16-deep call stack, a 64×32 XOR-composited
//! monochrome display, and the full 35-instruction set.
//!
//! The host owns the loop: it loads a program image, calls [Chip8::step] at
//! whatever rate it likes, calls [Chip8::tick_timers] at 60 Hz, renders from
//! [Chip8::screen] between cycles, and feeds key events through
//! [cpu::CPU::press]/[cpu::CPU::release].

pub mod cpu;
pub mod error;
pub mod mem;
pub mod screen;

use error::Result;
use std::path::Path;

/// One complete Chip-8 machine: CPU state, memory, and display surface.
///
/// All three are exclusively owned; nothing is shared across threads, and a
/// completed cycle leaves [Chip8::screen] safe to snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chip8 {
    pub cpu: cpu::CPU,
    pub mem: mem::Mem,
    pub screen: screen::Screen,
}

impl Chip8 {
    /// Constructs a machine with the program image at `rom` loaded
    /// # Examples
    /// ```rust,no_run
    /// # use ocho::*;
    /// let mut ch8 = Chip8::new("roms/pong.ch8").unwrap();
    /// while !ch8.cpu.is_halted() {
    ///     ch8.step().unwrap();
    /// }
    /// ```
    pub fn new(rom: impl AsRef<Path>) -> Result<Self> {
        let mut ch8 = Chip8::default();
        ch8.load_image(&std::fs::read(rom)?)?;
        Ok(ch8)
    }

    /// Loads a program image into memory at the load address
    pub fn load_image(&mut self, image: &[u8]) -> Result<&mut Self> {
        self.mem.load_image(image)?;
        Ok(self)
    }

    /// Executes a single fetch/decode/execute cycle
    pub fn step(&mut self) -> Result<&mut Self> {
        self.cpu.tick(&mut self.mem, &mut self.screen)?;
        Ok(self)
    }

    /// Decrements the delay and sound timers; call at 60 Hz
    pub fn tick_timers(&mut self) {
        self.cpu.tick_timers();
    }

    /// Resets the CPU and clears the display. Memory, and therefore the
    /// loaded program, is untouched.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.screen.clear();
    }

    /// The display surface, for renderers
    pub fn screen(&self) -> &screen::Screen {
        &self.screen
    }
}

/// Common imports for ocho
pub mod prelude {
    pub use super::Chip8;
    pub use crate::cpu::{
        flags::{Flags, Status},
        instruction::Insn,
        quirks::Quirks,
        CPU,
    };
    pub use crate::error::{Error, Result};
    pub use crate::mem::Mem;
    pub use crate::screen::Screen;
}

pub use prelude::*;

// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod quirks;

use self::{
    flags::{Flags, Status},
    instruction::Insn,
};
use crate::{
    error::{Error, Result},
    mem::{Mem, LOAD_ADDR},
    screen::Screen,
};
use log::trace;

/// Index of a general purpose register
pub type Reg = usize;
/// A 12-bit effective address
pub type Adr = u16;
/// A 4-bit literal
pub type Nib = u8;

/// Maximum depth of the call stack; one more nested call is fatal
pub const STACK_DEPTH: usize = 16;

/// Represents the internal state of the CPU interpreter
///
/// The CPU owns the registers, call stack, timers and key state; [Mem] and
/// [Screen] are borrowed for the duration of one [CPU::tick] and no handler
/// retains a reference across cycles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to
    /// the chip-8. Includes [quirks::Quirks], the trace toggle, etc.
    pub flags: Flags,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    delay: u8,
    sound: u8,
    // memory
    stack: Vec<Adr>,
    // I/O
    keys: [bool; 16],
    // Execution data
    status: Status,
    cycle: usize,
}

// public interface
impl CPU {
    /// Executes a single cycle: fetch, decode, dispatch.
    ///
    /// Does nothing while paused, halted, or blocked on the wait-for-key
    /// instruction; the driver should consult [CPU::is_waiting] rather than
    /// busy-loop through blocked ticks.
    ///
    /// A fatal condition ([Error::OutOfBounds], [Error::StackOverflow],
    /// [Error::StackUnderflow]) halts the machine before the error is
    /// returned. [Error::UnknownInstruction] leaves the machine running with
    /// pc already past the offending word, so the caller chooses between
    /// aborting and skipping.
    /// # Examples
    /// ```rust
    /// # use ocho::*;
    /// let mut ch8 = Chip8::default();
    /// ch8.load_image(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jmp 0x202
    /// ]).unwrap();
    /// ch8.cpu.tick(&mut ch8.mem, &mut ch8.screen).unwrap();
    /// assert_eq!(0x202, ch8.cpu.pc());
    /// assert_eq!(1, ch8.cpu.cycle());
    /// ```
    pub fn tick(&mut self, mem: &mut Mem, screen: &mut Screen) -> Result<&mut Self> {
        if self.flags.pause || self.status != Status::Running {
            return Ok(self);
        }
        let word = match mem.read_word(self.pc) {
            Ok(word) => word,
            Err(e) => {
                self.status = Status::Halted;
                return Err(e);
            }
        };
        let insn = Insn::decode(word);
        if self.flags.debug {
            trace!("{:3} {:03x}: {}", self.cycle, self.pc, insn);
        }
        // Advance past the instruction before dispatch, so that skips,
        // jumps and calls compose with the post-increment pc.
        self.pc = self.pc.wrapping_add(2);
        self.cycle += 1;
        match self.execute(mem, screen, insn) {
            Ok(()) => Ok(self),
            Err(e) => {
                if e.is_fatal() {
                    self.status = Status::Halted;
                }
                Err(e)
            }
        }
    }

    /// Decrements both timers, stopping at 0.
    ///
    /// The driver calls this at 60 Hz, independent of the cycle rate; the
    /// core owns no wall-clock logic.
    pub fn tick_timers(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Presses a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    ///
    /// If the machine is blocked on the wait-for-key instruction, the press
    /// is consumed: the key value lands in the waiting register and the
    /// machine resumes.
    /// # Examples
    /// ```rust
    /// # use ocho::*;
    /// let mut cpu = CPU::default();
    /// let did_press = cpu.press(0x7).unwrap();
    /// assert!(did_press);
    /// // pressing a held key changes nothing
    /// let did_press = cpu.press(0x7).unwrap();
    /// assert!(!did_press);
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        if let Some(keyref) = self.keys.get_mut(key) {
            if !*keyref {
                *keyref = true;
                if let Status::WaitingForKey { x } = self.status {
                    self.v[x] = key as u8;
                    self.status = Status::Running;
                }
                return Ok(true);
            }
        } else {
            return Err(Error::InvalidKey { key });
        }
        Ok(false)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    pub fn release(&mut self, key: usize) -> Result<bool> {
        if let Some(keyref) = self.keys.get_mut(key) {
            if *keyref {
                *keyref = false;
                return Ok(true);
            }
        } else {
            return Err(Error::InvalidKey { key });
        }
        Ok(false)
    }

    /// Sets a general purpose register.
    /// If the register doesn't exist, returns [Error::InvalidRegister].
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister { reg })
        }
    }

    /// Gets a slice of the entire general purpose registers
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the value in the delay timer register
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the value in the sound timer register; the host should be making
    /// noise whenever this is nonzero
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Gets the number of cycles the CPU has executed
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Gets the machine's current [Status]
    pub fn status(&self) -> Status {
        self.status
    }

    /// True if the machine is blocked on the wait-for-key instruction
    pub fn is_waiting(&self) -> bool {
        matches!(self.status, Status::WaitingForKey { .. })
    }

    /// True if a fatal condition has stopped the machine
    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }

    /// Resets the CPU to power-on state: registers, stack, timers, keys,
    /// status and cycle count. Does not touch [Flags::quirks].
    pub fn reset(&mut self) {
        self.pc = LOAD_ADDR;
        self.i = 0;
        self.v = [0; 16];
        self.delay = 0;
        self.sound = 0;
        self.stack.clear();
        self.keys = [false; 16];
        self.status = Status::Running;
        self.cycle = 0;
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// ```text
    /// PC: 0200, SP: 0000, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        std::println!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.len(),
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.delay,
            self.sound,
            self.cycle,
        );
    }
}

impl Default for CPU {
    /// Constructs a new CPU with the program counter at the image load
    /// address and everything else zeroed
    fn default() -> Self {
        CPU {
            flags: Flags::default(),
            pc: LOAD_ADDR,
            i: 0,
            v: [0; 16],
            delay: 0,
            sound: 0,
            stack: Vec::with_capacity(STACK_DEPTH),
            keys: [false; 16],
            status: Status::Running,
            cycle: 0,
        }
    }
}

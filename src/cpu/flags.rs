// This code is licensed under MIT license (see LICENSE for details)

//! Represents flags that aid in implementation but aren't a part of the Chip-8 spec

use super::{quirks::Quirks, Reg};

/// The machine's forward-progress state.
///
/// [Status::WaitingForKey] is the one suspension point in the design: the
/// wait-for-key instruction parks the register index here and no further
/// fetch happens until [super::CPU::press] consumes exactly one key press.
/// [Status::Halted] latches after a fatal error and is only cleared by
/// reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Fetch/decode/execute proceeds normally
    #[default]
    Running,
    /// Blocked on the wait-for-key instruction
    WaitingForKey {
        /// The register the next key press lands in
        x: Reg,
    },
    /// Stopped by a fatal condition
    Halted,
}

/// Represents flags that aid in operation, but aren't inherent to the CPU
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    /// Set when the per-cycle disassembly trace should be logged
    pub debug: bool,
    /// Set when the machine is paused by the host and should not update
    pub pause: bool,
    /// The set of [Quirks] to enable
    pub quirks: Quirks,
}

impl Flags {
    /// Toggles the disassembly trace
    pub fn debug(&mut self) {
        self.debug = !self.debug
    }

    /// Toggles pause
    pub fn pause(&mut self) {
        self.pause = !self.pause
    }
}

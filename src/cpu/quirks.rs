// This code is licensed under MIT license (see LICENSE for details)

//! Controls the [Quirks] behavior of the CPU on a granular level.

/// Toggles for behaviors that historical Chip-8 interpreters disagree on.
///
/// `Default` is the permissive common-denominator behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quirks {
    /// `Fx1E` should set vF when I + vX passes 0xFFF. Amiga-lineage
    /// interpreters do this; the Cosmac VIP does not.
    pub index_carry: bool,
}

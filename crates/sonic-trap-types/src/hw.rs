//! Hardware class codes and the packed hardware index.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hardware class of a chassis component (`TmnxHwClass`).
///
/// Only the classes this crate emits traps for are modelled. The codes are
/// fixed by the MIB and are never derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HwClass {
    /// Power supply module.
    PowerSupply = 5,
    /// Fan tray.
    Fan = 6,
}

impl HwClass {
    /// Returns the MIB class code.
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Packs this class and an entity id into a hardware index.
    pub const fn hw_index(&self, entity_id: i64) -> HwIndex {
        HwIndex::new(*self, entity_id)
    }
}

impl fmt::Display for HwClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HwClass::PowerSupply => write!(f, "powerSupply"),
            HwClass::Fan => write!(f, "fan"),
        }
    }
}

impl TryFrom<u8> for HwClass {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(HwClass::PowerSupply),
            6 => Ok(HwClass::Fan),
            _ => Err(ParseError::InvalidHwClass(value)),
        }
    }
}

impl From<HwClass> for u8 {
    fn from(class: HwClass) -> u8 {
        class.code()
    }
}

/// Hardware index (`TmnxHwIndex`): the class code in the high byte plus the
/// entity id.
///
/// Packed in 128 bits so any `i64` entity id fits without wrapping.
///
/// Displays as a lowercase `0x`-prefixed hex string without zero padding,
/// which is the form trap indexes carry.
///
/// # Examples
///
/// ```
/// use sonic_trap_types::{HwClass, HwIndex};
///
/// let idx = HwIndex::new(HwClass::Fan, 3);
/// assert_eq!(idx.value(), 0x0600_0003);
/// assert_eq!(idx.to_string(), "0x6000003");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HwIndex(i128);

impl HwIndex {
    /// Bit position of the class code.
    pub const CLASS_SHIFT: u32 = 24;

    /// Packs a class and entity id.
    pub const fn new(class: HwClass, entity_id: i64) -> Self {
        HwIndex(((class.code() as i128) << Self::CLASS_SHIFT) + entity_id as i128)
    }

    /// Returns the packed integer value.
    pub const fn value(&self) -> i128 {
        self.0
    }
}

impl fmt::Display for HwIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-{:#x}", self.0.unsigned_abs())
        } else {
            write!(f, "{:#x}", self.0)
        }
    }
}

impl Serialize for HwIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

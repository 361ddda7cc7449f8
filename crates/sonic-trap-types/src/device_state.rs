//! Canonical device state (`TmnxDeviceState`).

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational state of a chassis component as reported in trap objects.
///
/// The integer values are part of the MIB contract and serialize as plain
/// integers.
///
/// # Examples
///
/// ```
/// use sonic_trap_types::DeviceState;
///
/// assert_eq!(DeviceState::from_oper_state("failed"), DeviceState::Failed);
/// assert_eq!(DeviceState::Failed.as_u8(), 4);
///
/// // Anything the device reports that is not a known state is unknown
/// assert_eq!(DeviceState::from_oper_state("Up"), DeviceState::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DeviceState {
    /// State could not be determined (default).
    #[default]
    Unknown = 1,
    /// Slot is empty.
    NotEquipped = 2,
    /// Component is operating normally.
    Ok = 3,
    /// Component has failed.
    Failed = 4,
    /// Component is present but out of service.
    OutOfService = 5,
}

impl DeviceState {
    /// Raw `oper-state` value reported for a healthy component.
    pub const RAW_UP: &'static str = "up";
    /// Raw `oper-state` value reported for an out-of-service component.
    pub const RAW_DOWN: &'static str = "down";
    /// Raw `oper-state` value reported for an empty slot.
    pub const RAW_EMPTY: &'static str = "empty";
    /// Raw `oper-state` value reported for a failed component.
    pub const RAW_FAILED: &'static str = "failed";

    /// Maps a raw `oper-state` string to its canonical state.
    ///
    /// Matching is exact; unrecognized values map to [`DeviceState::Unknown`].
    pub fn from_oper_state(raw: &str) -> Self {
        match raw {
            Self::RAW_UP => DeviceState::Ok,
            Self::RAW_DOWN => DeviceState::OutOfService,
            Self::RAW_EMPTY => DeviceState::NotEquipped,
            Self::RAW_FAILED => DeviceState::Failed,
            _ => DeviceState::Unknown,
        }
    }

    /// Returns the MIB integer value.
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceState::Unknown => "deviceStateUnknown",
            DeviceState::NotEquipped => "deviceNotEquipped",
            DeviceState::Ok => "deviceStateOk",
            DeviceState::Failed => "deviceStateFailed",
            DeviceState::OutOfService => "deviceStateOutOfService",
        };
        write!(f, "{}", s)
    }
}

impl TryFrom<u8> for DeviceState {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DeviceState::Unknown),
            2 => Ok(DeviceState::NotEquipped),
            3 => Ok(DeviceState::Ok),
            4 => Ok(DeviceState::Failed),
            5 => Ok(DeviceState::OutOfService),
            _ => Err(ParseError::InvalidDeviceState(value)),
        }
    }
}

impl From<DeviceState> for u8 {
    fn from(state: DeviceState) -> u8 {
        state.as_u8()
    }
}

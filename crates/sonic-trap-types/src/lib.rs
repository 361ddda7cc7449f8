//! MIB-facing value types for SONiC platform traps.
//!
//! These types mirror the textual conventions the management system expects
//! in trap varbinds:
//!
//! - [`DeviceState`]: `TmnxDeviceState` (unknown, not equipped, ok, failed, out of service)
//! - [`HwClass`]: `TmnxHwClass` codes for the monitored hardware
//! - [`HwIndex`]: `TmnxHwIndex` packing a hardware class and an entity id

mod device_state;
mod hw;

pub use device_state::DeviceState;
pub use hw::{HwClass, HwIndex};

/// Common error type for conversion failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid device state: {0} (must be 1-5)")]
    InvalidDeviceState(u8),

    #[error("invalid hardware class: {0}")]
    InvalidHwClass(u8),
}

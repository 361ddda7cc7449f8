//! Trap decision policy: raise, clear, or nothing.
//!
//! Decisions are edge-triggered on the event's own `(old, new)` pair. No
//! prior classification is remembered between envelopes.

use sonic_trap_types::DeviceState;

/// Which member of a raise/clear pair to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrapKind {
    Raise,
    Clear,
}

/// Transition rule for one entity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    /// New values that raise the failure trap.
    pub raise_on: &'static [&'static str],
    /// New value that may clear it.
    pub clear_to: &'static str,
    /// Old values from which `clear_to` clears.
    pub clear_from: &'static [&'static str],
}

impl TransitionRule {
    pub const fn new(
        raise_on: &'static [&'static str],
        clear_to: &'static str,
        clear_from: &'static [&'static str],
    ) -> Self {
        Self {
            raise_on,
            clear_to,
            clear_from,
        }
    }

    pub fn decide(&self, old_value: &str, new_value: &str) -> Option<TrapKind> {
        if self.raise_on.iter().any(|v| *v == new_value) {
            Some(TrapKind::Raise)
        } else if new_value == self.clear_to && self.clear_from.iter().any(|v| *v == old_value) {
            Some(TrapKind::Clear)
        } else {
            None
        }
    }
}

/// Fan tray: raise on `failed`, clear on `failed → up`.
pub const FAN_TRAY_RULE: TransitionRule = TransitionRule::new(
    &[DeviceState::RAW_FAILED],
    DeviceState::RAW_UP,
    &[DeviceState::RAW_FAILED],
);

/// AC power supply: raise on `failed` or `down`, clear on either `→ up`.
pub const AC_POWER_SUPPLY_RULE: TransitionRule = TransitionRule::new(
    &[DeviceState::RAW_FAILED, DeviceState::RAW_DOWN],
    DeviceState::RAW_UP,
    &[DeviceState::RAW_FAILED, DeviceState::RAW_DOWN],
);

/// Notification names for a raise/clear pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapPair {
    pub raise: &'static str,
    pub clear: &'static str,
}

impl TrapPair {
    pub const fn new(raise: &'static str, clear: &'static str) -> Self {
        Self { raise, clear }
    }

    pub const fn name(&self, kind: TrapKind) -> &'static str {
        match kind {
            TrapKind::Raise => self.raise,
            TrapKind::Clear => self.clear,
        }
    }
}

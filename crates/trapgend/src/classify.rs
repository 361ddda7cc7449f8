//! State classification: raw device strings to canonical states, and the
//! AC/DC determination for power supplies.

use crate::snapshot::{value_text, EntityRecord};
use crate::tables::psu_fields;
use sonic_trap_types::DeviceState;

/// Substrings of a lower-cased `type` that mark a DC supply.
const DC_TYPE_MARKERS: [&str; 3] = ["hvdc", "lvdc", "dc"];

/// Substring of a lower-cased `type` that marks an AC supply.
const AC_TYPE_MARKER: &str = "ac";

/// Readings at or below this magnitude (volts) mean "no reading".
pub const NO_READING_VOLTS: f64 = 0.1;

/// Readings above this magnitude (volts) are taken as AC input.
pub const AC_MIN_VOLTS: f64 = 64.0;

/// Canonical state of a raw `oper-state` value.
pub fn classify(raw: &str) -> DeviceState {
    DeviceState::from_oper_state(raw)
}

/// Input type of a power supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsuKind {
    Ac,
    Dc,
}

/// Determines whether a supply is AC or DC.
///
/// An explicit `type` label wins; otherwise the `volt` reading decides. A
/// missing, unparseable or near-zero reading gives `None` (indeterminate).
pub fn power_supply_kind(record: &EntityRecord) -> Option<PsuKind> {
    let psu_type = value_text(record.field(psu_fields::TYPE)).to_lowercase();
    let has_ac = psu_type.contains(AC_TYPE_MARKER);

    if !has_ac && DC_TYPE_MARKERS.iter().any(|m| psu_type.contains(m)) {
        return Some(PsuKind::Dc);
    }
    if has_ac {
        return Some(PsuKind::Ac);
    }

    kind_from_volts(record.number(psu_fields::VOLT)?)
}

/// Voltage-based inference used when the supply carries no type label.
pub fn kind_from_volts(volts: f64) -> Option<PsuKind> {
    let magnitude = volts.abs();
    if magnitude.is_nan() || magnitude <= NO_READING_VOLTS {
        return None;
    }
    if magnitude > AC_MIN_VOLTS {
        Some(PsuKind::Ac)
    } else {
        Some(PsuKind::Dc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn psu(value: serde_json::Value) -> EntityRecord {
        EntityRecord::from_value(&value).unwrap()
    }

    #[test]
    fn test_classify_round_trip() {
        let cases = [
            ("up", DeviceState::Ok),
            ("empty", DeviceState::NotEquipped),
            ("failed", DeviceState::Failed),
            ("down", DeviceState::OutOfService),
        ];
        for (raw, expected) in cases {
            assert_eq!(classify(raw), expected);
            // Exactly one raw value maps to each non-unknown state
            let sources = cases.iter().filter(|(_, s)| *s == expected).count();
            assert_eq!(sources, 1);
        }
        assert_eq!(classify("UP"), DeviceState::Unknown);
        assert_eq!(classify("degraded"), DeviceState::Unknown);
        assert_eq!(classify(""), DeviceState::Unknown);
    }

    #[test]
    fn test_dc_type_labels() {
        for label in ["HVDC48", "lvdc", "DC", "-48V dc"] {
            assert_eq!(power_supply_kind(&psu(json!({"type": label, "volt": 230}))), Some(PsuKind::Dc), "{label}");
        }
    }

    #[test]
    fn test_ac_type_labels() {
        assert_eq!(power_supply_kind(&psu(json!({"type": "AC"}))), Some(PsuKind::Ac));
        assert_eq!(power_supply_kind(&psu(json!({"type": "ac-220"}))), Some(PsuKind::Ac));
        // Mentions of both count as AC
        assert_eq!(power_supply_kind(&psu(json!({"type": "AC/DC"}))), Some(PsuKind::Ac));
        assert_eq!(power_supply_kind(&psu(json!({"type": "HVDC-AC"}))), Some(PsuKind::Ac));
    }

    #[test]
    fn test_voltage_fallback() {
        assert_eq!(power_supply_kind(&psu(json!({"volt": 230}))), Some(PsuKind::Ac));
        assert_eq!(power_supply_kind(&psu(json!({"volt": "120.0"}))), Some(PsuKind::Ac));
        assert_eq!(power_supply_kind(&psu(json!({"volt": 48}))), Some(PsuKind::Dc));
        assert_eq!(power_supply_kind(&psu(json!({"volt": 64}))), Some(PsuKind::Dc));
        assert_eq!(power_supply_kind(&psu(json!({"type": "PSU-2000", "volt": 64.5}))), Some(PsuKind::Ac));
    }

    #[test]
    fn test_voltage_fallback_uses_magnitude() {
        assert_eq!(power_supply_kind(&psu(json!({"volt": -48}))), Some(PsuKind::Dc));
        assert_eq!(power_supply_kind(&psu(json!({"volt": -230}))), Some(PsuKind::Ac));
    }

    #[test]
    fn test_indeterminate() {
        assert_eq!(power_supply_kind(&psu(json!({}))), None);
        assert_eq!(power_supply_kind(&psu(json!({"volt": 0}))), None);
        assert_eq!(power_supply_kind(&psu(json!({"volt": 0.1}))), None);
        assert_eq!(power_supply_kind(&psu(json!({"volt": "n/a"}))), None);
        assert_eq!(power_supply_kind(&psu(json!({"type": null, "volt": null}))), None);
    }

    #[test]
    fn test_kind_from_volts_nan() {
        assert_eq!(kind_from_volts(f64::NAN), None);
    }
}

//! Envelope parsing and trap output rendering

use crate::encoder::TrapOutput;
use crate::error::{TrapGenError, TrapGenResult};
use crate::event::{ChangeEvent, Envelope};
use crate::snapshot::{value_to_key, PlatformSnapshot};
use crate::tables::{event_fields, PLATFORM_KEY, TRAP_INFO_KEY};
use serde_json::Value;
use std::io::Read;
use tracing::warn;

/// Parse a trap envelope from JSON text
///
/// Envelope format:
/// ```json
/// {
///   "_trap_info_": [
///     {
///       "trigger": "/platform/fan-tray/oper-state",
///       "xpath": "/platform/fan-tray[id=3]/oper-state",
///       "new-value": "failed",
///       "old-value": "up"
///     }
///   ],
///   "platform": {
///     "fan-tray": {"id": 3, "oper-state": "failed", "fan": {"speed": 80}},
///     "power-supply": [{"id": 1, "type": "AC", "volt": 230}]
///   }
/// }
/// ```
pub fn parse_envelope(input: &str) -> TrapGenResult<Envelope> {
    let json: Value = serde_json::from_str(input)?;
    parse_envelope_value(&json)
}

/// Parse a trap envelope from a reader
pub fn parse_envelope_reader<R: Read>(reader: R) -> TrapGenResult<Envelope> {
    let json: Value = serde_json::from_reader(reader)?;
    parse_envelope_value(&json)
}

/// Parse a trap envelope from an already-decoded JSON value
///
/// Only a non-object top level, or an object with neither section, is an
/// error. Sections of the wrong shape are logged and treated as empty.
pub fn parse_envelope_value(json: &Value) -> TrapGenResult<Envelope> {
    let Value::Object(sections) = json else {
        return Err(TrapGenError::invalid_envelope(format!(
            "expected a JSON object, got {}",
            json_kind(json)
        )));
    };

    let trap_info = sections.get(TRAP_INFO_KEY);
    let platform = sections.get(PLATFORM_KEY);
    if trap_info.is_none() && platform.is_none() {
        return Err(TrapGenError::MissingSections);
    }

    let events = match trap_info {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(parse_change_event).collect(),
        Some(single @ Value::Object(_)) => vec![parse_change_event(single)],
        Some(other) => {
            warn!("{} is {}, ignoring it", TRAP_INFO_KEY, json_kind(other));
            Vec::new()
        }
    };

    let platform = match platform {
        Some(Value::Object(tables)) => PlatformSnapshot::from_map(tables),
        None | Some(Value::Null) => PlatformSnapshot::new(),
        Some(other) => {
            warn!("{} is {}, ignoring it", PLATFORM_KEY, json_kind(other));
            PlatformSnapshot::new()
        }
    };

    Ok(Envelope::new(events, platform))
}

/// Parse one change event; unusable fields are left empty
pub fn parse_change_event(json: &Value) -> ChangeEvent {
    let text = |field: &str| json.get(field).and_then(Value::as_str).map(str::to_string);

    ChangeEvent {
        trigger: text(event_fields::TRIGGER),
        new_value: text(event_fields::NEW_VALUE).unwrap_or_default(),
        old_value: text(event_fields::OLD_VALUE).unwrap_or_default(),
        xpath: text(event_fields::XPATH),
        id: json.get(event_fields::ID).and_then(value_to_key),
    }
}

/// Serialize the trap output object
pub fn render_output(output: &TrapOutput, pretty: bool) -> TrapGenResult<String> {
    let text = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    Ok(text)
}

fn json_kind(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

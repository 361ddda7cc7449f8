//! Trap descriptors and the index/object value encoders.

use crate::snapshot::EntityRecord;
use crate::tables::{fan_fields, psu_fields};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use sonic_trap_types::DeviceState;

/// One trap to be sent: notification name plus index and object varbinds.
///
/// `indexes` and `objects` keep insertion order so output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrapDescriptor {
    pub trap: String,
    pub indexes: Map<String, Value>,
    pub objects: Map<String, Value>,
}

impl TrapDescriptor {
    pub fn builder(trap: impl Into<String>) -> TrapBuilder {
        TrapBuilder {
            descriptor: TrapDescriptor {
                trap: trap.into(),
                ..Default::default()
            },
        }
    }

    pub fn index(&self, key: &str) -> Option<&Value> {
        self.indexes.get(key)
    }

    pub fn object(&self, key: &str) -> Option<&Value> {
        self.objects.get(key)
    }
}

/// Incremental construction of a [`TrapDescriptor`].
#[derive(Debug, Clone)]
pub struct TrapBuilder {
    descriptor: TrapDescriptor,
}

impl TrapBuilder {
    pub fn index(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.descriptor.indexes.insert(key.to_string(), value.into());
        self
    }

    pub fn object(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.descriptor.objects.insert(key.to_string(), value.into());
        self
    }

    /// Adds a device state object as its MIB integer.
    pub fn state(self, key: &str, state: DeviceState) -> Self {
        self.object(key, state.as_u8())
    }

    pub fn build(self) -> TrapDescriptor {
        self.descriptor
    }
}

/// The output object handed back to the host: `{"traps": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrapOutput {
    pub traps: Vec<TrapDescriptor>,
}

impl TrapOutput {
    pub fn new(traps: Vec<TrapDescriptor>) -> Self {
        Self { traps }
    }

    pub fn len(&self) -> usize {
        self.traps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traps.is_empty()
    }
}

/// Status of one power feed: a zero (or unreadable) voltage is a failed
/// feed, anything else follows the supply's overall state.
pub fn feed_status(volts: Option<f64>, overall: DeviceState) -> DeviceState {
    if volts.unwrap_or(0.0) == 0.0 {
        DeviceState::Failed
    } else {
        overall
    }
}

/// Statuses of the two power feed slots of a supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedStatus {
    pub feed1: DeviceState,
    pub feed2: DeviceState,
}

/// Computes feed statuses for a supply.
///
/// Dual-feed supplies judge each feed by its own reading. Single-feed
/// supplies judge feed 1 by `volt` and report feed 2 as not equipped.
pub fn power_feed_status(record: &EntityRecord, overall: DeviceState) -> FeedStatus {
    if record.flag(psu_fields::DUAL_FEEDS) {
        FeedStatus {
            feed1: feed_status(record.number(psu_fields::FEED_A_VOLT), overall),
            feed2: feed_status(record.number(psu_fields::FEED_B_VOLT), overall),
        }
    } else {
        FeedStatus {
            feed1: feed_status(record.number(psu_fields::VOLT), overall),
            feed2: DeviceState::NotEquipped,
        }
    }
}

/// Fan speed percentage from the nested `fan.speed` field; 0 when absent or
/// not numeric.
pub fn fan_speed_percent(record: &EntityRecord) -> Value {
    let speed = record
        .field(fan_fields::FAN)
        .and_then(|fan| fan.get(fan_fields::SPEED));

    match speed {
        Some(Value::Number(n)) => Value::Number(n.clone()),
        Some(Value::String(s)) => {
            let s = s.trim();
            if let Ok(v) = s.parse::<i64>() {
                Value::from(v)
            } else {
                s.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::from(0))
            }
        }
        _ => Value::from(0),
    }
}

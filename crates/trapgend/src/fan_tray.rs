//! Fan tray failure / failure-clear traps.

use crate::classify::classify;
use crate::config::{ChassisConfig, FanTrayConfig};
use crate::encoder::{fan_speed_percent, TrapDescriptor};
use crate::event::ChangeEvent;
use crate::handler::TrapHandler;
use crate::matcher::TriggerMatcher;
use crate::policy::{TrapPair, FAN_TRAY_RULE};
use crate::resolver::resolve;
use crate::snapshot::{EntityIndex, EntityRecord};
use crate::tables::{fan_fields, index_keys, object_keys, trap_names, FAN_TRAY_TABLE};
use serde_json::Value;
use sonic_trap_types::{DeviceState, HwClass};
use tracing::debug;

pub const FAN_TRAY_TRAPS: TrapPair =
    TrapPair::new(trap_names::FAN_FAILURE, trap_names::FAN_FAILURE_CLEAR);

/// Oper status reported for a tray: its own `oper-state` when the record has
/// one, the event's new value otherwise.
pub fn fan_oper_status(record: &EntityRecord, new_value: &str) -> DeviceState {
    match record.field(fan_fields::OPER_STATE) {
        None => classify(new_value),
        Some(Value::String(state)) => classify(state),
        Some(_) => DeviceState::Unknown,
    }
}

#[derive(Debug, Clone)]
pub struct FanTrayHandler {
    matcher: TriggerMatcher,
}

impl FanTrayHandler {
    pub fn new(matcher: TriggerMatcher) -> Self {
        Self { matcher }
    }

    pub fn from_config(config: &FanTrayConfig) -> Self {
        Self::new(config.matcher())
    }
}

impl Default for FanTrayHandler {
    fn default() -> Self {
        Self::from_config(&FanTrayConfig::default())
    }
}

impl TrapHandler for FanTrayHandler {
    fn name(&self) -> &str {
        "FanTrayHandler"
    }

    fn entity_table(&self) -> &str {
        FAN_TRAY_TABLE
    }

    fn matcher(&self) -> &TriggerMatcher {
        &self.matcher
    }

    fn synthesize(
        &self,
        event: &ChangeEvent,
        index: &EntityIndex<'_>,
        chassis: &ChassisConfig,
    ) -> Option<TrapDescriptor> {
        // A tray with no id in the event still resolves when it is the only one
        let entity = match resolve(event, index, true) {
            Ok(entity) => entity,
            Err(reason) => {
                debug!("Skipping fan tray event {:?}: {}", event.trigger, reason);
                return None;
            }
        };

        let oper_status = fan_oper_status(entity.record, &event.new_value);

        let Some(kind) = FAN_TRAY_RULE.decide(&event.old_value, &event.new_value) else {
            debug!(
                "No fan tray trap for {} transition {:?} -> {:?}",
                entity.raw_id, event.old_value, event.new_value
            );
            return None;
        };

        let hw_index = HwClass::Fan.hw_index(entity.entity_id);
        debug!(
            "Fan tray {} ({:?}) {:?}: hw index {}",
            entity.entity_id, entity.source, kind, hw_index
        );

        Some(
            TrapDescriptor::builder(FAN_TRAY_TRAPS.name(kind))
                .index(index_keys::CHASSIS_INDEX, chassis.index)
                .index(index_keys::HW_INDEX, hw_index.to_string())
                .index(index_keys::PHYS_CHASSIS_CLASS, chassis.class)
                .index(index_keys::PHYS_CHASSIS_NUM, chassis.num)
                .index(index_keys::FAN_INDEX, entity.entity_id)
                .object(object_keys::HW_CLASS, HwClass::Fan.code())
                .state(object_keys::FAN_OPER_STATUS, oper_status)
                .object(object_keys::FAN_SPEED_PERCENT, fan_speed_percent(entity.record))
                .build(),
        )
    }
}

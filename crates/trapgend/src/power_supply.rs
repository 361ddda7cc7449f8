//! AC power supply failure / failure-clear traps.
//!
//! Only supplies classified as AC produce traps. DC supplies and supplies
//! whose type cannot be determined are skipped.

use crate::classify::{classify, power_supply_kind, PsuKind};
use crate::config::{ChassisConfig, PowerSupplyConfig};
use crate::encoder::{power_feed_status, TrapDescriptor};
use crate::event::ChangeEvent;
use crate::handler::TrapHandler;
use crate::matcher::TriggerMatcher;
use crate::policy::{TrapPair, AC_POWER_SUPPLY_RULE};
use crate::resolver::resolve;
use crate::snapshot::EntityIndex;
use crate::tables::{index_keys, object_keys, trap_names, POWER_SUPPLY_TABLE};
use sonic_trap_types::HwClass;
use tracing::debug;

pub const AC_POWER_SUPPLY_TRAPS: TrapPair = TrapPair::new(
    trap_names::POWER_SUP_AC_FAIL,
    trap_names::POWER_SUP_AC_FAIL_CLEAR,
);

#[derive(Debug, Clone)]
pub struct PowerSupplyHandler {
    matcher: TriggerMatcher,
}

impl PowerSupplyHandler {
    pub fn new(matcher: TriggerMatcher) -> Self {
        Self { matcher }
    }

    pub fn from_config(config: &PowerSupplyConfig) -> Self {
        Self::new(config.matcher())
    }
}

impl Default for PowerSupplyHandler {
    fn default() -> Self {
        Self::from_config(&PowerSupplyConfig::default())
    }
}

impl TrapHandler for PowerSupplyHandler {
    fn name(&self) -> &str {
        "PowerSupplyHandler"
    }

    fn entity_table(&self) -> &str {
        POWER_SUPPLY_TABLE
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
        let entity = match resolve(event, index, false) {
            Ok(entity) => entity,
            Err(reason) => {
                debug!("Skipping power supply event {:?}: {}", event.trigger, reason);
                return None;
            }
        };

        match power_supply_kind(entity.record) {
            Some(PsuKind::Ac) => {}
            kind => {
                debug!(
                    "Skipping power supply {}: not an AC supply ({:?})",
                    entity.raw_id, kind
                );
                return None;
            }
        }

        let Some(kind) = AC_POWER_SUPPLY_RULE.decide(&event.old_value, &event.new_value) else {
            debug!(
                "No power supply trap for {} transition {:?} -> {:?}",
                entity.raw_id, event.old_value, event.new_value
            );
            return None;
        };

        let ac_status = classify(&event.new_value);
        let feeds = power_feed_status(entity.record, ac_status);
        let hw_index = HwClass::PowerSupply.hw_index(entity.entity_id);
        debug!(
            "Power supply {} ({:?}) {:?}: hw index {}, feeds {:?}",
            entity.entity_id, entity.source, kind, hw_index, feeds
        );

        Some(
            TrapDescriptor::builder(AC_POWER_SUPPLY_TRAPS.name(kind))
                .index(index_keys::CHASSIS_INDEX, chassis.index)
                .index(index_keys::HW_INDEX, hw_index.to_string())
                .index(index_keys::POWER_SUP_ID, entity.raw_id.as_str())
                .object(object_keys::HW_CLASS, HwClass::PowerSupply.code())
                .state(object_keys::POWER_SUP_AC_STATUS, ac_status)
                .state(object_keys::POWER_SUP_1_STATUS, feeds.feed1)
                .state(object_keys::POWER_SUP_2_STATUS, feeds.feed2)
                .build(),
        )
    }
}

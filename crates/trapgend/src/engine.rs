//! Trap synthesis engine.
//!
//! One call per envelope: every event is offered, in input order, to each
//! registered [`TrapHandler`] whose matcher accepts it, and the traps they
//! produce are collected in that same order. Entity lookups are built once
//! per envelope. Nothing is kept between calls.

use crate::config::{ChassisConfig, FanTrayConfig, PowerSupplyConfig, TrapGenConfig};
use crate::encoder::TrapOutput;
use crate::error::TrapGenResult;
use crate::event::Envelope;
use crate::fan_tray::FanTrayHandler;
use crate::handler::TrapHandler;
use crate::json_parser::{parse_envelope, render_output};
use crate::power_supply::PowerSupplyHandler;
use crate::snapshot::EntityIndex;
use tracing::{debug, info};

pub struct TrapEngine {
    chassis: ChassisConfig,
    handlers: Vec<Box<dyn TrapHandler>>,
}

impl TrapEngine {
    /// Creates an engine with no handlers registered.
    pub fn new(chassis: ChassisConfig) -> Self {
        Self {
            chassis,
            handlers: Vec::new(),
        }
    }

    /// Creates an engine with the fan tray and power supply handlers enabled
    /// by `config`.
    pub fn from_config(config: &TrapGenConfig) -> Self {
        let mut engine = Self::new(config.chassis.clone());
        if config.fan_tray.enabled {
            engine.register(FanTrayHandler::from_config(&config.fan_tray));
        }
        if config.power_supply.enabled {
            engine.register(PowerSupplyHandler::from_config(&config.power_supply));
        }
        engine
    }

    pub fn register(&mut self, handler: impl TrapHandler + 'static) {
        debug!("Registering trap handler {}", handler.name());
        self.handlers.push(Box::new(handler));
    }

    pub fn with_handler(mut self, handler: impl TrapHandler + 'static) -> Self {
        self.register(handler);
        self
    }

    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn chassis(&self) -> &ChassisConfig {
        &self.chassis
    }

    /// Synthesizes the traps for one envelope.
    pub fn process(&self, envelope: &Envelope) -> TrapOutput {
        let indexes: Vec<EntityIndex<'_>> = self
            .handlers
            .iter()
            .map(|h| EntityIndex::build(envelope.platform.records(h.entity_table())))
            .collect();

        let mut traps = Vec::new();
        for event in &envelope.events {
            let mut matched = false;
            for (handler, index) in self.handlers.iter().zip(&indexes) {
                if !handler.matcher().matches(event) {
                    continue;
                }
                matched = true;
                if let Some(trap) = handler.synthesize(event, index, &self.chassis) {
                    debug!("{} generated {}", handler.name(), trap.trap);
                    traps.push(trap);
                }
            }
            if !matched {
                debug!("Ignoring event with trigger {:?}", event.trigger);
            }
        }

        info!(
            "Processed {} events, generated {} traps",
            envelope.events.len(),
            traps.len()
        );
        TrapOutput::new(traps)
    }

    /// Parses an envelope from JSON text and returns the output object as
    /// JSON text.
    pub fn process_json(&self, input: &str) -> TrapGenResult<String> {
        let envelope = parse_envelope(input)?;
        render_output(&self.process(&envelope), false)
    }
}

impl Default for TrapEngine {
    fn default() -> Self {
        Self::new(ChassisConfig::default())
            .with_handler(FanTrayHandler::from_config(&FanTrayConfig::default()))
            .with_handler(PowerSupplyHandler::from_config(&PowerSupplyConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ChangeEvent;
    use crate::snapshot::{normalize_records, PlatformSnapshot};
    use crate::tables::{FAN_TRAY_TABLE, POWER_SUPPLY_TABLE};
    use serde_json::json;

    fn platform() -> PlatformSnapshot {
        PlatformSnapshot::new()
            .with_table(
                FAN_TRAY_TABLE,
                normalize_records(FAN_TRAY_TABLE, &json!([{"id": 1}, {"id": 2}])),
            )
            .with_table(
                POWER_SUPPLY_TABLE,
                normalize_records(POWER_SUPPLY_TABLE, &json!({"id": 1, "type": "AC", "volt": 230})),
            )
    }

    #[test]
    fn test_default_handlers() {
        let engine = TrapEngine::default();
        assert_eq!(engine.handler_names(), vec!["FanTrayHandler", "PowerSupplyHandler"]);
        assert_eq!(engine.chassis().index, 1);
    }

    #[test]
    fn test_from_config_disables_handlers() {
        let mut config = TrapGenConfig::default();
        config.power_supply.enabled = false;
        let engine = TrapEngine::from_config(&config);
        assert_eq!(engine.handler_names(), vec!["FanTrayHandler"]);
    }

    #[test]
    fn test_output_follows_event_order() {
        let envelope = Envelope::new(
            vec![
                ChangeEvent::new("/platform/power-supply/oper-state", "down", "up").with_id("1"),
                ChangeEvent::new("/platform/fan-tray/oper-state", "failed", "up").with_id("2"),
                ChangeEvent::new("/platform/fan-tray/oper-state", "up", "failed").with_id("1"),
            ],
            platform(),
        );

        let output = TrapEngine::default().process(&envelope);
        let names: Vec<&str> = output.traps.iter().map(|t| t.trap.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "tmnxEqPhysChassPowerSupAcFail",
                "tmnxEqPhysChassFanFailure",
                "tmnxEqPhysChassFanFailureClear",
            ]
        );
    }

    #[test]
    fn test_unmatched_events_are_ignored() {
        let envelope = Envelope::new(
            vec![
                ChangeEvent::new("/platform/line-card/oper-state", "failed", "up").with_id("1"),
                ChangeEvent::default(),
            ],
            platform(),
        );
        assert!(TrapEngine::default().process(&envelope).is_empty());
    }

    #[test]
    fn test_engine_without_handlers() {
        let envelope = Envelope::new(
            vec![ChangeEvent::new("/platform/fan-tray/oper-state", "failed", "up").with_id("1")],
            platform(),
        );
        assert!(TrapEngine::new(ChassisConfig::default()).process(&envelope).is_empty());
    }

    #[test]
    fn test_process_json() {
        let out = TrapEngine::default()
            .process_json(r#"{"_trap_info_": [], "platform": {}}"#)
            .unwrap();
        assert_eq!(out, r#"{"traps":[]}"#);

        assert!(TrapEngine::default().process_json("{}").is_err());
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TrapEngine>();
    }
}

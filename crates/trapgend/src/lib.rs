//! # trapgend - Platform Trap Generator
//!
//! Turns operational state changes of chassis hardware into SNMP trap
//! descriptors. The host hands over an envelope holding a batch of change
//! events (`_trap_info_`) and a snapshot of the platform state (`platform`);
//! trapgend answers with `{"traps": [...]}`, each entry naming the
//! notification and carrying its index and object varbinds.
//!
//! ## Monitored hardware
//! - Fan trays: `tmnxEqPhysChassFanFailure` / `tmnxEqPhysChassFanFailureClear`
//! - AC power supplies: `tmnxEqPhysChassPowerSupAcFail` / `tmnxEqPhysChassPowerSupAcFailClear`
//!
//! ## Pipeline
//! For each event: trigger matching, entity resolution, state
//! classification, the raise/clear decision, then index/object encoding.
//! SNMP encoding and delivery belong to the host.
//!
//! # Example
//!
//! ```
//! use sonic_trapgend::TrapEngine;
//!
//! let input = r#"{
//!   "_trap_info_": [{"trigger": "/platform/fan-tray/oper-state",
//!                    "xpath": "/platform/fan-tray[id=3]/oper-state",
//!                    "new-value": "failed", "old-value": "up"}],
//!   "platform": {"fan-tray": {"id": 3, "fan": {"speed": 80}}}
//! }"#;
//!
//! let output = TrapEngine::default().process_json(input).unwrap();
//! assert!(output.contains("tmnxEqPhysChassFanFailure"));
//! ```

pub mod classify;
pub mod config;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod event;
pub mod fan_tray;
pub mod handler;
pub mod json_parser;
pub mod matcher;
pub mod policy;
pub mod power_supply;
pub mod resolver;
pub mod snapshot;
pub mod tables;

pub use config::TrapGenConfig;
pub use encoder::{TrapDescriptor, TrapOutput};
pub use engine::TrapEngine;
pub use error::{TrapGenError, TrapGenResult};
pub use event::{ChangeEvent, Envelope};
pub use handler::TrapHandler;
pub use json_parser::{parse_envelope, parse_envelope_reader, render_output};
pub use snapshot::{EntityRecord, PlatformSnapshot};

pub use sonic_trap_types::{DeviceState, HwClass, HwIndex};

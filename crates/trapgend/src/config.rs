//! Configuration file support for trapgend
//!
//! Loads and validates trapgend configuration from TOML files.
//! Default location: /etc/sonic/trapgend.toml

use crate::error::{TrapGenError, TrapGenResult};
use crate::matcher::TriggerMatcher;
use crate::tables::{
    FAN_TRAY_SUBTREE, OPER_STATE_LEAF, POWER_SUPPLY_SUBTREE, TRAPGEND_CONFIG_FILE,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Chassis identification placed in every trap's indexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChassisConfig {
    /// tmnxChassisIndex
    #[serde(default = "default_chassis_index")]
    pub index: i64,

    /// tmnxPhysChassisClass
    #[serde(default = "default_chassis_class")]
    pub class: i64,

    /// tmnxPhysChassisNum
    #[serde(default = "default_chassis_num")]
    pub num: i64,
}

/// Fan tray monitoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanTrayConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Trigger prefix for fan tray events
    #[serde(default = "default_fan_tray_subtree")]
    pub subtree: String,

    /// Trigger suffix for the monitored leaf
    #[serde(default = "default_leaf")]
    pub leaf: String,
}

/// Power supply monitoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerSupplyConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Trigger prefix for power supply events
    #[serde(default = "default_power_supply_subtree")]
    pub subtree: String,

    /// Trigger suffix for the monitored leaf
    #[serde(default = "default_leaf")]
    pub leaf: String,
}

/// Complete trapgend configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapGenConfig {
    #[serde(default)]
    pub chassis: ChassisConfig,

    #[serde(default)]
    pub fan_tray: FanTrayConfig,

    #[serde(default)]
    pub power_supply: PowerSupplyConfig,
}

// Default functions
fn default_chassis_index() -> i64 {
    1
}

fn default_chassis_class() -> i64 {
    3
}

fn default_chassis_num() -> i64 {
    1
}

fn default_enabled() -> bool {
    true
}

fn default_fan_tray_subtree() -> String {
    FAN_TRAY_SUBTREE.to_string()
}

fn default_power_supply_subtree() -> String {
    POWER_SUPPLY_SUBTREE.to_string()
}

fn default_leaf() -> String {
    OPER_STATE_LEAF.to_string()
}

// Default implementations
impl Default for ChassisConfig {
    fn default() -> Self {
        Self {
            index: default_chassis_index(),
            class: default_chassis_class(),
            num: default_chassis_num(),
        }
    }
}

impl Default for FanTrayConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            subtree: default_fan_tray_subtree(),
            leaf: default_leaf(),
        }
    }
}

impl Default for PowerSupplyConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            subtree: default_power_supply_subtree(),
            leaf: default_leaf(),
        }
    }
}

impl FanTrayConfig {
    pub fn matcher(&self) -> TriggerMatcher {
        TriggerMatcher::new(&self.subtree, &self.leaf)
    }
}

impl PowerSupplyConfig {
    pub fn matcher(&self) -> TriggerMatcher {
        TriggerMatcher::new(&self.subtree, &self.leaf)
    }
}

impl TrapGenConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> TrapGenResult<Self> {
        toml::from_str(content)
            .map_err(|e| TrapGenError::configuration("toml", e.to_string()))
    }

    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> TrapGenResult<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => {
                let config = toml::from_str(&content).map_err(|e| {
                    TrapGenError::configuration(
                        path.display().to_string(),
                        format!("failed to parse config file: {}", e),
                    )
                })?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(TrapGenError::Io(e)),
        }
    }

    /// Load from default location or defaults
    pub fn load() -> TrapGenResult<Self> {
        Self::load_or_default(TRAPGEND_CONFIG_FILE)
    }

    /// Validate configuration
    pub fn validate(&self) -> TrapGenResult<()> {
        validate_path("fan_tray.subtree", &self.fan_tray.subtree)?;
        validate_path("fan_tray.leaf", &self.fan_tray.leaf)?;
        validate_path("power_supply.subtree", &self.power_supply.subtree)?;
        validate_path("power_supply.leaf", &self.power_supply.leaf)?;
        Ok(())
    }
}

fn validate_path(field: &str, value: &str) -> TrapGenResult<()> {
    if value.is_empty() {
        return Err(TrapGenError::configuration(field, "must not be empty"));
    }
    if !value.starts_with('/') {
        return Err(TrapGenError::configuration(field, "must start with '/'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = TrapGenConfig::default();
        assert_eq!(config.chassis.index, 1);
        assert_eq!(config.chassis.class, 3);
        assert_eq!(config.chassis.num, 1);
        assert!(config.fan_tray.enabled);
        assert_eq!(config.fan_tray.subtree, "/platform/fan-tray");
        assert_eq!(config.power_supply.subtree, "/platform/power-supply");
        assert_eq!(config.power_supply.leaf, "/oper-state");
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(TrapGenConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_relative_subtree() {
        let mut config = TrapGenConfig::default();
        config.fan_tray.subtree = "platform/fan-tray".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fan_tray.subtree"));
    }

    #[test]
    fn test_validate_empty_leaf() {
        let mut config = TrapGenConfig::default();
        config.power_supply.leaf = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_deserialization_partial() {
        let config = TrapGenConfig::from_toml_str(
            r#"
[chassis]
index = 2

[power_supply]
enabled = false
"#,
        )
        .unwrap();
        assert_eq!(config.chassis.index, 2);
        // Unspecified values should use defaults
        assert_eq!(config.chassis.class, 3);
        assert!(!config.power_supply.enabled);
        assert_eq!(config.power_supply.subtree, "/platform/power-supply");
        assert!(config.fan_tray.enabled);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = TrapGenConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("/platform/fan-tray"));
        assert_eq!(TrapGenConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_toml_invalid() {
        assert!(TrapGenConfig::from_toml_str("[chassis\nindex = ").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[fan_tray]\nsubtree = \"/chassis/fan-tray\"").unwrap();
        file.flush().unwrap();

        let config = TrapGenConfig::load_or_default(file.path()).unwrap();
        assert_eq!(config.fan_tray.subtree, "/chassis/fan-tray");
        assert_eq!(config.fan_tray.matcher().subtree(), "/chassis/fan-tray");
    }

    #[test]
    fn test_load_nonexistent_file_defaults() {
        let config = TrapGenConfig::load_or_default("/nonexistent/trapgend.toml").unwrap();
        assert_eq!(config, TrapGenConfig::default());
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "fan_tray = 7").unwrap();
        file.flush().unwrap();

        assert!(TrapGenConfig::load_or_default(file.path()).is_err());
    }
}

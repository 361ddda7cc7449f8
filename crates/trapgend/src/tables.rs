//! Envelope, field and trap vocabulary constants

// Envelope sections
pub const TRAP_INFO_KEY: &str = "_trap_info_";
pub const PLATFORM_KEY: &str = "platform";

// Platform entity tables
pub const FAN_TRAY_TABLE: &str = "fan-tray";
pub const POWER_SUPPLY_TABLE: &str = "power-supply";

// Monitored subtrees and leaf
pub const FAN_TRAY_SUBTREE: &str = "/platform/fan-tray";
pub const POWER_SUPPLY_SUBTREE: &str = "/platform/power-supply";
pub const OPER_STATE_LEAF: &str = "/oper-state";

// Change event field names
pub mod event_fields {
    pub const TRIGGER: &str = "trigger";
    pub const NEW_VALUE: &str = "new-value";
    pub const OLD_VALUE: &str = "old-value";
    pub const XPATH: &str = "xpath";
    pub const ID: &str = "id";
}

// Entity record field names
pub mod record_fields {
    pub const ID: &str = "id";
}

// fan-tray field names
pub mod fan_fields {
    pub const OPER_STATE: &str = "oper-state";
    pub const FAN: &str = "fan";
    pub const SPEED: &str = "speed";
}

// power-supply field names
pub mod psu_fields {
    pub const TYPE: &str = "type";
    pub const VOLT: &str = "volt";
    pub const DUAL_FEEDS: &str = "dual_feeds";
    pub const FEED_A_VOLT: &str = "feed_a_volt";
    pub const FEED_B_VOLT: &str = "feed_b_volt";
}

// Notification names (TIMETRA-CHASSIS-MIB)
pub mod trap_names {
    pub const FAN_FAILURE: &str = "tmnxEqPhysChassFanFailure";
    pub const FAN_FAILURE_CLEAR: &str = "tmnxEqPhysChassFanFailureClear";
    pub const POWER_SUP_AC_FAIL: &str = "tmnxEqPhysChassPowerSupAcFail";
    pub const POWER_SUP_AC_FAIL_CLEAR: &str = "tmnxEqPhysChassPowerSupAcFailClear";
}

// Trap index keys
pub mod index_keys {
    pub const CHASSIS_INDEX: &str = "tmnxChassisIndex";
    pub const HW_INDEX: &str = "tmnxHwIndex";
    pub const PHYS_CHASSIS_CLASS: &str = "tmnxPhysChassisClass";
    pub const PHYS_CHASSIS_NUM: &str = "tmnxPhysChassisNum";
    pub const FAN_INDEX: &str = "tmnxPhysChassisFanIndex";
    pub const POWER_SUP_ID: &str = "tmnxPhysChassPowerSupId";
}

// Trap object keys
pub mod object_keys {
    pub const HW_CLASS: &str = "tmnxHwClass";
    pub const FAN_OPER_STATUS: &str = "tmnxPhysChassisFanOperStatus";
    pub const FAN_SPEED_PERCENT: &str = "tmnxPhysChassisFanSpeedPercent";
    pub const POWER_SUP_AC_STATUS: &str = "tmnxPhysChassPowerSupACStatus";
    pub const POWER_SUP_1_STATUS: &str = "tmnxPhysChassPowerSup1Status";
    pub const POWER_SUP_2_STATUS: &str = "tmnxPhysChassPowerSup2Status";
}

// Default configuration file path
pub const TRAPGEND_CONFIG_FILE: &str = "/etc/sonic/trapgend.toml";

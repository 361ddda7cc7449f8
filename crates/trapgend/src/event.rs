//! Change events and the input envelope.

use crate::snapshot::PlatformSnapshot;

/// One item from the `_trap_info_` batch.
///
/// Fields that are absent (or not strings) in the source JSON are `None` for
/// the optional ones and empty for the state values, so a malformed event
/// simply never matches or never triggers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Path of the changed leaf, e.g. `/platform/fan-tray/oper-state`.
    pub trigger: Option<String>,

    /// Raw state after the change.
    pub new_value: String,

    /// Raw state before the change.
    pub old_value: String,

    /// Instance path with key predicates, e.g. `/platform/fan-tray[id=2]/oper-state`.
    pub xpath: Option<String>,

    /// Entity id carried directly by the event.
    pub id: Option<String>,
}

impl ChangeEvent {
    pub fn new(
        trigger: impl Into<String>,
        new_value: impl Into<String>,
        old_value: impl Into<String>,
    ) -> Self {
        Self {
            trigger: Some(trigger.into()),
            new_value: new_value.into(),
            old_value: old_value.into(),
            xpath: None,
            id: None,
        }
    }

    pub fn with_xpath(mut self, xpath: impl Into<String>) -> Self {
        self.xpath = Some(xpath.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A parsed input envelope: the event batch plus the device state snapshot.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    pub events: Vec<ChangeEvent>,
    pub platform: PlatformSnapshot,
}

impl Envelope {
    pub fn new(events: Vec<ChangeEvent>, platform: PlatformSnapshot) -> Self {
        Self { events, platform }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_event_builders() {
        let event = ChangeEvent::new("/platform/fan-tray/oper-state", "failed", "up")
            .with_xpath("/platform/fan-tray[id=3]/oper-state")
            .with_id("3");

        assert_eq!(event.trigger.as_deref(), Some("/platform/fan-tray/oper-state"));
        assert_eq!(event.new_value, "failed");
        assert_eq!(event.old_value, "up");
        assert_eq!(
            event.xpath.as_deref(),
            Some("/platform/fan-tray[id=3]/oper-state")
        );
        assert_eq!(event.id.as_deref(), Some("3"));
    }

    #[test]
    fn test_default_event_is_empty() {
        let event = ChangeEvent::default();
        assert!(event.trigger.is_none());
        assert!(event.new_value.is_empty());
        assert!(event.old_value.is_empty());
    }
}

//! Trigger matching: which events belong to a monitored entity class.

use crate::event::ChangeEvent;

/// Matches event triggers against a subtree prefix and a leaf suffix.
///
/// Both checks are plain string comparisons; there are no wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatcher {
    subtree: String,
    leaf: String,
}

impl TriggerMatcher {
    pub fn new(subtree: impl Into<String>, leaf: impl Into<String>) -> Self {
        Self {
            subtree: subtree.into(),
            leaf: leaf.into(),
        }
    }

    pub fn subtree(&self) -> &str {
        &self.subtree
    }

    pub fn leaf(&self) -> &str {
        &self.leaf
    }

    pub fn matches_path(&self, trigger: &str) -> bool {
        trigger.starts_with(&self.subtree) && trigger.ends_with(&self.leaf)
    }

    /// Events without a trigger never match.
    pub fn matches(&self, event: &ChangeEvent) -> bool {
        event
            .trigger
            .as_deref()
            .is_some_and(|trigger| self.matches_path(trigger))
    }
}

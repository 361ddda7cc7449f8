//! Per-entity-class trap handler trait.

use crate::config::ChassisConfig;
use crate::encoder::TrapDescriptor;
use crate::event::ChangeEvent;
use crate::matcher::TriggerMatcher;
use crate::snapshot::EntityIndex;

/// Synthesizes traps for one monitored entity class.
///
/// The engine offers every event to every registered handler whose matcher
/// accepts it. A handler resolves the entity, classifies its state, applies
/// its transition rule and encodes the trap, or returns `None` when the
/// event is not trap-worthy.
///
/// Handlers hold no mutable state, so one engine can be shared across
/// threads.
pub trait TrapHandler: Send + Sync {
    /// Returns the name of this handler (for logging).
    fn name(&self) -> &str;

    /// Platform table holding this class's records, e.g. `fan-tray`.
    fn entity_table(&self) -> &str;

    /// Matcher selecting the events this handler cares about.
    fn matcher(&self) -> &TriggerMatcher;

    /// Builds the trap for a matched event, if any.
    fn synthesize(
        &self,
        event: &ChangeEvent,
        index: &EntityIndex<'_>,
        chassis: &ChassisConfig,
    ) -> Option<TrapDescriptor>;
}

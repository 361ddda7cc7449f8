//! Entity resolution: from a change event to the record it talks about.
//!
//! The identifier is taken from the first source that carries one:
//!
//! 1. an `[id=<value>]` predicate in the event's `xpath`
//! 2. an `[id=<value>]` predicate in the event's `trigger`
//! 3. the event's own `id` field
//!
//! and compared by string equality against the records' `id` fields. A class
//! may additionally allow an event with no identifier at all to resolve to the
//! only record of a single-record snapshot.

use crate::event::ChangeEvent;
use crate::snapshot::{EntityIndex, EntityRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Key predicate carrying the entity id, e.g. `[id=2]`.
static ID_PREDICATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[id=([^\]]+)\]").expect("Invalid regex pattern"));

/// Where the entity identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    /// Predicate in the event `xpath`.
    Xpath,
    /// Predicate in the event `trigger`.
    Trigger,
    /// The event's `id` field.
    Event,
    /// No identifier; the snapshot holds a single record.
    SoleRecord,
}

/// Why an event could not be tied to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    /// The event carries no identifier.
    NoIdentifier,
    /// No record has the identifier.
    NotFound(String),
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::NoIdentifier => write!(f, "event carries no entity id"),
            Unresolved::NotFound(id) => write!(f, "no entity with id {}", id),
        }
    }
}

/// A record matched to an event.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntity<'a> {
    /// Identifier as it appeared in the input.
    pub raw_id: String,
    /// Identifier coerced to an integer for indexing.
    pub entity_id: i64,
    pub record: &'a EntityRecord,
    pub source: IdSource,
}

/// Extracts the value of an `[id=...]` predicate from a path.
pub fn predicate_id(path: &str) -> Option<&str> {
    ID_PREDICATE_RE
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Identifier carried by an event, with its source.
pub fn event_entity_id(event: &ChangeEvent) -> Option<(String, IdSource)> {
    if let Some(id) = event.xpath.as_deref().and_then(predicate_id) {
        return Some((id.to_string(), IdSource::Xpath));
    }
    if let Some(id) = event.trigger.as_deref().and_then(predicate_id) {
        return Some((id.to_string(), IdSource::Trigger));
    }
    event.id.clone().map(|id| (id, IdSource::Event))
}

/// Integer form of an identifier; non-numeric ids index as 0.
pub fn coerce_entity_id(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0)
}

/// Resolves the record an event refers to.
pub fn resolve<'a>(
    event: &ChangeEvent,
    index: &EntityIndex<'a>,
    allow_sole_record: bool,
) -> Result<ResolvedEntity<'a>, Unresolved> {
    match event_entity_id(event) {
        Some((raw_id, source)) => {
            let record = index
                .get(&raw_id)
                .ok_or_else(|| Unresolved::NotFound(raw_id.clone()))?;
            Ok(ResolvedEntity {
                entity_id: coerce_entity_id(&raw_id),
                raw_id,
                record,
                source,
            })
        }
        None if allow_sole_record => {
            let record = index.sole().ok_or(Unresolved::NoIdentifier)?;
            let raw_id = record.id_key().unwrap_or_default();
            Ok(ResolvedEntity {
                entity_id: coerce_entity_id(&raw_id),
                raw_id,
                record,
                source: IdSource::SoleRecord,
            })
        }
        None => Err(Unresolved::NoIdentifier),
    }
}

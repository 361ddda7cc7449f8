//! Device state snapshot: entity records and per-class id lookup.
//!
//! The `platform` section of an envelope holds, per entity class, either a
//! single record or a sequence of records. Both shapes are normalized to a
//! sequence here, once, so nothing downstream needs to check the shape again.

use crate::tables::record_fields;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// One fan tray or power supply record, kept as the raw field map.
///
/// Records come from heterogeneous sources, so typed accessors are lenient:
/// they return `None` rather than failing on unexpected value types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRecord(Map<String, Value>);

impl EntityRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builds a record from a JSON value; only objects are records.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned().map(Self)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Field as a number, accepting numeric strings and booleans.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(value_as_f64)
    }

    /// Field truthiness; absent fields are false.
    pub fn flag(&self, name: &str) -> bool {
        self.field(name).is_some_and(is_truthy)
    }

    /// String form of the `id` field, used as the lookup key.
    pub fn id_key(&self) -> Option<String> {
        self.field(record_fields::ID).and_then(value_to_key)
    }
}

impl From<Map<String, Value>> for EntityRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// String form of a scalar used for id comparison.
///
/// Numbers use their JSON rendering, so `3` and `"3"` compare equal.
pub fn value_to_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numeric reading of a scalar; `None` when it cannot be read as a number.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Truthiness: false for null, false, zero, and empty strings/arrays/objects.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Text form of a scalar; null and absent become the empty string.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Normalizes "one record or many" into a sequence of records.
///
/// Non-object items in a sequence are dropped.
pub fn normalize_records(table: &str, value: &Value) -> Vec<EntityRecord> {
    match value {
        Value::Object(_) => EntityRecord::from_value(value).into_iter().collect(),
        Value::Array(items) => {
            let records: Vec<EntityRecord> =
                items.iter().filter_map(EntityRecord::from_value).collect();
            if records.len() != items.len() {
                warn!(
                    "Dropped {} non-object entries from platform table {}",
                    items.len() - records.len(),
                    table
                );
            }
            records
        }
        Value::Null => Vec::new(),
        other => {
            warn!("Platform table {} is neither a record nor a list: {}", table, other);
            Vec::new()
        }
    }
}

/// The `platform` section: entity class name → normalized records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformSnapshot {
    tables: BTreeMap<String, Vec<EntityRecord>>,
}

impl PlatformSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from the raw `platform` object.
    pub fn from_map(platform: &Map<String, Value>) -> Self {
        let tables = platform
            .iter()
            .map(|(table, value)| (table.clone(), normalize_records(table, value)))
            .collect();
        Self { tables }
    }

    pub fn insert(&mut self, table: impl Into<String>, records: Vec<EntityRecord>) {
        self.tables.insert(table.into(), records);
    }

    /// Builder form of [`PlatformSnapshot::insert`].
    pub fn with_table(mut self, table: impl Into<String>, records: Vec<EntityRecord>) -> Self {
        self.insert(table, records);
        self
    }

    /// Records of a class; empty when the class is absent.
    pub fn records(&self, table: &str) -> &[EntityRecord] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(Vec::is_empty)
    }
}

/// Id → record lookup over one entity class, built once per envelope.
#[derive(Debug, Clone)]
pub struct EntityIndex<'a> {
    records: &'a [EntityRecord],
    by_id: HashMap<String, &'a EntityRecord>,
}

impl<'a> EntityIndex<'a> {
    /// Indexes records by their `id`. Records without an id are not
    /// addressable; on duplicate ids the first record wins.
    pub fn build(records: &'a [EntityRecord]) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            if let Some(key) = record.id_key() {
                by_id.entry(key).or_insert(record);
            }
        }
        Self { records, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a EntityRecord> {
        self.by_id.get(id).copied()
    }

    /// The only record of the class, if there is exactly one.
    pub fn sole(&self) -> Option<&'a EntityRecord> {
        match self.records {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> EntityRecord {
        EntityRecord::from_value(&value).unwrap()
    }

    #[test]
    fn test_normalize_single_record() {
        let records = normalize_records("fan-tray", &json!({"id": 1}));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id_key().as_deref(), Some("1"));
    }

    #[test]
    fn test_normalize_sequence_drops_non_objects() {
        let records = normalize_records("fan-tray", &json!([{"id": 1}, 7, {"id": "2"}, null]));
        let ids: Vec<_> = records.iter().filter_map(EntityRecord::id_key).collect();
        assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_normalize_null_and_scalar() {
        assert!(normalize_records("fan-tray", &Value::Null).is_empty());
        assert!(normalize_records("fan-tray", &json!("oops")).is_empty());
    }

    #[test]
    fn test_snapshot_from_map() {
        let platform = json!({
            "fan-tray": {"id": 1},
            "power-supply": [{"id": 1}, {"id": 2}]
        });
        let snapshot = PlatformSnapshot::from_map(platform.as_object().unwrap());

        assert_eq!(snapshot.records("fan-tray").len(), 1);
        assert_eq!(snapshot.records("power-supply").len(), 2);
        assert!(snapshot.records("line-card").is_empty());
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_value_to_key() {
        assert_eq!(value_to_key(&json!(3)), Some("3".to_string()));
        assert_eq!(value_to_key(&json!("3")), Some("3".to_string()));
        assert_eq!(value_to_key(&json!(null)), None);
        assert_eq!(value_to_key(&json!([1])), None);
    }

    #[test]
    fn test_value_as_f64() {
        assert_eq!(value_as_f64(&json!(48)), Some(48.0));
        assert_eq!(value_as_f64(&json!("220.5")), Some(220.5));
        assert_eq!(value_as_f64(&json!(" 12 ")), Some(12.0));
        assert_eq!(value_as_f64(&json!(true)), Some(1.0));
        assert_eq!(value_as_f64(&json!("48V")), None);
        assert_eq!(value_as_f64(&json!(null)), None);
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(null)));
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(Some(&json!("AC"))), "AC");
        assert_eq!(value_text(Some(&json!(48))), "48");
        assert_eq!(value_text(Some(&Value::Null)), "");
        assert_eq!(value_text(None), "");
    }

    #[test]
    fn test_record_accessors() {
        let psu = record(json!({"id": 2, "type": "AC", "volt": "230", "dual_feeds": true}));
        assert_eq!(psu.str_field("type"), Some("AC"));
        assert_eq!(psu.number("volt"), Some(230.0));
        assert!(psu.flag("dual_feeds"));
        assert!(!psu.flag("missing"));
        assert_eq!(psu.number("missing"), None);
    }

    #[test]
    fn test_entity_index_lookup() {
        let records = vec![
            record(json!({"id": 1, "tag": "first"})),
            record(json!({"id": "2"})),
            record(json!({"tag": "no-id"})),
            record(json!({"id": 1, "tag": "duplicate"})),
        ];
        let index = EntityIndex::build(&records);

        assert_eq!(index.len(), 4);
        assert_eq!(index.get("1").and_then(|r| r.str_field("tag")), Some("first"));
        assert!(index.get("2").is_some());
        assert!(index.get("3").is_none());
        assert!(index.sole().is_none());
    }

    #[test]
    fn test_entity_index_sole() {
        let records = vec![record(json!({"oper-state": "up"}))];
        let index = EntityIndex::build(&records);
        assert!(index.sole().is_some());

        let empty: Vec<EntityRecord> = Vec::new();
        let index = EntityIndex::build(&empty);
        assert!(index.is_empty());
        assert!(index.sole().is_none());
    }
}

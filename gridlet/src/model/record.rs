//! Dynamic row record

use std::collections::HashMap;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Value;
use crate::error::FieldError;

/// A dynamic record: named fields holding [`Value`]s.
///
/// Records remember the order fields were first set in, which is what column
/// derivation uses when no explicit column list is configured. Typed getter
/// methods provide safe access with proper error handling.
///
/// # Example
///
/// ```
/// use gridlet::model::Record;
///
/// let record = Record::new()
///     .set("name", "Ada")
///     .set("score", 1_000_000i64);
///
/// assert_eq!(record.get_str("name").unwrap(), Some("Ada"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// The field values.
    fields: HashMap<String, Value>,

    /// Field names in first-set order.
    order: Vec<String>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            order: Vec::new(),
        }
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the field names in first-set order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts a field value. Re-setting an existing field keeps its original
    /// position in the field order.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        if self.fields.insert(field.clone(), value.into()).is_none() {
            self.order.push(field);
        }
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        let removed = self.fields.remove(field);
        if removed.is_some() {
            self.order.retain(|name| name != field);
        }
        removed
    }

    // =========================================================================
    // Typed getters
    // =========================================================================

    /// Returns a string field.
    ///
    /// Errors when the field is missing or holds a non-string value; a `Null`
    /// field is `Ok(None)`.
    pub fn get_str(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.require(field)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Err(FieldError::type_mismatch(field, "string", other.type_name())),
        }
    }

    /// Returns an integer field.
    pub fn get_i64(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.require(field)? {
            Value::Null => Ok(None),
            Value::Int(i) => Ok(Some(*i)),
            other => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Returns a floating-point field. `Int` values widen to `f64`.
    pub fn get_f64(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.require(field)? {
            Value::Null => Ok(None),
            Value::Int(i) => Ok(Some(*i as f64)),
            Value::Float(f) => Ok(Some(*f)),
            other => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Returns a boolean field.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.require(field)? {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            other => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Returns a datetime field.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.require(field)? {
            Value::Null => Ok(None),
            Value::DateTime(dt) => Ok(Some(*dt)),
            other => Err(FieldError::type_mismatch(
                field,
                "datetime",
                other.type_name(),
            )),
        }
    }

    fn require(&self, field: &str) -> Result<&Value, FieldError> {
        self.fields
            .get(field)
            .ok_or_else(|| FieldError::missing(field))
    }
}

/// Records are equal when they hold the same named values. Field order is a
/// presentation detail and does not participate.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for name in &self.order {
            map.serialize_entry(name, &self.fields[name])?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a row record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            record.insert(key, refine(value));
        }
        Ok(record)
    }
}

/// Upgrades string values that are ISO 8601 timestamps to `DateTime`.
///
/// An untagged enum matches `String` before it would try `DateTime`, so the
/// refinement happens here, after the fact.
fn refine(value: Value) -> Value {
    if let Value::String(s) = &value
        && let Ok(dt) = DateTime::parse_from_rfc3339(s)
    {
        return Value::DateTime(dt.with_timezone(&Utc));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_preserved() {
        let record = Record::new().set("b", 1i64).set("a", 2i64).set("c", 3i64);
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_reset_keeps_position() {
        let record = Record::new().set("x", 1i64).set("y", 2i64).set("x", 3i64);
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, ["x", "y"]);
        assert_eq!(record.get("x"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = Record::new().set("x", 1i64).set("y", 2i64);
        let b = Record::new().set("y", 2i64).set("x", 1i64);
        assert_eq!(a, b);
    }

    #[test]
    fn test_typed_getters() {
        let record = Record::new().set("name", "Ada").set("age", 36i64);
        assert_eq!(record.get_str("name").unwrap(), Some("Ada"));
        assert_eq!(record.get_i64("age").unwrap(), Some(36));
        assert_eq!(record.get_f64("age").unwrap(), Some(36.0));
        assert!(record.get_str("age").is_err());
        assert!(record.get_str("missing").is_err());
    }

    #[test]
    fn test_deserialize_preserves_document_order() {
        let json = r#"{"z": 1, "m": "two", "a": 3.5}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, ["z", "m", "a"]);
        assert_eq!(record.get("z"), Some(&Value::Int(1)));
        assert_eq!(record.get("a"), Some(&Value::Float(3.5)));
    }

    #[test]
    fn test_deserialize_refines_timestamps() {
        let json = r#"{"when": "2001-02-03T04:05:06Z", "what": "launch"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert!(matches!(record.get("when"), Some(Value::DateTime(_))));
        assert_eq!(record.get_str("what").unwrap(), Some("launch"));
    }

    #[test]
    fn test_serialize_in_field_order() {
        let record = Record::new().set("b", 1i64).set("a", 2i64);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"b":1,"a":2}"#);
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::LoggerError;

/// A single structured record handed to the logger.
///
/// The caller supplies an open mapping from string keys to JSON values;
/// no schema is enforced. `timestamp`, `seq` and `namespace` are stamped
/// by the logger when the record is accepted, so values set by the caller
/// on those fields are overwritten.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    /// Per-logger sequence number, assigned in acceptance order.
    pub seq: u64,
    /// Namespace of the logger that accepted the record.
    pub namespace: String,
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record. Fields are added with [`Record::field`].
    pub fn new() -> Self {
        Record {
            timestamp: Utc::now(),
            seq: 0,
            namespace: String::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a field, builder style.
    ///
    /// ```
    /// use object_logger::record::Record;
    ///
    /// let record = Record::new()
    ///     .field("data", "somedata here")
    ///     .field("number", 3);
    /// assert_eq!(record.fields.len(), 2);
    /// ```
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Build a record from an untyped JSON value.
    ///
    /// **Returns**
    /// - `Ok(record)` if `value` is a JSON object.
    /// - `Err(LoggerError::InvalidRecord)` for any other JSON shape.
    pub fn from_value(value: Value) -> Result<Self, LoggerError> {
        match value {
            Value::Object(map) => Ok(Record::from(map)),
            other => Err(LoggerError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            ))),
        }
    }
}

impl Default for Record {
    fn default() -> Self {
        Record::new()
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Record { fields, ..Record::new() }
    }
}

impl From<serde_json::Map<String, Value>> for Record {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Record::from(map.into_iter().collect::<BTreeMap<_, _>>())
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record::from(iter.into_iter().collect::<BTreeMap<_, _>>())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

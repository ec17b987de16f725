//! Schema-less JSON record.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Kind of a [`Record`] node, used in accessor errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Null,
    Bool,
    Number,
    String,
    List,
    Map,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Null => "null",
            RecordKind::Bool => "bool",
            RecordKind::Number => "number",
            RecordKind::String => "string",
            RecordKind::List => "list",
            RecordKind::Map => "map",
        };
        f.write_str(name)
    }
}

/// Accessor failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: RecordKind,
        found: RecordKind,
    },

    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("number {0} is not representable as the requested type")]
    NumberRange(String),
}

/// A node in an arbitrary JSON object graph.
///
/// Maps are keyed by field name; key order is not significant. Lists keep
/// their order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Record {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Record>),
    Map(BTreeMap<String, Record>),
}

impl Record {
    /// Parse a JSON document.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize to compact JSON text.
    pub fn to_json(&self) -> String {
        Value::from(self.clone()).to_string()
    }

    /// Serialize to indented JSON text.
    pub fn to_json_pretty(&self) -> String {
        // Serializing a Value into a String cannot fail.
        serde_json::to_string_pretty(&Value::from(self.clone())).unwrap_or_default()
    }

    /// An empty map.
    pub fn map() -> Self {
        Record::Map(BTreeMap::new())
    }

    /// Build a map from key/value pairs.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Record>,
    {
        Record::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Null => RecordKind::Null,
            Record::Bool(_) => RecordKind::Bool,
            Record::Number(_) => RecordKind::Number,
            Record::String(_) => RecordKind::String,
            Record::List(_) => RecordKind::List,
            Record::Map(_) => RecordKind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Record::Null)
    }

    fn mismatch(&self, expected: RecordKind) -> RecordError {
        RecordError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_bool(&self) -> Result<bool, RecordError> {
        match self {
            Record::Bool(b) => Ok(*b),
            other => Err(other.mismatch(RecordKind::Bool)),
        }
    }

    pub fn as_str(&self) -> Result<&str, RecordError> {
        match self {
            Record::String(s) => Ok(s.as_str()),
            other => Err(other.mismatch(RecordKind::String)),
        }
    }

    pub fn as_i64(&self) -> Result<i64, RecordError> {
        match self {
            Record::Number(n) => n
                .as_i64()
                .ok_or_else(|| RecordError::NumberRange(n.to_string())),
            other => Err(other.mismatch(RecordKind::Number)),
        }
    }

    pub fn as_u64(&self) -> Result<u64, RecordError> {
        match self {
            Record::Number(n) => n
                .as_u64()
                .ok_or_else(|| RecordError::NumberRange(n.to_string())),
            other => Err(other.mismatch(RecordKind::Number)),
        }
    }

    pub fn as_f64(&self) -> Result<f64, RecordError> {
        match self {
            Record::Number(n) => n
                .as_f64()
                .ok_or_else(|| RecordError::NumberRange(n.to_string())),
            other => Err(other.mismatch(RecordKind::Number)),
        }
    }

    pub fn as_list(&self) -> Result<&[Record], RecordError> {
        match self {
            Record::List(items) => Ok(items.as_slice()),
            other => Err(other.mismatch(RecordKind::List)),
        }
    }

    pub fn as_map(&self) -> Result<&BTreeMap<String, Record>, RecordError> {
        match self {
            Record::Map(fields) => Ok(fields),
            other => Err(other.mismatch(RecordKind::Map)),
        }
    }

    /// Field of a map; fails if this is not a map or the field is absent.
    pub fn get(&self, field: &str) -> Result<&Record, RecordError> {
        self.as_map()?
            .get(field)
            .ok_or_else(|| RecordError::MissingField(field.to_string()))
    }

    /// Field of a map, `None` when absent or when this is not a map.
    pub fn field(&self, field: &str) -> Option<&Record> {
        match self {
            Record::Map(fields) => fields.get(field),
            _ => None,
        }
    }

    /// Element of a list.
    pub fn index(&self, index: usize) -> Result<&Record, RecordError> {
        let items = self.as_list()?;
        items.get(index).ok_or(RecordError::IndexOutOfBounds {
            index,
            len: items.len(),
        })
    }

    /// Follow a dotted path such as `"owner.roles.0"`; numeric segments index lists.
    pub fn path(&self, path: &str) -> Result<&Record, RecordError> {
        path.split('.').try_fold(self, |node, segment| match node {
            Record::List(_) => match segment.parse::<usize>() {
                Ok(i) => node.index(i),
                Err(_) => Err(node.mismatch(RecordKind::Map)),
            },
            _ => node.get(segment),
        })
    }

    /// Set a field, turning `Null` into an empty map first.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Record>,
    ) -> Result<Option<Record>, RecordError> {
        if self.is_null() {
            *self = Record::map();
        }
        match self {
            Record::Map(fields) => Ok(fields.insert(field.into(), value.into())),
            other => Err(other.mismatch(RecordKind::Map)),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Record::Null,
            Value::Bool(b) => Record::Bool(b),
            Value::Number(n) => Record::Number(n),
            Value::String(s) => Record::String(s),
            Value::Array(items) => Record::List(items.into_iter().map(Record::from).collect()),
            Value::Object(fields) => Record::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Record::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        match record {
            Record::Null => Value::Null,
            Record::Bool(b) => Value::Bool(b),
            Record::Number(n) => Value::Number(n),
            Record::String(s) => Value::String(s),
            Record::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Record::Map(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Record::Null => serializer.serialize_unit(),
            Record::Bool(b) => serializer.serialize_bool(*b),
            Record::Number(n) => n.serialize(serializer),
            Record::String(s) => serializer.serialize_str(s),
            Record::List(items) => items.serialize(serializer),
            Record::Map(fields) => fields.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Record::from)
    }
}

impl From<bool> for Record {
    fn from(b: bool) -> Self {
        Record::Bool(b)
    }
}

impl From<i64> for Record {
    fn from(n: i64) -> Self {
        Record::Number(n.into())
    }
}

impl From<u64> for Record {
    fn from(n: u64) -> Self {
        Record::Number(n.into())
    }
}

impl From<i32> for Record {
    fn from(n: i32) -> Self {
        Record::Number(n.into())
    }
}

/// Non-finite floats have no JSON form and become `Null`.
impl From<f64> for Record {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Record::Null, Record::Number)
    }
}

impl From<&str> for Record {
    fn from(s: &str) -> Self {
        Record::String(s.to_string())
    }
}

impl From<String> for Record {
    fn from(s: String) -> Self {
        Record::String(s)
    }
}

impl<T: Into<Record>> From<Option<T>> for Record {
    fn from(value: Option<T>) -> Self {
        value.map_or(Record::Null, Into::into)
    }
}

impl<T: Into<Record>> From<Vec<T>> for Record {
    fn from(items: Vec<T>) -> Self {
        Record::List(items.into_iter().map(Into::into).collect())
    }
}

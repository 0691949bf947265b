use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// One row's data: field identifier to value, in field order.
pub type Record = IndexMap<String, FieldValue>;

/// A value that brings its own serialization.
///
/// `to_field_value` is the serialization hook: the value is written out as
/// whatever it returns, recursively. `clone_boxed` must return an independent
/// copy, because tables deep-copy values whenever they derive a new table.
pub trait CustomValue: fmt::Debug + Send + Sync {
    fn to_field_value(&self) -> FieldValue;

    fn clone_boxed(&self) -> Box<dyn CustomValue>;
}

impl Clone for Box<dyn CustomValue> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// A field payload.
///
/// Cells read from a worksheet arrive as `String`; the other variants only
/// appear when a transform produces them. Every variant owns its data, so
/// `clone` is always a deep copy.
#[derive(Debug, Clone, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<FieldValue>),
    Map(Record),
    Custom(Box<dyn CustomValue>),
}

impl FieldValue {
    /// Wrap a custom value.
    #[must_use]
    pub fn custom<T: CustomValue + 'static>(value: T) -> Self {
        FieldValue::Custom(Box::new(value))
    }

    /// Check if the value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Borrow the text of a string value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<FieldValue>> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<FieldValue>> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Record> {
        match self {
            FieldValue::Map(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Record> {
        match self {
            FieldValue::Map(record) => Some(record),
            _ => None,
        }
    }

    /// Resolve custom values through their hook, recursively.
    ///
    /// Plain values come back as an unchanged copy.
    #[must_use]
    pub fn resolved(&self) -> FieldValue {
        match self {
            FieldValue::Custom(custom) => custom.to_field_value().resolved(),
            FieldValue::List(items) => FieldValue::List(items.iter().map(Self::resolved).collect()),
            FieldValue::Map(record) => FieldValue::Map(
                record
                    .iter()
                    .map(|(k, v)| (k.clone(), v.resolved()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::List(a), FieldValue::List(b)) => a == b,
            (FieldValue::Map(a), FieldValue::Map(b)) => a == b,
            (FieldValue::Custom(a), other) => a.to_field_value() == *other,
            (this, FieldValue::Custom(b)) => *this == b.to_field_value(),
            _ => false,
        }
    }
}

impl PartialEq<&str> for FieldValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::List(items) => items.serialize(serializer),
            FieldValue::Map(record) => record.serialize(serializer),
            FieldValue::Custom(custom) => custom.to_field_value().serialize(serializer),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Record> for FieldValue {
    fn from(record: Record) -> Self {
        FieldValue::Map(record)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

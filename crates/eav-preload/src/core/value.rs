//! Record and field value types.
//!
//! Records arrive verbatim from the source or destination store as
//! field-name → scalar mappings. Keys derived from them use [`KeyValue`],
//! a hashable subset of [`Value`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PreloadError, Result};

use super::traits::Side;

/// Scalar value of a record field.
///
/// Untagged so snapshot files can use plain JSON/YAML scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL.
    Null,

    /// Boolean value.
    Bool(bool),

    /// Integer value (ids, flags, sort orders).
    Int(i64),

    /// Floating point value.
    Float(f64),

    /// Text value.
    Text(String),
}

impl Value {
    /// Borrow the text content, if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer content, if this is an integer value.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Hashable key component derived from a [`Value`].
///
/// Text that spells a canonical decimal integer is stored as [`KeyValue::Int`],
/// so `"5"` read from one store and `5` read from another address the same
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    Null,
    Int(i64),
    Text(String),
}

impl KeyValue {
    /// Convert a field value into a key component.
    ///
    /// Floats are truncated toward zero (`4.0` and `4.7` both key as `4`).
    /// Returns `None` for NaN, infinities and floats outside the `i64` range.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(KeyValue::Null),
            Value::Bool(v) => Some(KeyValue::Int(i64::from(*v))),
            Value::Int(v) => Some(KeyValue::Int(*v)),
            Value::Float(v) => truncated_int(*v).map(KeyValue::Int),
            Value::Text(s) => Some(KeyValue::from(s.as_str())),
        }
    }
}

/// `v` truncated toward zero, if it fits in `i64`.
fn truncated_int(v: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range.
    if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Some(v.trunc() as i64)
    } else {
        None
    }
}

/// `-?[1-9][0-9]*` or `0`, and within `i64` range.
fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let canonical = match digits.as_bytes() {
        [] => false,
        [b'0'] => digits.len() == s.len(),
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
    };
    if canonical {
        s.parse().ok()
    } else {
        None
    }
}

impl From<&str> for KeyValue {
    fn from(s: &str) -> Self {
        match canonical_int(s) {
            Some(v) => KeyValue::Int(v),
            None => KeyValue::Text(s.to_string()),
        }
    }
}

impl From<String> for KeyValue {
    fn from(s: String) -> Self {
        match canonical_int(&s) {
            Some(v) => KeyValue::Int(v),
            None => KeyValue::Text(s),
        }
    }
}

impl From<i64> for KeyValue {
    fn from(v: i64) -> Self {
        KeyValue::Int(v)
    }
}

impl From<i32> for KeyValue {
    fn from(v: i32) -> Self {
        KeyValue::Int(i64::from(v))
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Null => f.write_str("NULL"),
            KeyValue::Int(v) => write!(f, "{}", v),
            KeyValue::Text(v) => write!(f, "{:?}", v),
        }
    }
}

/// A single row read from a store: field name → value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Get a text field.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Get a field that must be present.
    pub fn require(&self, field: &str, side: Side, collection: &str) -> Result<&Value> {
        self.get(field)
            .ok_or_else(|| PreloadError::missing_field(side, collection, field))
    }

    /// Get a field that must be present, as a key component.
    pub fn key_value(&self, field: &str, side: Side, collection: &str) -> Result<KeyValue> {
        let value = self.require(field, side, collection)?;
        KeyValue::from_value(value).ok_or_else(|| PreloadError::InvalidKey {
            side,
            collection: collection.to_string(),
            field: field.to_string(),
            value: format!("{:?}", value),
        })
    }
}

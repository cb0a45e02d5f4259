//! Index key types.
//!
//! Multi-field keys are kept as typed tuples instead of joined strings, so a
//! separator character inside a field value can never make two different
//! records collide.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::traits::Side;
use super::value::{KeyValue, Record};

/// Key built from one or more record fields, in declared field order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompositeKey(Vec<KeyValue>);

impl CompositeKey {
    /// Create a key from its parts.
    pub fn new(parts: Vec<KeyValue>) -> Self {
        Self(parts)
    }

    /// Extract a key from a record.
    ///
    /// Fails if any of `fields` is absent or holds a non-key value.
    pub fn from_record(
        record: &Record,
        fields: &[&str],
        side: Side,
        collection: &str,
    ) -> Result<Self> {
        fields
            .iter()
            .map(|field| record.key_value(field, side, collection))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Key parts in declared order.
    pub fn parts(&self) -> &[KeyValue] {
        &self.0
    }

    /// Consume a single-field key, returning its only part.
    ///
    /// Returns `None` if the key does not have exactly one part.
    pub fn into_single(self) -> Option<KeyValue> {
        let [part]: [KeyValue; 1] = self.0.try_into().ok()?;
        Some(part)
    }

    /// Consume a two-field key, returning both parts.
    pub fn into_pair(self) -> Option<(KeyValue, KeyValue)> {
        let [a, b]: [KeyValue; 2] = self.0.try_into().ok()?;
        Some((a, b))
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", part)?;
        }
        f.write_str(")")
    }
}

impl From<KeyValue> for CompositeKey {
    fn from(part: KeyValue) -> Self {
        Self(vec![part])
    }
}

/// Destination attribute key: attribute ids are assigned independently on
/// each side, so `(entity_type_id, attribute_code)` is the comparable key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeKey {
    pub entity_type_id: KeyValue,
    pub attribute_code: KeyValue,
}

impl AttributeKey {
    /// Record fields the key is built from, in key order.
    pub const FIELDS: [&'static str; 2] = ["entity_type_id", "attribute_code"];

    pub fn new(entity_type_id: impl Into<KeyValue>, attribute_code: impl Into<KeyValue>) -> Self {
        Self {
            entity_type_id: entity_type_id.into(),
            attribute_code: attribute_code.into(),
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.entity_type_id, self.attribute_code)
    }
}

/// Attribute group key: group names are unique within one attribute set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeGroupKey {
    pub attribute_set_id: KeyValue,
    pub attribute_group_name: KeyValue,
}

impl AttributeGroupKey {
    /// Record fields the key is built from, in key order.
    pub const FIELDS: [&'static str; 2] = ["attribute_set_id", "attribute_group_name"];

    pub fn new(
        attribute_set_id: impl Into<KeyValue>,
        attribute_group_name: impl Into<KeyValue>,
    ) -> Self {
        Self {
            attribute_set_id: attribute_set_id.into(),
            attribute_group_name: attribute_group_name.into(),
        }
    }
}

impl fmt::Display for AttributeGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.attribute_set_id, self.attribute_group_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_key_keeps_separator_values_apart() {
        // Joined with "-", both would read "a-b-c".
        let first = CompositeKey::new(vec![KeyValue::from("a-b"), KeyValue::from("c")]);
        let second = CompositeKey::new(vec![KeyValue::from("a"), KeyValue::from("b-c")]);
        assert_ne!(first, second);
    }

    #[test]
    fn test_into_pair_requires_two_parts() {
        let key = CompositeKey::new(vec![KeyValue::Int(4), KeyValue::from("General")]);
        assert_eq!(
            key.into_pair(),
            Some((KeyValue::Int(4), KeyValue::Text("General".into())))
        );

        let single = CompositeKey::from(KeyValue::Int(4));
        assert_eq!(single.clone().into_pair(), None);
        assert_eq!(single.into_single(), Some(KeyValue::Int(4)));
    }

    #[test]
    fn test_composite_key_display() {
        let key = CompositeKey::new(vec![KeyValue::Int(4), KeyValue::from("sku")]);
        assert_eq!(key.to_string(), r#"(4, "sku")"#);
    }
}

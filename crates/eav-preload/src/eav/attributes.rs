//! Attribute index.
//!
//! Source attributes are keyed by `attribute_id`, which other source tables
//! reference directly. Destination attributes are keyed by
//! `(entity_type_id, attribute_code)`, the only key comparable across sides.

use tracing::debug;

use crate::config::DuplicateKeyPolicy;
use crate::core::{AttributeKey, Index, KeyValue, RecordReader, Side};
use crate::error::Result;

use super::{pair_key, single_key};

/// Field the source attribute index is keyed on.
const SOURCE_KEY_FIELD: &str = "attribute_id";

/// Attributes of both sides, each keyed the way the side is looked up.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeIndex {
    /// Source attributes by `attribute_id`.
    pub source: Index<KeyValue>,

    /// Destination attributes by `(entity_type_id, attribute_code)`.
    pub destination: Index<AttributeKey>,
}

impl AttributeIndex {
    /// Number of attributes loaded for a side.
    pub fn len(&self, side: Side) -> usize {
        match side {
            Side::Source => self.source.len(),
            Side::Destination => self.destination.len(),
        }
    }
}

pub(crate) fn load(
    reader: &impl RecordReader,
    collection: &str,
    policy: DuplicateKeyPolicy,
) -> Result<AttributeIndex> {
    let mut index = AttributeIndex::default();

    let side = Side::Source;
    for (key, record) in reader.fetch_all_keyed(side, collection, &[SOURCE_KEY_FIELD])? {
        let id = single_key(key, side, collection, SOURCE_KEY_FIELD)?;
        index.source.insert(id, record, policy, side, collection)?;
    }

    let side = Side::Destination;
    for (key, record) in reader.fetch_all_keyed(side, collection, &AttributeKey::FIELDS)? {
        let (entity_type_id, attribute_code) = pair_key(key, side, collection, &AttributeKey::FIELDS)?;
        let key = AttributeKey {
            entity_type_id,
            attribute_code,
        };
        index.destination.insert(key, record, policy, side, collection)?;
    }

    debug!(
        "Indexed {} source and {} destination attributes",
        index.source.len(),
        index.destination.len()
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Record;
    use crate::error::PreloadError;
    use crate::reader::MemoryReader;

    fn attribute(id: i64, entity_type_id: i64, code: &str) -> Record {
        Record::new()
            .with("attribute_id", id)
            .with("entity_type_id", entity_type_id)
            .with("attribute_code", code)
    }

    #[test]
    fn test_sides_keyed_differently() {
        let reader = MemoryReader::new()
            .with_records(Side::Source, "eav_attribute", [attribute(71, 4, "name")])
            .with_records(Side::Destination, "eav_attribute", [attribute(73, 4, "name")]);

        let index = load(&reader, "eav_attribute", DuplicateKeyPolicy::LastWriteWins).unwrap();

        assert!(index.source.contains_key(&KeyValue::Int(71)));
        assert!(index.destination.contains_key(&AttributeKey::new(4, "name")));
        assert_eq!(index.len(Side::Source), 1);
        assert_eq!(index.len(Side::Destination), 1);
    }

    #[test]
    fn test_destination_not_keyed_by_id() {
        let reader = MemoryReader::new()
            .with_records(Side::Destination, "eav_attribute", [attribute(73, 4, "name")]);

        let index = load(&reader, "eav_attribute", DuplicateKeyPolicy::LastWriteWins).unwrap();

        assert!(!index.destination.keys().any(|k| k.entity_type_id == KeyValue::Int(73)));
        assert!(index.source.is_empty());
    }

    #[test]
    fn test_destination_missing_code_fails() {
        let reader = MemoryReader::new().with_records(
            Side::Destination,
            "eav_attribute",
            [Record::new().with("attribute_id", 73).with("entity_type_id", 4)],
        );

        let err = load(&reader, "eav_attribute", DuplicateKeyPolicy::LastWriteWins).unwrap_err();
        assert!(matches!(err, PreloadError::MissingField { ref field, .. } if field == "attribute_code"));
    }
}

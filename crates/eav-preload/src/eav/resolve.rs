//! Cross-side lookups over preloaded metadata.
//!
//! Entity types are matched across sides by `entity_type_code`, attributes by
//! `(entity type, attribute_code)`.

use crate::core::{AttributeGroupKey, AttributeKey, KeyValue, Record};

use super::EavMetadata;

fn key_of(record: &Record, field: &str) -> Option<KeyValue> {
    record.get(field).and_then(KeyValue::from_value)
}

impl EavMetadata {
    /// Destination entity type with the same code as a source entity type.
    pub fn destination_entity_type(&self, source_entity_type_id: &KeyValue) -> Option<&Record> {
        let source = self.entity_types.source.by_id.get(source_entity_type_id)?;
        let code = key_of(source, "entity_type_code")?;
        self.entity_types.destination.by_code.get(&code)
    }

    /// Destination `entity_type_id` for a source `entity_type_id`.
    pub fn destination_entity_type_id(&self, source_entity_type_id: &KeyValue) -> Option<KeyValue> {
        self.destination_entity_type(source_entity_type_id)
            .and_then(|record| key_of(record, "entity_type_id"))
    }

    /// Destination attribute matching a source attribute.
    ///
    /// `None` when the source attribute is unknown, its entity type has no
    /// destination counterpart, or the destination lacks the attribute code.
    pub fn destination_attribute(&self, source_attribute_id: &KeyValue) -> Option<&Record> {
        let source = self.attributes.source.get(source_attribute_id)?;
        let source_entity_type_id = key_of(source, "entity_type_id")?;
        let key = AttributeKey {
            entity_type_id: self.destination_entity_type_id(&source_entity_type_id)?,
            attribute_code: key_of(source, "attribute_code")?,
        };
        self.attributes.destination.get(&key)
    }

    /// Destination attribute group by set and name.
    pub fn attribute_group(
        &self,
        attribute_set_id: impl Into<KeyValue>,
        attribute_group_name: impl Into<KeyValue>,
    ) -> Option<&Record> {
        let key = AttributeGroupKey::new(attribute_set_id, attribute_group_name);
        self.attribute_groups.destination().get(&key)
    }

    /// Destination attribute groups belonging to one attribute set.
    pub fn attribute_groups_in_set<'a>(
        &'a self,
        attribute_set_id: &'a KeyValue,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.attribute_groups
            .destination()
            .iter()
            .filter(move |(key, _)| &key.attribute_set_id == attribute_set_id)
            .map(|(_, record)| record)
    }
}

//! EAV metadata preload.
//!
//! Loads entity types, attributes, attribute sets and attribute groups from
//! both stores once, before record-level migration starts, and keeps them in
//! read-only lookup indices:
//!
//! | Collection      | Source key       | Destination key                          |
//! |-----------------|------------------|------------------------------------------|
//! | entity types    | id and code      | id and code                              |
//! | attributes      | `attribute_id`   | `(entity_type_id, attribute_code)`       |
//! | attribute sets  | not loaded       | `attribute_set_id`                       |
//! | attribute groups| not loaded       | `(attribute_set_id, attribute_group_name)` |
//!
//! [`EavMetadata::load`] always builds every index before returning. A
//! [`Preloader`] wraps it for hosts that hold the reader and want `init()`
//! semantics: the first call loads, later calls return the same metadata.

mod attributes;
mod entity_types;
mod resolve;
mod sets;

pub use attributes::AttributeIndex;
pub use entity_types::{EntityTypeIndex, EntityTypeKey};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{Collection, PreloadConfig};
use crate::core::{
    AttributeGroupKey, CompositeKey, DestinationOnly, DualSided, Index, KeyValue, RecordReader,
    Side,
};
use crate::error::{PreloadError, Result};

/// Preloaded EAV metadata of both stores.
#[derive(Debug, Clone, PartialEq)]
pub struct EavMetadata {
    entity_types: DualSided<EntityTypeIndex>,
    attributes: AttributeIndex,
    attribute_sets: DestinationOnly<Index<KeyValue>>,
    attribute_groups: DestinationOnly<Index<AttributeGroupKey>>,
}

impl EavMetadata {
    /// Read all four collections and build their indices.
    ///
    /// Build order is attribute sets, attribute groups, attributes, entity
    /// types. An invalid configuration, the first reader error or a
    /// malformed record aborts the load; no partially built metadata is
    /// returned.
    pub fn load<R: RecordReader>(reader: &R, config: &PreloadConfig) -> Result<Self> {
        config.validate()?;
        let names = &config.collections;
        let policy = config.duplicate_keys;
        info!("Preloading EAV metadata (duplicate keys: {:?})", policy);

        let attribute_sets =
            sets::load_attribute_sets(reader, names.name(Collection::AttributeSet), policy)?;
        let attribute_groups =
            sets::load_attribute_groups(reader, names.name(Collection::AttributeGroup), policy)?;
        let attributes = attributes::load(reader, names.name(Collection::Attribute), policy)?;
        let entity_types = entity_types::load(reader, names.name(Collection::EntityType), policy)?;

        let metadata = Self {
            entity_types,
            attributes,
            attribute_sets,
            attribute_groups,
        };
        info!("EAV metadata loaded: {}", metadata.summary());
        Ok(metadata)
    }

    /// Entity types of a side, indexed by `key`.
    pub fn entity_types(&self, side: Side, key: EntityTypeKey) -> &Index<KeyValue> {
        self.entity_types.get(side).get(key)
    }

    /// Both entity type indices of a side.
    pub fn entity_type_index(&self, side: Side) -> &EntityTypeIndex {
        self.entity_types.get(side)
    }

    /// Attributes of both sides.
    pub fn attributes(&self) -> &AttributeIndex {
        &self.attributes
    }

    /// Destination attribute sets by `attribute_set_id`.
    pub fn attribute_sets(&self) -> &DestinationOnly<Index<KeyValue>> {
        &self.attribute_sets
    }

    /// Destination attribute groups by `(attribute_set_id, attribute_group_name)`.
    pub fn attribute_groups(&self) -> &DestinationOnly<Index<AttributeGroupKey>> {
        &self.attribute_groups
    }

    /// Record counts per index.
    pub fn summary(&self) -> PreloadSummary {
        PreloadSummary {
            source_entity_types: self.entity_types.source.by_id.len(),
            destination_entity_types: self.entity_types.destination.by_id.len(),
            source_attributes: self.attributes.source.len(),
            destination_attributes: self.attributes.destination.len(),
            attribute_sets: self.attribute_sets.destination().len(),
            attribute_groups: self.attribute_groups.destination().len(),
        }
    }
}

/// Number of indexed records per collection and side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreloadSummary {
    pub source_entity_types: usize,
    pub destination_entity_types: usize,
    pub source_attributes: usize,
    pub destination_attributes: usize,
    /// Destination only.
    pub attribute_sets: usize,
    /// Destination only.
    pub attribute_groups: usize,
}

impl fmt::Display for PreloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entity types {}/{}, attributes {}/{} (source/destination), {} attribute sets, {} attribute groups",
            self.source_entity_types,
            self.destination_entity_types,
            self.source_attributes,
            self.destination_attributes,
            self.attribute_sets,
            self.attribute_groups
        )
    }
}

/// Lazily loaded [`EavMetadata`] bound to a reader.
///
/// Accessing metadata before [`init`](Self::init) yields `None`. A failed
/// `init` stores nothing, so a later call starts over.
pub struct Preloader<R> {
    reader: R,
    config: PreloadConfig,
    metadata: Option<EavMetadata>,
}

impl<R: RecordReader> Preloader<R> {
    /// Create a preloader; nothing is read until [`init`](Self::init).
    pub fn new(reader: R, config: PreloadConfig) -> Self {
        Self {
            reader,
            config,
            metadata: None,
        }
    }

    /// Load the metadata on first call; later calls return it unchanged.
    pub fn init(&mut self) -> Result<&EavMetadata> {
        match self.metadata {
            Some(ref metadata) => Ok(metadata),
            None => {
                let metadata = EavMetadata::load(&self.reader, &self.config)?;
                Ok(&*self.metadata.insert(metadata))
            }
        }
    }

    /// The loaded metadata, if [`init`](Self::init) has succeeded.
    pub fn metadata(&self) -> Option<&EavMetadata> {
        self.metadata.as_ref()
    }

    /// Check whether [`init`](Self::init) has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.metadata.is_some()
    }

    /// The reader the metadata is loaded from.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Mutable access to the reader, e.g. to reconnect before retrying `init`.
    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consume the preloader, returning the loaded metadata if any.
    pub fn into_metadata(self) -> Option<EavMetadata> {
        self.metadata
    }
}

/// Unwrap a reader-produced key that must have one part.
fn single_key(key: CompositeKey, side: Side, collection: &str, field: &str) -> Result<KeyValue> {
    let shown = key.to_string();
    key.into_single().ok_or_else(|| {
        PreloadError::fetch(
            side,
            collection,
            format!("reader returned key {} for field [{}]", shown, field),
        )
    })
}

/// Unwrap a reader-produced key that must have two parts.
fn pair_key(
    key: CompositeKey,
    side: Side,
    collection: &str,
    fields: &[&str],
) -> Result<(KeyValue, KeyValue)> {
    let shown = key.to_string();
    key.into_pair().ok_or_else(|| {
        PreloadError::fetch(
            side,
            collection,
            format!("reader returned key {} for fields [{}]", shown, fields.join(", ")),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KeyedRecords, Record};
    use crate::reader::MemoryReader;
    use std::cell::RefCell;

    /// Records which collections were fetched, in order.
    struct TracingReader {
        inner: MemoryReader,
        fetched: RefCell<Vec<(Side, String)>>,
    }

    impl RecordReader for TracingReader {
        fn fetch_all(&self, side: Side, collection: &str) -> Result<Vec<Record>> {
            self.fetched.borrow_mut().push((side, collection.to_string()));
            self.inner.fetch_all(side, collection)
        }
    }

    /// Returns keys of the wrong arity from its keyed fetch.
    struct ShortKeyReader;

    impl RecordReader for ShortKeyReader {
        fn fetch_all(&self, _side: Side, _collection: &str) -> Result<Vec<Record>> {
            Ok(Vec::new())
        }

        fn fetch_all_keyed(&self, _: Side, _: &str, _: &[&str]) -> Result<KeyedRecords> {
            Ok(vec![(
                CompositeKey::from(KeyValue::Int(4)),
                Record::new().with("attribute_group_name", "General"),
            )])
        }
    }

    #[test]
    fn test_load_order() {
        let reader = TracingReader {
            inner: MemoryReader::new(),
            fetched: RefCell::new(Vec::new()),
        };

        EavMetadata::load(&reader, &PreloadConfig::default()).unwrap();

        let fetched = reader.fetched.into_inner();
        let expected = [
            (Side::Destination, "eav_attribute_set"),
            (Side::Destination, "eav_attribute_group"),
            (Side::Source, "eav_attribute"),
            (Side::Destination, "eav_attribute"),
            (Side::Source, "eav_entity_type"),
            (Side::Destination, "eav_entity_type"),
        ];
        assert_eq!(fetched.len(), expected.len());
        for ((side, name), (want_side, want_name)) in fetched.iter().zip(expected) {
            assert_eq!(*side, want_side);
            assert_eq!(name, want_name);
        }
    }

    #[test]
    fn test_wrong_key_arity_is_a_fetch_error() {
        let err = EavMetadata::load(&ShortKeyReader, &PreloadConfig::default()).unwrap_err();
        assert!(matches!(err, PreloadError::Fetch { .. }));
    }

    #[test]
    fn test_summary_display() {
        let summary = PreloadSummary {
            source_entity_types: 8,
            destination_entity_types: 9,
            source_attributes: 120,
            destination_attributes: 140,
            attribute_sets: 3,
            attribute_groups: 21,
        };
        assert_eq!(
            summary.to_string(),
            "entity types 8/9, attributes 120/140 (source/destination), 3 attribute sets, 21 attribute groups"
        );
    }

    #[test]
    fn test_preloader_uninitialized() {
        let preloader = Preloader::new(MemoryReader::new(), PreloadConfig::default());
        assert!(preloader.metadata().is_none());
        assert!(!preloader.is_loaded());
    }
}

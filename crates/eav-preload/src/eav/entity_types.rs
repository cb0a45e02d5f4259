//! Entity type index: every entity type of a side, reachable by id and by code.

use tracing::debug;

use crate::config::DuplicateKeyPolicy;
use crate::core::{DualSided, Index, KeyValue, RecordReader, Side};
use crate::error::Result;

/// Field an entity type index is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityTypeKey {
    /// `entity_type_id`, the store-assigned numeric id.
    Id,

    /// `entity_type_code`, the symbolic code (e.g. `catalog_product`).
    #[default]
    Code,
}

impl EntityTypeKey {
    /// Record field backing this key.
    pub fn field(&self) -> &'static str {
        match self {
            EntityTypeKey::Id => "entity_type_id",
            EntityTypeKey::Code => "entity_type_code",
        }
    }
}

/// Both entity type indices of one side.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityTypeIndex {
    pub by_id: Index<KeyValue>,
    pub by_code: Index<KeyValue>,
}

impl EntityTypeIndex {
    /// The index keyed on `key`.
    pub fn get(&self, key: EntityTypeKey) -> &Index<KeyValue> {
        match key {
            EntityTypeKey::Id => &self.by_id,
            EntityTypeKey::Code => &self.by_code,
        }
    }
}

/// Load entity types of both sides, source first.
pub(crate) fn load(
    reader: &impl RecordReader,
    collection: &str,
    policy: DuplicateKeyPolicy,
) -> Result<DualSided<EntityTypeIndex>> {
    let source = load_side(reader, Side::Source, collection, policy)?;
    let destination = load_side(reader, Side::Destination, collection, policy)?;
    Ok(DualSided::new(source, destination))
}

fn load_side(
    reader: &impl RecordReader,
    side: Side,
    collection: &str,
    policy: DuplicateKeyPolicy,
) -> Result<EntityTypeIndex> {
    let records = reader.fetch_all(side, collection)?;
    let mut index = EntityTypeIndex {
        by_id: Index::with_capacity(records.len()),
        by_code: Index::with_capacity(records.len()),
    };

    for record in records {
        let id = record.key_value(EntityTypeKey::Id.field(), side, collection)?;
        let code = record.key_value(EntityTypeKey::Code.field(), side, collection)?;
        index.by_id.insert(id, record.clone(), policy, side, collection)?;
        index.by_code.insert(code, record, policy, side, collection)?;
    }

    debug!(
        "Indexed {} {} entity types ({} codes)",
        index.by_id.len(),
        side,
        index.by_code.len()
    );
    Ok(index)
}

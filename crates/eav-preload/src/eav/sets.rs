//! Destination attribute set and attribute group indices.
//!
//! Sets and groups are created on the destination during migration rather
//! than copied by id, so only the destination side is loaded.

use tracing::debug;

use crate::config::DuplicateKeyPolicy;
use crate::core::{AttributeGroupKey, DestinationOnly, Index, KeyValue, RecordReader, Side};
use crate::error::Result;

use super::{pair_key, single_key};

/// Field the attribute set index is keyed on.
const SET_KEY_FIELD: &str = "attribute_set_id";

pub(crate) fn load_attribute_sets(
    reader: &impl RecordReader,
    collection: &str,
    policy: DuplicateKeyPolicy,
) -> Result<DestinationOnly<Index<KeyValue>>> {
    let side = Side::Destination;
    let records = reader.fetch_all_keyed(side, collection, &[SET_KEY_FIELD])?;
    let mut index = Index::with_capacity(records.len());

    for (key, record) in records {
        let id = single_key(key, side, collection, SET_KEY_FIELD)?;
        index.insert(id, record, policy, side, collection)?;
    }

    debug!("Indexed {} destination attribute sets", index.len());
    Ok(DestinationOnly::new(index))
}

pub(crate) fn load_attribute_groups(
    reader: &impl RecordReader,
    collection: &str,
    policy: DuplicateKeyPolicy,
) -> Result<DestinationOnly<Index<AttributeGroupKey>>> {
    let side = Side::Destination;
    let records = reader.fetch_all_keyed(side, collection, &AttributeGroupKey::FIELDS)?;
    let mut index = Index::with_capacity(records.len());

    for (key, record) in records {
        let (attribute_set_id, attribute_group_name) =
            pair_key(key, side, collection, &AttributeGroupKey::FIELDS)?;
        let key = AttributeGroupKey {
            attribute_set_id,
            attribute_group_name,
        };
        index.insert(key, record, policy, side, collection)?;
    }

    debug!("Indexed {} destination attribute groups", index.len());
    Ok(DestinationOnly::new(index))
}

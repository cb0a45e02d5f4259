//! In-memory record reader.
//!
//! [`MemoryReader`] serves collections from a [`Snapshot`] held in memory.
//! Hosts use it for offline dry runs against captured store contents; the
//! test suite uses it in place of live stores.

mod snapshot;

pub use snapshot::Snapshot;

use std::path::Path;

use tracing::debug;

use crate::core::{Record, RecordReader, Side};
use crate::error::Result;

/// [`RecordReader`] over in-memory collections.
///
/// Unknown collections read as empty.
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    snapshot: Snapshot,
}

impl MemoryReader {
    /// Create a reader with no collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader over a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Create a reader over a snapshot file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Snapshot::load(path).map(Self::from_snapshot)
    }

    /// Builder-style: append records to a collection of one side.
    #[must_use]
    pub fn with_records(
        mut self,
        side: Side,
        collection: impl Into<String>,
        records: impl IntoIterator<Item = Record>,
    ) -> Self {
        self.extend(side, collection, records);
        self
    }

    /// Append records to a collection of one side.
    pub fn extend(
        &mut self,
        side: Side,
        collection: impl Into<String>,
        records: impl IntoIterator<Item = Record>,
    ) {
        self.snapshot
            .side_mut(side)
            .entry(collection.into())
            .or_default()
            .extend(records);
    }
}

impl RecordReader for MemoryReader {
    fn fetch_all(&self, side: Side, collection: &str) -> Result<Vec<Record>> {
        let records = self
            .snapshot
            .side(side)
            .get(collection)
            .cloned()
            .unwrap_or_default();
        debug!("{} {}: {} records", side, collection, records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_collection_is_empty() {
        let reader = MemoryReader::new();
        assert!(reader
            .fetch_all(Side::Source, "eav_entity_type")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_sides_are_separate() {
        let reader = MemoryReader::new().with_records(
            Side::Destination,
            "eav_attribute_set",
            [Record::new().with("attribute_set_id", 1)],
        );

        assert!(reader
            .fetch_all(Side::Source, "eav_attribute_set")
            .unwrap()
            .is_empty());
        assert_eq!(
            reader
                .fetch_all(Side::Destination, "eav_attribute_set")
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_extend_preserves_fetch_order() {
        let mut reader = MemoryReader::new();
        reader.extend(Side::Source, "eav_attribute", [Record::new().with("attribute_id", 1)]);
        reader.extend(Side::Source, "eav_attribute", [Record::new().with("attribute_id", 2)]);

        let ids: Vec<_> = reader
            .fetch_all(Side::Source, "eav_attribute")
            .unwrap()
            .iter()
            .filter_map(|r| r.get("attribute_id").and_then(|v| v.as_i64()))
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }
}

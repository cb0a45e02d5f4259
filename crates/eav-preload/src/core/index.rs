//! In-memory lookup indices over fetched records.
//!
//! - [`Index`]: key → record, filled in fetch order
//! - [`DualSided`]: one value per side
//! - [`DestinationOnly`]: a value that exists for the destination alone, so
//!   asking for the source side is explicit at the call site

use std::collections::hash_map::{self, HashMap};
use std::fmt::Display;
use std::hash::Hash;

use crate::config::DuplicateKeyPolicy;
use crate::error::{PreloadError, Result};

use super::traits::Side;
use super::value::Record;

/// Mapping from a derived key to the record it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Index<K: Eq + Hash> {
    entries: HashMap<K, Record>,
}

impl<K: Eq + Hash> Default for Index<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> Index<K> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Look up a record by key.
    pub fn get(&self, key: &K) -> Option<&Record> {
        self.entries.get(key)
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, record)` pairs in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, K, Record> {
        self.entries.iter()
    }

    /// Iterate over keys in arbitrary order.
    pub fn keys(&self) -> hash_map::Keys<'_, K, Record> {
        self.entries.keys()
    }
}

impl<K: Eq + Hash + Display> Index<K> {
    /// Insert a record, resolving key collisions with `policy`.
    ///
    /// Under [`DuplicateKeyPolicy::LastWriteWins`] a later record replaces an
    /// earlier one silently. Under [`DuplicateKeyPolicy::Reject`] a collision
    /// fails and leaves the earlier record in place.
    pub fn insert(
        &mut self,
        key: K,
        record: Record,
        policy: DuplicateKeyPolicy,
        side: Side,
        collection: &str,
    ) -> Result<()> {
        match self.entries.entry(key) {
            hash_map::Entry::Vacant(slot) => {
                slot.insert(record);
            }
            hash_map::Entry::Occupied(mut slot) => match policy {
                DuplicateKeyPolicy::LastWriteWins => {
                    slot.insert(record);
                }
                DuplicateKeyPolicy::Reject => {
                    return Err(PreloadError::DuplicateKey {
                        side,
                        collection: collection.to_string(),
                        key: slot.key().to_string(),
                    });
                }
            },
        }
        Ok(())
    }
}

/// A value held for both the source and the destination.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DualSided<T> {
    pub source: T,
    pub destination: T,
}

impl<T> DualSided<T> {
    pub fn new(source: T, destination: T) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Get the value for one side.
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Source => &self.source,
            Side::Destination => &self.destination,
        }
    }
}

/// A value that only exists for the destination.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DestinationOnly<T> {
    destination: T,
}

impl<T> DestinationOnly<T> {
    pub fn new(destination: T) -> Self {
        Self { destination }
    }

    /// Get the destination value.
    pub fn destination(&self) -> &T {
        &self.destination
    }

    /// Get the value for one side; always `None` for the source.
    pub fn get(&self, side: Side) -> Option<&T> {
        match side {
            Side::Source => None,
            Side::Destination => Some(&self.destination),
        }
    }
}

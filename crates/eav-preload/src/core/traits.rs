//! Record reading seam between the preload and the stores.
//!
//! - [`Side`]: which store a read targets
//! - [`RecordReader`]: reads whole collections from either store
//!
//! # Design Pattern
//!
//! `fetch_all_keyed` is a template method: the default keys the rows of
//! `fetch_all` in the declared field order, and readers that can push the
//! keying down to the store override it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::key::CompositeKey;
use super::value::Record;

/// Which of the two systems a record or index partition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Source,
    Destination,
}

impl Side {
    /// Both sides, source first.
    pub const ALL: [Side; 2] = [Side::Source, Side::Destination];

    /// Lowercase name used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Destination => "destination",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows of a collection paired with their keys, in fetch order.
pub type KeyedRecords = Vec<(CompositeKey, Record)>;

/// Read whole collections from the source or destination store.
///
/// The preload only ever reads through this trait. Errors are returned
/// unchanged to the caller of the preload; there is no retry.
pub trait RecordReader {
    /// Read every record of a collection, unkeyed.
    fn fetch_all(&self, side: Side, collection: &str) -> Result<Vec<Record>>;

    /// Read every record of a collection together with its composite key.
    ///
    /// Key parts follow the order of `key_fields`. Records must come back in
    /// fetch order so the caller can apply its duplicate-key policy; a record
    /// lacking one of the key fields is an error.
    fn fetch_all_keyed(
        &self,
        side: Side,
        collection: &str,
        key_fields: &[&str],
    ) -> Result<KeyedRecords> {
        self.fetch_all(side, collection)?
            .into_iter()
            .map(|record| {
                let key = CompositeKey::from_record(&record, key_fields, side, collection)?;
                Ok((key, record))
            })
            .collect()
    }
}

impl<R: RecordReader + ?Sized> RecordReader for &R {
    fn fetch_all(&self, side: Side, collection: &str) -> Result<Vec<Record>> {
        (**self).fetch_all(side, collection)
    }

    fn fetch_all_keyed(
        &self,
        side: Side,
        collection: &str,
        key_fields: &[&str],
    ) -> Result<KeyedRecords> {
        (**self).fetch_all_keyed(side, collection, key_fields)
    }
}

impl<R: RecordReader + ?Sized> RecordReader for Box<R> {
    fn fetch_all(&self, side: Side, collection: &str) -> Result<Vec<Record>> {
        (**self).fetch_all(side, collection)
    }

    fn fetch_all_keyed(
        &self,
        side: Side,
        collection: &str,
        key_fields: &[&str],
    ) -> Result<KeyedRecords> {
        (**self).fetch_all_keyed(side, collection, key_fields)
    }
}

//! Core abstractions for the EAV metadata preload.
//!
//! - [`value`]: record and field value types
//! - [`key`]: typed single and composite index keys
//! - [`traits`]: the [`RecordReader`] seam and the [`Side`] tag
//! - [`index`]: key → record indices and per-side containers
//!
//! # Architecture
//!
//! The store-facing reads live behind [`RecordReader`]; everything in this
//! module is in-memory and side-effect free, so the preload can be exercised
//! with a [`MemoryReader`](crate::reader::MemoryReader) in tests.

pub mod index;
pub mod key;
pub mod traits;
pub mod value;

// Re-export commonly used types for convenience
pub use index::{DestinationOnly, DualSided, Index};
pub use key::{AttributeGroupKey, AttributeKey, CompositeKey};
pub use traits::{KeyedRecords, RecordReader, Side};
pub use value::{KeyValue, Record, Value};

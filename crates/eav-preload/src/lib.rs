//! # eav-preload
//!
//! EAV metadata preload for schema migrations.
//!
//! Before record-level migration starts, this library reads the reference
//! data of an entity-attribute-value schema from both the source and the
//! destination store and builds in-memory lookup indices over it:
//!
//! - **Entity types** by id and by code, for both sides
//! - **Attributes** by `attribute_id` (source) and by
//!   `(entity_type_id, attribute_code)` (destination)
//! - **Attribute sets** by `attribute_set_id` (destination only)
//! - **Attribute groups** by `(attribute_set_id, attribute_group_name)`
//!   (destination only)
//!
//! Stores are reached through the [`RecordReader`] trait; the library never
//! writes.
//!
//! ## Example
//!
//! ```rust
//! use eav_preload::{EavMetadata, EntityTypeKey, KeyValue, MemoryReader, PreloadConfig, Record, Side};
//!
//! let reader = MemoryReader::new().with_records(
//!     Side::Source,
//!     "eav_entity_type",
//!     [Record::new().with("entity_type_id", 4).with("entity_type_code", "catalog_product")],
//! );
//!
//! let metadata = EavMetadata::load(&reader, &PreloadConfig::default())?;
//! let by_code = metadata.entity_types(Side::Source, EntityTypeKey::Code);
//! assert!(by_code.get(&KeyValue::from("catalog_product")).is_some());
//! # Ok::<(), eav_preload::PreloadError>(())
//! ```

pub mod config;
pub mod core;
pub mod eav;
pub mod error;
pub mod reader;

// Re-exports for convenient access
pub use crate::config::{Collection, CollectionNames, DuplicateKeyPolicy, PreloadConfig};
pub use crate::core::{
    AttributeGroupKey, AttributeKey, CompositeKey, DestinationOnly, DualSided, Index, KeyValue,
    KeyedRecords, Record, RecordReader, Side, Value,
};
pub use crate::eav::{
    AttributeIndex, EavMetadata, EntityTypeIndex, EntityTypeKey, PreloadSummary, Preloader,
};
pub use crate::error::{PreloadError, Result};
pub use crate::reader::{MemoryReader, Snapshot};

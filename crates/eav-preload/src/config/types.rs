//! Configuration type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreloadConfig {
    /// Backing collection names in both stores.
    #[serde(default)]
    pub collections: CollectionNames,

    /// How to treat two records that produce the same index key.
    #[serde(default)]
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl PreloadConfig {
    /// Use `policy` for duplicate index keys.
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }
}

/// Logical EAV collections read by the preload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    EntityType,
    Attribute,
    AttributeSet,
    AttributeGroup,
}

impl Collection {
    /// All collections, in preload order.
    pub const ALL: [Collection; 4] = [
        Collection::AttributeSet,
        Collection::AttributeGroup,
        Collection::Attribute,
        Collection::EntityType,
    ];

    /// Logical name of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::EntityType => "entity_type",
            Collection::Attribute => "attribute",
            Collection::AttributeSet => "attribute_set",
            Collection::AttributeGroup => "attribute_group",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store-side names of the EAV collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionNames {
    /// Entity type definitions (default: "eav_entity_type").
    #[serde(default = "default_entity_type")]
    pub entity_type: String,

    /// Attribute definitions (default: "eav_attribute").
    #[serde(default = "default_attribute")]
    pub attribute: String,

    /// Attribute sets (default: "eav_attribute_set").
    #[serde(default = "default_attribute_set")]
    pub attribute_set: String,

    /// Attribute groups (default: "eav_attribute_group").
    #[serde(default = "default_attribute_group")]
    pub attribute_group: String,
}

impl CollectionNames {
    /// Backing name for a logical collection.
    pub fn name(&self, collection: Collection) -> &str {
        match collection {
            Collection::EntityType => &self.entity_type,
            Collection::Attribute => &self.attribute,
            Collection::AttributeSet => &self.attribute_set,
            Collection::AttributeGroup => &self.attribute_group,
        }
    }
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            entity_type: default_entity_type(),
            attribute: default_attribute(),
            attribute_set: default_attribute_set(),
            attribute_group: default_attribute_group(),
        }
    }
}

/// Resolution of two records with the same index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// The record fetched last replaces earlier ones, silently.
    #[default]
    LastWriteWins,

    /// Fail the preload on the first duplicate key.
    Reject,
}

fn default_entity_type() -> String {
    "eav_entity_type".to_string()
}

fn default_attribute() -> String {
    "eav_attribute".to_string()
}

fn default_attribute_set() -> String {
    "eav_attribute_set".to_string()
}

fn default_attribute_group() -> String {
    "eav_attribute_group".to_string()
}

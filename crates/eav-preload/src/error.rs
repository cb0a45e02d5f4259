//! Error types for the EAV preload library.

use thiserror::Error;

use crate::core::Side;

/// Main error type for preload operations.
#[derive(Error, Debug)]
pub enum PreloadError {
    /// Configuration error (invalid YAML, empty collection names, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A fetched record lacks a field the index is keyed on
    #[error("Record in {side} collection {collection} has no field '{field}'")]
    MissingField {
        side: Side,
        collection: String,
        field: String,
    },

    /// A key field holds a value that cannot act as an identifier
    #[error("Field '{field}' in {side} collection {collection} is not a valid key: {value}")]
    InvalidKey {
        side: Side,
        collection: String,
        field: String,
        value: String,
    },

    /// Two records share a key while duplicate keys are rejected
    #[error("Duplicate key {key} in {side} collection {collection}")]
    DuplicateKey {
        side: Side,
        collection: String,
        key: String,
    },

    /// The record reader failed to fetch a collection
    #[error("Failed to fetch {side} collection {collection}: {message}")]
    Fetch {
        side: Side,
        collection: String,
        message: String,
    },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PreloadError {
    /// Create a MissingField error
    pub fn missing_field(side: Side, collection: impl Into<String>, field: impl Into<String>) -> Self {
        PreloadError::MissingField {
            side,
            collection: collection.into(),
            field: field.into(),
        }
    }

    /// Create a Fetch error for a reader failure
    pub fn fetch(side: Side, collection: impl Into<String>, message: impl Into<String>) -> Self {
        PreloadError::Fetch {
            side,
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for preload operations.
pub type Result<T> = std::result::Result<T, PreloadError>;

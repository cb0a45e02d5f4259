//! Configuration validation.

use std::collections::HashMap;

use super::{Collection, PreloadConfig};
use crate::error::{PreloadError, Result};

/// Validate the configuration.
pub fn validate(config: &PreloadConfig) -> Result<()> {
    let mut seen: HashMap<&str, Collection> = HashMap::new();

    for collection in Collection::ALL {
        let name = config.collections.name(collection);
        if name.trim().is_empty() {
            return Err(PreloadError::Config(format!(
                "collections.{} is required",
                collection
            )));
        }
        // Names must be pairwise distinct.
        if let Some(other) = seen.insert(name, collection) {
            return Err(PreloadError::Config(format!(
                "collections.{} and collections.{} both name '{}'",
                other, collection, name
            )));
        }
    }

    Ok(())
}

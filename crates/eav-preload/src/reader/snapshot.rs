//! Serialized record snapshots of both stores.
//!
//! A snapshot holds whole collections per side and is read from JSON or
//! YAML, picked by file extension:
//!
//! ```yaml
//! source:
//!   eav_entity_type:
//!     - { entity_type_id: 4, entity_type_code: catalog_product }
//! destination:
//!   eav_entity_type:
//!     - { entity_type_id: 4, entity_type_code: catalog_product }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Record, Side};
use crate::error::{PreloadError, Result};

/// Collections of both stores, keyed by backing collection name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub source: HashMap<String, Vec<Record>>,

    #[serde(default)]
    pub destination: HashMap<String, Vec<Record>>,
}

impl Snapshot {
    /// Load a snapshot file; `.json` is parsed as JSON, `.yaml`/`.yml` as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Err(PreloadError::Config(format!(
                "snapshot {:?} must have a .json, .yaml or .yml extension",
                path
            ))),
        }
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a snapshot from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Write the snapshot as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Collections of one side.
    pub fn side(&self, side: Side) -> &HashMap<String, Vec<Record>> {
        match side {
            Side::Source => &self.source,
            Side::Destination => &self.destination,
        }
    }

    /// Mutable collections of one side.
    pub fn side_mut(&mut self, side: Side) -> &mut HashMap<String, Vec<Record>> {
        match side {
            Side::Source => &mut self.source,
            Side::Destination => &mut self.destination,
        }
    }
}

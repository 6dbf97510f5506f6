//! Region boundaries (GeoJSON FeatureCollection)
//!
//! Geometry is carried through untouched; only feature properties are read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::MapError;

/// Property holding the region name in the default boundary dataset
pub const DEFAULT_REGION_KEY: &str = "ST_NM";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub geometry: Value,
}

impl Feature {
    pub fn region_name(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn from_slice(source_name: &str, bytes: &[u8]) -> Result<Self, MapError> {
        serde_json::from_slice(bytes).map_err(|e| MapError::parse(source_name, e))
    }

    /// Region names in feature order; features without the key are skipped
    pub fn region_names<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.features.iter().filter_map(move |f| f.region_name(key))
    }
}

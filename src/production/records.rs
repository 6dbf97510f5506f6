//! Crop production records and their lenient production field

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Column holding the region name
pub const REGION_COLUMN: &str = "statename";
/// Column holding the crop name
pub const CROP_COLUMN: &str = "cropname";
/// Production column as it appears in the source datasets
pub const PRODUCTION_FIELD: &str = "Production (Lakh Tonnes)";
/// Catch-all region left out of every aggregate
pub const EXCLUDED_REGION: &str = "Others";

/// One row of the tabular dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub statename: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cropname: String,
    #[serde(
        rename = "Production (Lakh Tonnes)",
        default,
        deserialize_with = "lenient_production"
    )]
    pub production: f64,
}

impl CropRecord {
    pub fn new(statename: &str, cropname: &str, production: f64) -> Self {
        Self {
            statename: statename.to_string(),
            cropname: cropname.to_string(),
            production,
        }
    }
}

/// Parse a textual production value; blanks and garbage are 0
pub fn parse_production_str(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Numbers pass through, strings are parsed, anything else is 0
pub fn parse_production(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_production_str(s),
        _ => 0.0,
    }
}

fn lenient_production<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_production(&value))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

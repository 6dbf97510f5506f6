//! Recommendation service response body

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status string of a successful response
pub const STATUS_SUCCESS: &str = "success";

/// A detected nutrient or soil deficiency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deficiency {
    #[serde(default)]
    pub deficiency: String,
    /// Severity score; numeric in practice but kept loose
    #[serde(default)]
    pub severity: Value,
}

/// A ranked treatment suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    #[serde(rename = "Issue", default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(rename = "Fertilizer", default)]
    pub fertilizer: String,
    #[serde(rename = "Dose", default)]
    pub dose: Value,
    #[serde(rename = "Notes", default)]
    pub notes: Value,
}

/// Body returned by `POST /get_recommendation`.
///
/// Only `status` is required; everything else tolerates absence or null so
/// decoding never fails on a partially filled success.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub sqi: Option<f64>,
    #[serde(default)]
    pub sqi_text: Option<String>,
    #[serde(default)]
    pub phi: Option<f64>,
    #[serde(default)]
    pub phi_text: Option<String>,
    #[serde(default)]
    pub final_message: Option<String>,
    #[serde(rename = "N", default)]
    pub n: Option<f64>,
    #[serde(rename = "P", default)]
    pub p: Option<f64>,
    #[serde(rename = "K", default)]
    pub k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrients: Option<serde_json::Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deficiencies: Option<Vec<Deficiency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatments: Option<Vec<Treatment>>,
}

impl RecommendationResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Render a loose JSON value the way a template would print it
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

//! Mapping of wizard answers onto the recommendation request schema

use serde::{Deserialize, Serialize};

use super::inputs::{CropInputs, YesNo};

/// Average temperature sent when the wizard does not collect one (°C)
pub const DEFAULT_TEMPERATURE: f64 = 28.0;
/// Relative humidity sent when the wizard does not collect one (%)
pub const DEFAULT_HUMIDITY: f64 = 60.0;
/// Sunlight hours per day sent when the wizard does not collect them
pub const DEFAULT_SUNLIGHT_HOURS: f64 = 7.0;
/// Plant height sent when the wizard does not collect it (cm)
pub const DEFAULT_PLANT_HEIGHT: f64 = 60.0;
/// Days after sowing for an unknown growth stage
pub const DEFAULT_STAGE_DAYS: u32 = 40;

/// Canonical snake_case request body for `POST /get_recommendation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub crop_name: String,
    pub previous_crop: String,
    pub soil_type: String,
    pub soil_texture: String,
    pub stage_days: u32,
    pub irrigation_type: String,
    pub irrigation_status: String,
    pub irrigation_count: u32,
    pub leaf_color: String,
    pub leaf_yellow_percent: u32,
    pub spots: String,
    pub pests: String,
    pub rainfall: f64,
    pub used_fertilizer: String,
    pub fertilizer_type: String,
    pub fertilizer_qty: f64,
    pub used_pesticide: String,
    pub pesticide_type: String,
    pub pesticide_qty: f64,
    pub used_fungicide: String,
    pub fungicide_count: u32,
    pub temperature: f64,
    pub humidity: f64,
    pub sunlight_hours: f64,
    pub plant_height: f64,
}

/// Days after sowing implied by a growth stage
pub fn stage_to_days(stage: Option<&str>) -> u32 {
    match stage {
        Some("Germination") => 10,
        Some("Vegetative") => 30,
        Some("Flowering") => 55,
        Some("Fruiting") => 75,
        Some("Maturity") => 95,
        _ => DEFAULT_STAGE_DAYS,
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Type and quantity only travel when the treatment was used
fn treatment(used: YesNo, kind: &str, qty: f64) -> (String, String, f64) {
    if used.is_yes() {
        (used.to_string(), kind.to_string(), qty)
    } else {
        (YesNo::No.to_string(), String::new(), 0.0)
    }
}

/// Build the request body. Total: every key is present for any input state.
pub fn build_request(inputs: &CropInputs) -> RecommendationRequest {
    let (used_fertilizer, fertilizer_type, fertilizer_qty) = treatment(
        inputs.used_fertilizer,
        &inputs.fertilizer_type,
        inputs.fertilizer_qty,
    );
    let (used_pesticide, pesticide_type, pesticide_qty) = treatment(
        inputs.used_pesticide,
        &inputs.pesticide_type,
        inputs.pesticide_qty,
    );
    let fungicide_count = if inputs.used_fungicide.is_yes() {
        inputs.fungicide_sprays
    } else {
        0
    };

    RecommendationRequest {
        crop_name: text(&inputs.crop),
        previous_crop: text(&inputs.previous_crop),
        soil_type: text(&inputs.soil_type),
        soil_texture: text(&inputs.soil_texture),
        stage_days: stage_to_days(inputs.growth_stage.as_deref()),
        irrigation_type: text(&inputs.irrigation_type),
        irrigation_status: text(&inputs.irrigation_status),
        irrigation_count: inputs.irrigation_count,
        leaf_color: text(&inputs.leaf_color),
        leaf_yellow_percent: inputs.leaf_yellow_percent,
        spots: text(&inputs.spots),
        pests: text(&inputs.pests),
        rainfall: finite_or_zero(inputs.rainfall_15),
        used_fertilizer,
        fertilizer_type,
        fertilizer_qty: finite_or_zero(fertilizer_qty),
        used_pesticide,
        pesticide_type,
        pesticide_qty: finite_or_zero(pesticide_qty),
        used_fungicide: inputs.used_fungicide.to_string(),
        fungicide_count,
        temperature: DEFAULT_TEMPERATURE,
        humidity: DEFAULT_HUMIDITY,
        sunlight_hours: DEFAULT_SUNLIGHT_HOURS,
        plant_height: DEFAULT_PLANT_HEIGHT,
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

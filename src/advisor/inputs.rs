//! Wizard answers and the clamp rules applied at the point of entry

use serde::{Deserialize, Serialize};

/// Upper bound for irrigations since sowing
pub const MAX_IRRIGATION_COUNT: i64 = 25;
/// Upper bound for the leaf yellowing slider (percent)
pub const MAX_LEAF_YELLOW_PERCENT: i64 = 100;
/// Upper bound for the 15-day rainfall slider (mm)
pub const MAX_RAINFALL_MM: f64 = 150.0;
/// Upper bound for fertilizer/pesticide quantity sliders
pub const MAX_TREATMENT_QTY: f64 = 200.0;

/// Value shown in the input summary for empty fields
pub const NOT_PROVIDED: &str = "Not Provided";

/// Answer of a Yes/No radio group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

impl std::fmt::Display for YesNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp an irrigation count entry to [0, 25]
pub fn clamp_irrigation_count(raw: i64) -> u32 {
    raw.clamp(0, MAX_IRRIGATION_COUNT) as u32
}

/// Clamp a fungicide spray count entry to [0, u32::MAX]
pub fn clamp_spray_count(raw: i64) -> u32 {
    raw.clamp(0, u32::MAX as i64) as u32
}

/// Clamp a leaf yellowing percentage to [0, 100]
pub fn clamp_leaf_yellow(raw: i64) -> u32 {
    raw.clamp(0, MAX_LEAF_YELLOW_PERCENT) as u32
}

/// Clamp rainfall to [0, 150] mm. NaN is treated as 0.
pub fn clamp_rainfall(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, MAX_RAINFALL_MM)
}

/// Clamp a fertilizer or pesticide quantity to [0, 200]. NaN is treated as 0.
pub fn clamp_quantity(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, MAX_TREATMENT_QTY)
}

/// All wizard answers plus the "touched" flags of the numeric controls.
///
/// The record is only mutated through [`crate::advisor::WizardController`], which
/// applies the clamp functions above before writing numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropInputs {
    // Identity
    pub crop: Option<String>,
    pub previous_crop: Option<String>,
    pub soil_type: Option<String>,
    pub soil_texture: Option<String>,
    pub growth_stage: Option<String>,

    // Irrigation
    pub irrigation_type: Option<String>,
    pub irrigation_status: Option<String>,
    pub irrigation_count: u32,

    // Leaf & pests
    pub leaf_color: Option<String>,
    pub spots: Option<String>,
    pub pests: Option<String>,
    pub leaf_yellow_percent: u32,

    // Weather
    pub quick_humidity: Option<String>,
    pub rainfall_15: f64,

    // Treatments
    pub used_fertilizer: YesNo,
    pub fertilizer_type: String,
    pub fertilizer_qty: f64,
    pub used_pesticide: YesNo,
    pub pesticide_type: String,
    pub pesticide_qty: f64,
    pub used_fungicide: YesNo,
    pub fungicide_sprays: u32,

    // Touched flags
    pub rainfall_touched: bool,
    pub leaf_yellow_touched: bool,
    pub irrigation_count_touched: bool,
    pub fungicide_sprays_touched: bool,
}

impl Default for CropInputs {
    fn default() -> Self {
        Self {
            crop: None,
            previous_crop: None,
            soil_type: None,
            soil_texture: None,
            growth_stage: None,
            irrigation_type: None,
            irrigation_status: None,
            irrigation_count: 0,
            leaf_color: None,
            spots: None,
            pests: None,
            leaf_yellow_percent: 0,
            quick_humidity: None,
            rainfall_15: 0.0,
            used_fertilizer: YesNo::No,
            fertilizer_type: String::new(),
            fertilizer_qty: 0.0,
            used_pesticide: YesNo::No,
            pesticide_type: String::new(),
            pesticide_qty: 0.0,
            used_fungicide: YesNo::No,
            fungicide_sprays: 0,
            rainfall_touched: false,
            leaf_yellow_touched: false,
            irrigation_count_touched: false,
            fungicide_sprays_touched: false,
        }
    }
}

impl CropInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key/value pairs of every field, in declaration order, keyed by the
    /// camel-case names used by the input summary.
    pub fn summary_fields(&self) -> Vec<(&'static str, Option<String>)> {
        fn text(value: &Option<String>) -> Option<String> {
            value.clone()
        }
        fn non_empty(value: &str) -> Option<String> {
            (!value.is_empty()).then(|| value.to_string())
        }

        vec![
            ("crop", text(&self.crop)),
            ("previousCrop", text(&self.previous_crop)),
            ("soilType", text(&self.soil_type)),
            ("soilTexture", text(&self.soil_texture)),
            ("growthStage", text(&self.growth_stage)),
            ("irrigationType", text(&self.irrigation_type)),
            ("irrigationStatus", text(&self.irrigation_status)),
            ("irrigationCount", Some(self.irrigation_count.to_string())),
            ("leafColor", text(&self.leaf_color)),
            ("spots", text(&self.spots)),
            ("pests", text(&self.pests)),
            ("leafYellowPercent", Some(self.leaf_yellow_percent.to_string())),
            ("quickHumidity", text(&self.quick_humidity)),
            ("rainfall15", Some(self.rainfall_15.to_string())),
            ("usedFertilizer", Some(self.used_fertilizer.to_string())),
            ("fertilizerType", non_empty(&self.fertilizer_type)),
            ("fertilizerQty", Some(self.fertilizer_qty.to_string())),
            ("usedPesticide", Some(self.used_pesticide.to_string())),
            ("pesticideType", non_empty(&self.pesticide_type)),
            ("pesticideQty", Some(self.pesticide_qty.to_string())),
            ("usedFungicide", Some(self.used_fungicide.to_string())),
            ("fungSprays", Some(self.fungicide_sprays.to_string())),
            ("rainfallTouched", Some(self.rainfall_touched.to_string())),
            ("leafYellowTouched", Some(self.leaf_yellow_touched.to_string())),
            ("irrigationCountTouched", Some(self.irrigation_count_touched.to_string())),
            ("fungSpraysTouched", Some(self.fungicide_sprays_touched.to_string())),
        ]
    }

    /// Label-cased summary rows; empty values read "Not Provided"
    pub fn summary_rows(&self) -> Vec<(String, String)> {
        self.summary_fields()
            .into_iter()
            .map(|(key, value)| {
                let value = value
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| NOT_PROVIDED.to_string());
                (label_case(key), value)
            })
            .collect()
    }
}

/// Turn a camel-case key into a label: a space before each capital, first letter upper-cased.
///
/// `irrigationCountTouched` becomes `Irrigation Count Touched`.
pub fn label_case(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            label.push(' ');
        }
        if i == 0 {
            label.extend(c.to_uppercase());
        } else {
            label.push(c);
        }
    }
    label
}

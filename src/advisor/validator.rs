//! Step completeness rules
//!
//! Numeric controls of the irrigation, leaf and weather steps only count once the
//! user has touched them. The final step re-checks every earlier field together
//! with the numeric ranges instead of trusting earlier results.

use super::catalog::FINAL_STEP;
use super::inputs::{
    CropInputs, MAX_IRRIGATION_COUNT, MAX_LEAF_YELLOW_PERCENT, MAX_RAINFALL_MM, MAX_TREATMENT_QTY,
};

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn qty_in_range(qty: f64) -> bool {
    (0.0..=MAX_TREATMENT_QTY).contains(&qty)
}

/// Whether every field owned by `step` is populated and in range.
///
/// Unknown step indices are never complete.
pub fn is_step_complete(step: usize, inputs: &CropInputs) -> bool {
    match step {
        0 => filled(&inputs.crop),
        1 => filled(&inputs.previous_crop),
        2 => filled(&inputs.soil_type) && filled(&inputs.soil_texture),
        3 => filled(&inputs.growth_stage),
        4 => {
            filled(&inputs.irrigation_type)
                && filled(&inputs.irrigation_status)
                && inputs.irrigation_count_touched
        }
        5 => {
            filled(&inputs.leaf_color)
                && filled(&inputs.spots)
                && filled(&inputs.pests)
                && inputs.leaf_yellow_touched
        }
        6 => filled(&inputs.quick_humidity) && inputs.rainfall_touched,
        FINAL_STEP => all_fields_valid(inputs),
        _ => false,
    }
}

/// Full re-check used by the final step
fn all_fields_valid(inputs: &CropInputs) -> bool {
    let identity = filled(&inputs.crop)
        && filled(&inputs.previous_crop)
        && filled(&inputs.soil_type)
        && filled(&inputs.soil_texture)
        && filled(&inputs.growth_stage);

    let irrigation = filled(&inputs.irrigation_type)
        && filled(&inputs.irrigation_status)
        && i64::from(inputs.irrigation_count) <= MAX_IRRIGATION_COUNT;

    let leaf = filled(&inputs.leaf_color)
        && filled(&inputs.spots)
        && filled(&inputs.pests)
        && i64::from(inputs.leaf_yellow_percent) <= MAX_LEAF_YELLOW_PERCENT;

    let weather = filled(&inputs.quick_humidity)
        && (0.0..=MAX_RAINFALL_MM).contains(&inputs.rainfall_15);

    let fertilizer = !inputs.used_fertilizer.is_yes()
        || (!inputs.fertilizer_type.trim().is_empty() && qty_in_range(inputs.fertilizer_qty));

    let pesticide = !inputs.used_pesticide.is_yes()
        || (!inputs.pesticide_type.trim().is_empty() && qty_in_range(inputs.pesticide_qty));

    // Spray counts are clamped to >= 0 on entry, so the fungicide answer is always valid

    identity && irrigation && leaf && weather && fertilizer && pesticide
}

/// First step that is not complete, if any
pub fn first_incomplete_step(inputs: &CropInputs) -> Option<usize> {
    (0..=FINAL_STEP).find(|&step| !is_step_complete(step, inputs))
}

//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use cropsense::advisor::{
    BoundedField, ChoiceField, Slider, StepCatalog, ViewState, WizardController,
};
use cropsense::production::{CropRecord, FeatureCollection};

/// A controller over the standard catalog with a recording view
pub fn new_controller() -> WizardController {
    let catalog = StepCatalog::standard().expect("standard catalog is valid");
    let mut controller = WizardController::new(catalog, ViewState::new());
    controller.open();
    controller
}

/// Answer every step except the treatments, leaving the wizard on step 7
pub fn fill_all_steps(controller: &mut WizardController) {
    assert!(controller.set_choice(ChoiceField::Crop, "Rice"));
    assert!(controller.set_choice(ChoiceField::PreviousCrop, "Wheat"));
    assert!(controller.set_choice(ChoiceField::SoilType, "Alluvial"));
    assert!(controller.set_choice(ChoiceField::SoilTexture, "Loamy"));
    assert!(controller.set_choice(ChoiceField::GrowthStage, "Flowering"));
    assert!(controller.set_choice(ChoiceField::IrrigationType, "Drip"));
    assert!(controller.set_choice(ChoiceField::IrrigationStatus, "Normal"));
    controller.input_bounded(BoundedField::IrrigationCount, 4);
    assert!(controller.set_choice(ChoiceField::LeafColor, "Light Green"));
    assert!(controller.set_choice(ChoiceField::Spots, "Few"));
    assert!(controller.set_choice(ChoiceField::Pests, "Low"));
    controller.set_slider(Slider::LeafYellow, 20.0);
    assert!(controller.set_choice(ChoiceField::QuickHumidity, "Medium"));
    controller.set_slider(Slider::Rainfall, 35.0);
    controller.show_step(7);
}

/// Production rows for two crops across a handful of regions
pub fn sample_records() -> Vec<CropRecord> {
    vec![
        CropRecord::new("Punjab", "Rice", 3.5),
        CropRecord::new("Punjab", "Rice", 2.5),
        CropRecord::new("Bihar", "Rice", 4.0),
        CropRecord::new("Kerala", "Rice", 1.0),
        CropRecord::new("Others", "Rice", 100.0),
        CropRecord::new("Punjab", "Wheat", 9.0),
        CropRecord::new("Haryana", "Wheat", 7.0),
    ]
}

/// Rice produced in seven regions with distinct totals
pub fn seven_region_records() -> Vec<CropRecord> {
    [
        ("A", 1.0),
        ("B", 7.0),
        ("C", 3.0),
        ("D", 6.0),
        ("E", 2.0),
        ("F", 5.0),
        ("G", 4.0),
    ]
    .iter()
    .map(|(region, total)| CropRecord::new(region, "Rice", *total))
    .collect()
}

/// GeoJSON feature collection with one empty polygon per region
pub fn boundaries_json(regions: &[&str]) -> serde_json::Value {
    let features: Vec<_> = regions
        .iter()
        .map(|name| {
            json!({
                "type": "Feature",
                "properties": { "ST_NM": name },
                "geometry": { "type": "Polygon", "coordinates": [] }
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

pub fn boundaries(regions: &[&str]) -> FeatureCollection {
    let bytes = serde_json::to_vec(&boundaries_json(regions)).expect("serializable");
    FeatureCollection::from_slice("test", &bytes).expect("valid geojson")
}

/// Records as the JSON array the production dataset ships as
pub fn records_json(records: &[CropRecord]) -> String {
    serde_json::to_string(records).expect("serializable")
}

/// Write a file into a fresh temp dir
pub fn write_temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    (dir, path)
}

/// Write boundaries and production data side by side in one temp dir
pub fn write_map_fixture(regions: &[&str], records: &[CropRecord]) -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let boundaries_path = dir.path().join("boundaries.geojson");
    let data_path = dir.path().join("data.json");
    std::fs::write(
        &boundaries_path,
        serde_json::to_string(&boundaries_json(regions)).expect("serializable"),
    )
    .expect("Failed to write boundaries");
    std::fs::write(&data_path, records_json(records)).expect("Failed to write data");
    (dir, boundaries_path, data_path)
}

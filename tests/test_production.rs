//! Tests for production aggregation, the choropleth and dataset loading

#[path = "common/mod.rs"]
mod common;

use common::{
    boundaries, sample_records, seven_region_records, write_map_fixture, write_temp_file,
};
use cropsense::production::{
    load_datasets, ColorScale, CropMap, CropRecord, DataSource, MapDatasets, MapError,
    ProductionTable, RegionTotal, TopProducers, DEFAULT_REGION_KEY, NO_PRODUCTION_MESSAGE,
};

fn map_with(regions: &[&str], records: Vec<CropRecord>) -> CropMap {
    let datasets = MapDatasets {
        boundaries: boundaries(regions),
        records,
    };
    CropMap::new(datasets, DEFAULT_REGION_KEY).unwrap()
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_production_sums_per_region() {
    let table = ProductionTable::from_records(&sample_records()).unwrap();
    let totals = table.production_by_region("Rice").unwrap();

    assert_eq!(
        totals,
        vec![
            RegionTotal { region: "Punjab".to_string(), total: 6.0 },
            RegionTotal { region: "Bihar".to_string(), total: 4.0 },
            RegionTotal { region: "Kerala".to_string(), total: 1.0 },
        ]
    );
}

#[test]
fn test_others_never_ranked() {
    let table = ProductionTable::from_records(&sample_records()).unwrap();
    let top = table.top_producers("Rice").unwrap();
    match top {
        TopProducers::Ranked(entries) => {
            assert!(entries.iter().all(|e| e.region != "Others"));
        }
        TopProducers::NoData => panic!("Rice has production"),
    }
}

#[test]
fn test_top_five_strictly_descending() {
    let table = ProductionTable::from_records(&seven_region_records()).unwrap();
    let TopProducers::Ranked(entries) = table.top_producers("Rice").unwrap() else {
        panic!("Expected ranked producers");
    };

    assert_eq!(entries.len(), 5);
    let names: Vec<&str> = entries.iter().map(|e| e.region.as_str()).collect();
    assert_eq!(names, vec!["B", "D", "F", "G", "C"]);
    assert!(entries.windows(2).all(|w| w[0].total > w[1].total));
}

#[test]
fn test_ties_break_by_region_name() {
    let table = ProductionTable::from_records(&[
        CropRecord::new("Zeta", "Rice", 2.0),
        CropRecord::new("Alpha", "Rice", 2.0),
    ])
    .unwrap();
    let totals = table.production_by_region("Rice").unwrap();
    assert_eq!(totals[0].region, "Alpha");
    assert_eq!(totals[1].region, "Zeta");
}

#[test]
fn test_zero_production_has_no_ranking() {
    let table = ProductionTable::from_records(&[
        CropRecord::new("Punjab", "Jute", 0.0),
        CropRecord::new("Bihar", "Jute", 0.0),
    ])
    .unwrap();
    let top = table.top_producers("Jute").unwrap();
    assert_eq!(top, TopProducers::NoData);
    assert_eq!(top.lines(), vec![NO_PRODUCTION_MESSAGE.to_string()]);
}

#[test]
fn test_ranking_lines_format() {
    let top = TopProducers::from_ranking(vec![RegionTotal {
        region: "Punjab".to_string(),
        total: 6.0,
    }]);
    assert_eq!(top.lines(), vec!["1. Punjab: 6.00 Lakh Tonnes"]);
}

// ============================================================================
// Map state
// ============================================================================

#[test]
fn test_crops_sorted_and_distinct() {
    let map = map_with(&["Punjab"], sample_records());
    assert_eq!(map.crops(), &["Rice".to_string(), "Wheat".to_string()]);
    assert_eq!(map.default_crop(), Some("Rice"));
    assert_eq!(map.selected_crop(), None);
}

#[test]
fn test_render_shades_regions_on_crop_scale() {
    let mut map = map_with(&["Punjab", "Bihar", "Goa"], sample_records());
    map.render("Rice").unwrap();

    assert_eq!(map.scale(), ColorScale { min: 0.0, max: 6.0 });
    let punjab = map.shade("Punjab").unwrap();
    assert_eq!(punjab.production, Some(6.0));
    assert_eq!(punjab.color, Some(map.scale().color(6.0)));

    // Regions without data keep the base fill
    let goa = map.shade("Goa").unwrap();
    assert_eq!(goa.production, None);
    assert_eq!(goa.color, None);
}

#[test]
fn test_render_replaces_previous_crop() {
    let mut map = map_with(&["Punjab", "Bihar", "Haryana"], sample_records());
    map.render("Rice").unwrap();
    map.hover("Punjab", (0.0, 0.0)).unwrap();

    map.render("Wheat").unwrap();

    assert_eq!(map.selected_crop(), Some("Wheat"));
    assert_eq!(map.scale().max, 9.0);
    assert_eq!(map.shade("Bihar").unwrap().production, None);
    assert_eq!(map.shade("Haryana").unwrap().production, Some(7.0));
    assert!(map.tooltip().is_none(), "Render clears the hover state");
    assert!(map.highlighted().is_none());
}

#[test]
fn test_zero_max_falls_back_to_unit_scale() {
    let mut map = map_with(&["Punjab"], vec![CropRecord::new("Punjab", "Jute", 0.0)]);
    map.render("Jute").unwrap();
    assert_eq!(map.scale(), ColorScale::default());
    assert_eq!(map.top_producers(), &TopProducers::NoData);
}

#[test]
fn test_unknown_crop_is_rejected() {
    let mut map = map_with(&["Punjab"], sample_records());
    let err = map.render("Banana").unwrap_err();
    assert!(matches!(err, MapError::UnknownCrop(name) if name == "Banana"));
}

#[test]
fn test_hover_uses_first_row_and_offsets_tooltip() {
    let mut map = map_with(&["Punjab"], sample_records());
    map.render("Rice").unwrap();

    let tooltip = map.hover("Punjab", (100.0, 200.0)).unwrap().clone();
    assert_eq!(tooltip.production, "3.50");
    assert_eq!(tooltip.x, 110.0);
    assert_eq!(tooltip.y, 172.0);
    assert_eq!(
        tooltip.lines(),
        ["Punjab".to_string(), "Production: 3.50 Lakh Tonnes".to_string()]
    );
    assert_eq!(map.highlighted(), Some("Punjab"));

    map.leave();
    assert!(map.tooltip().is_none());
    assert!(map.highlighted().is_none());
}

#[test]
fn test_hover_region_without_data_reads_na() {
    let mut map = map_with(&["Punjab", "Goa"], sample_records());
    map.render("Rice").unwrap();
    let tooltip = map.hover("Goa", (0.0, 0.0)).unwrap();
    assert_eq!(tooltip.lines()[1], "Production: N/A Lakh Tonnes");
}

// ============================================================================
// Loading
// ============================================================================

#[tokio::test]
async fn test_initialize_from_files_renders_first_crop() {
    let (_dir, boundaries_path, data_path) =
        write_map_fixture(&["Punjab", "Bihar"], &sample_records());

    let map = CropMap::initialize(
        &DataSource::Path(boundaries_path),
        &DataSource::Path(data_path),
        DEFAULT_REGION_KEY,
    )
    .await
    .unwrap();

    assert_eq!(map.selected_crop(), Some("Rice"));
    assert_eq!(map.shades().len(), 2);
}

#[tokio::test]
async fn test_empty_dataset_is_an_error() {
    let (_dir, boundaries_path, data_path) = write_map_fixture(&["Punjab"], &[]);

    let err = load_datasets(
        &DataSource::Path(boundaries_path),
        &DataSource::Path(data_path),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MapError::EmptyDataset));
}

#[tokio::test]
async fn test_missing_file_fails_whole_load() {
    let (_dir, boundaries_path, _) = write_map_fixture(&["Punjab"], &sample_records());

    let result = CropMap::initialize(
        &DataSource::Path(boundaries_path),
        &DataSource::parse("/definitely/not/here.json"),
        DEFAULT_REGION_KEY,
    )
    .await;
    assert!(matches!(result, Err(MapError::Fetch { .. })));
}

#[tokio::test]
async fn test_csv_dataset_with_messy_values() {
    let (_bdir, boundaries_path, _) = write_map_fixture(&["Punjab", "Bihar"], &[]);
    let (_cdir, csv_path) = write_temp_file(
        "data.csv",
        "statename,cropname,Production (Lakh Tonnes)\n\
         Punjab,Rice,3.5\n\
         Punjab,Rice,\n\
         Bihar,Rice,abc\n\
         Bihar,Rice, 2.25 \n",
    );

    let datasets = load_datasets(
        &DataSource::Path(boundaries_path),
        &DataSource::Path(csv_path),
    )
    .await
    .unwrap();

    assert_eq!(datasets.records.len(), 4);
    let table = ProductionTable::from_records(&datasets.records).unwrap();
    let totals = table.production_by_region("Rice").unwrap();
    assert_eq!(totals[0].region, "Punjab");
    assert_eq!(totals[0].total, 3.5);
    assert_eq!(totals[1].total, 2.25);
}

#[tokio::test]
async fn test_json_dataset_with_null_names() {
    let (_bdir, boundaries_path, _) = write_map_fixture(&["Punjab"], &[]);
    let (_jdir, data_path) = write_temp_file(
        "data.json",
        r#"[
            {"statename": "Punjab", "cropname": "Rice", "Production (Lakh Tonnes)": 3.5},
            {"statename": null, "cropname": "Rice", "Production (Lakh Tonnes)": 1.0},
            {"statename": "Punjab", "cropname": null, "Production (Lakh Tonnes)": 2.0}
        ]"#,
    );

    let map = CropMap::initialize(
        &DataSource::Path(boundaries_path),
        &DataSource::Path(data_path),
        DEFAULT_REGION_KEY,
    )
    .await
    .unwrap();

    assert_eq!(map.crops(), &["Rice".to_string()]);
    assert_eq!(map.shade("Punjab").unwrap().production, Some(3.5));
}

//! Dataset loader for the production map
//!
//! Boundaries and production rows are fetched concurrently; either failing
//! fails the whole load.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, info};

use super::boundaries::FeatureCollection;
use super::error::MapError;
use super::records::{
    parse_production_str, CropRecord, CROP_COLUMN, PRODUCTION_FIELD, REGION_COLUMN,
};

/// Public India states boundary document
pub const DEFAULT_BOUNDARIES_URL: &str = "https://gist.githubusercontent.com/jbrobst/56c13bbbf9d97d187fea01ca62ea5112/raw/e388c4cae20aa53cb5090210a42ebb9b765c0a36/india_states.geojson";
/// Bundled production dataset
pub const DEFAULT_DATA_PATH: &str = "static/data.json";

/// Where a dataset comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    /// `http(s)://` strings are URLs, everything else a local path
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Path(path) => path.display().to_string(),
        }
    }

    /// Tabular sources ending in `.csv` are read as CSV, everything else as JSON
    pub fn is_csv(&self) -> bool {
        let name = match self {
            Self::Url(url) => url.split(['?', '#']).next().unwrap_or(url).to_string(),
            Self::Path(path) => path.display().to_string(),
        };
        Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
    }

    async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<u8>, MapError> {
        debug!(source = %self.label(), "Fetching dataset");
        match self {
            Self::Url(url) => {
                let resp = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| MapError::fetch(url.as_str(), e))?;
                if !resp.status().is_success() {
                    return Err(MapError::fetch(url.as_str(), format!("HTTP {}", resp.status())));
                }
                let bytes = resp
                    .bytes()
                    .await
                    .map_err(|e| MapError::fetch(url.as_str(), e))?;
                Ok(bytes.to_vec())
            }
            Self::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| MapError::fetch(path.display().to_string(), e)),
        }
    }
}

/// Both datasets the map needs
#[derive(Debug, Clone)]
pub struct MapDatasets {
    pub boundaries: FeatureCollection,
    pub records: Vec<CropRecord>,
}

/// Decode a JSON array of production rows
pub fn parse_records_json(source_name: &str, bytes: &[u8]) -> Result<Vec<CropRecord>, MapError> {
    serde_json::from_slice(bytes).map_err(|e| MapError::parse(source_name, e))
}

/// Decode a CSV file with the same column names as the JSON rows.
///
/// Every column is read as text so production values get the same lenient
/// parsing as their JSON counterparts.
pub fn parse_records_csv(source_name: &str, bytes: Vec<u8>) -> Result<Vec<CropRecord>, MapError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| MapError::parse(source_name, e))?;

    let regions = df.column(REGION_COLUMN)?.str()?;
    let crops = df.column(CROP_COLUMN)?.str()?;
    let production = df.column(PRODUCTION_FIELD)?.str()?;

    let records = regions
        .into_iter()
        .zip(crops.into_iter())
        .zip(production.into_iter())
        .map(|((region, crop), value)| {
            CropRecord::new(
                region.unwrap_or_default(),
                crop.unwrap_or_default(),
                value.map(parse_production_str).unwrap_or(0.0),
            )
        })
        .collect();
    Ok(records)
}

async fn load_boundaries(
    client: &reqwest::Client,
    source: &DataSource,
) -> Result<FeatureCollection, MapError> {
    let bytes = source.fetch(client).await?;
    FeatureCollection::from_slice(&source.label(), &bytes)
}

async fn load_records(
    client: &reqwest::Client,
    source: &DataSource,
) -> Result<Vec<CropRecord>, MapError> {
    let bytes = source.fetch(client).await?;
    if source.is_csv() {
        parse_records_csv(&source.label(), bytes)
    } else {
        parse_records_json(&source.label(), &bytes)
    }
}

/// Fetch both datasets concurrently. An empty production dataset is an error.
pub async fn load_datasets(
    boundaries: &DataSource,
    data: &DataSource,
) -> Result<MapDatasets, MapError> {
    let client = reqwest::Client::new();
    let (boundaries, records) = tokio::try_join!(
        load_boundaries(&client, boundaries),
        load_records(&client, data)
    )?;

    if records.is_empty() {
        return Err(MapError::EmptyDataset);
    }

    info!(
        features = boundaries.features.len(),
        rows = records.len(),
        "Map datasets loaded"
    );
    Ok(MapDatasets {
        boundaries,
        records,
    })
}

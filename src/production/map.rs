//! Crop production choropleth state
//!
//! `render` fully replaces the previous join, highlight and ranking.

use tracing::{debug, error, info};

use super::aggregate::{ProductionTable, RegionTotal, TopProducers};
use super::boundaries::FeatureCollection;
use super::choropleth::{shade_regions, ColorScale, RegionShade, Tooltip};
use super::error::MapError;
use super::loader::{load_datasets, DataSource, MapDatasets};

pub struct CropMap {
    boundaries: FeatureCollection,
    table: ProductionTable,
    region_key: String,
    crops: Vec<String>,
    selected: Option<String>,
    totals: Vec<RegionTotal>,
    shades: Vec<RegionShade>,
    scale: ColorScale,
    highlighted: Option<String>,
    tooltip: Option<Tooltip>,
    top: TopProducers,
}

impl CropMap {
    pub fn new(datasets: MapDatasets, region_key: &str) -> Result<Self, MapError> {
        if datasets.records.is_empty() {
            return Err(MapError::EmptyDataset);
        }
        let table = ProductionTable::from_records(&datasets.records)?;
        let crops = table.crop_names()?;

        Ok(Self {
            boundaries: datasets.boundaries,
            table,
            region_key: region_key.to_string(),
            crops,
            selected: None,
            totals: Vec::new(),
            shades: Vec::new(),
            scale: ColorScale::default(),
            highlighted: None,
            tooltip: None,
            top: TopProducers::NoData,
        })
    }

    /// Load both datasets and render the first crop.
    /// Errors are logged; the caller leaves the map inert.
    pub async fn initialize(
        boundaries: &DataSource,
        data: &DataSource,
        region_key: &str,
    ) -> Result<Self, MapError> {
        let result = async {
            let datasets = load_datasets(boundaries, data).await?;
            let mut map = Self::new(datasets, region_key)?;
            if let Some(first) = map.default_crop().map(str::to_string) {
                map.render(&first)?;
            }
            Ok::<_, MapError>(map)
        }
        .await;

        if let Err(e) = &result {
            error!(error = %e, "Error loading required map datasets");
        }
        result
    }

    /// Sorted distinct crop names
    pub fn crops(&self) -> &[String] {
        &self.crops
    }

    pub fn default_crop(&self) -> Option<&str> {
        self.crops.first().map(String::as_str)
    }

    pub fn selected_crop(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn region_key(&self) -> &str {
        &self.region_key
    }

    pub fn render(&mut self, crop: &str) -> Result<(), MapError> {
        if !self.crops.iter().any(|c| c == crop) {
            return Err(MapError::UnknownCrop(crop.to_string()));
        }

        let totals = self.table.production_by_region(crop)?;
        let max = totals.iter().map(|t| t.total).fold(0.0, f64::max);
        self.scale = ColorScale::for_max(max);
        self.shades = shade_regions(&self.boundaries, &self.region_key, &totals, &self.scale);
        self.top = TopProducers::from_ranking(totals.clone());
        self.totals = totals;
        self.highlighted = None;
        self.tooltip = None;
        self.selected = Some(crop.to_string());

        info!(crop, regions = self.totals.len(), max, "Map rendered");
        Ok(())
    }

    /// Highlight `region` and build its tooltip for the selected crop
    pub fn hover(&mut self, region: &str, pointer: (f64, f64)) -> Result<&Tooltip, MapError> {
        let production = match &self.selected {
            Some(crop) => self.table.production_for(crop, region)?,
            None => None,
        };
        debug!(region, ?production, "Hover");
        self.highlighted = Some(region.to_string());
        Ok(self.tooltip.insert(Tooltip::new(region, production, pointer)))
    }

    pub fn leave(&mut self) {
        self.highlighted = None;
        self.tooltip = None;
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn shades(&self) -> &[RegionShade] {
        &self.shades
    }

    pub fn shade(&self, region: &str) -> Option<&RegionShade> {
        self.shades.iter().find(|s| s.region == region)
    }

    pub fn totals(&self) -> &[RegionTotal] {
        &self.totals
    }

    pub fn scale(&self) -> ColorScale {
        self.scale
    }

    pub fn top_producers(&self) -> &TopProducers {
        &self.top
    }
}

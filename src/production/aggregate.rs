//! Production aggregation per region

use std::collections::BTreeSet;

use polars::prelude::*;

use super::error::MapError;
use super::records::{CropRecord, CROP_COLUMN, EXCLUDED_REGION, REGION_COLUMN};

/// Internal name of the numeric production column
const PRODUCTION_COLUMN: &str = "production";

/// Number of regions in the top producers list
pub const TOP_PRODUCER_COUNT: usize = 5;

/// Shown when a crop has nothing worth ranking
pub const NO_PRODUCTION_MESSAGE: &str = "No significant production data available for this crop.";

/// Summed production of one region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTotal {
    pub region: String,
    pub total: f64,
}

/// Top producers of the selected crop
#[derive(Debug, Clone, PartialEq)]
pub enum TopProducers {
    Ranked(Vec<RegionTotal>),
    NoData,
}

impl TopProducers {
    /// At most five regions, strictly from the descending ranking
    pub fn from_ranking(mut ranking: Vec<RegionTotal>) -> Self {
        ranking.truncate(TOP_PRODUCER_COUNT);
        match ranking.first() {
            Some(top) if top.total > 0.0 => Self::Ranked(ranking),
            _ => Self::NoData,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::NoData => vec![NO_PRODUCTION_MESSAGE.to_string()],
            Self::Ranked(entries) => entries
                .iter()
                .enumerate()
                .map(|(i, e)| format!("{}. {}: {:.2} Lakh Tonnes", i + 1, e.region, e.total))
                .collect(),
        }
    }
}

/// Production rows held as a polars frame
#[derive(Debug, Clone)]
pub struct ProductionTable {
    df: DataFrame,
}

impl ProductionTable {
    pub fn from_records(records: &[CropRecord]) -> Result<Self, MapError> {
        let regions: Vec<&str> = records.iter().map(|r| r.statename.as_str()).collect();
        let crops: Vec<&str> = records.iter().map(|r| r.cropname.as_str()).collect();
        let production: Vec<f64> = records.iter().map(|r| r.production).collect();

        let df = df!(
            REGION_COLUMN => regions,
            CROP_COLUMN => crops,
            PRODUCTION_COLUMN => production
        )?;
        Ok(Self { df })
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Distinct crop names, sorted
    pub fn crop_names(&self) -> Result<Vec<String>, MapError> {
        let crops = self.df.column(CROP_COLUMN)?.str()?;
        let unique: BTreeSet<&str> = crops
            .into_iter()
            .flatten()
            .filter(|name| !name.trim().is_empty())
            .collect();
        Ok(unique.into_iter().map(str::to_string).collect())
    }

    /// Sum of production per region for `crop`, `Others` excluded.
    /// Sorted by total descending, ties by region name.
    pub fn production_by_region(&self, crop: &str) -> Result<Vec<RegionTotal>, MapError> {
        let grouped = self
            .df
            .clone()
            .lazy()
            .filter(
                col(CROP_COLUMN)
                    .eq(lit(crop))
                    .and(col(REGION_COLUMN).neq(lit(EXCLUDED_REGION))),
            )
            .group_by([col(REGION_COLUMN)])
            .agg([col(PRODUCTION_COLUMN).sum()])
            .collect()?;

        let regions = grouped.column(REGION_COLUMN)?.str()?;
        let totals = grouped.column(PRODUCTION_COLUMN)?.f64()?;

        let mut ranking: Vec<RegionTotal> = regions
            .into_iter()
            .zip(totals.into_iter())
            .filter_map(|(region, total)| {
                region.map(|r| RegionTotal {
                    region: r.to_string(),
                    total: total.unwrap_or(0.0),
                })
            })
            .collect();

        ranking.sort_by(|a, b| {
            b.total
                .total_cmp(&a.total)
                .then_with(|| a.region.cmp(&b.region))
        });
        Ok(ranking)
    }

    pub fn top_producers(&self, crop: &str) -> Result<TopProducers, MapError> {
        Ok(TopProducers::from_ranking(self.production_by_region(crop)?))
    }

    /// Production of the first row matching both crop and region
    pub fn production_for(&self, crop: &str, region: &str) -> Result<Option<f64>, MapError> {
        let matched = self
            .df
            .clone()
            .lazy()
            .filter(
                col(CROP_COLUMN)
                    .eq(lit(crop))
                    .and(col(REGION_COLUMN).eq(lit(region))),
            )
            .select([col(PRODUCTION_COLUMN)])
            .limit(1)
            .collect()?;

        Ok(matched.column(PRODUCTION_COLUMN)?.f64()?.get(0))
    }
}

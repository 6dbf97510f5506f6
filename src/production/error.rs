//! Errors raised while preparing the production map

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Failed to fetch {source_name}: {detail}")]
    Fetch { source_name: String, detail: String },

    #[error("Failed to parse {source_name}: {detail}")]
    Parse { source_name: String, detail: String },

    #[error("Production dataset is empty")]
    EmptyDataset,

    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("Data frame error: {0}")]
    Frame(#[from] polars::error::PolarsError),
}

impl MapError {
    pub fn fetch(source_name: impl Into<String>, detail: impl ToString) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            detail: detail.to_string(),
        }
    }

    pub fn parse(source_name: impl Into<String>, detail: impl ToString) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            detail: detail.to_string(),
        }
    }
}

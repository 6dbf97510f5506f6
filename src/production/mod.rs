//! Production module - crop production datasets and the regional choropleth

pub mod aggregate;
pub mod boundaries;
pub mod choropleth;
pub mod error;
pub mod loader;
pub mod map;
pub mod records;

pub use aggregate::*;
pub use boundaries::*;
pub use choropleth::*;
pub use error::MapError;
pub use loader::*;
pub use map::CropMap;
pub use records::*;

//! Report module - rendering, summarizing and exporting results

pub mod export;
pub mod recommendation;
pub mod summary;

pub use export::*;
pub use recommendation::*;
pub use summary::*;

//! CropSense: Agronomy Assistant Library
//!
//! An observation wizard that builds recommendation requests, a client
//! for the recommendation service, and a regional crop production map
//! with top-producer rankings.

pub mod advisor;
pub mod cli;
pub mod production;
pub mod report;
pub mod utils;

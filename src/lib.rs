//! ecodash - headless geospatial dashboards
//!
//! Two reactive applications built on [`ecodash_ui`]: the Subsetter, which
//! clips a GIS feature file to a bounding box, a track-derived boundary or
//! a boundary geometry, and the Tracks Explorer, which plots animal tracks
//! and exports their spatial extent.

pub mod apps;
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod plotting;
pub mod services;
pub mod subset;
pub mod tracks;

pub use config::AppConfig;
pub use error::EcoError;
pub use services::{EcoServices, LocalServices};

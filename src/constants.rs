//! Global constants for the ecodash applications

/// Default file name for Subsetter output
pub const DEFAULT_SUBSET_FILENAME: &str = "subset.geojson";

/// Default file name for an exported tracks extent
pub const DEFAULT_EXTENT_FILENAME: &str = "tracks_extent.geojson";

/// Base map selected when the Tracks Explorer starts
pub const DEFAULT_MAP_TILE: &str = "EsriWorldStreetMap";

/// Plot frame size in pixels
pub mod frame {
    pub const WIDTH: f64 = 600.0;
    pub const HEIGHT: f64 = 800.0;
    /// Padding around the data, as a fraction of the data extent
    pub const MARGIN: f64 = 0.05;
}

/// Side of a datashade aggregation cell in pixels
pub const DATASHADE_CELL: f64 = 4.0;

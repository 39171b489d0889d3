//! Trait definitions for geodata format implementations.

use std::path::Path;

use crate::format::error::FormatError;
use crate::geo::FeatureCollection;

/// Trait for geodata file readers and writers.
///
/// Every format converts to and from a [`FeatureCollection`]; track tables
/// and boundary geometries are derived from that common representation.
pub trait GeoFormat: Send + Sync {
    /// Unique identifier for this format (e.g., "geojson", "movebank").
    fn id(&self) -> &'static str;

    /// Human-readable name for display.
    fn display_name(&self) -> &'static str;

    /// File extensions this format uses, without the leading dot.
    fn extensions(&self) -> &[&'static str];

    /// Whether [`GeoFormat::write`] is implemented.
    fn supports_write(&self) -> bool {
        false
    }

    /// Parse the textual content of a file.
    fn parse(&self, text: &str) -> Result<FeatureCollection, FormatError>;

    /// Read a file from disk.
    fn read(&self, path: &Path) -> Result<FeatureCollection, FormatError> {
        log::info!("Reading {} from {:?}", self.display_name(), path);
        let text = std::fs::read_to_string(path)?;
        let data = self.parse(&text)?;
        log::info!("Read {} features from {:?}", data.len(), path);
        Ok(data)
    }

    /// Write a feature collection to `path`.
    fn write(&self, _data: &FeatureCollection, _path: &Path) -> Result<(), FormatError> {
        Err(FormatError::UnsupportedOperation(format!(
            "{} files are read-only",
            self.display_name()
        )))
    }

    /// Whether `path` has one of this format's extensions.
    fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let name = name.to_ascii_lowercase();
        self.extensions()
            .iter()
            .any(|ext| name.ends_with(&format!(".{ext}")))
    }
}

//! Format registry for discovering geodata formats.

use std::collections::HashMap;
use std::path::Path;

use crate::format::error::FormatError;
use crate::format::formats::{GeoJsonFormat, MovebankCsvFormat};
use crate::format::traits::GeoFormat;
use crate::geo::FeatureCollection;

/// Registry of available geodata formats.
///
/// All built-in formats are registered automatically on creation.
pub struct FormatRegistry {
    formats: HashMap<&'static str, Box<dyn GeoFormat>>,
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats registered.
    pub fn new() -> Self {
        let mut registry = Self {
            formats: HashMap::new(),
        };

        registry.register(Box::new(GeoJsonFormat));
        registry.register(Box::new(MovebankCsvFormat));

        registry
    }

    /// Register a format implementation.
    pub fn register(&mut self, format: Box<dyn GeoFormat>) {
        self.formats.insert(format.id(), format);
    }

    /// Get a format by its ID.
    pub fn get(&self, id: &str) -> Option<&dyn GeoFormat> {
        self.formats.get(id).map(|f| f.as_ref())
    }

    /// Find the format handling `path`, by extension.
    pub fn for_path(&self, path: &Path) -> Result<&dyn GeoFormat, FormatError> {
        self.formats
            .values()
            .find(|f| f.matches(path))
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::UnsupportedFile {
                path: path.to_path_buf(),
            })
    }

    /// Read `path` with whichever format handles its extension.
    pub fn read(&self, path: &Path) -> Result<FeatureCollection, FormatError> {
        self.for_path(path)?.read(path)
    }

    /// Write `data` to `path` with whichever format handles its extension.
    pub fn write(&self, data: &FeatureCollection, path: &Path) -> Result<(), FormatError> {
        self.for_path(path)?.write(data, path)
    }

    /// Get all format IDs.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.formats.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Get the native GeoJSON format.
    pub fn native(&self) -> &dyn GeoFormat {
        &GeoJsonFormat
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! GeoJSON (RFC 7946) reader and writer.
//!
//! Any GeoJSON object is accepted on read: a `FeatureCollection`, a single
//! `Feature`, or a bare geometry, which is wrapped in a feature without
//! properties. Output is always a pretty-printed `FeatureCollection`.

use std::path::Path;

use serde_json::Value;

use crate::format::error::FormatError;
use crate::format::traits::GeoFormat;
use crate::geo::{Feature, FeatureCollection, Geometry};

/// GeoJSON format.
pub struct GeoJsonFormat;

impl GeoJsonFormat {
    /// Serialize a collection to a GeoJSON string.
    pub fn to_json(&self, data: &FeatureCollection) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

impl GeoFormat for GeoJsonFormat {
    fn id(&self) -> &'static str {
        "geojson"
    }

    fn display_name(&self) -> &'static str {
        "GeoJSON"
    }

    fn extensions(&self) -> &[&'static str] {
        &["geojson", "json"]
    }

    fn supports_write(&self) -> bool {
        true
    }

    fn parse(&self, text: &str) -> Result<FeatureCollection, FormatError> {
        let document: Value = serde_json::from_str(text)?;
        let kind = document
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| FormatError::invalid_format("GeoJSON object has no \"type\""))?
            .to_string();

        match kind.as_str() {
            "FeatureCollection" => Ok(serde_json::from_value(document)?),
            "Feature" => Ok(FeatureCollection::new(vec![serde_json::from_value(
                document,
            )?])),
            "GeometryCollection" => Err(FormatError::invalid_format(
                "GeometryCollection is not supported",
            )),
            _ => {
                let geometry: Geometry = serde_json::from_value(document).map_err(|e| {
                    FormatError::invalid_format(format!("unknown GeoJSON type '{kind}': {e}"))
                })?;
                Ok(FeatureCollection::new(vec![Feature::new(geometry)]))
            }
        }
    }

    fn write(&self, data: &FeatureCollection, path: &Path) -> Result<(), FormatError> {
        log::info!("Writing {} features to {:?}", data.len(), path);
        let json = self.to_json(data)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

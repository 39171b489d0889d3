//! GeoJSON features and feature collections.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::geometry::Geometry;
use super::types::BoundingBox;

/// Attribute table of a feature.
pub type Properties = Map<String, Value>;

/// A geometry with attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// `null` geometries are allowed by GeoJSON.
    pub geometry: Option<Geometry>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Properties,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Properties>::deserialize(deserializer)?.unwrap_or_default())
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties: Properties::new(),
        }
    }

    /// Builder: set one property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// String form of a property: strings as is, numbers and booleans
    /// formatted, `null` and missing as `None`.
    pub fn property_str(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// An ordered list of features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    pub fn geometries(&self) -> impl Iterator<Item = &Geometry> + '_ {
        self.features.iter().filter_map(|f| f.geometry.as_ref())
    }

    /// Bounds of every geometry in the collection.
    pub fn bbox(&self) -> Option<BoundingBox> {
        self.geometries()
            .filter_map(Geometry::bbox)
            .reduce(|a, b| a.union(&b))
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Point;

    #[test]
    fn test_feature_type_tag_round_trips() {
        let feature = Feature::new(Geometry::Point(Point::new(1.0, 2.0))).with_property("name", "a");
        let json = serde_json::to_value(FeatureCollection::new(vec![feature.clone()])).unwrap();

        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["type"], "Feature");
        assert_eq!(json["features"][0]["properties"]["name"], "a");

        let parsed: FeatureCollection = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.features, vec![feature]);
    }

    #[test]
    fn test_null_properties_and_geometry() {
        let feature: Feature =
            serde_json::from_str(r#"{"type": "Feature", "geometry": null, "properties": null}"#)
                .unwrap();
        assert!(feature.geometry.is_none());
        assert!(feature.properties.is_empty());
    }

    #[test]
    fn test_property_str_formats_scalars() {
        let feature = Feature::new(Geometry::Point(Point::new(0.0, 0.0)))
            .with_property("id", 7)
            .with_property("tag", "x")
            .with_property("none", Value::Null);
        assert_eq!(feature.property_str("id").as_deref(), Some("7"));
        assert_eq!(feature.property_str("tag").as_deref(), Some("x"));
        assert_eq!(feature.property_str("none"), None);
        assert_eq!(feature.property_str("missing"), None);
    }
}

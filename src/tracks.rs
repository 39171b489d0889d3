//! Animal movement tracks and their spatial extent.

use std::fmt;
use std::path::{Path, PathBuf};

use ecodash_ui::widgets::ChoiceKey;
use serde::{Deserialize, Serialize};

use crate::error::EcoError;
use crate::geo::{algorithms, BoundingBox, Feature, FeatureCollection, Geometry, Point, Polygon};

/// Property names holding the animal identifier.
const INDIVIDUAL_PROPERTIES: &[&str] = &[
    "individual-local-identifier",
    "individual_local_identifier",
];

const TIMESTAMP_PROPERTY: &str = "timestamp";

/// How a boundary is derived from a set of points or geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryShape {
    /// Axis-aligned bounding box
    Rectangular,
    /// Convex hull
    ConvexHull,
    /// The geometry itself (only for bounding geometries)
    Mask,
}

impl BoundaryShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryShape::Rectangular => "rectangular",
            BoundaryShape::ConvexHull => "convex_hull",
            BoundaryShape::Mask => "mask",
        }
    }
}

impl fmt::Display for BoundaryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ChoiceKey for BoundaryShape {
    fn key(&self) -> &'static str {
        self.as_str()
    }
}

/// A single fix.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub position: Point,
    pub individual: Option<String>,
    pub timestamp: Option<String>,
}

/// Ordered track fixes read from one file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackTable {
    points: Vec<TrackPoint>,
    source: Option<PathBuf>,
}

impl TrackTable {
    pub fn new(points: Vec<TrackPoint>) -> Self {
        Self {
            points,
            source: None,
        }
    }

    /// Build from point features. Vertices of other geometries are used as
    /// fixes too; features without geometry are skipped.
    pub fn from_features(data: &FeatureCollection) -> Self {
        let points = data
            .iter()
            .filter_map(|feature| {
                let geometry = feature.geometry.as_ref()?;
                Some((feature, geometry))
            })
            .flat_map(|(feature, geometry)| {
                let individual = INDIVIDUAL_PROPERTIES
                    .iter()
                    .find_map(|key| feature.property_str(key));
                let timestamp = feature.property_str(TIMESTAMP_PROPERTY);
                geometry
                    .points()
                    .into_iter()
                    .filter(Point::is_finite)
                    .map(move |position| TrackPoint {
                        position,
                        individual: individual.clone(),
                        timestamp: timestamp.clone(),
                    })
            })
            .collect();
        Self::new(points)
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn positions(&self) -> Vec<Point> {
        self.points.iter().map(|p| p.position).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.points.iter().map(|p| &p.position))
    }

    /// Distinct individual identifiers, in order of first appearance.
    pub fn individuals(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for id in self.points.iter().filter_map(|p| p.individual.as_deref()) {
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        seen
    }
}

/// Spatial extent of a track table.
#[derive(Debug, Clone, PartialEq)]
pub struct TracksExtent {
    pub shape: BoundaryShape,
    pub buffer: f64,
    pub polygon: Polygon,
}

impl TracksExtent {
    /// Compute the extent of `tracks`.
    ///
    /// Rectangular extents are the bounding box grown by `buffer`; convex
    /// hull extents are the hull of every fix grown by `buffer` in each axis.
    pub fn compute(tracks: &TrackTable, shape: BoundaryShape, buffer: f64) -> Result<Self, EcoError> {
        let polygon = points_boundary(&tracks.positions(), shape, buffer, "track extents")
            .map_err(|err| match err {
                EcoError::EmptyTracks(_) => EcoError::EmptyTracks(describe_source(tracks)),
                other => other,
            })?;
        log::debug!(
            "Computed {} extent of {} fixes with buffer {}",
            shape,
            tracks.len(),
            buffer
        );
        Ok(Self {
            shape,
            buffer,
            polygon,
        })
    }

    /// One-feature collection with `boundary_shape` and `buffer` properties.
    pub fn to_collection(&self) -> FeatureCollection {
        FeatureCollection::new(vec![
            Feature::new(Geometry::from_polygon(&self.polygon))
                .with_property("boundary_shape", self.shape.as_str())
                .with_property("buffer", self.buffer),
        ])
    }
}

fn describe_source(tracks: &TrackTable) -> String {
    tracks
        .source()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "track data".to_string())
}

/// Rectangular or convex boundary around `points`.
pub fn points_boundary(
    points: &[Point],
    shape: BoundaryShape,
    buffer: f64,
    context: &'static str,
) -> Result<Polygon, EcoError> {
    if !buffer.is_finite() || buffer < 0.0 {
        return Err(EcoError::DegenerateBoundary(format!(
            "buffer must be a non-negative number, got {buffer}"
        )));
    }

    match shape {
        BoundaryShape::Rectangular => BoundingBox::from_points(points)
            .map(|bbox| bbox.expand(buffer).to_polygon())
            .ok_or_else(|| EcoError::EmptyTracks("input".to_string())),
        BoundaryShape::ConvexHull => {
            if points.is_empty() {
                return Err(EcoError::EmptyTracks("input".to_string()));
            }
            let hull = Polygon::new(algorithms::buffered_hull(points, buffer));
            if hull.is_degenerate() {
                return Err(EcoError::DegenerateBoundary(format!(
                    "convex hull of {} points has no area; use a buffer",
                    points.len()
                )));
            }
            Ok(hull)
        }
        BoundaryShape::Mask => Err(EcoError::UnsupportedBoundary {
            shape: shape.to_string(),
            context,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(coords: &[(f64, f64)]) -> TrackTable {
        TrackTable::new(
            coords
                .iter()
                .map(|&(x, y)| TrackPoint {
                    position: Point::new(x, y),
                    individual: None,
                    timestamp: None,
                })
                .collect(),
        )
    }

    #[test]
    fn test_rectangular_extent_is_buffered_bbox() {
        let tracks = table(&[(0.0, 0.0), (2.0, 1.0), (1.0, 3.0)]);
        let extent = TracksExtent::compute(&tracks, BoundaryShape::Rectangular, 0.5).unwrap();

        assert_eq!(
            extent.polygon.bbox(),
            Some(BoundingBox::new(-0.5, -0.5, 2.5, 3.5))
        );
        assert_eq!(extent.polygon.exterior().len(), 4);
    }

    #[test]
    fn test_convex_extent_contains_every_fix() {
        let tracks = table(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.5), (1.0, 2.0)]);
        let extent = TracksExtent::compute(&tracks, BoundaryShape::ConvexHull, 0.1).unwrap();

        assert!(extent.polygon.is_convex());
        for p in tracks.positions() {
            assert!(extent.polygon.contains(&p));
        }
    }

    #[test]
    fn test_extent_is_deterministic() {
        let tracks = table(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
        let first = TracksExtent::compute(&tracks, BoundaryShape::ConvexHull, 0.2).unwrap();
        let second = TracksExtent::compute(&tracks, BoundaryShape::ConvexHull, 0.2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_tracks_are_an_error() {
        let tracks = TrackTable::default().with_source("/data/empty.csv");
        let err = TracksExtent::compute(&tracks, BoundaryShape::Rectangular, 0.1).unwrap_err();
        assert!(matches!(err, EcoError::EmptyTracks(ref s) if s == "/data/empty.csv"));
    }

    #[test]
    fn test_mask_is_not_a_track_extent() {
        let tracks = table(&[(0.0, 0.0)]);
        let err = TracksExtent::compute(&tracks, BoundaryShape::Mask, 0.1).unwrap_err();
        assert!(matches!(err, EcoError::UnsupportedBoundary { .. }));
    }

    #[test]
    fn test_collinear_hull_without_buffer_is_degenerate() {
        let tracks = table(&[(0.0, 0.0), (1.0, 1.0)]);
        let err = TracksExtent::compute(&tracks, BoundaryShape::ConvexHull, 0.0).unwrap_err();
        assert!(matches!(err, EcoError::DegenerateBoundary(_)));
    }

    #[test]
    fn test_from_features_reads_identifiers() {
        let data = FeatureCollection::new(vec![
            Feature::new(Geometry::Point(Point::new(1.0, 2.0)))
                .with_property("individual-local-identifier", "A")
                .with_property("timestamp", "2020-01-01"),
            Feature::new(Geometry::MultiPoint(vec![
                Point::new(3.0, 4.0),
                Point::new(5.0, 6.0),
            ]))
            .with_property("individual_local_identifier", "B"),
        ]);
        let tracks = TrackTable::from_features(&data);

        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks.individuals(), vec!["A", "B"]);
        assert_eq!(tracks.points()[0].timestamp.as_deref(), Some("2020-01-01"));
    }

    #[test]
    fn test_extent_collection_properties() {
        let tracks = table(&[(0.0, 0.0), (1.0, 1.0)]);
        let extent = TracksExtent::compute(&tracks, BoundaryShape::Rectangular, 0.25).unwrap();
        let collection = extent.to_collection();

        assert_eq!(collection.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(feature.property_str("boundary_shape").as_deref(), Some("rectangular"));
        assert_eq!(feature.properties["buffer"], 0.25);
    }
}

//! Subsetting a feature file to a boundary.
//!
//! A [`SubsetRequest`] names the input file, the output file, whether to clip,
//! and exactly one boundary source: a bounding box, a track file, or a file
//! of bounding geometries.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EcoError;
use crate::format::FormatRegistry;
use crate::geo::{BoundingBox, Feature, FeatureCollection, Geometry, Point, Polygon};
use crate::tracks::{points_boundary, BoundaryShape, TrackTable};

/// Arguments of one subset operation.
///
/// Serializes to a flat record: `filename`, `clip`, `outfile` and the keys
/// of the selected [`SubsetSelection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsetRequest {
    pub filename: String,
    pub clip: bool,
    pub outfile: String,
    #[serde(flatten)]
    pub selection: SubsetSelection,
}

/// Where the subset boundary comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubsetSelection {
    /// `[lon_min, lat_min, lon_max, lat_max]`
    BoundingBox { bbox: [f64; 4] },
    TrackPoints {
        track_points: String,
        boundary_type: BoundaryShape,
        buffer: f64,
    },
    BoundingGeometry {
        bounding_geom: String,
        boundary_type: BoundaryShape,
        buffer: f64,
    },
}

/// Output of [`subset_data`].
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetResult {
    /// Features that touch the boundary, clipped if requested
    pub subset: FeatureCollection,
    /// Boundary the subset was taken against
    pub boundary: Vec<Polygon>,
    /// File the subset was written to
    pub outfile: PathBuf,
}

struct Boundary {
    polygons: Vec<Polygon>,
    /// Convex boundaries are a single polygon that line and area
    /// geometries can be clipped against.
    convex: bool,
}

impl Boundary {
    fn convex(polygon: Polygon) -> Self {
        Self {
            polygons: vec![polygon],
            convex: true,
        }
    }

    fn intersects(&self, geometry: &Geometry) -> bool {
        self.polygons.iter().any(|p| geometry.intersects(p))
    }

    fn clip(&self, geometry: &Geometry) -> Option<Geometry> {
        if self.convex {
            return self
                .polygons
                .first()
                .and_then(|polygon| geometry.clip_convex(polygon));
        }

        let inside = |p: &Point| self.polygons.iter().any(|polygon| polygon.contains(p));
        match geometry {
            Geometry::Point(p) => inside(p).then_some(Geometry::Point(*p)),
            Geometry::MultiPoint(points) => {
                let kept: Vec<Point> = points.iter().filter(|p| inside(p)).copied().collect();
                (!kept.is_empty()).then_some(Geometry::MultiPoint(kept))
            }
            other => Some(other.clone()),
        }
    }
}

/// Subset the features of `request.filename` and write them to
/// `request.outfile` as GeoJSON.
pub fn subset_data(request: &SubsetRequest, formats: &FormatRegistry) -> Result<SubsetResult, EcoError> {
    let input = required_path(&request.filename, "the input file")?;
    let outfile = required_path(&request.outfile, "the output file")?;

    let boundary = build_boundary(&request.selection, formats)?;
    let data = formats.read(input)?;
    let total = data.len();

    let subset: FeatureCollection = data
        .features
        .into_iter()
        .filter_map(|feature| {
            let geometry = feature.geometry.as_ref()?;
            if !boundary.intersects(geometry) {
                return None;
            }
            if !request.clip {
                return Some(feature);
            }
            let clipped = boundary.clip(geometry)?;
            Some(Feature {
                geometry: Some(clipped),
                ..feature
            })
        })
        .collect();

    log::info!(
        "Subset kept {} of {} features from {:?}",
        subset.len(),
        total,
        input
    );

    formats.native().write(&subset, outfile)?;

    Ok(SubsetResult {
        subset,
        boundary: boundary.polygons,
        outfile: outfile.to_path_buf(),
    })
}

fn required_path<'a>(raw: &'a str, what: &'static str) -> Result<&'a Path, EcoError> {
    if raw.trim().is_empty() {
        return Err(EcoError::MissingPath(what));
    }
    Ok(Path::new(raw))
}

fn build_boundary(selection: &SubsetSelection, formats: &FormatRegistry) -> Result<Boundary, EcoError> {
    match selection {
        SubsetSelection::BoundingBox { bbox } => Ok(Boundary::convex(bbox_polygon(*bbox)?)),
        SubsetSelection::TrackPoints {
            track_points,
            boundary_type,
            buffer,
        } => {
            let path = required_path(track_points, "the track points file")?;
            let tracks = TrackTable::from_features(&formats.read(path)?).with_source(path);
            if tracks.is_empty() {
                return Err(EcoError::EmptyTracks(path.display().to_string()));
            }
            let polygon = points_boundary(&tracks.positions(), *boundary_type, *buffer, "track points")?;
            Ok(Boundary::convex(polygon))
        }
        SubsetSelection::BoundingGeometry {
            bounding_geom,
            boundary_type,
            buffer,
        } => {
            let path = required_path(bounding_geom, "the bounding geometry file")?;
            let geometries = formats.read(path)?;
            geometry_boundary(&geometries, *boundary_type, *buffer)
        }
    }
}

fn bbox_polygon([lon_min, lat_min, lon_max, lat_max]: [f64; 4]) -> Result<Polygon, EcoError> {
    if ![lon_min, lat_min, lon_max, lat_max].iter().all(|v| v.is_finite()) {
        return Err(EcoError::invalid_bbox("coordinates must be finite"));
    }
    if lon_min > lon_max {
        return Err(EcoError::invalid_bbox(format!(
            "longitude minimum {lon_min} is greater than maximum {lon_max}"
        )));
    }
    if lat_min > lat_max {
        return Err(EcoError::invalid_bbox(format!(
            "latitude minimum {lat_min} is greater than maximum {lat_max}"
        )));
    }
    Ok(BoundingBox::new(lon_min, lat_min, lon_max, lat_max).to_polygon())
}

fn geometry_boundary(
    geometries: &FeatureCollection,
    shape: BoundaryShape,
    buffer: f64,
) -> Result<Boundary, EcoError> {
    if shape != BoundaryShape::Mask {
        let points: Vec<Point> = geometries.geometries().flat_map(Geometry::points).collect();
        if points.is_empty() {
            return Err(EcoError::DegenerateBoundary(
                "bounding geometry file has no coordinates".to_string(),
            ));
        }
        return Ok(Boundary::convex(points_boundary(
            &points,
            shape,
            buffer,
            "bounding geometries",
        )?));
    }

    let polygons: Vec<Polygon> = geometries
        .geometries()
        .flat_map(Geometry::polygons)
        .filter(|p| !p.is_degenerate())
        .collect();
    if polygons.is_empty() {
        return Err(EcoError::DegenerateBoundary(
            "an exact mask needs polygon geometries".to_string(),
        ));
    }
    if buffer > 0.0 {
        log::warn!("Buffer {} ignored for an exact mask boundary", buffer);
    }
    Ok(Boundary {
        polygons,
        convex: false,
    })
}

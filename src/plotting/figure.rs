//! Static figure of a subset and the boundary it was cut with.

use ecodash_ui::Renderable;

use super::canvas::{Marker, Projection, SvgCanvas};
use crate::constants::frame;
use crate::geo::{BoundingBox, Geometry, Polygon};

const FEATURE_COLOR: &str = "#1f77b4";
const BOUNDARY_COLOR: &str = "#555555";

/// Subset features drawn over the outline of their boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    title: String,
    geometries: Vec<Geometry>,
    boundary: Vec<Polygon>,
}

impl Figure {
    pub fn new(title: impl Into<String>, geometries: Vec<Geometry>, boundary: Vec<Polygon>) -> Self {
        Self {
            title: title.into(),
            geometries,
            boundary,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.geometries
            .iter()
            .filter_map(Geometry::bbox)
            .chain(self.boundary.iter().filter_map(Polygon::bbox))
            .reduce(|a, b| a.union(&b))
    }

    fn draw_geometry(canvas: &mut SvgCanvas, projection: &Projection, geometry: &Geometry) {
        match geometry {
            Geometry::Point(p) => {
                canvas.draw_marker(projection.project(p), Marker::Circle, FEATURE_COLOR, 0.8)
            }
            Geometry::MultiPoint(points) => {
                for p in points {
                    canvas.draw_marker(projection.project(p), Marker::Circle, FEATURE_COLOR, 0.8);
                }
            }
            Geometry::LineString(line) => {
                canvas.draw_polyline(&projection.project_all(line), FEATURE_COLOR, 1.5)
            }
            Geometry::MultiLineString(lines) => {
                for line in lines {
                    canvas.draw_polyline(&projection.project_all(line), FEATURE_COLOR, 1.5);
                }
            }
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => {
                for polygon in geometry.polygons() {
                    let rings: Vec<Vec<(f64, f64)>> = polygon
                        .to_rings()
                        .iter()
                        .map(|ring| projection.project_all(ring))
                        .collect();
                    canvas.draw_polygon(&rings, Some(FEATURE_COLOR), FEATURE_COLOR, 1.0, false);
                }
            }
        }
    }
}

impl Renderable for Figure {
    fn summary(&self) -> String {
        format!("{}: {} features", self.title, self.geometries.len())
    }

    fn to_svg(&self) -> String {
        let mut canvas = SvgCanvas::begin_frame(frame::WIDTH, frame::HEIGHT, "#ffffff");
        if let Some(bounds) = self.bounds() {
            let projection = Projection::fit(bounds, frame::WIDTH, frame::HEIGHT);
            for polygon in &self.boundary {
                let rings: Vec<Vec<(f64, f64)>> = polygon
                    .to_rings()
                    .iter()
                    .map(|ring| projection.project_all(ring))
                    .collect();
                canvas.draw_polygon(&rings, None, BOUNDARY_COLOR, 1.5, true);
            }
            for geometry in &self.geometries {
                Self::draw_geometry(&mut canvas, &projection, geometry);
            }
        }
        canvas.draw_text((8.0, 18.0), &self.title, 14.0, "#000000");
        canvas.finish()
    }
}

//! GeoJSON geometry objects and their relation to a boundary polygon.

use serde::{Deserialize, Serialize};

use super::algorithms::{self, clip_line, clip_ring, segments_intersect};
use super::types::{BoundingBox, Point, Polygon};

/// A GeoJSON geometry. `GeometryCollection` is not supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Point),
    MultiPoint(Vec<Point>),
    LineString(Vec<Point>),
    MultiLineString(Vec<Vec<Point>>),
    Polygon(Vec<Vec<Point>>),
    MultiPolygon(Vec<Vec<Vec<Point>>>),
}

impl Geometry {
    pub fn from_polygon(polygon: &Polygon) -> Self {
        Geometry::Polygon(polygon.to_rings())
    }

    /// GeoJSON type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Every vertex, in document order.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Geometry::Point(p) => vec![*p],
            Geometry::MultiPoint(points) | Geometry::LineString(points) => points.clone(),
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
                lines.iter().flatten().copied().collect()
            }
            Geometry::MultiPolygon(polygons) => {
                polygons.iter().flatten().flatten().copied().collect()
            }
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points())
    }

    /// Polygons described by this geometry. Non-areal geometries have none.
    pub fn polygons(&self) -> Vec<Polygon> {
        match self {
            Geometry::Polygon(rings) => Polygon::from_rings(rings).into_iter().collect(),
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .filter_map(|rings| Polygon::from_rings(rings))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_puntal(&self) -> bool {
        matches!(self, Geometry::Point(_) | Geometry::MultiPoint(_))
    }

    /// Whether any part of the geometry touches `boundary`.
    pub fn intersects(&self, boundary: &Polygon) -> bool {
        let (Some(own), Some(other)) = (self.bbox(), boundary.bbox()) else {
            return false;
        };
        if !own.intersects(&other) {
            return false;
        }

        match self {
            Geometry::Point(p) => boundary.contains(p),
            Geometry::MultiPoint(points) => points.iter().any(|p| boundary.contains(p)),
            Geometry::LineString(line) => line_intersects(line, boundary),
            Geometry::MultiLineString(lines) => lines.iter().any(|l| line_intersects(l, boundary)),
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => self
                .polygons()
                .iter()
                .any(|polygon| polygon_intersects(polygon, boundary)),
        }
    }

    /// Clip against a convex boundary. Returns `None` when nothing is left.
    pub fn clip_convex(&self, boundary: &Polygon) -> Option<Geometry> {
        let clip = boundary.exterior();
        match self {
            Geometry::Point(p) => boundary.contains(p).then_some(Geometry::Point(*p)),
            Geometry::MultiPoint(_) => self.clip_points(boundary),
            Geometry::LineString(line) => multi_line(clip_line(line, clip)),
            Geometry::MultiLineString(lines) => multi_line(
                lines
                    .iter()
                    .flat_map(|line| clip_line(line, clip))
                    .collect(),
            ),
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => {
                let pieces: Vec<Vec<Vec<Point>>> = self
                    .polygons()
                    .iter()
                    .filter_map(|polygon| clip_polygon(polygon, clip))
                    .collect();
                match pieces.len() {
                    0 => None,
                    1 => pieces.into_iter().next().map(Geometry::Polygon),
                    _ => Some(Geometry::MultiPolygon(pieces)),
                }
            }
        }
    }

    /// Drop points outside `boundary`. Other geometries are returned as is.
    pub fn clip_points(&self, boundary: &Polygon) -> Option<Geometry> {
        match self {
            Geometry::Point(p) => boundary.contains(p).then_some(Geometry::Point(*p)),
            Geometry::MultiPoint(points) => {
                let inside: Vec<Point> = points
                    .iter()
                    .filter(|p| boundary.contains(p))
                    .copied()
                    .collect();
                (!inside.is_empty()).then_some(Geometry::MultiPoint(inside))
            }
            other => Some(other.clone()),
        }
    }
}

fn line_intersects(line: &[Point], boundary: &Polygon) -> bool {
    if line.iter().any(|p| boundary.contains(p)) {
        return true;
    }
    line.windows(2).any(|segment| {
        boundary
            .edges()
            .any(|(a, b)| segments_intersect(segment[0], segment[1], a, b))
    })
}

fn polygon_intersects(polygon: &Polygon, boundary: &Polygon) -> bool {
    polygon.exterior().iter().any(|p| boundary.contains(p))
        || boundary.exterior().iter().any(|p| polygon.contains(p))
        || polygon.edges().any(|(a, b)| {
            boundary
                .edges()
                .any(|(c, d)| segments_intersect(a, b, c, d))
        })
}

fn clip_polygon(polygon: &Polygon, clip: &[Point]) -> Option<Vec<Vec<Point>>> {
    let exterior = clip_ring(polygon.exterior(), clip);
    if exterior.len() < 3 || algorithms::signed_area(&exterior).abs() < f64::EPSILON {
        return None;
    }
    let mut rings = vec![exterior];
    rings.extend(
        polygon
            .interiors()
            .iter()
            .map(|hole| clip_ring(hole, clip))
            .filter(|hole| hole.len() >= 3),
    );
    let clipped = Polygon::from_rings(&rings)?;
    Some(clipped.to_rings())
}

fn multi_line(mut pieces: Vec<Vec<Point>>) -> Option<Geometry> {
    match pieces.len() {
        0 => None,
        1 => pieces.pop().map(Geometry::LineString),
        _ => Some(Geometry::MultiLineString(pieces)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Polygon {
        BoundingBox::new(0.0, 0.0, 1.0, 1.0).to_polygon()
    }

    #[test]
    fn test_geometry_json_shape() {
        let geometry = Geometry::Point(Point::new(1.0, 2.0));
        let json = serde_json::to_value(&geometry).unwrap();
        assert_eq!(json["type"], "Point");
        assert_eq!(json["coordinates"], serde_json::json!([1.0, 2.0]));

        let parsed: Geometry = serde_json::from_str(
            r#"{"type": "LineString", "coordinates": [[0, 0], [1, 1]], "bbox": [0, 0, 1, 1]}"#,
        )
        .unwrap();
        assert_eq!(parsed.points().len(), 2);
    }

    #[test]
    fn test_line_crossing_boundary_intersects() {
        let line = Geometry::LineString(vec![Point::new(-1.0, 0.5), Point::new(2.0, 0.5)]);
        assert!(line.intersects(&unit_box()));

        let away = Geometry::LineString(vec![Point::new(-1.0, 2.0), Point::new(2.0, 2.0)]);
        assert!(!away.intersects(&unit_box()));
    }

    #[test]
    fn test_polygon_containing_boundary_intersects() {
        let big = Geometry::from_polygon(&BoundingBox::new(-5.0, -5.0, 5.0, 5.0).to_polygon());
        assert!(big.intersects(&unit_box()));
    }

    #[test]
    fn test_clip_polygon_to_box() {
        let straddling =
            Geometry::from_polygon(&BoundingBox::new(0.5, 0.5, 1.5, 1.5).to_polygon());
        let clipped = straddling.clip_convex(&unit_box()).unwrap();

        let bbox = clipped.bbox().unwrap();
        assert_eq!(bbox, BoundingBox::new(0.5, 0.5, 1.0, 1.0));
        assert_eq!(clipped.type_name(), "Polygon");
    }

    #[test]
    fn test_clip_multipoint_keeps_inside_points() {
        let points = Geometry::MultiPoint(vec![Point::new(0.5, 0.5), Point::new(3.0, 3.0)]);
        assert_eq!(
            points.clip_points(&unit_box()),
            Some(Geometry::MultiPoint(vec![Point::new(0.5, 0.5)]))
        );
    }
}

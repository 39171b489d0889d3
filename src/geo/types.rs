//! Planar coordinate types. `x` is longitude and `y` latitude, in degrees.

use serde::{Deserialize, Serialize};

use super::algorithms;

/// A position. Serialized as a GeoJSON `[x, y]` array; extra ordinates
/// (altitude) are accepted and dropped on read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl TryFrom<Vec<f64>> for Point {
    type Error = String;

    fn try_from(coords: Vec<f64>) -> Result<Self, Self::Error> {
        match coords.as_slice() {
            [x, y, ..] => Ok(Point::new(*x, *y)),
            _ => Err(format!(
                "a position needs at least 2 coordinates, got {}",
                coords.len()
            )),
        }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => BoundingBox::new(p.x, p.y, p.x, p.y),
                Some(b) => b.including(p),
            })
        })
    }

    fn including(self, p: &Point) -> Self {
        Self {
            min_x: self.min_x.min(p.x),
            min_y: self.min_y.min(p.y),
            max_x: self.max_x.max(p.x),
            max_y: self.max_y.max(p.y),
        }
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grow the box by `buffer` on every side.
    pub fn expand(&self, buffer: f64) -> Self {
        Self {
            min_x: self.min_x - buffer,
            min_y: self.min_y - buffer,
            max_x: self.max_x + buffer,
            max_y: self.max_y + buffer,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Counter-clockwise rectangle.
    pub fn to_polygon(&self) -> Polygon {
        Polygon::new(vec![
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ])
    }
}

/// A polygon with an exterior ring and optional holes.
///
/// Rings are stored open (the closing vertex is not repeated) and closed
/// again when converted back to GeoJSON coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Vec<Point>,
    interiors: Vec<Vec<Point>>,
}

impl Polygon {
    pub fn new(exterior: Vec<Point>) -> Self {
        Self {
            exterior: open_ring(exterior),
            interiors: Vec::new(),
        }
    }

    /// Build from GeoJSON rings: the first ring is the exterior, the rest holes.
    pub fn from_rings(rings: &[Vec<Point>]) -> Option<Self> {
        let (exterior, holes) = rings.split_first()?;
        Some(Self {
            exterior: open_ring(exterior.clone()),
            interiors: holes.iter().cloned().map(open_ring).collect(),
        })
    }

    pub fn exterior(&self) -> &[Point] {
        &self.exterior
    }

    pub fn interiors(&self) -> &[Vec<Point>] {
        &self.interiors
    }

    /// Closed GeoJSON rings.
    pub fn to_rings(&self) -> Vec<Vec<Point>> {
        std::iter::once(&self.exterior)
            .chain(self.interiors.iter())
            .map(|ring| close_ring(ring))
            .collect()
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.exterior)
    }

    /// Area of the exterior minus the holes.
    pub fn area(&self) -> f64 {
        let holes: f64 = self
            .interiors
            .iter()
            .map(|ring| algorithms::signed_area(ring).abs())
            .sum();
        algorithms::signed_area(&self.exterior).abs() - holes
    }

    /// Whether the exterior has fewer than three distinct vertices.
    pub fn is_degenerate(&self) -> bool {
        self.exterior.len() < 3
    }

    pub fn is_convex(&self) -> bool {
        self.interiors.is_empty() && algorithms::is_convex(&self.exterior)
    }

    /// Point-in-polygon test honouring holes. Boundary points count as inside.
    pub fn contains(&self, p: &Point) -> bool {
        algorithms::ring_contains(&self.exterior, p)
            && !self
                .interiors
                .iter()
                .any(|hole| algorithms::ring_contains(hole, p) && !algorithms::on_ring(hole, p))
    }

    /// Iterate the edges of every ring.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        std::iter::once(&self.exterior)
            .chain(self.interiors.iter())
            .flat_map(|ring| algorithms::ring_edges(ring))
    }
}

fn open_ring(mut ring: Vec<Point>) -> Vec<Point> {
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

fn close_ring(ring: &[Point]) -> Vec<Point> {
    let mut closed = ring.to_vec();
    if let Some(first) = ring.first() {
        closed.push(*first);
    }
    closed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_serializes_as_array() {
        let json = serde_json::to_string(&Point::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");

        let p: Point = serde_json::from_str("[10.0, 20.0, 300.0]").unwrap();
        assert_eq!(p, Point::new(10.0, 20.0));
        assert!(serde_json::from_str::<Point>("[1.0]").is_err());
    }

    #[test]
    fn test_bbox_from_points_and_expand() {
        let points = [Point::new(0.0, 1.0), Point::new(2.0, -1.0)];
        let bbox = BoundingBox::from_points(&points).unwrap().expand(0.5);
        assert_eq!(bbox, BoundingBox::new(-0.5, -1.5, 2.5, 1.5));
        assert!(BoundingBox::from_points(&Vec::<Point>::new()).is_none());
    }

    #[test]
    fn test_rings_are_reclosed() {
        let ring = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        ];
        let polygon = Polygon::from_rings(&[ring.clone()]).unwrap();
        assert_eq!(polygon.exterior().len(), 3);
        assert_eq!(polygon.to_rings(), vec![ring]);
    }

    #[test]
    fn test_contains_respects_holes() {
        let outer = BoundingBox::new(0.0, 0.0, 10.0, 10.0).to_polygon();
        let hole = BoundingBox::new(4.0, 4.0, 6.0, 6.0).to_polygon();
        let polygon =
            Polygon::from_rings(&[outer.exterior().to_vec(), hole.exterior().to_vec()]).unwrap();

        assert!(polygon.contains(&Point::new(1.0, 1.0)));
        assert!(!polygon.contains(&Point::new(5.0, 5.0)));
        assert!(polygon.contains(&Point::new(4.0, 5.0)));
        assert!(!polygon.contains(&Point::new(11.0, 5.0)));
        assert_eq!(polygon.area(), 96.0);
    }
}

//! Geometry types and algorithms used for extents and subsetting.
//!
//! Coordinates are treated as planar longitude/latitude degrees; no map
//! projection is applied.

pub mod algorithms;
mod feature;
mod geometry;
mod types;

pub use feature::{Feature, FeatureCollection, Properties};
pub use geometry::Geometry;
pub use types::{BoundingBox, Point, Polygon};

//! SVG drawing primitives and the lon/lat to pixel projection.

use std::fmt::Write as _;

use crate::constants::frame;
use crate::geo::{BoundingBox, Point};

/// Smallest extent, in degrees, a projection is fitted to.
const MIN_EXTENT: f64 = 1e-3;

/// Equirectangular projection of a lon/lat box onto the plot frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    bounds: BoundingBox,
    width: f64,
    height: f64,
}

impl Projection {
    /// Fit `bbox`, padded by [`frame::MARGIN`], to a `width` x `height` frame.
    pub fn fit(bbox: BoundingBox, width: f64, height: f64) -> Self {
        let pad_x = (bbox.width() * frame::MARGIN).max(MIN_EXTENT / 2.0);
        let pad_y = (bbox.height() * frame::MARGIN).max(MIN_EXTENT / 2.0);
        Self {
            bounds: BoundingBox::new(
                bbox.min_x - pad_x,
                bbox.min_y - pad_y,
                bbox.max_x + pad_x,
                bbox.max_y + pad_y,
            ),
            width,
            height,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Pixel position of `p`; y grows downwards.
    pub fn project(&self, p: &Point) -> (f64, f64) {
        let x = (p.x - self.bounds.min_x) / self.bounds.width() * self.width;
        let y = (self.bounds.max_y - p.y) / self.bounds.height() * self.height;
        (x, y)
    }

    pub fn project_all(&self, points: &[Point]) -> Vec<(f64, f64)> {
        points.iter().map(|p| self.project(p)).collect()
    }
}

/// Point marker shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
}

impl Marker {
    /// Parse a marker name; unknown names draw circles.
    pub fn from_name(name: &str) -> Self {
        match name {
            "circle" | "o" => Marker::Circle,
            "square" | "s" => Marker::Square,
            "triangle" | "^" => Marker::Triangle,
            other => {
                log::warn!("Unknown marker '{}', drawing circles", other);
                Marker::Circle
            }
        }
    }
}

/// Accumulates SVG elements for one frame.
pub struct SvgCanvas {
    out: String,
}

impl SvgCanvas {
    pub fn begin_frame(width: f64, height: f64, clear_color: &str) -> Self {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = writeln!(
            out,
            r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{clear_color}"/>"#
        );
        Self { out }
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        let _ = writeln!(
            self.out,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{color}"/>"#
        );
    }

    pub fn draw_polyline(&mut self, points: &[(f64, f64)], color: &str, width: f64) {
        if points.len() < 2 {
            return;
        }
        let _ = writeln!(
            self.out,
            r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="{width}"/>"#,
            point_list(points)
        );
    }

    /// Draw a polygon with holes. `fill` of `None` draws the outline only.
    pub fn draw_polygon(
        &mut self,
        rings: &[Vec<(f64, f64)>],
        fill: Option<&str>,
        stroke: &str,
        width: f64,
        dashed: bool,
    ) {
        let mut path = String::new();
        for ring in rings.iter().filter(|r| r.len() >= 2) {
            for (i, (x, y)) in ring.iter().enumerate() {
                let op = if i == 0 { 'M' } else { 'L' };
                let _ = write!(path, "{op}{x:.2},{y:.2} ");
            }
            path.push('Z');
        }
        if path.is_empty() {
            return;
        }
        let fill = fill.unwrap_or("none");
        let dash = if dashed { r#" stroke-dasharray="6 4""# } else { "" };
        let _ = writeln!(
            self.out,
            r#"<path d="{path}" fill="{fill}" fill-opacity="0.4" fill-rule="evenodd" stroke="{stroke}" stroke-width="{width}"{dash}/>"#
        );
    }

    pub fn draw_marker(&mut self, (x, y): (f64, f64), marker: Marker, color: &str, alpha: f64) {
        const SIZE: f64 = 3.0;
        let _ = match marker {
            Marker::Circle => writeln!(
                self.out,
                r#"<circle cx="{x:.2}" cy="{y:.2}" r="{SIZE}" fill="{color}" fill-opacity="{alpha}"/>"#
            ),
            Marker::Square => writeln!(
                self.out,
                r#"<rect x="{:.2}" y="{:.2}" width="{}" height="{}" fill="{color}" fill-opacity="{alpha}"/>"#,
                x - SIZE,
                y - SIZE,
                SIZE * 2.0,
                SIZE * 2.0
            ),
            Marker::Triangle => writeln!(
                self.out,
                r#"<polygon points="{}" fill="{color}" fill-opacity="{alpha}"/>"#,
                point_list(&[(x, y - SIZE), (x + SIZE, y + SIZE), (x - SIZE, y + SIZE)])
            ),
        };
    }

    pub fn draw_text(&mut self, (x, y): (f64, f64), text: &str, size: f64, color: &str) {
        let _ = writeln!(
            self.out,
            r#"<text x="{x:.2}" y="{y:.2}" font-family="sans-serif" font-size="{size}" fill="{color}">{}</text>"#,
            escape(text)
        );
    }

    pub fn finish(mut self) -> String {
        self.out.push_str("</svg>\n");
        self.out
    }
}

fn point_list(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

//! Track maps over a tile background.

use ecodash_ui::Renderable;

use super::canvas::{Marker, Projection, SvgCanvas};
use super::color::{Colormap, Rgb};
use crate::constants::{frame, DATASHADE_CELL};
use crate::geo::{BoundingBox, Point, Polygon};

/// Styling of [`super::plot_tracks_with_tiles`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPlotOptions {
    /// Name of the background tile source
    pub tiles: String,
    /// Aggregate fixes on a grid instead of drawing each one
    pub datashade: bool,
    /// Colormap for datashaded counts
    pub cmap: String,
    /// Marker color when not datashading
    pub color: String,
    pub marker: String,
    pub alpha: f64,
}

impl Default for TrackPlotOptions {
    fn default() -> Self {
        Self {
            tiles: "StamenTerrain".to_string(),
            datashade: true,
            cmap: "fire".to_string(),
            color: "r".to_string(),
            marker: "circle".to_string(),
            alpha: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Overlay {
    polygon: Polygon,
    color: String,
}

/// Track fixes drawn over a map tile background, with optional polygon
/// outlines on top.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    points: Vec<Point>,
    options: TrackPlotOptions,
    overlays: Vec<Overlay>,
}

impl MapLayer {
    pub(crate) fn new(points: Vec<Point>, options: TrackPlotOptions) -> Self {
        Self {
            points,
            options,
            overlays: Vec::new(),
        }
    }

    /// Add a polygon outline drawn in `color`.
    pub fn with_overlay(mut self, polygon: Polygon, color: impl Into<String>) -> Self {
        self.overlays.push(Overlay {
            polygon,
            color: color.into(),
        });
        self
    }

    pub fn tiles(&self) -> &str {
        &self.options.tiles
    }

    pub fn options(&self) -> &TrackPlotOptions {
        &self.options
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Extent of the fixes and every overlay.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.overlays
            .iter()
            .filter_map(|o| o.polygon.bbox())
            .fold(BoundingBox::from_points(&self.points), |acc, b| {
                Some(acc.map_or(b, |a| a.union(&b)))
            })
    }

    fn draw_points(&self, canvas: &mut SvgCanvas, projection: &Projection) {
        let color = Rgb::parse_or_gray(&self.options.color).to_string();
        let marker = Marker::from_name(&self.options.marker);
        for p in &self.points {
            canvas.draw_marker(projection.project(p), marker, &color, self.options.alpha);
        }
    }

    /// Count fixes per grid cell and color cells by log count.
    fn draw_datashaded(&self, canvas: &mut SvgCanvas, projection: &Projection) {
        let cols = (frame::WIDTH / DATASHADE_CELL).ceil() as usize;
        let rows = (frame::HEIGHT / DATASHADE_CELL).ceil() as usize;
        let mut counts = vec![0u32; cols * rows];

        for p in &self.points {
            let (x, y) = projection.project(p);
            let col = ((x / DATASHADE_CELL) as usize).min(cols - 1);
            let row = ((y / DATASHADE_CELL) as usize).min(rows - 1);
            counts[row * cols + col] += 1;
        }

        let max = counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return;
        }
        let colormap = Colormap::by_name(&self.options.cmap);
        let scale = f64::from(max).ln_1p();

        for (i, &count) in counts.iter().enumerate().filter(|(_, c)| **c > 0) {
            // Start at 0.25 so sparse cells stay visible against dark tiles.
            let t = 0.25 + 0.75 * f64::from(count).ln_1p() / scale;
            let color = colormap.sample(t).to_string();
            canvas.fill_rect(
                (i % cols) as f64 * DATASHADE_CELL,
                (i / cols) as f64 * DATASHADE_CELL,
                DATASHADE_CELL,
                DATASHADE_CELL,
                &color,
            );
        }
    }
}

impl Renderable for MapLayer {
    fn summary(&self) -> String {
        let mut summary = format!(
            "Map of {} track points on {} tiles",
            self.points.len(),
            self.options.tiles
        );
        if self.options.datashade {
            summary.push_str(" (datashaded)");
        }
        if !self.overlays.is_empty() {
            summary.push_str(&format!(" with {} overlay(s)", self.overlays.len()));
        }
        summary
    }

    fn to_svg(&self) -> String {
        let mut canvas =
            SvgCanvas::begin_frame(frame::WIDTH, frame::HEIGHT, tile_background(&self.options.tiles));
        let Some(bounds) = self.bounds() else {
            return canvas.finish();
        };
        let projection = Projection::fit(bounds, frame::WIDTH, frame::HEIGHT);

        if self.options.datashade {
            self.draw_datashaded(&mut canvas, &projection);
        } else {
            self.draw_points(&mut canvas, &projection);
        }

        for overlay in &self.overlays {
            let rings: Vec<Vec<(f64, f64)>> = overlay
                .polygon
                .to_rings()
                .iter()
                .map(|ring| projection.project_all(ring))
                .collect();
            let color = Rgb::parse_or_gray(&overlay.color).to_string();
            canvas.draw_polygon(&rings, None, &color, 2.0, false);
        }

        canvas.draw_text(
            (8.0, frame::HEIGHT - 8.0),
            &format!("Tiles: {}", self.options.tiles),
            10.0,
            "#444444",
        );
        canvas.finish()
    }
}

/// Flat stand-in color for a tile source.
fn tile_background(tiles: &str) -> &'static str {
    if tiles.contains("Dark") || tiles.contains("Midnight") || tiles.contains("Toner") {
        "#2b2b2b"
    } else if tiles.contains("Imagery") {
        "#3d4a3a"
    } else if tiles.contains("Ocean") {
        "#c6dbe9"
    } else {
        "#ece8dc"
    }
}

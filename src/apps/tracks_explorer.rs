//! Tracks Explorer: load an animal track file, compute and plot its extent,
//! and export the extent as GeoJSON.

use std::io;
use std::path::{self, PathBuf};
use std::rc::Rc;

use ecodash_ui::prelude::*;

use crate::config::AppConfig;
use crate::constants::{DEFAULT_EXTENT_FILENAME, DEFAULT_MAP_TILE};
use crate::error::EcoError;
use crate::plotting::{TrackPlotOptions, MAP_TILE_OPTIONS};
use crate::services::EcoServices;
use crate::tracks::{BoundaryShape, TrackTable, TracksExtent};

pub const TITLE: &str = "Tracks Explorer";

/// Derived field holding the loaded track table.
pub const TRACKS: FieldName = "tracks";

/// Derived field holding the computed extent.
pub const TRACKS_EXTENT: FieldName = "tracks_extent";

pub const MISSING_PATH_MESSAGE: &str = "File path must be selected first!";
pub const MISSING_EXTENT_MESSAGE: &str =
    "Tracks data must be added before a tracks extent file can be saved!";

/// Styling of the track layer; the tile source and datashading come from
/// the widgets.
const TRACK_CMAP: &str = "fire";
const TRACK_COLOR: &str = "r";
const TRACK_MARKER: &str = "circle";
const TRACK_ALPHA: f64 = 0.3;
const EXTENT_COLOR: &str = "r";

/// Display regions of the Tracks Explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracksSlot {
    /// Sidebar with the boundary and map options
    Options,
    Plot,
    /// Track file picker and load button
    FileCard,
    /// Output file name and save button
    Output,
}

/// Tracks Explorer state.
pub struct TracksExplorer {
    services: Rc<dyn EcoServices>,

    pub load_tracks_button: Button,
    pub tracksfile: FileSelector,

    pub tracks_boundary_shape: Choice<BoundaryShape>,
    pub tracks_buffer: NumberInput,
    pub boundary_update: Button,

    pub output_fname: TextInput,
    pub save_tracks_extent_button: Button,

    pub ds_checkbox: Checkbox,
    pub map_tile: Choice<&'static str>,

    tracks: Option<TrackTable>,
    tracks_extent: Option<TracksExtent>,
}

impl TracksExplorer {
    pub fn new(services: Rc<dyn EcoServices>, config: &AppConfig) -> Self {
        let preferences = &config.preferences;
        let tile = MAP_TILE_OPTIONS
            .iter()
            .copied()
            .find(|t| *t == preferences.map_tile)
            .unwrap_or_else(|| {
                log::warn!(
                    "Unknown map tile '{}' in preferences, using {}",
                    preferences.map_tile,
                    DEFAULT_MAP_TILE
                );
                DEFAULT_MAP_TILE
            });
        let output = config.output_path(DEFAULT_EXTENT_FILENAME);

        Self {
            services,
            load_tracks_button: Button::primary("load_tracks_button", "Load data"),
            tracksfile: FileSelector::new("tracksfile", "Track file"),
            tracks_boundary_shape: Choice::new(
                "tracks_boundary_shape",
                "Boundary shape",
                vec![
                    ("Rectangular", BoundaryShape::Rectangular),
                    ("Convex hull", BoundaryShape::ConvexHull),
                ],
            )
            .style(ChoiceStyle::Select)
            .with_value(BoundaryShape::Rectangular),
            tracks_buffer: NumberInput::slider("tracks_buffer", "Buffer size", 0.01, 1.0)
                .step(0.01)
                .with_value(0.1),
            boundary_update: Button::primary("boundary_update", "Update boundary"),
            output_fname: TextInput::new("output_fname", "Output file")
                .placeholder("Select a file...".to_string())
                .with_value(output.display().to_string()),
            save_tracks_extent_button: Button::primary("save_tracks_extent_button", "Save extent"),
            ds_checkbox: Checkbox::new("ds_checkbox", "Datashade tracks", preferences.datashade),
            map_tile: Choice::new(
                "map_tile",
                "Map tile",
                MAP_TILE_OPTIONS.iter().map(|t| (*t, *t)).collect(),
            )
            .style(ChoiceStyle::Select)
            .with_value(tile),
            tracks: None,
            tracks_extent: None,
        }
    }

    pub fn tracks(&self) -> Option<&TrackTable> {
        self.tracks.as_ref()
    }

    pub fn tracks_extent(&self) -> Option<&TracksExtent> {
        self.tracks_extent.as_ref()
    }

    fn boundary_settings(&self) -> (BoundaryShape, f64) {
        (self.tracks_boundary_shape.selected(), self.tracks_buffer.get())
    }

    fn plot_options(&self) -> TrackPlotOptions {
        TrackPlotOptions {
            tiles: self.map_tile.selected().to_string(),
            datashade: self.ds_checkbox.is_checked(),
            cmap: TRACK_CMAP.to_string(),
            color: TRACK_COLOR.to_string(),
            marker: TRACK_MARKER.to_string(),
            alpha: TRACK_ALPHA,
        }
    }
}

/// Sidebar options. Map controls are only offered once something is plotted.
fn options_group(with_map_controls: bool) -> WidgetGroup {
    let mut group = WidgetGroup::new(
        "options_col",
        vec!["tracks_boundary_shape", "tracks_buffer", "boundary_update"],
    );
    if with_map_controls {
        group.push("map_tile");
        group.push("ds_checkbox");
    }
    group
}

fn initial_view() -> View<TracksSlot> {
    View::new()
        .with_slot(TracksSlot::Options, Content::Widgets(options_group(false)))
        .with_slot(TracksSlot::Plot, Content::Empty)
        .with_slot(
            TracksSlot::FileCard,
            Content::Widgets(
                WidgetGroup::new("file_card", vec!["tracksfile", "load_tracks_button"])
                    .titled("Input Data"),
            ),
        )
        .with_slot(
            TracksSlot::Output,
            Content::Widgets(WidgetGroup::new(
                "output",
                vec!["output_fname", "save_tracks_extent_button"],
            )),
        )
}

impl Model for TracksExplorer {
    type Slot = TracksSlot;

    fn title(&self) -> &str {
        TITLE
    }

    fn widgets(&self) -> Vec<&dyn DynWidget> {
        vec![
            &self.tracks_boundary_shape as &dyn DynWidget,
            &self.tracks_buffer,
            &self.boundary_update,
            &self.map_tile,
            &self.ds_checkbox,
            &self.tracksfile,
            &self.load_tracks_button,
            &self.output_fname,
            &self.save_tracks_extent_button,
        ]
    }

    fn widget_mut(&mut self, name: &str) -> Option<&mut dyn DynWidget> {
        let widget: &mut dyn DynWidget = match name {
            "tracks_boundary_shape" => &mut self.tracks_boundary_shape,
            "tracks_buffer" => &mut self.tracks_buffer,
            "boundary_update" => &mut self.boundary_update,
            "map_tile" => &mut self.map_tile,
            "ds_checkbox" => &mut self.ds_checkbox,
            "tracksfile" => &mut self.tracksfile,
            "load_tracks_button" => &mut self.load_tracks_button,
            "output_fname" => &mut self.output_fname,
            "save_tracks_extent_button" => &mut self.save_tracks_extent_button,
            _ => return None,
        };
        Some(widget)
    }
}

/// Build a Tracks Explorer session with its reactions declared.
pub fn session(services: Rc<dyn EcoServices>, config: &AppConfig) -> Session<TracksExplorer> {
    let model = TracksExplorer::new(services, config);
    let mut session = Session::new(model, initial_view());

    session.declare("load_data", &["load_tracks_button"], load_data);
    session.declare("update_tracks_extent", &["boundary_update"], update_tracks_extent);
    session.declare(
        "save_tracks_extent",
        &["save_tracks_extent_button"],
        save_tracks_extent,
    );
    session.declare(
        "update_view",
        &[TRACKS, "boundary_update", "ds_checkbox", "map_tile"],
        update_view,
    );

    session
}

fn load_data(session: &mut Session<TracksExplorer>) -> HandlerResult {
    if !session.model().tracksfile.has_selection() {
        session.set_status(MISSING_PATH_MESSAGE);
        return Ok(());
    }

    session.set_status("Loading data...");
    let path = PathBuf::from(session.model().tracksfile.path());
    session.model_mut().tracksfile.set_expanded(false);

    let services = Rc::clone(&session.model().services);
    let tracks = services.read_track_data(&path)?;
    session.set_status("Track file loaded");

    let (shape, buffer) = session.model().boundary_settings();
    let extent = services.get_tracks_extent(Some(&tracks), shape, buffer)?;
    session.update(TRACKS_EXTENT, |m| m.tracks_extent = Some(extent));
    session.update(TRACKS, |m| m.tracks = Some(tracks));
    Ok(())
}

/// Recompute the extent of the loaded tracks. Fails when nothing is loaded.
fn update_tracks_extent(session: &mut Session<TracksExplorer>) -> HandlerResult {
    let services = Rc::clone(&session.model().services);
    let (shape, buffer) = session.model().boundary_settings();
    let extent = services.get_tracks_extent(session.model().tracks(), shape, buffer)?;
    session.update(TRACKS_EXTENT, |m| m.tracks_extent = Some(extent));
    Ok(())
}

fn save_tracks_extent(session: &mut Session<TracksExplorer>) -> HandlerResult {
    let Some(extent) = session.model().tracks_extent() else {
        session.set_status(MISSING_EXTENT_MESSAGE);
        return Ok(());
    };

    let outfile = resolve_output_path(session.model().output_fname.text())?;
    session.model().services.write_tracks_extent(extent, &outfile)?;
    session.set_status(format!("File saved to: {}", outfile.display()));
    Ok(())
}

/// Absolute form of `raw`. When the parent directory exists, `..` and
/// symlinks in it are resolved as well.
pub fn resolve_output_path(raw: &str) -> io::Result<PathBuf> {
    let outfile = path::absolute(raw)?;
    match (outfile.parent(), outfile.file_name()) {
        (Some(parent), Some(name)) if parent.is_dir() => Ok(parent.canonicalize()?.join(name)),
        _ => Ok(outfile),
    }
}

fn update_view(session: &mut Session<TracksExplorer>) -> HandlerResult {
    session.set_status("Creating plot...");

    let model = session.model();
    let tracks = model.tracks().ok_or(EcoError::MissingTracks)?;
    let extent = model.tracks_extent().ok_or(EcoError::MissingTracks)?;
    let layer = model
        .services
        .plot_tracks_with_tiles(tracks, &model.plot_options())?
        .with_overlay(extent.polygon.clone(), EXTENT_COLOR);

    let view = session.view_mut();
    view.replace(TracksSlot::Options, Content::Widgets(options_group(true)));
    view.replace(TracksSlot::Plot, Content::plot(layer));

    session.set_status("Plot created!");
    Ok(())
}

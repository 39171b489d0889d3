//! Tests for the Tracks Explorer application.

use std::rc::Rc;

use ecodash_ui::{Content, Session, DEFAULT_FAILURE_MESSAGE};
use tempfile::TempDir;

use super::mock::{Call, MockServices};
use super::record_statuses;
use crate::apps::tracks_explorer::{
    self, TracksExplorer, TracksSlot, MISSING_EXTENT_MESSAGE, MISSING_PATH_MESSAGE,
};
use crate::config::AppConfig;
use crate::tracks::BoundaryShape;

fn setup() -> (Rc<MockServices>, Session<TracksExplorer>) {
    let mock = MockServices::new();
    let session = tracks_explorer::session(mock.clone(), &AppConfig::default());
    (mock, session)
}

fn loaded() -> (Rc<MockServices>, Session<TracksExplorer>) {
    let (mock, mut session) = setup();
    session.input("tracksfile", "/data/gulls.csv").unwrap();
    session.press("load_tracks_button").unwrap();
    (mock, session)
}

fn options(session: &Session<TracksExplorer>) -> Vec<&'static str> {
    session
        .view()
        .get(TracksSlot::Options)
        .and_then(Content::as_widgets)
        .map(|g| g.widgets().to_vec())
        .unwrap_or_default()
}

fn is_read(call: &Call) -> bool {
    matches!(call, Call::ReadTrackData(_))
}

fn is_write(call: &Call) -> bool {
    matches!(call, Call::WriteTracksExtent(_))
}

#[test]
fn test_initial_state() {
    let (_, session) = setup();
    let model = session.model();

    assert!(model.tracks().is_none());
    assert!(model.tracks_extent().is_none());
    assert_eq!(model.tracks_boundary_shape.selected(), BoundaryShape::Rectangular);
    assert_eq!(model.tracks_buffer.get(), 0.1);
    assert_eq!(model.tracks_buffer.range(), (0.01, 1.0));
    assert_eq!(model.map_tile.selected(), "EsriWorldStreetMap");
    assert!(model.ds_checkbox.is_checked());
    assert!(model.output_fname.text().ends_with("tracks_extent.geojson"));
    assert_eq!(
        options(&session),
        vec!["tracks_boundary_shape", "tracks_buffer", "boundary_update"]
    );
    assert_eq!(session.view().get(TracksSlot::Plot), Some(&Content::Empty));
    assert_eq!(
        session
            .view()
            .get(TracksSlot::FileCard)
            .and_then(Content::as_widgets)
            .and_then(|g| g.title()),
        Some("Input Data")
    );
    assert_eq!(
        session.reaction_names(),
        vec![
            "update_status_text",
            "load_data",
            "update_tracks_extent",
            "save_tracks_extent",
            "update_view",
        ]
    );
}

#[test]
fn test_preferences_pick_initial_map() {
    let mut config = AppConfig::default();
    config.preferences.map_tile = "OSM".to_string();
    config.preferences.datashade = false;
    let session = tracks_explorer::session(MockServices::new(), &config);

    assert_eq!(session.model().map_tile.selected(), "OSM");
    assert!(!session.model().ds_checkbox.is_checked());

    config.preferences.map_tile = "NoSuchTiles".to_string();
    let session = tracks_explorer::session(MockServices::new(), &config);
    assert_eq!(session.model().map_tile.selected(), "EsriWorldStreetMap");
}

#[test]
fn test_load_without_path_does_not_read() {
    let (mock, mut session) = setup();

    session.press("load_tracks_button").unwrap();

    assert_eq!(session.status(), MISSING_PATH_MESSAGE);
    assert_eq!(session.alert().object(), MISSING_PATH_MESSAGE);
    assert_eq!(mock.count(is_read), 0);
    assert!(session.model().tracks().is_none());
}

#[test]
fn test_load_data_sequence() {
    let (mock, mut session) = setup();
    let statuses = record_statuses(&mut session);
    session.input("tracksfile", "/data/gulls.csv").unwrap();
    assert!(session.model().tracksfile.is_expanded());

    session.press("load_tracks_button").unwrap();

    assert_eq!(
        *statuses.borrow(),
        vec![
            "Loading data...",
            "Track file loaded",
            "Creating plot...",
            "Plot created!",
        ]
    );
    assert!(!session.model().tracksfile.is_expanded());
    assert_eq!(session.model().tracks().map(|t| t.len()), Some(4));
    assert!(session.model().tracks_extent().is_some());

    let calls = mock.calls();
    assert_eq!(calls[0], Call::ReadTrackData("/data/gulls.csv".into()));
    assert_eq!(
        calls[1],
        Call::GetTracksExtent {
            loaded: true,
            shape: BoundaryShape::Rectangular,
            buffer: 0.1,
        }
    );
    assert!(matches!(calls[2], Call::PlotTracksWithTiles(_)));
    assert_eq!(calls.len(), 3);
}

#[test]
fn test_plot_and_map_controls_after_load() {
    let (mock, session) = loaded();

    let plot = session
        .view()
        .get(TracksSlot::Plot)
        .and_then(Content::as_plot)
        .unwrap();
    assert!(plot.summary().contains("4 track points on EsriWorldStreetMap tiles (datashaded)"));
    assert!(plot.summary().contains("with 1 overlay(s)"));
    assert_eq!(
        options(&session),
        vec![
            "tracks_boundary_shape",
            "tracks_buffer",
            "boundary_update",
            "map_tile",
            "ds_checkbox",
        ]
    );

    let Some(Call::PlotTracksWithTiles(opts)) = mock.calls().pop() else {
        panic!("expected a track plot");
    };
    assert_eq!(opts.tiles, "EsriWorldStreetMap");
    assert!(opts.datashade);
    assert_eq!(opts.cmap, "fire");
    assert_eq!(opts.color, "r");
    assert_eq!(opts.marker, "circle");
    assert_eq!(opts.alpha, 0.3);
}

#[test]
fn test_read_failure_is_reported_without_tracks() {
    let (mock, mut session) = setup();
    *mock.tracks.borrow_mut() = None;
    session.input("tracksfile", "/data/broken.csv").unwrap();

    session.press("load_tracks_button").unwrap();

    assert_eq!(session.status(), DEFAULT_FAILURE_MESSAGE);
    assert!(session.model().tracks().is_none());
    assert_eq!(session.view().get(TracksSlot::Plot), Some(&Content::Empty));
}

#[test]
fn test_update_extent_before_load_fails_softly() {
    let (mock, mut session) = setup();

    session.press("boundary_update").unwrap();

    assert_eq!(session.status(), DEFAULT_FAILURE_MESSAGE);
    assert_eq!(session.alert().object(), DEFAULT_FAILURE_MESSAGE);
    assert!(session.model().tracks_extent().is_none());
    assert_eq!(
        mock.count(|c| matches!(c, Call::GetTracksExtent { loaded: false, .. })),
        1
    );
}

#[test]
fn test_update_extent_is_idempotent() {
    let (_, mut session) = loaded();
    session.input("tracks_boundary_shape", "convex_hull").unwrap();

    session.press("boundary_update").unwrap();
    let first = session.model().tracks_extent().cloned().unwrap();
    session.press("boundary_update").unwrap();
    let second = session.model().tracks_extent().cloned().unwrap();

    assert_eq!(first.shape, BoundaryShape::ConvexHull);
    assert_eq!(first, second);
    assert_eq!(session.status(), "Plot created!");
}

#[test]
fn test_boundary_change_waits_for_update_button() {
    let (_, mut session) = loaded();
    let before = session.model().tracks_extent().cloned();

    session.input("tracks_buffer", "0.5").unwrap();

    assert_eq!(session.model().tracks_extent().cloned(), before);
}

#[test]
fn test_map_controls_replot() {
    let (mock, mut session) = loaded();

    session.input("ds_checkbox", "false").unwrap();
    session.input("map_tile", "OSM").unwrap();

    let plots: Vec<(String, bool)> = mock
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::PlotTracksWithTiles(o) => Some((o.tiles, o.datashade)),
            _ => None,
        })
        .collect();
    assert_eq!(
        plots,
        vec![
            ("EsriWorldStreetMap".to_string(), true),
            ("EsriWorldStreetMap".to_string(), false),
            ("OSM".to_string(), false),
        ]
    );
    assert_eq!(session.status(), "Plot created!");
}

#[test]
fn test_map_controls_before_load_fail_softly() {
    let (_, mut session) = setup();

    session.input("ds_checkbox", "false").unwrap();

    assert_eq!(session.status(), DEFAULT_FAILURE_MESSAGE);
    assert_eq!(session.view().get(TracksSlot::Plot), Some(&Content::Empty));
}

#[test]
fn test_save_without_extent_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("extent.geojson");
    let (mock, mut session) = setup();
    session.input("output_fname", &out.display().to_string()).unwrap();

    session.press("save_tracks_extent_button").unwrap();

    assert_eq!(session.status(), MISSING_EXTENT_MESSAGE);
    assert_eq!(mock.count(is_write), 0);
    assert!(!out.exists());
}

#[test]
fn test_save_writes_extent_and_reports_path() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("extent.geojson");
    let (mock, mut session) = loaded();
    session.input("output_fname", &out.display().to_string()).unwrap();

    session.press("save_tracks_extent_button").unwrap();

    let saved = dir.path().canonicalize().unwrap().join("extent.geojson");
    assert_eq!(session.status(), format!("File saved to: {}", saved.display()));
    assert_eq!(mock.count(is_write), 1);
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("\"boundary_shape\": \"rectangular\""));
}

#[test]
fn test_save_resolves_relative_paths() {
    let (mock, mut session) = loaded();
    let relative = format!("ecodash-test-{}.geojson", std::process::id());
    session.input("output_fname", &relative).unwrap();

    session.press("save_tracks_extent_button").unwrap();

    let expected = std::env::current_dir()
        .unwrap()
        .canonicalize()
        .unwrap()
        .join(&relative);
    assert_eq!(
        mock.calls().last(),
        Some(&Call::WriteTracksExtent(expected.clone()))
    );
    assert_eq!(session.status(), format!("File saved to: {}", expected.display()));
    std::fs::remove_file(expected).unwrap();
}

#[test]
fn test_save_normalizes_parent_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    let raw = dir.path().join("nested").join("..").join("extent.geojson");
    let (mock, mut session) = loaded();
    session.input("output_fname", &raw.display().to_string()).unwrap();

    session.press("save_tracks_extent_button").unwrap();

    let expected = dir.path().canonicalize().unwrap().join("extent.geojson");
    assert_eq!(
        mock.calls().last(),
        Some(&Call::WriteTracksExtent(expected.clone()))
    );
    assert_eq!(session.status(), format!("File saved to: {}", expected.display()));
    assert!(expected.exists());
}

#[test]
fn test_output_path_with_missing_parent_stays_absolute() {
    let resolved = tracks_explorer::resolve_output_path("/no/such/dir/extent.geojson").unwrap();
    assert_eq!(resolved, std::path::PathBuf::from("/no/such/dir/extent.geojson"));
}

#[test]
fn test_status_mirror_after_mixed_sequence() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("extent.geojson");
    let (_, mut session) = setup();
    session.input("output_fname", &out.display().to_string()).unwrap();
    session.press("save_tracks_extent_button").unwrap();
    session.press("boundary_update").unwrap();
    session.input("tracksfile", "/data/gulls.csv").unwrap();
    session.press("load_tracks_button").unwrap();
    session.input("map_tile", "CartoDark").unwrap();
    session.press("save_tracks_extent_button").unwrap();

    assert!(out.exists());
    assert_eq!(session.alert().object(), session.status());
}

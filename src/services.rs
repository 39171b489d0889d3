//! Geospatial operations used by the applications.
//!
//! Apps only see the [`EcoServices`] trait so they can be driven by a
//! recording double in tests; [`LocalServices`] is the real implementation
//! backed by the format registry and the geometry module.

use std::path::Path;

use crate::error::EcoError;
use crate::format::FormatRegistry;
use crate::plotting::{self, Figure, MapLayer, TrackPlotOptions};
use crate::subset::{self, SubsetRequest, SubsetResult};
use crate::tracks::{BoundaryShape, TrackTable, TracksExtent};

/// Reading, boundary computation, subsetting and plotting.
pub trait EcoServices {
    /// Read a track file into a table of fixes.
    fn read_track_data(&self, path: &Path) -> Result<TrackTable, EcoError>;

    /// Extent of `tracks`. Fails with [`EcoError::MissingTracks`] when no
    /// tracks are given.
    fn get_tracks_extent(
        &self,
        tracks: Option<&TrackTable>,
        shape: BoundaryShape,
        buffer: f64,
    ) -> Result<TracksExtent, EcoError>;

    /// Write an extent to `path` as GeoJSON.
    fn write_tracks_extent(&self, extent: &TracksExtent, path: &Path) -> Result<(), EcoError>;

    fn subset_data(&self, request: &SubsetRequest) -> Result<SubsetResult, EcoError>;

    fn plot_subset(&self, result: &SubsetResult) -> Result<Figure, EcoError>;

    fn plot_tracks_with_tiles(
        &self,
        tracks: &TrackTable,
        options: &TrackPlotOptions,
    ) -> Result<MapLayer, EcoError>;
}

/// Services backed by local files.
#[derive(Default)]
pub struct LocalServices {
    formats: FormatRegistry,
}

impl LocalServices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_formats(formats: FormatRegistry) -> Self {
        Self { formats }
    }

    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }
}

impl EcoServices for LocalServices {
    fn read_track_data(&self, path: &Path) -> Result<TrackTable, EcoError> {
        let data = self.formats.read(path)?;
        let tracks = TrackTable::from_features(&data).with_source(path);
        if tracks.is_empty() {
            return Err(EcoError::EmptyTracks(path.display().to_string()));
        }
        log::info!(
            "Loaded {} fixes of {} individual(s) from {:?}",
            tracks.len(),
            tracks.individuals().len(),
            path
        );
        Ok(tracks)
    }

    fn get_tracks_extent(
        &self,
        tracks: Option<&TrackTable>,
        shape: BoundaryShape,
        buffer: f64,
    ) -> Result<TracksExtent, EcoError> {
        let tracks = tracks.ok_or(EcoError::MissingTracks)?;
        TracksExtent::compute(tracks, shape, buffer)
    }

    fn write_tracks_extent(&self, extent: &TracksExtent, path: &Path) -> Result<(), EcoError> {
        self.formats.native().write(&extent.to_collection(), path)?;
        Ok(())
    }

    fn subset_data(&self, request: &SubsetRequest) -> Result<SubsetResult, EcoError> {
        subset::subset_data(request, &self.formats)
    }

    fn plot_subset(&self, result: &SubsetResult) -> Result<Figure, EcoError> {
        plotting::plot_subset(result)
    }

    fn plot_tracks_with_tiles(
        &self,
        tracks: &TrackTable,
        options: &TrackPlotOptions,
    ) -> Result<MapLayer, EcoError> {
        plotting::plot_tracks_with_tiles(tracks, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::GeoFormat;
    use crate::format::formats::GeoJsonFormat;
    use tempfile::TempDir;

    const TRACKS_CSV: &str = "\
event-id,timestamp,location-long,location-lat,individual-local-identifier
1,2019-05-01 00:00:00,4.0,52.0,gull-1
2,2019-05-01 01:00:00,4.5,52.5,gull-1
3,2019-05-01 00:00:00,5.0,52.0,gull-2
";

    fn write_tracks(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("tracks.csv");
        std::fs::write(&path, TRACKS_CSV).unwrap();
        path
    }

    #[test]
    fn test_read_track_data() {
        let dir = TempDir::new().unwrap();
        let path = write_tracks(&dir);

        let tracks = LocalServices::new().read_track_data(&path).unwrap();
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks.individuals(), vec!["gull-1", "gull-2"]);
        assert_eq!(tracks.source(), Some(path.as_path()));
    }

    #[test]
    fn test_header_only_track_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "location-long,location-lat\n").unwrap();

        let err = LocalServices::new().read_track_data(&path).unwrap_err();
        assert!(matches!(err, EcoError::EmptyTracks(_)));
    }

    #[test]
    fn test_extent_without_tracks() {
        let err = LocalServices::new()
            .get_tracks_extent(None, BoundaryShape::Rectangular, 0.1)
            .unwrap_err();
        assert!(matches!(err, EcoError::MissingTracks));
    }

    #[test]
    fn test_write_tracks_extent() {
        let dir = TempDir::new().unwrap();
        let services = LocalServices::new();
        let tracks = services.read_track_data(&write_tracks(&dir)).unwrap();
        let extent = services
            .get_tracks_extent(Some(&tracks), BoundaryShape::ConvexHull, 0.1)
            .unwrap();

        let out = dir.path().join("tracks_extent.geojson");
        services.write_tracks_extent(&extent, &out).unwrap();

        let written = GeoJsonFormat.read(&out).unwrap();
        assert_eq!(written.len(), 1);
        let feature = &written.features[0];
        assert_eq!(feature.property_str("boundary_shape").as_deref(), Some("convex_hull"));
        let bbox = written.bbox().unwrap();
        assert!((bbox.min_x - 3.9).abs() < 1e-9);
        assert!((bbox.max_y - 52.6).abs() < 1e-9);
    }
}

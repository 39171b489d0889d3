//! Renderable plots of subsets and track maps.
//!
//! Plots are plain values implementing [`ecodash_ui::Renderable`]; they are
//! placed into view slots and rendered to SVG on demand. Map tiles are not
//! fetched: the tile source only picks the background and is named in the
//! figure.

mod canvas;
mod color;
mod figure;
mod map;

pub use canvas::{Marker, Projection};
pub use color::{Colormap, Rgb, FIRE};
pub use figure::Figure;
pub use map::{MapLayer, TrackPlotOptions};

use crate::error::EcoError;
use crate::subset::SubsetResult;
use crate::tracks::TrackTable;

/// Names of the known map tile sources.
pub const MAP_TILE_OPTIONS: &[&str] = &[
    "CartoDark",
    "CartoEco",
    "CartoLight",
    "CartoMidnight",
    "StamenTerrain",
    "StamenTerrainRetina",
    "StamenWatercolor",
    "StamenToner",
    "StamenTonerBackground",
    "StamenLabels",
    "EsriImagery",
    "EsriNatGeo",
    "EsriUSATopo",
    "EsriTerrain",
    "EsriReference",
    "EsriOceanBase",
    "EsriOceanReference",
    "EsriWorldPhysical",
    "EsriWorldShadedRelief",
    "EsriWorldTopo",
    "EsriWorldDarkGrayBase",
    "EsriWorldDarkGrayReference",
    "EsriWorldLightGrayBase",
    "EsriWorldLightGrayReference",
    "EsriWorldHillshadeDark",
    "EsriWorldHillshade",
    "EsriAntarcticImagery",
    "EsriArcticImagery",
    "EsriArcticOceanBase",
    "EsriArcticOceanReference",
    "EsriWorldBoundariesAndPlaces",
    "EsriWorldBoundariesAndPlacesAlternate",
    "EsriWorldTransportation",
    "EsriDelormeWorldBaseMap",
    "EsriWorldNavigationMap",
    "EsriWorldStreetMap",
    "OSM",
    "OpenTopoMap",
];

/// Whether `name` is one of [`MAP_TILE_OPTIONS`].
pub fn is_known_tile(name: &str) -> bool {
    MAP_TILE_OPTIONS.contains(&name)
}

/// Figure of a subset result.
pub fn plot_subset(result: &SubsetResult) -> Result<Figure, EcoError> {
    if result.subset.is_empty() {
        return Err(EcoError::NothingToPlot("the subset has no features".to_string()));
    }
    let title = match result.outfile.file_name() {
        Some(name) => format!("Subset ({})", name.to_string_lossy()),
        None => "Subset".to_string(),
    };
    Ok(Figure::new(
        title,
        result.subset.geometries().cloned().collect(),
        result.boundary.clone(),
    ))
}

/// Map of every fix in `tracks` over the tile source in `options`.
pub fn plot_tracks_with_tiles(tracks: &TrackTable, options: &TrackPlotOptions) -> Result<MapLayer, EcoError> {
    if !is_known_tile(&options.tiles) {
        return Err(EcoError::UnknownTileSource(options.tiles.clone()));
    }
    if tracks.is_empty() {
        return Err(EcoError::NothingToPlot("no track points loaded".to_string()));
    }
    log::debug!(
        "Plotting {} fixes on {} (datashade: {})",
        tracks.len(),
        options.tiles,
        options.datashade
    );
    Ok(MapLayer::new(tracks.positions(), options.clone()))
}

//! Errors raised by the geospatial services.

use thiserror::Error;

use crate::format::FormatError;

/// Errors from reading tracks, computing extents, subsetting and plotting.
#[derive(Error, Debug)]
pub enum EcoError {
    /// Reading or writing a data file failed
    #[error(transparent)]
    Format(#[from] FormatError),

    /// I/O error outside of format handling
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required file path was left empty
    #[error("No file given for {0}")]
    MissingPath(&'static str),

    /// Track file contained no usable fixes
    #[error("No track points found in {0}")]
    EmptyTracks(String),

    /// An operation needed loaded tracks but none were available
    #[error("Track data has not been loaded")]
    MissingTracks,

    /// Bounding box with min greater than max
    #[error("Invalid bounding box: {message}")]
    InvalidBoundingBox {
        /// Description of the problem
        message: String,
    },

    /// Boundary could not be built from the given geometry
    #[error("Degenerate boundary: {0}")]
    DegenerateBoundary(String),

    /// Boundary type not available for this operation
    #[error("Boundary type '{shape}' is not supported for {context}")]
    UnsupportedBoundary {
        /// Requested boundary type
        shape: String,
        /// Operation that rejected it
        context: &'static str,
    },

    /// Map tile name not in the known tile sources
    #[error("Unknown map tile source '{0}'")]
    UnknownTileSource(String),

    /// Figure would contain nothing
    #[error("Nothing to plot: {0}")]
    NothingToPlot(String),
}

impl EcoError {
    /// Create an invalid bounding box error.
    pub fn invalid_bbox(message: impl Into<String>) -> Self {
        Self::InvalidBoundingBox {
            message: message.into(),
        }
    }
}

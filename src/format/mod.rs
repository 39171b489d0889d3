//! Geodata file reading and writing.
//!
//! This module provides a trait-based system for reading feature files and
//! track tables. New formats are added by implementing [`GeoFormat`] and
//! registering them with a [`FormatRegistry`].
//!
//! ## Supported Formats
//!
//! - **GeoJSON**: feature collections, single features or bare geometries;
//!   the only writable format
//! - **Movebank CSV**: animal tracking exports, one point per fix
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use ecodash::format::FormatRegistry;
//!
//! let registry = FormatRegistry::new();
//! let tracks = registry.read(Path::new("gulls.csv"))?;
//! println!("{} fixes", tracks.len());
//! # Ok::<(), ecodash::format::FormatError>(())
//! ```

mod error;
pub mod formats;
mod registry;
mod traits;

pub use error::FormatError;
pub use registry::FormatRegistry;
pub use traits::GeoFormat;

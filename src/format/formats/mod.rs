//! Geodata format implementations.

mod geojson;
mod movebank_csv;

#[cfg(test)]
mod tests;

pub use geojson::GeoJsonFormat;
pub use movebank_csv::{LATITUDE_COLUMNS, LONGITUDE_COLUMNS, MovebankCsvFormat};

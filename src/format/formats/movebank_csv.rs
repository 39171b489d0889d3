//! Movebank CSV track reader.
//!
//! Movebank exports one row per fix. Longitude and latitude are read from
//! `location-long` / `location-lat` (or the underscore spellings used by
//! some exports); every other column is carried over as a string property,
//! so `individual-local-identifier` and `timestamp` survive into the
//! track table. Rows without a position are skipped.

use serde_json::Value;

use crate::format::error::FormatError;
use crate::format::traits::GeoFormat;
use crate::geo::{Feature, FeatureCollection, Geometry, Point, Properties};

/// Accepted spellings of the longitude column.
pub const LONGITUDE_COLUMNS: &[&str] = &["location-long", "location_long"];

/// Accepted spellings of the latitude column.
pub const LATITUDE_COLUMNS: &[&str] = &["location-lat", "location_lat"];

/// Movebank CSV format (read-only).
pub struct MovebankCsvFormat;

impl GeoFormat for MovebankCsvFormat {
    fn id(&self) -> &'static str {
        "movebank_csv"
    }

    fn display_name(&self) -> &'static str {
        "Movebank CSV"
    }

    fn extensions(&self) -> &[&'static str] {
        &["csv"]
    }

    fn parse(&self, text: &str) -> Result<FeatureCollection, FormatError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) = lines
            .next()
            .ok_or_else(|| FormatError::invalid_format("CSV file is empty"))?;
        let columns = split_record(header.trim_start_matches('\u{feff}'))
            .map_err(|e| FormatError::invalid_format(format!("line {header_line}: {e}")))?;

        let lon_idx = find_column(&columns, LONGITUDE_COLUMNS)?;
        let lat_idx = find_column(&columns, LATITUDE_COLUMNS)?;

        let mut features = Vec::new();
        let mut skipped = 0usize;

        for (line_no, line) in lines {
            let fields = split_record(line)
                .map_err(|e| FormatError::invalid_format(format!("line {line_no}: {e}")))?;
            if fields.len() != columns.len() {
                return Err(FormatError::invalid_format(format!(
                    "line {line_no}: expected {} fields, found {}",
                    columns.len(),
                    fields.len()
                )));
            }

            let (lon, lat) = (fields[lon_idx].trim(), fields[lat_idx].trim());
            if lon.is_empty() || lat.is_empty() {
                skipped += 1;
                continue;
            }
            let x = parse_coordinate(line_no, &columns[lon_idx], lon)?;
            let y = parse_coordinate(line_no, &columns[lat_idx], lat)?;

            let properties: Properties = columns
                .iter()
                .zip(fields)
                .enumerate()
                .filter(|(i, _)| *i != lon_idx && *i != lat_idx)
                .map(|(_, (column, value))| {
                    let value = if value.is_empty() {
                        Value::Null
                    } else {
                        Value::String(value)
                    };
                    (column.clone(), value)
                })
                .collect();

            features.push(Feature {
                id: None,
                geometry: Some(Geometry::Point(Point::new(x, y))),
                properties,
            });
        }

        if skipped > 0 {
            log::warn!("Skipped {} rows without a location", skipped);
        }
        log::debug!("Parsed {} fixes from Movebank CSV", features.len());

        Ok(FeatureCollection::new(features))
    }
}

fn find_column(columns: &[String], names: &[&str]) -> Result<usize, FormatError> {
    columns
        .iter()
        .position(|c| names.contains(&c.trim()))
        .ok_or_else(|| FormatError::missing_column(names.join(" or ")))
}

fn parse_coordinate(line: usize, column: &str, raw: &str) -> Result<f64, FormatError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FormatError::invalid_value(line, column, raw))
}

/// Split one CSV record, honouring double-quoted fields with `""` escapes.
fn split_record(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match (ch, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}

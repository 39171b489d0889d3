//! Tests for the Movebank CSV format.

use crate::format::formats::MovebankCsvFormat;
use crate::format::traits::GeoFormat;
use crate::format::FormatError;
use crate::geo::{Geometry, Point};

const HYPHENATED: &str = "\
event-id,timestamp,location-long,location-lat,individual-local-identifier
1,2019-05-01 00:00:00.000,-120.5,45.25,Gull A
2,2019-05-01 01:00:00.000,-120.25,45.5,Gull A
3,2019-05-01 02:00:00.000,,,Gull A
4,2019-05-01 00:30:00.000,-119.75,46.0,\"Gull, B\"
";

#[test]
fn test_movebank_format_metadata() {
    let format = MovebankCsvFormat;

    assert_eq!(format.id(), "movebank_csv");
    assert!(format.extensions().contains(&"csv"));
    assert!(!format.supports_write(), "Movebank CSV is read-only");
}

#[test]
fn test_parse_hyphenated_columns() {
    let data = MovebankCsvFormat.parse(HYPHENATED).unwrap();

    // row 3 has no location
    assert_eq!(data.len(), 3);
    assert_eq!(
        data.features[0].geometry,
        Some(Geometry::Point(Point::new(-120.5, 45.25)))
    );
    assert_eq!(
        data.features[2]
            .property_str("individual-local-identifier")
            .as_deref(),
        Some("Gull, B")
    );
    assert_eq!(
        data.features[1].property_str("timestamp").as_deref(),
        Some("2019-05-01 01:00:00.000")
    );
    assert!(!data.features[0].properties.contains_key("location-long"));
}

#[test]
fn test_parse_underscore_columns() {
    let text = "location_long,location_lat,individual_local_identifier\n10.0,50.0,x\n";
    let data = MovebankCsvFormat.parse(text).unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(
        data.features[0].geometry,
        Some(Geometry::Point(Point::new(10.0, 50.0)))
    );
}

#[test]
fn test_missing_location_column() {
    let err = MovebankCsvFormat
        .parse("timestamp,location-lat\n2020,1.0\n")
        .unwrap_err();
    assert!(matches!(err, FormatError::MissingColumn { .. }));
}

#[test]
fn test_invalid_coordinate_reports_line() {
    let err = MovebankCsvFormat
        .parse("location-long,location-lat\n1.0,2.0\nabc,3.0\n")
        .unwrap_err();
    match err {
        FormatError::InvalidValue { line, column, value } => {
            assert_eq!(line, 3);
            assert_eq!(column, "location-long");
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_ragged_row_is_rejected() {
    let err = MovebankCsvFormat
        .parse("location-long,location-lat,id\n1.0,2.0\n")
        .unwrap_err();
    assert!(matches!(err, FormatError::InvalidFormat { .. }));
}

#[test]
fn test_empty_file() {
    assert!(MovebankCsvFormat.parse("").is_err());
}

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::core::domain::{CoordinateBatch, SkyCoordinate};
use crate::error::{SkyPixError, SkyPixResult};

/// One row of a record-oriented export (`df.to_json(orient="records")`).
/// Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct CoordinateRecord {
    #[serde(alias = "RA", alias = "raInDeg")]
    ra: Option<f64>,
    #[serde(alias = "Dec", alias = "DEC", alias = "decInDeg")]
    dec: Option<f64>,
}

/// Column-oriented export (`df.to_dict("list")`).
#[derive(Debug, Deserialize)]
struct CoordinateColumns {
    #[serde(alias = "RA", alias = "raInDeg")]
    ra: Vec<Option<f64>>,
    #[serde(alias = "Dec", alias = "DEC", alias = "decInDeg")]
    dec: Vec<Option<f64>>,
}

fn required(value: Option<f64>, field: &str, index: usize) -> SkyPixResult<f64> {
    value.ok_or_else(|| {
        SkyPixError::NumericError(format!("missing {} value at index {}", field, index))
    })
}

fn deserialize_with_path<T>(value: Value) -> SkyPixResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    serde_path_to_error::deserialize(value)
        .map_err(|e| SkyPixError::ParseError(format!("invalid coordinate data at {}", e)))
}

/// Parse coordinates from a JSON string.
///
/// Accepts either an array of `{"ra": .., "dec": ..}` records or an object
/// with `ra` and `dec` arrays. `null` entries are reported as missing values.
pub fn parse_coordinates_json_str(json: &str) -> SkyPixResult<CoordinateBatch> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| SkyPixError::ParseError(format!("Failed to parse JSON: {}", e)))?;

    match value {
        Value::Array(_) => {
            let records: Vec<CoordinateRecord> = deserialize_with_path(value)?;
            records
                .into_iter()
                .enumerate()
                .map(|(index, record)| {
                    Ok(SkyCoordinate::from_degrees(
                        required(record.ra, "ra", index)?,
                        required(record.dec, "dec", index)?,
                    ))
                })
                .collect::<SkyPixResult<Vec<_>>>()
                .map(CoordinateBatch::new)
        }
        Value::Object(_) => {
            let columns: CoordinateColumns = deserialize_with_path(value)?;
            if columns.ra.len() != columns.dec.len() {
                return Err(SkyPixError::InvalidArgument(format!(
                    "ra and dec columns differ in length: {} != {}",
                    columns.ra.len(),
                    columns.dec.len()
                )));
            }
            columns
                .ra
                .into_iter()
                .zip(columns.dec)
                .enumerate()
                .map(|(index, (ra, dec))| {
                    Ok(SkyCoordinate::from_degrees(
                        required(ra, "ra", index)?,
                        required(dec, "dec", index)?,
                    ))
                })
                .collect::<SkyPixResult<Vec<_>>>()
                .map(CoordinateBatch::new)
        }
        other => Err(SkyPixError::ParseError(format!(
            "expected an array of records or an object of columns, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Parse coordinates from a JSON file.
pub fn parse_coordinates_json(json_path: &Path) -> SkyPixResult<CoordinateBatch> {
    let content = fs::read_to_string(json_path)?;
    parse_coordinates_json_str(&content)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! Lookup tables for fuel pathway properties and biofuel GHG savings.
//!
//! This module is organized into focused submodules:
//!
//! - [`fuel_properties`] - Per-pathway calorific values and emission factors
//! - [`biofuel`] - Typical GHG savings per biofuel production pathway
//! - [`sources`] - Bundled defaults and environment-driven table locations
//!
//! Both tables are loaded once and are read-only afterwards, so a single
//! instance can be shared across threads without locking.
//!
//! # Example
//!
//! ```
//! use fueleu_lib::tables::{BiofuelPathwayTable, FuelPropertyTable};
//!
//! let fuels = FuelPropertyTable::bundled().unwrap();
//! let mdo = fuels.get("MDO MGO (Grades DMX to DMB)").unwrap();
//! assert!(mdo.lcv > 0.0);
//!
//! let biofuels = BiofuelPathwayTable::bundled().unwrap();
//! assert_eq!(biofuels.typical_saving("Waste cooking oil biodiesel"), Some(88.0));
//! ```

pub mod biofuel;
pub mod fuel_properties;
pub mod sources;

pub use biofuel::{BiofuelPathway, BiofuelPathwayTable};
pub use fuel_properties::{FuelPropertyRecord, FuelPropertyTable};
pub use sources::{TablePaths, BIOFUEL_FACTORS_ENV, FUEL_PROPERTIES_ENV};

use csv::StringRecord;

use crate::error::{Error, Result};

/// Normalize a header cell for column matching.
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Locate a column by name in a header row.
fn column_index(headers: &StringRecord, column: &str) -> Option<usize> {
    let wanted = normalize_header(column);
    headers.iter().position(|h| normalize_header(h) == wanted)
}

/// Locate a column that must be present, reporting the available headers otherwise.
fn required_column(table: &'static str, headers: &StringRecord, column: &str) -> Result<usize> {
    column_index(headers, column).ok_or_else(|| Error::TableData {
        table,
        message: format!(
            "missing required column {column}. Available: {}",
            headers.iter().collect::<Vec<_>>().join(", ")
        ),
    })
}

/// Read a numeric cell; a missing column or blank cell yields `0.0`.
fn numeric_cell(
    table: &'static str,
    record: &StringRecord,
    index: Option<usize>,
    column: &str,
    pathway: &str,
    row: usize,
) -> Result<f64> {
    let raw = match index.and_then(|i| record.get(i)).map(str::trim) {
        None | Some("") => return Ok(0.0),
        Some(raw) => raw,
    };

    let value = raw.parse::<f64>().map_err(|err| Error::TableData {
        table,
        message: format!("invalid {column} for pathway '{pathway}' at row {row}: {err}"),
    })?;

    // NaN markers exported by spreadsheet tools count as missing.
    if value.is_nan() {
        Ok(0.0)
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matching_ignores_case_and_punctuation() {
        let headers = StringRecord::from(vec![" Pathway_Name ", "LCV (MJ/g)"]);
        assert_eq!(column_index(&headers, "pathway_name"), Some(0));
        assert_eq!(column_index(&headers, "lcvmjg"), Some(1));
        assert_eq!(column_index(&headers, "cf_co2"), None);
    }

    #[test]
    fn blank_and_nan_cells_read_as_zero() {
        let record = StringRecord::from(vec!["fuel", "", "NaN", "1.5"]);
        let read = |i| numeric_cell("test", &record, Some(i), "col", "fuel", 2).unwrap();
        assert_eq!(read(1), 0.0);
        assert_eq!(read(2), 0.0);
        assert_eq!(read(3), 1.5);
        assert_eq!(
            numeric_cell("test", &record, None, "col", "fuel", 2).unwrap(),
            0.0
        );
    }

    #[test]
    fn malformed_cell_names_row_and_column() {
        let record = StringRecord::from(vec!["fuel", "abc"]);
        let err = numeric_cell("test", &record, Some(1), "lcv", "fuel", 7).unwrap_err();
        match err {
            Error::TableData { message, .. } => {
                assert!(message.contains("lcv"));
                assert!(message.contains("row 7"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

//! Fuel pathway property table.
//!
//! Each row of the lookup file describes one fuel pathway: its lower
//! calorific value, tank-to-wake carbon factors, methane slip and default
//! well-to-tank intensity.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::{column_index, numeric_cell, required_column};

const TABLE: &str = "fuel properties";

/// Similarity threshold for "did you mean" suggestions on unknown pathways.
const SUGGESTION_THRESHOLD: f64 = 0.6;
const MAX_SUGGESTIONS: usize = 3;

static BUNDLED: Lazy<std::result::Result<FuelPropertyTable, String>> = Lazy::new(|| {
    FuelPropertyTable::from_reader(include_str!("../../data/fuel_properties.csv").as_bytes())
        .map_err(|err| err.to_string())
});

/// Physical and emission constants for a single fuel pathway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPropertyRecord {
    pub pathway_name: String,
    /// Lower calorific value (MJ/g).
    pub lcv: f64,
    /// Carbon factors (g gas / g fuel).
    pub cf_co2: f64,
    pub cf_ch4: f64,
    pub cf_n2o: f64,
    /// Methane slip as a percentage of fuel mass (0-100).
    pub c_slip_percent: f64,
    /// Default well-to-tank intensity (gCO2eq/MJ).
    pub co2_eq_wtt: f64,
    pub e_value: f64,
    pub epsilon_sv: f64,
}

/// Immutable mapping from fuel pathway name to [`FuelPropertyRecord`].
#[derive(Debug, Clone, Default)]
pub struct FuelPropertyTable {
    records: Vec<FuelPropertyRecord>,
    index: HashMap<String, usize>,
    source: Option<PathBuf>,
}

impl FuelPropertyTable {
    /// The table compiled into the library.
    pub fn bundled() -> Result<&'static Self> {
        BUNDLED.as_ref().map_err(|message| Error::TableData {
            table: TABLE,
            message: message.clone(),
        })
    }

    /// Load the table from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::TableNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path)?;
        let mut table = Self::from_reader(file)?;
        table.source = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            pathways = table.len(),
            "loaded fuel property table"
        );
        Ok(table)
    }

    /// Load the table from a reader (e.g., file or in-memory buffer).
    ///
    /// `pathway_name` is the only required column. Any other numeric column
    /// that is absent, or a blank cell, loads as `0.0`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let name_idx = required_column(TABLE, &headers, "pathway_name")?;
        let lcv_idx = column_index(&headers, "lcv_mj_per_g");
        let co2_idx = column_index(&headers, "cf_co2_gco2_per_gfuel");
        let ch4_idx = column_index(&headers, "cf_ch4_gch4_per_gfuel");
        let n2o_idx = column_index(&headers, "cf_n2o_gn2o_per_gfuel");
        let slip_idx = column_index(&headers, "c_slip_percent");
        let wtt_idx = column_index(&headers, "co2_eq_wtt_gco2eq_per_mj");
        let e_value_idx = column_index(&headers, "e_value");
        let epsilon_idx = column_index(&headers, "epsilon_sv");

        let mut table = Self::default();

        for (offset, result) in csv_reader.records().enumerate() {
            let record = result?;
            // Header is line 1.
            let row = offset + 2;

            let name = record.get(name_idx).unwrap_or_default().trim().to_string();
            if name.is_empty() {
                return Err(Error::TableData {
                    table: TABLE,
                    message: format!("empty pathway_name at row {row}"),
                });
            }

            let cell = |idx, column| numeric_cell(TABLE, &record, idx, column, &name, row);
            let entry = FuelPropertyRecord {
                lcv: cell(lcv_idx, "lcv_mj_per_g")?,
                cf_co2: cell(co2_idx, "cf_co2_gco2_per_gfuel")?,
                cf_ch4: cell(ch4_idx, "cf_ch4_gch4_per_gfuel")?,
                cf_n2o: cell(n2o_idx, "cf_n2o_gn2o_per_gfuel")?,
                c_slip_percent: cell(slip_idx, "c_slip_percent")?,
                co2_eq_wtt: cell(wtt_idx, "co2_eq_wtt_gco2eq_per_mj")?,
                e_value: cell(e_value_idx, "e_value")?,
                epsilon_sv: cell(epsilon_idx, "epsilon_sv")?,
                pathway_name: name,
            };

            table.insert(entry)?;
        }

        debug!(pathways = table.len(), "parsed fuel property rows");
        Ok(table)
    }

    fn insert(&mut self, record: FuelPropertyRecord) -> Result<()> {
        if self.index.contains_key(&record.pathway_name) {
            return Err(Error::DuplicatePathway {
                table: TABLE,
                name: record.pathway_name,
            });
        }
        self.index
            .insert(record.pathway_name.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Look up a pathway by its exact name.
    pub fn get(&self, pathway_name: &str) -> Result<&FuelPropertyRecord> {
        self.index
            .get(pathway_name)
            .map(|&i| &self.records[i])
            .ok_or_else(|| Error::UnknownFuelPathway {
                name: pathway_name.to_string(),
                suggestions: self.suggestions(pathway_name),
            })
    }

    /// Whether a pathway with this exact name exists.
    pub fn contains(&self, pathway_name: &str) -> bool {
        self.index.contains_key(pathway_name)
    }

    /// Pathway names in file order.
    pub fn pathway_names(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.pathway_name.as_str())
            .collect()
    }

    /// Records in file order.
    pub fn records(&self) -> &[FuelPropertyRecord] {
        &self.records
    }

    /// Pathway names containing `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<&str> {
        let needle = term.to_lowercase();
        self.records
            .iter()
            .map(|r| r.pathway_name.as_str())
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the source path if the table was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn suggestions(&self, pathway_name: &str) -> Vec<String> {
        let needle = pathway_name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .records
            .iter()
            .map(|r| {
                let score = strsim::normalized_levenshtein(&needle, &r.pathway_name.to_lowercase());
                (score, r.pathway_name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "pathway_name,lcv_mj_per_g,cf_co2_gco2_per_gfuel,c_slip_percent\n\
                       Diesel,0.0427,3.206,\n\
                       \"LNG, slow\",0.0491,2.75,1.7\n";

    #[test]
    fn missing_columns_and_blank_cells_load_as_zero() {
        let table = FuelPropertyTable::from_reader(CSV.as_bytes()).expect("parse");
        let diesel = table.get("Diesel").expect("diesel present");
        assert_eq!(diesel.cf_co2, 3.206);
        assert_eq!(diesel.c_slip_percent, 0.0);
        assert_eq!(diesel.cf_ch4, 0.0);
        assert_eq!(diesel.co2_eq_wtt, 0.0);
        assert_eq!(table.pathway_names(), vec!["Diesel", "LNG, slow"]);
    }

    #[test]
    fn lookup_is_exact_and_suggests_close_names() {
        let table = FuelPropertyTable::from_reader(CSV.as_bytes()).expect("parse");
        assert!(!table.contains("diesel"));
        match table.get("Diesl").unwrap_err() {
            Error::UnknownFuelPathway { name, suggestions } => {
                assert_eq!(name, "Diesl");
                assert_eq!(suggestions, vec!["Diesel".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_missing_key_column() {
        let err = FuelPropertyTable::from_reader("name,lcv_mj_per_g\nx,1\n".as_bytes())
            .expect_err("key column required");
        assert!(matches!(err, Error::TableData { .. }));
    }

    #[test]
    fn search_is_case_insensitive() {
        let table = FuelPropertyTable::bundled().expect("bundled table");
        let lng = table.search("lng");
        assert!(lng.len() >= 4);
        assert!(lng.iter().all(|name| name.to_lowercase().contains("lng")));
    }
}

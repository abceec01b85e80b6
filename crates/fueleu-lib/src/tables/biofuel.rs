//! Biofuel pathway table of typical GHG-emission savings.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

use super::{numeric_cell, required_column};

const TABLE: &str = "biofuel pathway";
const SAVING_COLUMN: &str = "ghg_emissions_saving_typical_value";

static BUNDLED: Lazy<std::result::Result<BiofuelPathwayTable, String>> = Lazy::new(|| {
    BiofuelPathwayTable::from_reader(
        include_str!("../../data/biofuel_emission_factors.csv").as_bytes(),
    )
    .map_err(|err| err.to_string())
});

/// Pathway entry as presented to clients populating a selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiofuelPathway {
    pub name: String,
    /// Typical GHG saving in whole percent.
    pub typical_value: i64,
}

/// Immutable mapping from biofuel pathway name to its typical GHG saving (%).
#[derive(Debug, Clone, Default)]
pub struct BiofuelPathwayTable {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
    source: Option<PathBuf>,
}

impl BiofuelPathwayTable {
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
            "loaded biofuel pathway table"
        );
        Ok(table)
    }

    /// Load the table from a reader. Headers and string cells are trimmed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let name_idx = required_column(TABLE, &headers, "pathway_name")?;
        let saving_idx = required_column(TABLE, &headers, SAVING_COLUMN)?;

        let mut table = Self::default();
        for (offset, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = offset + 2;

            let name = record.get(name_idx).unwrap_or_default().trim().to_string();
            if name.is_empty() {
                return Err(Error::TableData {
                    table: TABLE,
                    message: format!("empty pathway_name at row {row}"),
                });
            }
            let saving = numeric_cell(TABLE, &record, Some(saving_idx), SAVING_COLUMN, &name, row)?;

            if table.index.contains_key(&name) {
                return Err(Error::DuplicatePathway { table: TABLE, name });
            }
            table.index.insert(name.clone(), table.entries.len());
            table.entries.push((name, saving));
        }

        Ok(table)
    }

    /// Typical GHG saving (%) for a pathway, or `None` when the pathway is unknown.
    pub fn typical_saving(&self, pathway_name: &str) -> Option<f64> {
        self.index
            .get(pathway_name)
            .map(|&i| self.entries[i].1)
    }

    /// All pathways in file order, with savings truncated to whole percent.
    pub fn pathways(&self) -> Vec<BiofuelPathway> {
        self.entries
            .iter()
            .map(|(name, saving)| BiofuelPathway {
                name: name.clone(),
                typical_value: saving.trunc() as i64,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the source path if the table was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

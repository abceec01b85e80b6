//! Resolution of lookup table locations.
//!
//! Tables are taken, in order of preference, from an explicit path (e.g. a CLI
//! flag), from the `FUELEU_FUEL_PROPERTIES` / `FUELEU_BIOFUEL_FACTORS`
//! environment variables, or from the copies bundled into the library.

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;

use super::{BiofuelPathwayTable, FuelPropertyTable};

/// Environment variable pointing at a fuel property CSV.
pub const FUEL_PROPERTIES_ENV: &str = "FUELEU_FUEL_PROPERTIES";

/// Environment variable pointing at a biofuel pathway CSV.
pub const BIOFUEL_FACTORS_ENV: &str = "FUELEU_BIOFUEL_FACTORS";

/// Configured locations of the two lookup tables. `None` selects the bundled table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TablePaths {
    pub fuel_properties: Option<PathBuf>,
    pub biofuel_factors: Option<PathBuf>,
}

impl TablePaths {
    /// Read table locations from the environment.
    pub fn from_env() -> Self {
        Self {
            fuel_properties: env_path(FUEL_PROPERTIES_ENV),
            biofuel_factors: env_path(BIOFUEL_FACTORS_ENV),
        }
    }

    /// Replace configured locations with explicit ones where provided.
    pub fn with_overrides(
        mut self,
        fuel_properties: Option<PathBuf>,
        biofuel_factors: Option<PathBuf>,
    ) -> Self {
        if fuel_properties.is_some() {
            self.fuel_properties = fuel_properties;
        }
        if biofuel_factors.is_some() {
            self.biofuel_factors = biofuel_factors;
        }
        self
    }

    /// Load the fuel property table from the configured location.
    pub fn load_fuel_properties(&self) -> Result<FuelPropertyTable> {
        match &self.fuel_properties {
            Some(path) => FuelPropertyTable::from_path(path),
            None => {
                debug!("using bundled fuel property table");
                FuelPropertyTable::bundled().cloned()
            }
        }
    }

    /// Load the biofuel pathway table from the configured location.
    pub fn load_biofuel_pathways(&self) -> Result<BiofuelPathwayTable> {
        match &self.biofuel_factors {
            Some(path) => BiofuelPathwayTable::from_path(path),
            None => {
                debug!("using bundled biofuel pathway table");
                BiofuelPathwayTable::bundled().cloned()
            }
        }
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

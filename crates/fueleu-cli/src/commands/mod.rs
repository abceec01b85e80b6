// Module exports for CLI subcommands
//
// Each module handles one subcommand. main.rs parses arguments, builds the
// calculator once and dispatches here.

pub mod calculate;
pub mod simulated;
pub mod tables;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};

use fueleu_lib::{EmissionCalculator, TablePaths};

/// Build a calculator from CLI overrides, then environment, then bundled tables.
pub fn load_calculator(
    fuel_properties: Option<PathBuf>,
    biofuel_factors: Option<PathBuf>,
) -> Result<EmissionCalculator> {
    let paths = TablePaths::from_env().with_overrides(fuel_properties, biofuel_factors);
    EmissionCalculator::from_paths(&paths).context("failed to load fuel lookup tables")
}

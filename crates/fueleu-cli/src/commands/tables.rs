//! Lookup table listings: fuels, biofuels and constants.

use anyhow::Result;

use fueleu_cli::output::{
    format_biofuels_text, format_constants_text, format_fuels_text, to_json, OutputFormat,
};
use fueleu_lib::{EmissionCalculator, FuelPropertyRecord};

/// List fuel pathways, optionally filtered by a case-insensitive search term.
pub fn handle_fuels(
    calculator: &EmissionCalculator,
    search: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let table = calculator.fuel_properties();
    let records: Vec<&FuelPropertyRecord> = match search {
        Some(term) => table
            .search(term)
            .into_iter()
            .filter_map(|name| table.get(name).ok())
            .collect(),
        None => table.records().iter().collect(),
    };

    match format {
        OutputFormat::Json => print!("{}", to_json(&records)?),
        OutputFormat::Text => print!("{}", format_fuels_text(&records)),
    }
    Ok(())
}

pub fn handle_biofuels(calculator: &EmissionCalculator, format: OutputFormat) -> Result<()> {
    let pathways = calculator.get_biofuel_pathways();
    match format {
        OutputFormat::Json => print!("{}", to_json(&pathways)?),
        OutputFormat::Text => print!("{}", format_biofuels_text(&pathways)),
    }
    Ok(())
}

pub fn handle_constants(calculator: &EmissionCalculator, format: OutputFormat) -> Result<()> {
    let constants = calculator.get_constants();
    match format {
        OutputFormat::Json => print!("{}", to_json(constants)?),
        OutputFormat::Text => print!("{}", format_constants_text(constants)?),
    }
    Ok(())
}

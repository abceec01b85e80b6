//! Validate command handler.

use std::path::Path;

use anyhow::Result;

use fueleu_cli::output::{format_validation_text, to_json, OutputFormat};
use fueleu_lib::EmissionCalculator;

use super::calculate::read_fuel_inputs;

/// Print the validation outcome. Returns whether the fuel data is valid.
pub fn handle_validate(
    calculator: &EmissionCalculator,
    input: &Path,
    format: OutputFormat,
) -> Result<bool> {
    let fuels = read_fuel_inputs(input)?;
    let outcome = calculator.validate_fuel_data(&fuels);

    match format {
        OutputFormat::Json => print!("{}", to_json(&outcome)?),
        OutputFormat::Text => print!("{}", format_validation_text(&outcome)),
    }
    Ok(outcome.valid)
}

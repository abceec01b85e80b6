//! Simulated command handler.

use anyhow::{Context, Result};

use fueleu_cli::output::{format_simulated_text, to_json, OutputFormat};
use fueleu_cli::terminal::ColorPalette;
use fueleu_lib::{calculate_simulated_compliance, EmissionCalculator, SimulatedFuelMass};

pub fn handle_simulated(
    calculator: &EmissionCalculator,
    mass: SimulatedFuelMass,
    format: OutputFormat,
) -> Result<()> {
    let result = calculate_simulated_compliance(calculator, mass)
        .context("simulated compliance calculation failed")?;

    match (result, format) {
        (Some(result), OutputFormat::Json) => print!("{}", to_json(&result)?),
        (Some(result), OutputFormat::Text) => {
            print!("{}", format_simulated_text(&result, &ColorPalette::detect()))
        }
        (None, OutputFormat::Json) => println!("null"),
        (None, OutputFormat::Text) => println!("No fuel consumed; nothing to calculate."),
    }
    Ok(())
}

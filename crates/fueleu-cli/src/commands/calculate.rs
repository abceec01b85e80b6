//! Calculate command handler.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use fueleu_cli::output::{format_report_text, to_json, OutputFormat};
use fueleu_cli::terminal::ColorPalette;
use fueleu_lib::{EmissionCalculator, EmissionReport, FuelInput};

/// Calculation phase selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Phase {
    /// Per-fuel steps only.
    #[value(name = "1")]
    One,
    /// Per-fuel steps plus fleet compliance and penalty.
    #[default]
    #[value(name = "2")]
    Two,
}

#[derive(Debug, Clone)]
pub struct CalculateArgs {
    pub input: PathBuf,
    pub phase: Phase,
    pub target_year: u16,
    pub format: OutputFormat,
}

pub fn handle_calculate(calculator: &EmissionCalculator, args: &CalculateArgs) -> Result<()> {
    let fuels = read_fuel_inputs(&args.input)?;

    let outcome = calculator.validate_fuel_data(&fuels);
    if !outcome.valid {
        bail!(
            "invalid fuel data in {}: {}",
            args.input.display(),
            outcome.error.unwrap_or_default()
        );
    }

    let report = run_phase(calculator, &fuels, args.phase, args.target_year)?;
    info!(
        fuels = fuels.len(),
        warnings = report.warnings.len(),
        "calculation finished"
    );

    match args.format {
        OutputFormat::Json => print!("{}", to_json(&report)?),
        OutputFormat::Text => print!("{}", format_report_text(&report, &ColorPalette::detect())),
    }
    Ok(())
}

fn run_phase(
    calculator: &EmissionCalculator,
    fuels: &[FuelInput],
    phase: Phase,
    target_year: u16,
) -> Result<EmissionReport> {
    let report = match phase {
        Phase::One => calculator.calculate_emissions_phase1(fuels, target_year),
        Phase::Two => calculator.calculate_emissions_phase2(fuels, target_year),
    };
    report.context("emission calculation failed")
}

/// Read a JSON array of fuel inputs.
pub fn read_fuel_inputs(path: &Path) -> Result<Vec<FuelInput>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open fuel input file {}", path.display()))?;
    FuelInput::list_from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse fuel inputs from {}", path.display()))
}

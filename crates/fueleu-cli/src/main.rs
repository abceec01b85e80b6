mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fueleu_cli::output::OutputFormat;
use fueleu_lib::{SimulatedFuelMass, DEFAULT_TARGET_YEAR};

use commands::calculate::{CalculateArgs, Phase};

#[derive(Parser, Debug)]
#[command(author, version, about = "FuelEU Maritime GHG compliance calculator")]
struct Cli {
    /// Fuel property CSV (overrides FUELEU_FUEL_PROPERTIES).
    #[arg(long, global = true)]
    fuel_properties: Option<PathBuf>,

    /// Biofuel pathway CSV (overrides FUELEU_BIOFUEL_FACTORS).
    #[arg(long, global = true)]
    biofuel_factors: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the emission calculation over a JSON list of fuels.
    Calculate {
        /// JSON file containing an array of fuel inputs.
        #[arg(long)]
        input: PathBuf,
        /// Phase to run: 1 (per fuel) or 2 (per fuel plus fleet compliance).
        #[arg(long, value_enum, default_value = "2")]
        phase: Phase,
        /// Reporting year; accepted and echoed in the result.
        #[arg(long, default_value_t = DEFAULT_TARGET_YEAR,
              value_parser = clap::value_parser!(u16).range(2025..=2029))]
        target_year: u16,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Validate a JSON list of fuels without calculating.
    Validate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List fuel pathways from the fuel property table.
    Fuels {
        /// Case-insensitive substring filter.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List biofuel pathways with their typical GHG saving.
    Biofuels {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show the regulation constants.
    Constants {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Compliance for fuel masses reported by a powertrain simulation.
    Simulated {
        #[arg(long, default_value_t = 0.0)]
        diesel_kg: f64,
        #[arg(long, default_value_t = 0.0)]
        methanol_kg: f64,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let calculator = commands::load_calculator(cli.fuel_properties, cli.biofuel_factors)?;

    match cli.command {
        Command::Calculate {
            input,
            phase,
            target_year,
            format,
        } => commands::calculate::handle_calculate(
            &calculator,
            &CalculateArgs {
                input,
                phase,
                target_year,
                format,
            },
        )?,
        Command::Validate { input, format } => {
            if !commands::validate::handle_validate(&calculator, &input, format)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Fuels { search, format } => {
            commands::tables::handle_fuels(&calculator, search.as_deref(), format)?
        }
        Command::Biofuels { format } => commands::tables::handle_biofuels(&calculator, format)?,
        Command::Constants { format } => commands::tables::handle_constants(&calculator, format)?,
        Command::Simulated {
            diesel_kg,
            methanol_kg,
            format,
        } => commands::simulated::handle_simulated(
            &calculator,
            SimulatedFuelMass {
                diesel_kg,
                methanol_kg,
            },
            format,
        )?,
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

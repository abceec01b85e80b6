use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the FuelEU library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a fuel pathway name is not present in the fuel property table.
    #[error("unknown fuel pathway: {name}{}", format_suggestions(.suggestions))]
    UnknownFuelPathway {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a fuel in a calculation request could not be processed.
    #[error("failed to load properties for fuel {index} ({fuel_type}): {source}")]
    FuelCalculation {
        index: usize,
        fuel_type: String,
        #[source]
        source: Box<Error>,
    },

    /// Raised when explicit validation of a fuel list fails.
    #[error("invalid fuel data: {message}")]
    InvalidFuelData { message: String },

    /// Raised when a compliance deficit cannot be priced, either because the
    /// actual GHG intensity is zero or because the penalty is not finite.
    #[error(
        "penalty is undefined for compliance balance {compliance_balance_gco2eq} gCO2eq \
         at actual GHG intensity {ghg_intensity_actual} gCO2eq/MJ"
    )]
    UndefinedPenalty {
        compliance_balance_gco2eq: f64,
        ghg_intensity_actual: f64,
    },

    /// Raised when a lookup table contains malformed data.
    #[error("invalid {table} table: {message}")]
    TableData { table: &'static str, message: String },

    /// Raised when a lookup table defines the same pathway twice.
    #[error("duplicate pathway in {table} table: {name}")]
    DuplicatePathway { table: &'static str, name: String },

    /// Raised when a configured table file does not exist.
    #[error("lookup table not found at {path}")]
    TableNotFound { path: PathBuf },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

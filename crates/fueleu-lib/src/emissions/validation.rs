//! Up-front validation of a fuel list, invoked explicitly by callers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tables::FuelPropertyTable;

use super::input::FuelInput;

/// `{valid, error}` outcome; `error` is `None` when valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub error: Option<String>,
}

impl ValidationOutcome {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }

    /// Turn a rejection into [`Error::InvalidFuelData`].
    pub fn into_result(self) -> Result<()> {
        match (self.valid, self.error) {
            (true, _) => Ok(()),
            (false, message) => Err(Error::InvalidFuelData {
                message: message.unwrap_or_else(|| "invalid fuel data".to_string()),
            }),
        }
    }
}

/// Check the first failing condition, in list order. Fuel numbers in messages are 1-based.
pub(crate) fn validate(fuels: &[FuelInput], table: &FuelPropertyTable) -> ValidationOutcome {
    if fuels.is_empty() {
        return ValidationOutcome::rejected("No fuel data provided");
    }

    for (i, fuel) in fuels.iter().enumerate() {
        let number = i + 1;
        if fuel.fuel_type.trim().is_empty() {
            return ValidationOutcome::rejected(format!("Fuel type missing for fuel {number}"));
        }
        if !table.contains(&fuel.fuel_type) {
            return ValidationOutcome::rejected(format!("Unknown fuel type: {}", fuel.fuel_type));
        }
        if !fuel.consumption_within_eu.is_finite() || !fuel.consumption_in_out_eu.is_finite() {
            return ValidationOutcome::rejected(format!(
                "Non-finite fuel consumption values for fuel {number}"
            ));
        }
        if fuel.consumption_within_eu < 0.0 || fuel.consumption_in_out_eu < 0.0 {
            return ValidationOutcome::rejected(format!(
                "Negative fuel consumption values for fuel {number}"
            ));
        }
    }

    ValidationOutcome::ok()
}

//! Typed diagnostics for calculation fallbacks.
//!
//! None of these conditions abort a calculation. Each one is logged through
//! `tracing` and recorded on the result so callers (and tests) can see which
//! default was applied.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A recoverable anomaly and the fallback the engine applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum CalculationWarning {
    /// Pathway lookup missed; the GHG saving falls back to 0 %.
    BiofuelPathwayNotFound { fuel_index: usize, pathway: String },
    /// Resolved GHG saving outside 0-100 %; the tabulated WtT value is kept.
    BiofuelPercentageOutOfRange { fuel_index: usize, percentage: f64 },
    /// Lower calorific value is zero or negative; TtW values are forced to 0.
    NonPositiveCalorificValue { fuel_index: usize, lcv: f64 },
    /// Aggregate energy use in scope is not positive; aggregate intensities are 0.
    NoEnergyInScope { energy_use_in_scope: f64 },
}

impl CalculationWarning {
    /// Index of the fuel that triggered the warning, for per-fuel conditions.
    pub fn fuel_index(&self) -> Option<usize> {
        match self {
            Self::BiofuelPathwayNotFound { fuel_index, .. }
            | Self::BiofuelPercentageOutOfRange { fuel_index, .. }
            | Self::NonPositiveCalorificValue { fuel_index, .. } => Some(*fuel_index),
            Self::NoEnergyInScope { .. } => None,
        }
    }

    /// Short description of the default that was applied.
    pub fn fallback(&self) -> &'static str {
        match self {
            Self::BiofuelPathwayNotFound { .. } => "GHG saving set to 0%",
            Self::BiofuelPercentageOutOfRange { .. } => "tabulated WtT GHG value kept",
            Self::NonPositiveCalorificValue { .. } => "TtW emissions set to 0",
            Self::NoEnergyInScope { .. } => "aggregate intensities set to 0",
        }
    }
}

impl fmt::Display for CalculationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BiofuelPathwayNotFound {
                fuel_index,
                pathway,
            } => write!(
                f,
                "fuel {fuel_index}: biofuel pathway '{pathway}' not found ({})",
                self.fallback()
            ),
            Self::BiofuelPercentageOutOfRange {
                fuel_index,
                percentage,
            } => write!(
                f,
                "fuel {fuel_index}: invalid biofuel percentage {percentage}% ({})",
                self.fallback()
            ),
            Self::NonPositiveCalorificValue { fuel_index, lcv } => write!(
                f,
                "fuel {fuel_index}: non-positive LCV {lcv} ({})",
                self.fallback()
            ),
            Self::NoEnergyInScope {
                energy_use_in_scope,
            } => write!(
                f,
                "energy use in scope is {energy_use_in_scope} ({})",
                self.fallback()
            ),
        }
    }
}

/// Collects warnings for a single calculation call.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    warnings: Vec<CalculationWarning>,
}

impl Diagnostics {
    pub(crate) fn emit(&mut self, warning: CalculationWarning) {
        warn!(fuel_index = ?warning.fuel_index(), "{warning}");
        self.warnings.push(warning);
    }

    pub(crate) fn into_warnings(self) -> Vec<CalculationWarning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_condition_tag() {
        let warning = CalculationWarning::BiofuelPathwayNotFound {
            fuel_index: 1,
            pathway: "Algae".to_string(),
        };
        let value = serde_json::to_value(&warning).unwrap();
        assert_eq!(value["condition"], "biofuel_pathway_not_found");
        assert_eq!(value["fuel_index"], 1);
        assert_eq!(
            warning.to_string(),
            "fuel 1: biofuel pathway 'Algae' not found (GHG saving set to 0%)"
        );
    }

    #[test]
    fn aggregate_warning_has_no_fuel_index() {
        let warning = CalculationWarning::NoEnergyInScope {
            energy_use_in_scope: 0.0,
        };
        assert_eq!(warning.fuel_index(), None);
    }
}

//! Caller-supplied fuel consumption records.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How the WtT value of a biofuel is derived.
///
/// Encoded on the wire as `1`, `2` or `3`. Any other number, including
/// negative and fractional codes, is treated as [`BiofuelOption::Unspecified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "u8")]
pub enum BiofuelOption {
    /// Use the caller's `biofuel_percentage` as the GHG saving.
    DirectPercentage,
    /// Resolve the GHG saving from the biofuel pathway table.
    PathwayLookup,
    /// Keep the fuel's tabulated WtT value.
    #[default]
    Unspecified,
}

impl BiofuelOption {
    /// Whether this option replaces the tabulated WtT value with the biofuel formula.
    pub fn uses_saving_formula(self) -> bool {
        matches!(self, Self::DirectPercentage | Self::PathwayLookup)
    }
}

impl From<f64> for BiofuelOption {
    fn from(code: f64) -> Self {
        if code == 1.0 {
            Self::DirectPercentage
        } else if code == 2.0 {
            Self::PathwayLookup
        } else {
            Self::Unspecified
        }
    }
}

impl From<BiofuelOption> for u8 {
    fn from(option: BiofuelOption) -> Self {
        match option {
            BiofuelOption::DirectPercentage => 1,
            BiofuelOption::PathwayLookup => 2,
            BiofuelOption::Unspecified => 3,
        }
    }
}

/// One fuel consumed over the reporting period.
///
/// Missing JSON keys take the same defaults as the request layer: zero
/// consumption, not a biofuel, option 3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelInput {
    /// Fuel pathway name; must match a fuel property table key.
    #[serde(default)]
    pub fuel_type: String,
    /// Tonnes consumed on voyages and at berth within the EU/EEA.
    #[serde(
        rename = "fuel_consumption_within_eu",
        alias = "consumption_within_eu",
        default
    )]
    pub consumption_within_eu: f64,
    /// Tonnes consumed on voyages into or out of the EU/EEA.
    #[serde(
        rename = "fuel_consumption_in_out_eu",
        alias = "consumption_in_out_eu",
        default
    )]
    pub consumption_in_out_eu: f64,
    #[serde(default)]
    pub is_biofuel: bool,
    #[serde(default)]
    pub biofuel_option: BiofuelOption,
    /// GHG saving (%) used with [`BiofuelOption::DirectPercentage`].
    #[serde(default)]
    pub biofuel_percentage: f64,
    /// Pathway name used with [`BiofuelOption::PathwayLookup`].
    #[serde(default)]
    pub biofuel_pathway: String,
}

impl FuelInput {
    /// A conventional (non-biofuel) fuel.
    pub fn new(fuel_type: impl Into<String>, within_eu: f64, in_out_eu: f64) -> Self {
        Self {
            fuel_type: fuel_type.into(),
            consumption_within_eu: within_eu,
            consumption_in_out_eu: in_out_eu,
            is_biofuel: false,
            biofuel_option: BiofuelOption::Unspecified,
            biofuel_percentage: 0.0,
            biofuel_pathway: String::new(),
        }
    }

    /// Mark as a biofuel with a caller-supplied GHG saving percentage.
    pub fn with_biofuel_percentage(mut self, percentage: f64) -> Self {
        self.is_biofuel = true;
        self.biofuel_option = BiofuelOption::DirectPercentage;
        self.biofuel_percentage = percentage;
        self
    }

    /// Mark as a biofuel whose GHG saving comes from the pathway table.
    pub fn with_biofuel_pathway(mut self, pathway: impl Into<String>) -> Self {
        self.is_biofuel = true;
        self.biofuel_option = BiofuelOption::PathwayLookup;
        self.biofuel_pathway = pathway.into();
        self
    }

    /// Total tonnes consumed in both scopes.
    pub fn total_consumption(&self) -> f64 {
        self.consumption_within_eu + self.consumption_in_out_eu
    }

    /// Parse a JSON array of fuel inputs.
    pub fn list_from_reader<R: Read>(reader: R) -> Result<Vec<Self>> {
        Ok(serde_json::from_reader(reader)?)
    }
}

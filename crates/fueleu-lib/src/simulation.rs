//! Compliance figures for vessel simulation output.
//!
//! A powertrain simulation reports the fuel mass burned per fuel kind. Each
//! kind maps onto one fuel pathway, and the whole mass is booked as consumed
//! within the EU/EEA.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::emissions::{EmissionCalculator, FuelInput, DEFAULT_TARGET_YEAR};
use crate::error::Result;

/// Fuel kinds produced by the powertrain simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SimulationFuel {
    Diesel,
    Methanol,
}

impl SimulationFuel {
    pub const ALL: [SimulationFuel; 2] = [SimulationFuel::Diesel, SimulationFuel::Methanol];

    /// Fuel property table key used for this fuel kind.
    pub fn pathway_name(self) -> &'static str {
        match self {
            SimulationFuel::Diesel => "MDO MGO (Grades DMX to DMB)",
            SimulationFuel::Methanol => "e-methanol E10",
        }
    }

    fn from_pathway_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|fuel| fuel.pathway_name() == name)
    }
}

impl fmt::Display for SimulationFuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationFuel::Diesel => f.write_str("Diesel"),
            SimulationFuel::Methanol => f.write_str("Methanol"),
        }
    }
}

/// Fuel mass (kg) burned over a simulated voyage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulatedFuelMass {
    pub diesel_kg: f64,
    pub methanol_kg: f64,
}

impl SimulatedFuelMass {
    fn mass_kg(&self, fuel: SimulationFuel) -> f64 {
        match fuel {
            SimulationFuel::Diesel => self.diesel_kg,
            SimulationFuel::Methanol => self.methanol_kg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatedFuelEmission {
    pub consumption_tonnes: f64,
    pub ghg_emission_tonnes: f64,
}

/// Phase-2 figures for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedCompliance {
    pub fuels: BTreeMap<SimulationFuel, SimulatedFuelEmission>,
    pub ghg_intensity_actual: f64,
    pub ghg_intensity_target: f64,
    pub compliance_balance_tco2eq: f64,
    pub penalty_eur: f64,
    pub total_ghg_emission_tonnes: f64,
}

/// Run phase 2 over simulated fuel masses.
///
/// Returns `Ok(None)` when no fuel was burned. Non-positive masses are
/// ignored.
pub fn calculate_simulated_compliance(
    calculator: &EmissionCalculator,
    mass: SimulatedFuelMass,
) -> Result<Option<SimulatedCompliance>> {
    let inputs: Vec<FuelInput> = SimulationFuel::ALL
        .into_iter()
        .filter(|fuel| mass.mass_kg(*fuel) > 0.0)
        .map(|fuel| {
            let tonnes = mass.mass_kg(fuel) / calculator.get_constants().tonnes_to_kg;
            debug!(fuel = %fuel, pathway = fuel.pathway_name(), tonnes, "simulated fuel within EU");
            FuelInput::new(fuel.pathway_name(), tonnes, 0.0)
        })
        .collect();

    if inputs.is_empty() {
        return Ok(None);
    }

    calculator.validate_fuel_data(&inputs).into_result()?;
    let report = calculator.calculate_emissions_phase2(&inputs, DEFAULT_TARGET_YEAR)?;

    let fuels = report
        .fuel_breakdown
        .iter()
        .filter_map(|calc| {
            SimulationFuel::from_pathway_name(&calc.fuel.fuel_type).map(|fuel| {
                (
                    fuel,
                    SimulatedFuelEmission {
                        consumption_tonnes: calc.fuel.fuel_mass_total,
                        ghg_emission_tonnes: calc.compliance.ghg_emission,
                    },
                )
            })
        })
        .collect();

    let Some(totals) = report.final_results else {
        return Ok(None);
    };

    info!(
        total_ghg_emission_tonnes = totals.total_ghg_emission,
        penalty_eur = totals.penalty,
        "simulated compliance calculated"
    );

    Ok(Some(SimulatedCompliance {
        fuels,
        ghg_intensity_actual: totals.ghg_intensity_actual,
        ghg_intensity_target: totals.ghg_intensity_target,
        compliance_balance_tco2eq: totals.compliance_balance_tco2eq,
        penalty_eur: totals.penalty,
        total_ghg_emission_tonnes: totals.total_ghg_emission,
    }))
}

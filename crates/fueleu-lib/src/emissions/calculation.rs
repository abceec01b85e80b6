//! Per-fuel calculation record and the stage values that build it.
//!
//! Each pipeline step produces one stage struct from the stages before it.
//! [`FuelCalculation`] is only assembled once all six exist, so no step can
//! observe a value that a later step fills in. Stages are flattened when
//! serialized, giving one flat record per fuel.

use serde::{Deserialize, Serialize};

use super::input::BiofuelOption;

/// Step 1: identity, consumption, fuel properties and the resolved WtT value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedFuel {
    pub fuel_index: usize,
    /// Spreadsheet column label of the fuel (`A`, `B`, ...).
    pub fuel_letter: String,
    pub fuel_type: String,
    /// Tonnes consumed within the EU/EEA.
    pub fuel_within_eu: f64,
    /// Tonnes consumed into or out of the EU/EEA.
    pub fuel_in_out_eu: f64,
    pub fuel_mass_total: f64,
    pub no_engines: u32,

    pub is_biofuel: bool,
    pub biofuel_option: BiofuelOption,
    pub biofuel_percentage: f64,
    pub biofuel_pathway: String,
    /// Whether `wtt_ghg` came from the biofuel saving formula.
    pub biofuel_calculation_used: bool,
    /// Tabulated WtT value before any biofuel adjustment (gCO2eq/MJ).
    pub base_wtt_ghg: f64,

    /// Lower calorific value (MJ/g).
    pub lcv: f64,
    /// WtT value used downstream (gCO2eq/MJ).
    pub wtt_ghg: f64,
    pub cf_co2: f64,
    pub cf_ch4: f64,
    pub cf_n2o: f64,
    /// Methane slip (%).
    pub c_slip: f64,
    pub e_value: f64,
    pub epsilon_sv: f64,
}

/// Step 2: tank-to-wake emissions per MJ (gCO2eq/MJ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TtwEmissions {
    pub ttw_co2: f64,
    pub ttw_ch4: f64,
    pub ttw_n2o: f64,
    pub ttw_total_per_mj: f64,
}

/// Step 3: share of consumption in scope (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelScope {
    pub fuel_scope_within_eu: f64,
    pub fuel_scope_in_out_eu: f64,
}

/// Step 4: energy quantities (MJ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyValues {
    pub energy_in_eu: f64,
    pub energy_out_eu: f64,
    pub fueleu_energy_in_eu: f64,
    pub fueleu_energy_out_eu: f64,
    pub energy_use_scope: f64,
}

/// Step 5: intensity quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhgIntensity {
    /// gCO2eq/MJ
    pub wtw_ghg_intensity: f64,
    /// gCO2eq/MJ
    pub ghg_intensity_target: f64,
    /// gCO2eq/MJ
    pub ttw_ghg_intensity: f64,
    /// WtT value multiplied by energy use in scope; an absolute quantity, not per MJ.
    pub wtt_ghg_intensity: f64,
}

/// Step 6: emitted CO2 mass and individual compliance balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelCompliance {
    pub ghg_emission: f64,
    pub compliance_balance: f64,
}

/// Fully populated per-fuel record produced by phase 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCalculation {
    #[serde(flatten)]
    pub fuel: LoadedFuel,
    #[serde(flatten)]
    pub ttw: TtwEmissions,
    #[serde(flatten)]
    pub scope: FuelScope,
    #[serde(flatten)]
    pub energy: EnergyValues,
    #[serde(flatten)]
    pub intensity: GhgIntensity,
    #[serde(flatten)]
    pub compliance: FuelCompliance,
}

/// Spreadsheet-style column label for a zero-based fuel index.
pub(crate) fn column_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

//! Regulation constants used across the emission pipeline.

use serde::{Deserialize, Serialize};

/// Reduction applied to the baseline intensity to obtain the target.
///
/// Only the 2 % step (2025) is applied, for every target year.
pub const TARGET_REDUCTION_FACTOR: f64 = 0.98;

/// Scale between the per-fuel energy-use figures and the gram-scale aggregate formulas.
pub const ENERGY_SCOPE_SCALE: f64 = 1_000_000.0;

/// Fixed global-warming potentials, intensity targets, unit factors and penalty rates.
///
/// Built once (usually via [`Default`]) and passed by reference into every
/// calculation. Serializes with the upper-case key set exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RegulationConstants {
    /// IPCC AR4 global-warming potentials.
    pub gwp_co2: f64,
    pub gwp_ch4: f64,
    pub gwp_n2o: f64,

    /// Baseline well-to-wake intensity (gCO2eq/MJ).
    pub ghg_intensity_baseline: f64,
    pub ghg_intensity_target_2025: f64,
    pub ghg_intensity_target_2026: f64,
    pub ghg_intensity_target_2027: f64,
    pub ghg_intensity_target_2028: f64,
    pub ghg_intensity_target_2029: f64,

    pub mj_to_gj: f64,
    pub tonnes_to_kg: f64,
    pub grams_to_tonnes: f64,

    /// Share of consumption counted on voyages within the EU/EEA (%).
    pub default_fuel_scope_within_eu: f64,
    /// Share of consumption counted on voyages into or out of the EU/EEA (%).
    pub default_fuel_scope_in_out_eu: f64,

    /// EUR per tonne of VLSFO-equivalent.
    pub fuel_penalty_rate: f64,
    /// MJ per tonne of VLSFO.
    pub vlsfo_lcv: f64,

    /// RED fossil fuel comparator (gCO2eq/MJ) for biofuel WtT values.
    pub fossil_fuel_comparator_red: f64,
}

impl Default for RegulationConstants {
    fn default() -> Self {
        Self {
            gwp_co2: 1.0,
            gwp_ch4: 25.0,
            gwp_n2o: 298.0,
            ghg_intensity_baseline: 91.16,
            ghg_intensity_target_2025: 91.16,
            ghg_intensity_target_2026: 89.34,
            ghg_intensity_target_2027: 87.52,
            ghg_intensity_target_2028: 85.70,
            ghg_intensity_target_2029: 83.88,
            mj_to_gj: 1000.0,
            tonnes_to_kg: 1000.0,
            grams_to_tonnes: 1_000_000.0,
            default_fuel_scope_within_eu: 100.0,
            default_fuel_scope_in_out_eu: 50.0,
            fuel_penalty_rate: 2400.0,
            vlsfo_lcv: 41_000.0,
            fossil_fuel_comparator_red: 94.0,
        }
    }
}

impl RegulationConstants {
    /// GHG intensity target (gCO2eq/MJ) applied to every fuel and to the fleet aggregate.
    ///
    /// Formula: baseline × 0.98, independent of the requested target year.
    pub fn ghg_intensity_target(&self) -> f64 {
        self.ghg_intensity_baseline * TARGET_REDUCTION_FACTOR
    }

    /// Published intensity value for a target year, when the year is tabulated.
    ///
    /// Informational only; the pipeline always uses [`Self::ghg_intensity_target`].
    pub fn published_target_for_year(&self, year: u16) -> Option<f64> {
        match year {
            2025 => Some(self.ghg_intensity_target_2025),
            2026 => Some(self.ghg_intensity_target_2026),
            2027 => Some(self.ghg_intensity_target_2027),
            2028 => Some(self.ghg_intensity_target_2028),
            2029 => Some(self.ghg_intensity_target_2029),
            _ => None,
        }
    }
}

//! Phase 2: fleet aggregation, compliance balance and penalty.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{RegulationConstants, ENERGY_SCOPE_SCALE};
use crate::error::{Error, Result};

use super::calculation::FuelCalculation;
use super::diagnostics::{CalculationWarning, Diagnostics};

/// Fleet-wide totals for one phase-2 call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// gCO2eq/MJ
    #[serde(rename = "ghg_intensity_target_2025_2029")]
    pub ghg_intensity_target: f64,
    #[serde(rename = "leg_energy_total_in_eu")]
    pub energy_total_in_eu: f64,
    #[serde(rename = "leg_energy_total_out_eu")]
    pub energy_total_out_eu: f64,
    pub fueleu_energy_total_in_eu: f64,
    pub fueleu_energy_total_out_eu: f64,
    /// Sum of per-fuel energy use in scope, rescaled by 1e6.
    pub energy_use_in_scope: f64,
    pub wtt_ghg_intensity_aggregate: f64,
    pub ttw_ghg_intensity_aggregate: f64,
    pub ghg_intensity_actual: f64,
    pub compliance_balance_gco2eq: f64,
    pub compliance_balance_tco2eq: f64,
    /// EUR
    pub penalty: f64,
    /// Total CO2 mass released (same unit as consumption × cf_co2).
    #[serde(rename = "ghg_emission")]
    pub total_ghg_emission: f64,
}

impl ComplianceResult {
    pub fn is_compliant(&self) -> bool {
        self.compliance_balance_gco2eq >= 0.0
    }
}

pub(crate) fn aggregate(
    breakdown: &[FuelCalculation],
    constants: &RegulationConstants,
    diagnostics: &mut Diagnostics,
) -> Result<ComplianceResult> {
    let ghg_intensity_target = constants.ghg_intensity_target();

    let energy_total_in_eu: f64 = breakdown.iter().map(|c| c.energy.energy_in_eu).sum();
    let energy_total_out_eu: f64 = breakdown.iter().map(|c| c.energy.energy_out_eu).sum();
    let fueleu_energy_total_in_eu =
        energy_total_in_eu * constants.default_fuel_scope_within_eu / 100.0;
    let fueleu_energy_total_out_eu =
        energy_total_out_eu * constants.default_fuel_scope_in_out_eu / 100.0;

    let energy_use_in_scope =
        breakdown.iter().map(|c| c.energy.energy_use_scope).sum::<f64>() * ENERGY_SCOPE_SCALE;

    let denominator: f64 = breakdown
        .iter()
        .map(|c| c.energy.energy_use_scope * ENERGY_SCOPE_SCALE)
        .sum();
    if denominator <= 0.0 {
        diagnostics.emit(CalculationWarning::NoEnergyInScope {
            energy_use_in_scope: denominator,
        });
    }

    let wtt_ghg_intensity_aggregate =
        energy_weighted(breakdown, denominator, |c| c.fuel.wtt_ghg);
    let ttw_ghg_intensity_aggregate =
        energy_weighted(breakdown, denominator, |c| c.intensity.ttw_ghg_intensity);
    let ghg_intensity_actual = wtt_ghg_intensity_aggregate + ttw_ghg_intensity_aggregate;

    let compliance_balance_gco2eq =
        (ghg_intensity_target - ghg_intensity_actual) * energy_use_in_scope;
    let compliance_balance_tco2eq = compliance_balance_gco2eq / constants.grams_to_tonnes;

    let penalty = penalty(compliance_balance_gco2eq, ghg_intensity_actual, constants)?;
    let total_ghg_emission = breakdown.iter().map(|c| c.compliance.ghg_emission).sum();

    debug!(
        fuels = breakdown.len(),
        ghg_intensity_actual,
        compliance_balance_gco2eq,
        penalty,
        "aggregated fleet compliance"
    );

    Ok(ComplianceResult {
        ghg_intensity_target,
        energy_total_in_eu,
        energy_total_out_eu,
        fueleu_energy_total_in_eu,
        fueleu_energy_total_out_eu,
        energy_use_in_scope,
        wtt_ghg_intensity_aggregate,
        ttw_ghg_intensity_aggregate,
        ghg_intensity_actual,
        compliance_balance_gco2eq,
        compliance_balance_tco2eq,
        penalty,
        total_ghg_emission,
    })
}

/// `Σ(x × e × 1e6) / Σ(e × 1e6)`, or 0 when the denominator is not positive.
fn energy_weighted(
    breakdown: &[FuelCalculation],
    denominator: f64,
    value: impl Fn(&FuelCalculation) -> f64,
) -> f64 {
    if denominator <= 0.0 {
        return 0.0;
    }
    let numerator: f64 = breakdown
        .iter()
        .map(|c| value(c) * c.energy.energy_use_scope * ENERGY_SCOPE_SCALE)
        .sum();
    numerator / denominator
}

/// Penalty in EUR for a compliance deficit.
///
/// Zero for a non-negative balance. A deficit that cannot be priced (zero
/// actual intensity or a non-finite result) is an error.
pub fn penalty(
    compliance_balance_gco2eq: f64,
    ghg_intensity_actual: f64,
    constants: &RegulationConstants,
) -> Result<f64> {
    if compliance_balance_gco2eq >= 0.0 {
        return Ok(0.0);
    }
    if ghg_intensity_actual == 0.0 {
        return Err(Error::UndefinedPenalty {
            compliance_balance_gco2eq,
            ghg_intensity_actual,
        });
    }

    let penalty = compliance_balance_gco2eq.abs() / (ghg_intensity_actual * constants.vlsfo_lcv)
        * constants.fuel_penalty_rate;
    if !penalty.is_finite() {
        return Err(Error::UndefinedPenalty {
            compliance_balance_gco2eq,
            ghg_intensity_actual,
        });
    }
    Ok(penalty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surplus_has_no_penalty() {
        let c = RegulationConstants::default();
        assert_eq!(penalty(0.0, 0.0, &c).unwrap(), 0.0);
        assert_eq!(penalty(1.5e9, 80.0, &c).unwrap(), 0.0);
    }

    #[test]
    fn deficit_is_priced_per_vlsfo_tonne() {
        let c = RegulationConstants::default();
        let p = penalty(-4.1e6, 100.0, &c).unwrap();
        assert!((p - 4.1e6 / (100.0 * 41_000.0) * 2400.0).abs() < 1e-9);
    }

    #[test]
    fn deficit_with_zero_intensity_is_undefined() {
        let c = RegulationConstants::default();
        let err = penalty(-10.0, 0.0, &c).unwrap_err();
        assert!(matches!(err, Error::UndefinedPenalty { .. }));
    }

    #[test]
    fn non_finite_penalty_is_undefined() {
        let c = RegulationConstants::default();
        let err = penalty(f64::NAN, 80.0, &c).unwrap_err();
        assert!(matches!(
            err,
            Error::UndefinedPenalty { ghg_intensity_actual, .. } if ghg_intensity_actual == 80.0
        ));
        assert!(err.to_string().contains("actual GHG intensity 80 gCO2eq/MJ"));

        assert!(penalty(-f64::MAX, 1e-3, &c).is_err());
    }

    #[test]
    fn empty_fleet_aggregates_to_zero() {
        let mut diagnostics = Diagnostics::default();
        let result =
            aggregate(&[], &RegulationConstants::default(), &mut diagnostics).expect("aggregate");
        assert_eq!(result.ghg_intensity_actual, 0.0);
        assert_eq!(result.penalty, 0.0);
        assert_eq!(diagnostics.into_warnings().len(), 1);
    }
}

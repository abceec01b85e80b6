//! Phase 1: six ordered per-fuel steps.
//!
//! Step 1 runs for every fuel before any later step so that an unknown fuel
//! aborts the call before a single derived value exists. Steps 2-6 are pure
//! functions of the stages produced before them.

use tracing::debug;

use crate::constants::RegulationConstants;
use crate::error::{Error, Result};
use crate::tables::{BiofuelPathwayTable, FuelPropertyTable};

use super::calculation::{
    column_label, EnergyValues, FuelCalculation, FuelCompliance, FuelScope, GhgIntensity,
    LoadedFuel, TtwEmissions,
};
use super::diagnostics::{CalculationWarning, Diagnostics};
use super::input::{BiofuelOption, FuelInput};
use super::report::CalculationStep;

/// Read-only inputs shared by every step.
pub(crate) struct PipelineContext<'a> {
    pub fuels: &'a FuelPropertyTable,
    pub biofuels: &'a BiofuelPathwayTable,
    pub constants: &'a RegulationConstants,
}

/// Output of phase 1 before it is wrapped into a report.
pub(crate) struct Phase1Output {
    pub breakdown: Vec<FuelCalculation>,
    pub steps: Vec<CalculationStep>,
}

pub(crate) fn run(
    ctx: &PipelineContext<'_>,
    inputs: &[FuelInput],
    diagnostics: &mut Diagnostics,
) -> Result<Phase1Output> {
    let count = inputs.len();
    let mut steps = Vec::with_capacity(6);

    let loaded = inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            load_properties(ctx, index, input, diagnostics).map_err(|source| {
                Error::FuelCalculation {
                    index,
                    fuel_type: input.fuel_type.clone(),
                    source: Box::new(source),
                }
            })
        })
        .collect::<Result<Vec<_>>>()?;
    steps.push(CalculationStep::completed(1, count));

    let ttw: Vec<TtwEmissions> = loaded
        .iter()
        .map(|fuel| tank_to_wake(fuel, ctx.constants, diagnostics))
        .collect();
    steps.push(CalculationStep::completed(2, count));

    let scope: Vec<FuelScope> = loaded.iter().map(|_| fuel_scope(ctx.constants)).collect();
    steps.push(CalculationStep::completed(3, count));

    let energy: Vec<EnergyValues> = loaded
        .iter()
        .zip(&scope)
        .map(|(fuel, scope)| energy_values(fuel, scope))
        .collect();
    steps.push(CalculationStep::completed(4, count));

    let intensity: Vec<GhgIntensity> = loaded
        .iter()
        .zip(&ttw)
        .zip(&energy)
        .map(|((fuel, ttw), energy)| ghg_intensity(fuel, ttw, energy, ctx.constants))
        .collect();
    steps.push(CalculationStep::completed(5, count));

    let compliance: Vec<FuelCompliance> = loaded
        .iter()
        .zip(&energy)
        .zip(&intensity)
        .map(|((fuel, energy), intensity)| fuel_compliance(fuel, energy, intensity))
        .collect();
    steps.push(CalculationStep::completed(6, count));

    let breakdown = loaded
        .into_iter()
        .zip(ttw)
        .zip(scope)
        .zip(energy)
        .zip(intensity)
        .zip(compliance)
        .map(
            |(((((fuel, ttw), scope), energy), intensity), compliance)| FuelCalculation {
                fuel,
                ttw,
                scope,
                energy,
                intensity,
                compliance,
            },
        )
        .collect();

    Ok(Phase1Output { breakdown, steps })
}

/// TtW emissions of one gas per MJ: `(cf / lcv) × gwp`, or 0 when `lcv ≤ 0`.
pub(crate) fn ttw_per_mj(carbon_factor: f64, lcv: f64, gwp: f64) -> f64 {
    if lcv <= 0.0 {
        return 0.0;
    }
    (carbon_factor / lcv) * gwp
}

/// WtT value of a biofuel from its GHG saving:
/// `((100 - saving) / 100 × comparator) - ttw_co2`.
pub(crate) fn biofuel_wtt_ghg(ttw_co2: f64, saving_percent: f64, comparator: f64) -> f64 {
    ((100.0 - saving_percent) / 100.0 * comparator) - ttw_co2
}

/// Step 1: resolve fuel properties and the WtT value.
fn load_properties(
    ctx: &PipelineContext<'_>,
    index: usize,
    input: &FuelInput,
    diagnostics: &mut Diagnostics,
) -> Result<LoadedFuel> {
    let props = ctx.fuels.get(&input.fuel_type)?;

    let base_wtt_ghg = props.co2_eq_wtt;
    let mut wtt_ghg = base_wtt_ghg;
    let mut biofuel_calculation_used = false;

    if input.is_biofuel && input.biofuel_option.uses_saving_formula() {
        let ttw_co2 = ttw_per_mj(props.cf_co2, props.lcv, ctx.constants.gwp_co2);
        let percentage = resolve_saving(ctx.biofuels, index, input, diagnostics);

        if (0.0..=100.0).contains(&percentage) {
            wtt_ghg = biofuel_wtt_ghg(
                ttw_co2,
                percentage,
                ctx.constants.fossil_fuel_comparator_red,
            );
            biofuel_calculation_used = true;
        } else {
            diagnostics.emit(CalculationWarning::BiofuelPercentageOutOfRange {
                fuel_index: index,
                percentage,
            });
        }
    }

    debug!(
        fuel_index = index,
        fuel_type = %input.fuel_type,
        lcv = props.lcv,
        wtt_ghg,
        "loaded fuel properties"
    );

    Ok(LoadedFuel {
        fuel_index: index,
        fuel_letter: column_label(index),
        fuel_type: input.fuel_type.clone(),
        fuel_within_eu: input.consumption_within_eu,
        fuel_in_out_eu: input.consumption_in_out_eu,
        fuel_mass_total: input.total_consumption(),
        no_engines: 1,
        is_biofuel: input.is_biofuel,
        biofuel_option: input.biofuel_option,
        biofuel_percentage: input.biofuel_percentage,
        biofuel_pathway: input.biofuel_pathway.clone(),
        biofuel_calculation_used,
        base_wtt_ghg,
        lcv: props.lcv,
        wtt_ghg,
        cf_co2: props.cf_co2,
        cf_ch4: props.cf_ch4,
        cf_n2o: props.cf_n2o,
        c_slip: props.c_slip_percent,
        e_value: props.e_value,
        epsilon_sv: props.epsilon_sv,
    })
}

/// GHG saving (%) selected by the biofuel option.
///
/// A pathway lookup with an empty pathway name keeps the direct percentage;
/// a named pathway missing from the table falls back to 0 %.
fn resolve_saving(
    biofuels: &BiofuelPathwayTable,
    index: usize,
    input: &FuelInput,
    diagnostics: &mut Diagnostics,
) -> f64 {
    let pathway = input.biofuel_pathway.as_str();
    if input.biofuel_option != BiofuelOption::PathwayLookup || pathway.is_empty() {
        return input.biofuel_percentage;
    }

    match biofuels.typical_saving(pathway) {
        Some(saving) => saving,
        None => {
            diagnostics.emit(CalculationWarning::BiofuelPathwayNotFound {
                fuel_index: index,
                pathway: pathway.to_string(),
            });
            0.0
        }
    }
}

/// Step 2: TtW CO2, CH4 and N2O per MJ and their sum.
fn tank_to_wake(
    fuel: &LoadedFuel,
    constants: &RegulationConstants,
    diagnostics: &mut Diagnostics,
) -> TtwEmissions {
    if fuel.lcv <= 0.0 {
        diagnostics.emit(CalculationWarning::NonPositiveCalorificValue {
            fuel_index: fuel.fuel_index,
            lcv: fuel.lcv,
        });
    }

    let ttw_co2 = ttw_per_mj(fuel.cf_co2, fuel.lcv, constants.gwp_co2);
    let ttw_ch4 = ttw_per_mj(fuel.cf_ch4, fuel.lcv, constants.gwp_ch4);
    let ttw_n2o = ttw_per_mj(fuel.cf_n2o, fuel.lcv, constants.gwp_n2o);

    TtwEmissions {
        ttw_co2,
        ttw_ch4,
        ttw_n2o,
        ttw_total_per_mj: ttw_co2 + ttw_ch4 + ttw_n2o,
    }
}

/// Step 3: fixed scope percentages, never taken from input.
fn fuel_scope(constants: &RegulationConstants) -> FuelScope {
    FuelScope {
        fuel_scope_within_eu: constants.default_fuel_scope_within_eu,
        fuel_scope_in_out_eu: constants.default_fuel_scope_in_out_eu,
    }
}

/// Step 4: energy in and out of the EU, FuelEU-weighted energy and energy use in scope.
fn energy_values(fuel: &LoadedFuel, scope: &FuelScope) -> EnergyValues {
    let lcv = fuel.lcv;
    let energy_in_eu = lcv * fuel.fuel_within_eu * 1000.0;
    let energy_out_eu = fuel.fuel_in_out_eu * lcv * 1000.0;

    let fueleu_energy_in_eu = (scope.fuel_scope_within_eu / 100.0) * energy_in_eu;
    let fueleu_energy_out_eu = (scope.fuel_scope_in_out_eu / 100.0) * energy_out_eu;

    // Pairs each consumption with its own scope share; no ×1000 scale here.
    let energy_use_scope = (fuel.fuel_in_out_eu * lcv * scope.fuel_scope_in_out_eu / 100.0)
        + (fuel.fuel_within_eu * lcv * scope.fuel_scope_within_eu / 100.0);

    EnergyValues {
        energy_in_eu,
        energy_out_eu,
        fueleu_energy_in_eu,
        fueleu_energy_out_eu,
        energy_use_scope,
    }
}

/// Step 5: WtW, target, TtW (with methane slip) and WtT intensities.
fn ghg_intensity(
    fuel: &LoadedFuel,
    ttw: &TtwEmissions,
    energy: &EnergyValues,
    constants: &RegulationConstants,
) -> GhgIntensity {
    let ttw_sum = ttw.ttw_co2 + ttw.ttw_ch4 + ttw.ttw_n2o;
    let c_slip = fuel.c_slip / 100.0;

    let slip_term = if fuel.lcv <= 0.0 {
        0.0
    } else {
        (c_slip * constants.gwp_ch4) / fuel.lcv
    };

    GhgIntensity {
        wtw_ghg_intensity: fuel.wtt_ghg + ttw.ttw_co2 + ttw.ttw_ch4 + ttw.ttw_n2o,
        ghg_intensity_target: constants.ghg_intensity_target(),
        ttw_ghg_intensity: (1.0 - c_slip) * ttw_sum + slip_term,
        wtt_ghg_intensity: fuel.wtt_ghg * energy.energy_use_scope,
    }
}

/// Step 6: CO2 mass released and the fuel's compliance balance.
fn fuel_compliance(
    fuel: &LoadedFuel,
    energy: &EnergyValues,
    intensity: &GhgIntensity,
) -> FuelCompliance {
    let ghg_emission = fuel.cf_co2 * fuel.fuel_within_eu + fuel.cf_co2 * fuel.fuel_in_out_eu;
    let compliance_balance =
        (intensity.ghg_intensity_target - intensity.wtt_ghg_intensity) * energy.energy_use_scope;

    FuelCompliance {
        ghg_emission,
        compliance_balance,
    }
}

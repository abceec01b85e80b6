//! Result envelope: audit trail, intermediate table and final results.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::RegulationConstants;

use super::calculation::FuelCalculation;
use super::diagnostics::CalculationWarning;
use super::phase2::ComplianceResult;

/// Terminal state of a calculation call. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationStage {
    #[default]
    Initialized,
    Phase1Completed,
    Phase2Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
}

/// One audit trail entry per phase-1 step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationStep {
    pub step: u8,
    pub description: String,
    pub status: StepStatus,
    pub fuels_processed: usize,
}

impl CalculationStep {
    pub(crate) fn completed(step: u8, fuels_processed: usize) -> Self {
        Self {
            step,
            description: step_description(step).to_string(),
            status: StepStatus::Completed,
            fuels_processed,
        }
    }
}

fn step_description(step: u8) -> &'static str {
    match step {
        1 => "Fuel properties loaded from database",
        2 => "Tank-to-Wake emissions calculated for CO2, CH4, N2O",
        3 => "Fuel scope constants applied (100% within EU, 50% in/out EU)",
        4 => "Energy calculations completed (Energy in EU, Energy out of EU, FuelEU Energy, Energy Use in Scope)",
        5 => "GHG Intensity calculations completed (WtW GHG Intensity, GHG Intensity Target, TtW GHG Intensity, WtT GHG Intensity)",
        6 => "Compliance and Penalties calculations completed (Compliance Balance)",
        _ => "",
    }
}

/// Values of one quantity keyed by fuel index.
pub type FuelColumn = BTreeMap<usize, f64>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelInputSection {
    pub fuel_within_eu: FuelColumn,
    pub fuel_in_out_eu: FuelColumn,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelPropertiesSection {
    pub lcv: FuelColumn,
    pub cf_co2: FuelColumn,
    pub cf_ch4: FuelColumn,
    pub cf_n2o: FuelColumn,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WttGhgSection {
    pub wtt_ghg: FuelColumn,
    pub c_slip: FuelColumn,
    pub ttw_co2: FuelColumn,
    pub ttw_ch4: FuelColumn,
    pub ttw_n2o: FuelColumn,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelConsumptionSection {
    pub fuel_scope_within_eu: FuelColumn,
    pub fuel_scope_in_out_eu: FuelColumn,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergySection {
    pub energy_in_eu: FuelColumn,
    pub energy_out_eu: FuelColumn,
    pub fueleu_energy_in_eu: FuelColumn,
    pub fueleu_energy_out_eu: FuelColumn,
    pub energy_use_scope: FuelColumn,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GhgIntensitySection {
    pub wtw_ghg_intensity: FuelColumn,
    pub ghg_intensity_target: FuelColumn,
    pub ttw_ghg_intensity: FuelColumn,
    pub wtt_ghg_intensity: FuelColumn,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompliancePenaltiesSection {
    pub compliance_balance: FuelColumn,
    pub ghg_emission: FuelColumn,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstantsSection {
    pub gwp_co2: FuelColumn,
    pub gwp_ch4: FuelColumn,
    pub gwp_n2o: FuelColumn,
}

/// Per-fuel values grouped the way the calculation table is displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntermediateCalculations {
    pub fuel_input: FuelInputSection,
    pub fuel_properties: FuelPropertiesSection,
    pub wtt_ghg: WttGhgSection,
    pub fuel_consumption: FuelConsumptionSection,
    pub energy_calculations: EnergySection,
    pub ghg_intensity: GhgIntensitySection,
    pub compliance_penalties: CompliancePenaltiesSection,
    pub constants: ConstantsSection,
}

impl IntermediateCalculations {
    pub fn from_breakdown(breakdown: &[FuelCalculation], constants: &RegulationConstants) -> Self {
        let mut table = Self::default();
        for calc in breakdown {
            let i = calc.fuel.fuel_index;

            table.fuel_input.fuel_within_eu.insert(i, calc.fuel.fuel_within_eu);
            table.fuel_input.fuel_in_out_eu.insert(i, calc.fuel.fuel_in_out_eu);

            let props = &mut table.fuel_properties;
            props.lcv.insert(i, calc.fuel.lcv);
            props.cf_co2.insert(i, calc.fuel.cf_co2);
            props.cf_ch4.insert(i, calc.fuel.cf_ch4);
            props.cf_n2o.insert(i, calc.fuel.cf_n2o);

            let wtt = &mut table.wtt_ghg;
            wtt.wtt_ghg.insert(i, calc.fuel.wtt_ghg);
            wtt.c_slip.insert(i, calc.fuel.c_slip);
            wtt.ttw_co2.insert(i, calc.ttw.ttw_co2);
            wtt.ttw_ch4.insert(i, calc.ttw.ttw_ch4);
            wtt.ttw_n2o.insert(i, calc.ttw.ttw_n2o);

            let scope = &mut table.fuel_consumption;
            scope
                .fuel_scope_within_eu
                .insert(i, calc.scope.fuel_scope_within_eu);
            scope
                .fuel_scope_in_out_eu
                .insert(i, calc.scope.fuel_scope_in_out_eu);

            let energy = &mut table.energy_calculations;
            energy.energy_in_eu.insert(i, calc.energy.energy_in_eu);
            energy.energy_out_eu.insert(i, calc.energy.energy_out_eu);
            energy
                .fueleu_energy_in_eu
                .insert(i, calc.energy.fueleu_energy_in_eu);
            energy
                .fueleu_energy_out_eu
                .insert(i, calc.energy.fueleu_energy_out_eu);
            energy.energy_use_scope.insert(i, calc.energy.energy_use_scope);

            let intensity = &mut table.ghg_intensity;
            intensity
                .wtw_ghg_intensity
                .insert(i, calc.intensity.wtw_ghg_intensity);
            intensity
                .ghg_intensity_target
                .insert(i, calc.intensity.ghg_intensity_target);
            intensity
                .ttw_ghg_intensity
                .insert(i, calc.intensity.ttw_ghg_intensity);
            intensity
                .wtt_ghg_intensity
                .insert(i, calc.intensity.wtt_ghg_intensity);

            let compliance = &mut table.compliance_penalties;
            compliance
                .compliance_balance
                .insert(i, calc.compliance.compliance_balance);
            compliance.ghg_emission.insert(i, calc.compliance.ghg_emission);

            table.constants.gwp_co2.insert(i, constants.gwp_co2);
            table.constants.gwp_ch4.insert(i, constants.gwp_ch4);
            table.constants.gwp_n2o.insert(i, constants.gwp_n2o);
        }
        table
    }
}

/// Everything a calculation call returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionReport {
    pub intermediate_calculations: IntermediateCalculations,
    /// Present only after phase 2; serialized as `{}` before that.
    #[serde(
        default,
        serialize_with = "serialize_final_results",
        deserialize_with = "deserialize_final_results"
    )]
    pub final_results: Option<ComplianceResult>,
    pub fuel_breakdown: Vec<FuelCalculation>,
    pub calculation_steps: Vec<CalculationStep>,
    pub current_step: CalculationStage,
    pub target_year: u16,
    #[serde(default)]
    pub warnings: Vec<CalculationWarning>,
}

fn serialize_final_results<S>(
    value: &Option<ComplianceResult>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(result) => result.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

fn deserialize_final_results<'de, D>(
    deserializer: D,
) -> Result<Option<ComplianceResult>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl EmissionReport {
    /// Per-fuel record by zero-based index.
    pub fn fuel(&self, index: usize) -> Option<&FuelCalculation> {
        self.fuel_breakdown.get(index)
    }

    pub fn is_phase2(&self) -> bool {
        self.current_step == CalculationStage::Phase2Completed
    }
}

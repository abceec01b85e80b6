use tracing::info;

use crate::constants::RegulationConstants;
use crate::error::Result;
use crate::tables::{BiofuelPathway, BiofuelPathwayTable, FuelPropertyTable, TablePaths};

use super::diagnostics::Diagnostics;
use super::input::FuelInput;
use super::phase1::{self, PipelineContext};
use super::phase2;
use super::report::{CalculationStage, EmissionReport, IntermediateCalculations};
use super::validation::{self, ValidationOutcome};

/// Target year used when callers do not name one.
pub const DEFAULT_TARGET_YEAR: u16 = 2025;

/// Entry point of the engine: lookup tables plus regulation constants.
///
/// Holds no per-call state, so one instance can serve any number of
/// concurrent calls through `&self`.
#[derive(Debug, Clone)]
pub struct EmissionCalculator {
    fuels: FuelPropertyTable,
    biofuels: BiofuelPathwayTable,
    constants: RegulationConstants,
}

impl EmissionCalculator {
    pub fn new(fuels: FuelPropertyTable, biofuels: BiofuelPathwayTable) -> Self {
        Self {
            fuels,
            biofuels,
            constants: RegulationConstants::default(),
        }
    }

    pub fn with_constants(mut self, constants: RegulationConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Calculator over the tables compiled into the library.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(
            FuelPropertyTable::bundled()?.clone(),
            BiofuelPathwayTable::bundled()?.clone(),
        ))
    }

    /// Calculator over the tables at the configured locations.
    pub fn from_paths(paths: &TablePaths) -> Result<Self> {
        let fuels = paths.load_fuel_properties()?;
        let biofuels = paths.load_biofuel_pathways()?;
        info!(
            fuel_pathways = fuels.len(),
            biofuel_pathways = biofuels.len(),
            "emission calculator ready"
        );
        Ok(Self::new(fuels, biofuels))
    }

    /// Run the six per-fuel steps.
    ///
    /// Fails with [`crate::Error::FuelCalculation`] if any fuel type is
    /// unknown; no partial breakdown is returned in that case.
    pub fn calculate_emissions_phase1(
        &self,
        fuels: &[FuelInput],
        target_year: u16,
    ) -> Result<EmissionReport> {
        let mut diagnostics = Diagnostics::default();
        let output = phase1::run(&self.context(), fuels, &mut diagnostics)?;

        Ok(EmissionReport {
            intermediate_calculations: IntermediateCalculations::from_breakdown(
                &output.breakdown,
                &self.constants,
            ),
            final_results: None,
            fuel_breakdown: output.breakdown,
            calculation_steps: output.steps,
            current_step: CalculationStage::Phase1Completed,
            target_year,
            warnings: diagnostics.into_warnings(),
        })
    }

    /// Phase 1 followed by fleet aggregation.
    pub fn calculate_emissions_phase2(
        &self,
        fuels: &[FuelInput],
        target_year: u16,
    ) -> Result<EmissionReport> {
        let mut diagnostics = Diagnostics::default();
        let output = phase1::run(&self.context(), fuels, &mut diagnostics)?;
        let compliance = phase2::aggregate(&output.breakdown, &self.constants, &mut diagnostics)?;

        info!(
            fuels = fuels.len(),
            target_year,
            ghg_intensity_actual = compliance.ghg_intensity_actual,
            penalty = compliance.penalty,
            "phase 2 calculation completed"
        );

        Ok(EmissionReport {
            intermediate_calculations: IntermediateCalculations::from_breakdown(
                &output.breakdown,
                &self.constants,
            ),
            final_results: Some(compliance),
            fuel_breakdown: output.breakdown,
            calculation_steps: output.steps,
            current_step: CalculationStage::Phase2Completed,
            target_year,
            warnings: diagnostics.into_warnings(),
        })
    }

    pub fn validate_fuel_data(&self, fuels: &[FuelInput]) -> ValidationOutcome {
        validation::validate(fuels, &self.fuels)
    }

    /// Biofuel pathways for UI population, in table order.
    pub fn get_biofuel_pathways(&self) -> Vec<BiofuelPathway> {
        self.biofuels.pathways()
    }

    pub fn get_constants(&self) -> &RegulationConstants {
        &self.constants
    }

    pub fn fuel_properties(&self) -> &FuelPropertyTable {
        &self.fuels
    }

    pub fn biofuel_pathways(&self) -> &BiofuelPathwayTable {
        &self.biofuels
    }

    fn context(&self) -> PipelineContext<'_> {
        PipelineContext {
            fuels: &self.fuels,
            biofuels: &self.biofuels,
            constants: &self.constants,
        }
    }
}

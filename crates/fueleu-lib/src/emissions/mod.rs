//! FuelEU Maritime emission engine.
//!
//! Phase 1 decomposes every fuel into TtW and WtT components, energy figures
//! and an individual compliance balance. Phase 2 aggregates the per-fuel
//! records into the fleet GHG intensity, compliance balance and penalty.
//!
//! ```
//! use fueleu_lib::{EmissionCalculator, FuelInput};
//!
//! let calculator = EmissionCalculator::bundled().unwrap();
//! let fuels = vec![FuelInput::new("MDO MGO (Grades DMX to DMB)", 100.0, 0.0)];
//! let report = calculator.calculate_emissions_phase2(&fuels, 2025).unwrap();
//! assert!(report.final_results.is_some());
//! ```

mod calculation;
mod calculator;
mod diagnostics;
mod input;
mod phase1;
mod phase2;
mod report;
mod validation;

pub use calculation::{
    EnergyValues, FuelCalculation, FuelCompliance, FuelScope, GhgIntensity, LoadedFuel,
    TtwEmissions,
};
pub use calculator::{EmissionCalculator, DEFAULT_TARGET_YEAR};
pub use diagnostics::CalculationWarning;
pub use input::{BiofuelOption, FuelInput};
pub use phase2::{penalty, ComplianceResult};
pub use report::{
    CalculationStage, CalculationStep, CompliancePenaltiesSection, ConstantsSection,
    EmissionReport, EnergySection, FuelColumn, FuelConsumptionSection, FuelInputSection,
    FuelPropertiesSection, GhgIntensitySection, IntermediateCalculations, StepStatus,
    WttGhgSection,
};
pub use validation::ValidationOutcome;

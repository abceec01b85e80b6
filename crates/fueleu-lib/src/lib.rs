//! FuelEU Maritime library entry points.
//!
//! This crate loads the fuel property and biofuel pathway tables, runs the
//! two-phase GHG compliance calculation and adapts simulation output to it.
//! Higher-level consumers (the CLI) should only depend on the items exported
//! here instead of reimplementing behavior.

#![deny(warnings)]

pub mod constants;
pub mod emissions;
pub mod error;
pub mod simulation;
pub mod tables;

pub use constants::{RegulationConstants, TARGET_REDUCTION_FACTOR};
pub use emissions::{
    BiofuelOption, CalculationStage, CalculationWarning, ComplianceResult, EmissionCalculator,
    EmissionReport, FuelCalculation, FuelInput, ValidationOutcome, DEFAULT_TARGET_YEAR,
};
pub use error::{Error, Result};
pub use simulation::{
    calculate_simulated_compliance, SimulatedCompliance, SimulatedFuelEmission,
    SimulatedFuelMass, SimulationFuel,
};
pub use tables::{
    BiofuelPathway, BiofuelPathwayTable, FuelPropertyRecord, FuelPropertyTable, TablePaths,
};

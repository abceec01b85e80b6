#![allow(dead_code)]

use fueleu_lib::{BiofuelPathwayTable, EmissionCalculator, FuelPropertyTable};

pub const MDO: &str = "MDO MGO (Grades DMX to DMB)";
pub const LNG_OTTO_MS: &str = "LNG (Otto dual fuel medium speed)";
pub const BIO_DIESEL: &str = "Bio-diesel";

pub const TOLERANCE: f64 = 1e-9;

pub fn calculator() -> EmissionCalculator {
    EmissionCalculator::bundled().expect("bundled tables load")
}

/// Calculator over an in-memory fuel table and the bundled biofuel table.
pub fn calculator_with_fuels(csv: &str) -> EmissionCalculator {
    let fuels = FuelPropertyTable::from_reader(csv.as_bytes()).expect("fixture fuel table");
    let biofuels = BiofuelPathwayTable::bundled()
        .expect("bundled biofuel table")
        .clone();
    EmissionCalculator::new(fuels, biofuels)
}

pub fn assert_close(actual: f64, expected: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= TOLERANCE * scale,
        "expected {expected}, got {actual}"
    );
}

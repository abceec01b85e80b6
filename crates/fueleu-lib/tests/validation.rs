mod common;

use common::{calculator, MDO};
use fueleu_lib::{Error, FuelInput, ValidationOutcome};

#[test]
fn accepts_known_fuels_with_non_negative_consumption() {
    let fuels = vec![FuelInput::new(MDO, 0.0, 0.0), FuelInput::new("LNG (LBSI)", 1.0, 2.0)];
    assert_eq!(calculator().validate_fuel_data(&fuels), ValidationOutcome::ok());
}

#[test]
fn rejects_non_finite_consumption() {
    let fuels = vec![FuelInput::new(MDO, f64::NAN, 0.0)];
    let outcome = calculator().validate_fuel_data(&fuels);
    assert!(!outcome.valid);
    assert_eq!(
        outcome.error.as_deref(),
        Some("Non-finite fuel consumption values for fuel 1")
    );
}

#[test]
fn rejection_converts_to_invalid_fuel_data() {
    let fuels = vec![FuelInput::new(MDO, 1.0, -2.0)];
    let err = calculator()
        .validate_fuel_data(&fuels)
        .into_result()
        .unwrap_err();

    match err {
        Error::InvalidFuelData { message } => {
            assert_eq!(message, "Negative fuel consumption values for fuel 1")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn outcome_serializes_with_null_error() {
    let json = serde_json::to_value(ValidationOutcome::ok()).expect("serialize");
    assert_eq!(json, serde_json::json!({"valid": true, "error": null}));
}

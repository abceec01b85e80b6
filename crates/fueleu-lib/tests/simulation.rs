mod common;

use common::{assert_close, calculator, MDO};
use fueleu_lib::{
    calculate_simulated_compliance, FuelInput, SimulatedFuelMass, SimulationFuel,
};

#[test]
fn diesel_only_run_books_tonnes_within_eu() {
    let calculator = calculator();
    let result = calculate_simulated_compliance(
        &calculator,
        SimulatedFuelMass {
            diesel_kg: 100_000.0,
            methanol_kg: 0.0,
        },
    )
    .expect("calculation succeeds")
    .expect("fuel was burned");

    assert_eq!(result.fuels.len(), 1);
    let diesel = result.fuels[&SimulationFuel::Diesel];
    assert_close(diesel.consumption_tonnes, 100.0);
    assert_close(diesel.ghg_emission_tonnes, 3.206 * 100.0);

    let direct = calculator
        .calculate_emissions_phase2(&[FuelInput::new(MDO, 100.0, 0.0)], 2025)
        .expect("phase 2 succeeds")
        .final_results
        .expect("final results present");
    assert_close(result.penalty_eur, direct.penalty);
    assert_close(result.ghg_intensity_actual, direct.ghg_intensity_actual);
    assert_close(result.ghg_intensity_target, direct.ghg_intensity_target);
    assert_close(result.compliance_balance_tco2eq, direct.compliance_balance_tco2eq);
    assert_close(result.total_ghg_emission_tonnes, direct.total_ghg_emission);
}

#[test]
fn mixed_run_reports_both_fuels() {
    let result = calculate_simulated_compliance(
        &calculator(),
        SimulatedFuelMass {
            diesel_kg: 2_500.0,
            methanol_kg: 4_000.0,
        },
    )
    .expect("calculation succeeds")
    .expect("fuel was burned");

    let methanol = result.fuels[&SimulationFuel::Methanol];
    assert_close(methanol.consumption_tonnes, 4.0);
    assert_close(methanol.ghg_emission_tonnes, 1.375 * 4.0);
    assert_close(
        result.total_ghg_emission_tonnes,
        3.206 * 2.5 + 1.375 * 4.0,
    );

    let json = serde_json::to_value(&result).expect("serialize");
    assert!(json["fuels"].get("Diesel").is_some());
    assert!(json["fuels"].get("Methanol").is_some());
}

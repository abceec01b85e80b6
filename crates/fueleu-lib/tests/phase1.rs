mod common;

use common::{assert_close, calculator, calculator_with_fuels, BIO_DIESEL, LNG_OTTO_MS, MDO};
use fueleu_lib::{CalculationStage, CalculationWarning, Error, FuelInput};

#[test]
fn mdo_within_eu_recomputes_every_step() {
    let report = calculator()
        .calculate_emissions_phase1(&[FuelInput::new(MDO, 100.0, 0.0)], 2025)
        .expect("phase 1 succeeds");

    assert_eq!(report.current_step, CalculationStage::Phase1Completed);
    assert!(report.final_results.is_none());
    assert!(report.warnings.is_empty());
    assert_eq!(report.calculation_steps.len(), 6);
    assert!(report
        .calculation_steps
        .iter()
        .enumerate()
        .all(|(i, s)| s.step as usize == i + 1 && s.fuels_processed == 1));

    let calc = report.fuel(0).expect("one fuel");
    let lcv = 0.0427;
    assert_eq!(calc.fuel.fuel_letter, "A");
    assert_eq!(calc.fuel.no_engines, 1);
    assert_eq!(calc.fuel.fuel_mass_total, 100.0);
    assert_eq!(calc.fuel.wtt_ghg, 14.4);
    assert!(!calc.fuel.biofuel_calculation_used);

    assert_close(calc.ttw.ttw_co2, 3.206 / lcv);
    assert_close(calc.ttw.ttw_ch4, 0.00005 / lcv * 25.0);
    assert_close(calc.ttw.ttw_n2o, 0.00018 / lcv * 298.0);
    assert_close(
        calc.ttw.ttw_total_per_mj,
        calc.ttw.ttw_co2 + calc.ttw.ttw_ch4 + calc.ttw.ttw_n2o,
    );

    assert_close(calc.energy.energy_in_eu, lcv * 100.0 * 1000.0);
    assert_eq!(calc.energy.energy_out_eu, 0.0);
    assert_close(calc.energy.fueleu_energy_in_eu, calc.energy.energy_in_eu);
    assert_close(calc.energy.energy_use_scope, 100.0 * lcv);

    let target = 91.16 * 0.98;
    assert_close(calc.intensity.ghg_intensity_target, target);
    assert_close(
        calc.intensity.wtw_ghg_intensity,
        14.4 + calc.ttw.ttw_total_per_mj,
    );
    // No methane slip for MDO.
    assert_close(calc.intensity.ttw_ghg_intensity, calc.ttw.ttw_total_per_mj);
    assert_close(calc.intensity.wtt_ghg_intensity, 14.4 * 100.0 * lcv);

    assert_close(calc.compliance.ghg_emission, 3.206 * 100.0);
    assert_close(
        calc.compliance.compliance_balance,
        (target - 14.4 * 100.0 * lcv) * 100.0 * lcv,
    );
}

#[test]
fn scopes_are_fixed_for_every_fuel() {
    let fuels = vec![
        FuelInput::new(MDO, 1.0, 0.0),
        FuelInput::new(LNG_OTTO_MS, 0.0, 7.0),
    ];
    let report = calculator()
        .calculate_emissions_phase1(&fuels, 2027)
        .expect("phase 1 succeeds");

    for calc in &report.fuel_breakdown {
        assert_eq!(calc.scope.fuel_scope_within_eu, 100.0);
        assert_eq!(calc.scope.fuel_scope_in_out_eu, 50.0);
    }
    assert_eq!(report.target_year, 2027);
    assert_eq!(report.fuel(1).unwrap().fuel.fuel_letter, "B");
}

#[test]
fn energy_use_scope_follows_mixed_pairing() {
    let fuels = vec![
        FuelInput::new(MDO, 10.0, 0.0),
        FuelInput::new(MDO, 0.0, 10.0),
    ];
    let report = calculator()
        .calculate_emissions_phase1(&fuels, 2025)
        .expect("phase 1 succeeds");

    let within = &report.fuel_breakdown[0].energy;
    let in_out = &report.fuel_breakdown[1].energy;

    assert_close(within.energy_use_scope, 10.0 * 0.0427 * 100.0 / 100.0);
    assert_close(in_out.energy_use_scope, 10.0 * 0.0427 * 50.0 / 100.0);
    assert_close(in_out.fueleu_energy_out_eu, 0.5 * in_out.energy_out_eu);
    assert_close(within.energy_in_eu, in_out.energy_out_eu);
}

#[test]
fn methane_slip_lowers_ttw_share_and_adds_slip_term() {
    let report = calculator()
        .calculate_emissions_phase1(&[FuelInput::new(LNG_OTTO_MS, 50.0, 0.0)], 2025)
        .expect("phase 1 succeeds");
    let calc = report.fuel(0).unwrap();

    let lcv = 0.0491;
    let slip = 3.1 / 100.0;
    let ttw_sum = calc.ttw.ttw_co2 + calc.ttw.ttw_ch4 + calc.ttw.ttw_n2o;
    assert_close(
        calc.intensity.ttw_ghg_intensity,
        (1.0 - slip) * ttw_sum + (slip * 25.0) / lcv,
    );
}

#[test]
fn non_positive_lcv_zeroes_ttw_and_warns() {
    let calculator = calculator_with_fuels(
        "pathway_name,lcv_mj_per_g,cf_co2_gco2_per_gfuel,cf_ch4_gch4_per_gfuel,cf_n2o_gn2o_per_gfuel,c_slip_percent,co2_eq_wtt_gco2eq_per_mj\n\
         Inert,0,3.0,0.1,0.1,2.0,10\n",
    );
    let report = calculator
        .calculate_emissions_phase1(&[FuelInput::new("Inert", 5.0, 5.0)], 2025)
        .expect("phase 1 succeeds");
    let calc = report.fuel(0).unwrap();

    assert_eq!(calc.ttw.ttw_co2, 0.0);
    assert_eq!(calc.ttw.ttw_ch4, 0.0);
    assert_eq!(calc.ttw.ttw_n2o, 0.0);
    assert_eq!(calc.intensity.ttw_ghg_intensity, 0.0);
    assert!(calc.intensity.ttw_ghg_intensity.is_finite());
    assert_eq!(
        report.warnings,
        vec![CalculationWarning::NonPositiveCalorificValue {
            fuel_index: 0,
            lcv: 0.0
        }]
    );
}

#[test]
fn direct_biofuel_percentage_replaces_wtt() {
    let fuel = FuelInput::new(BIO_DIESEL, 20.0, 0.0).with_biofuel_percentage(60.0);
    let report = calculator()
        .calculate_emissions_phase1(&[fuel], 2025)
        .expect("phase 1 succeeds");
    let calc = report.fuel(0).unwrap();

    let ttw_co2 = 2.834 / 0.037;
    assert!(calc.fuel.biofuel_calculation_used);
    assert_close(calc.fuel.wtt_ghg, 0.4 * 94.0 - ttw_co2);
    assert_eq!(calc.fuel.base_wtt_ghg, 0.0);
}

#[test]
fn pathway_lookup_uses_typical_saving() {
    let fuel =
        FuelInput::new(BIO_DIESEL, 20.0, 0.0).with_biofuel_pathway("Waste cooking oil biodiesel");
    let report = calculator()
        .calculate_emissions_phase1(&[fuel], 2025)
        .expect("phase 1 succeeds");

    assert_close(
        report.fuel(0).unwrap().fuel.wtt_ghg,
        (100.0 - 88.0) / 100.0 * 94.0 - 2.834 / 0.037,
    );
    assert!(report.warnings.is_empty());
}

#[test]
fn unknown_pathway_falls_back_to_zero_saving() {
    let fuel = FuelInput::new(BIO_DIESEL, 20.0, 0.0).with_biofuel_pathway("Algae oil");
    let report = calculator()
        .calculate_emissions_phase1(&[fuel], 2025)
        .expect("phase 1 succeeds");

    assert_close(report.fuel(0).unwrap().fuel.wtt_ghg, 94.0 - 2.834 / 0.037);
    assert_eq!(
        report.warnings,
        vec![CalculationWarning::BiofuelPathwayNotFound {
            fuel_index: 0,
            pathway: "Algae oil".to_string()
        }]
    );
}

#[test]
fn empty_pathway_keeps_direct_percentage() {
    let mut fuel = FuelInput::new(BIO_DIESEL, 20.0, 0.0).with_biofuel_pathway("");
    fuel.biofuel_percentage = 50.0;
    let report = calculator()
        .calculate_emissions_phase1(&[fuel], 2025)
        .expect("phase 1 succeeds");

    assert_close(report.fuel(0).unwrap().fuel.wtt_ghg, 47.0 - 2.834 / 0.037);
}

#[test]
fn blank_pathway_is_a_lookup_miss() {
    let mut fuel = FuelInput::new(BIO_DIESEL, 20.0, 0.0).with_biofuel_pathway("   ");
    fuel.biofuel_percentage = 50.0;
    let report = calculator()
        .calculate_emissions_phase1(&[fuel], 2025)
        .expect("phase 1 succeeds");

    assert_close(report.fuel(0).unwrap().fuel.wtt_ghg, 94.0 - 2.834 / 0.037);
    assert_eq!(
        report.warnings,
        vec![CalculationWarning::BiofuelPathwayNotFound {
            fuel_index: 0,
            pathway: "   ".to_string()
        }]
    );
}

#[test]
fn out_of_range_percentage_keeps_tabulated_wtt() {
    let fuel = FuelInput::new(MDO, 20.0, 0.0).with_biofuel_percentage(120.0);
    let report = calculator()
        .calculate_emissions_phase1(&[fuel], 2025)
        .expect("phase 1 succeeds");
    let calc = report.fuel(0).unwrap();

    assert_eq!(calc.fuel.wtt_ghg, 14.4);
    assert!(!calc.fuel.biofuel_calculation_used);
    assert!(matches!(
        report.warnings.as_slice(),
        [CalculationWarning::BiofuelPercentageOutOfRange { fuel_index: 0, .. }]
    ));
}

#[test]
fn biofuel_flag_without_option_keeps_tabulated_wtt() {
    let mut fuel = FuelInput::new(MDO, 20.0, 0.0);
    fuel.is_biofuel = true;
    fuel.biofuel_percentage = 80.0;
    let report = calculator()
        .calculate_emissions_phase1(&[fuel], 2025)
        .expect("phase 1 succeeds");

    assert_eq!(report.fuel(0).unwrap().fuel.wtt_ghg, 14.4);
}

#[test]
fn unknown_fuel_fails_without_partial_output() {
    let fuels = vec![
        FuelInput::new(MDO, 10.0, 0.0),
        FuelInput::new("Whale oil", 10.0, 0.0),
    ];
    let err = calculator()
        .calculate_emissions_phase1(&fuels, 2025)
        .expect_err("unknown fuel must fail");

    match err {
        Error::FuelCalculation {
            index,
            fuel_type,
            source,
        } => {
            assert_eq!(index, 1);
            assert_eq!(fuel_type, "Whale oil");
            assert!(matches!(*source, Error::UnknownFuelPathway { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn repeated_calls_give_identical_reports() {
    let calculator = calculator();
    let fuels = vec![
        FuelInput::new(MDO, 12.0, 3.0),
        FuelInput::new(BIO_DIESEL, 4.0, 1.0).with_biofuel_pathway("Rape seed biodiesel"),
    ];

    let first = calculator.calculate_emissions_phase1(&fuels, 2025).unwrap();
    let second = calculator.calculate_emissions_phase1(&fuels, 2025).unwrap();
    assert_eq!(first, second);
}

#[test]
fn intermediate_table_is_keyed_by_fuel_index() {
    let fuels = vec![
        FuelInput::new(MDO, 12.0, 3.0),
        FuelInput::new(LNG_OTTO_MS, 4.0, 1.0),
    ];
    let report = calculator()
        .calculate_emissions_phase1(&fuels, 2025)
        .expect("phase 1 succeeds");
    let table = &report.intermediate_calculations;

    assert_eq!(table.fuel_input.fuel_within_eu.get(&1), Some(&4.0));
    assert_eq!(table.wtt_ghg.c_slip.get(&1), Some(&3.1));
    assert_eq!(table.constants.gwp_n2o.get(&0), Some(&298.0));
    assert_eq!(
        table.energy_calculations.energy_use_scope.get(&0),
        Some(&report.fuel_breakdown[0].energy.energy_use_scope)
    );

    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["current_step"], "phase1_completed");
    assert_eq!(json["final_results"], serde_json::json!({}));
    assert_eq!(json["fuel_breakdown"][1]["fuel_type"], LNG_OTTO_MS);
    assert_eq!(
        json["intermediate_calculations"]["fuel_input"]["fuel_within_eu"]["0"],
        12.0
    );
}

mod common;

use common::cli;
use predicates::prelude::*;

#[test]
fn diesel_run_reports_penalty() {
    let output = cli()
        .args(["simulated", "--diesel-kg", "100000", "--format", "json"])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    let diesel = &json["fuels"]["Diesel"];
    assert!((diesel["consumption_tonnes"].as_f64().unwrap() - 100.0).abs() < 1e-9);
    assert!(json["penalty_eur"].as_f64().unwrap() > 0.0);
    assert!(json["fuels"].get("Methanol").is_none());
}

#[test]
fn no_fuel_prints_notice() {
    cli()
        .arg("simulated")
        .assert()
        .success()
        .stdout(predicate::str::contains("No fuel consumed"));
}

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

/// CLI command isolated from the caller's environment.
pub fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("fueleu-cli");
    cmd.env_remove("FUELEU_FUEL_PROPERTIES")
        .env_remove("FUELEU_BIOFUEL_FACTORS")
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "error");
    cmd
}

/// Write a fuel input file into a fresh temp dir.
pub fn fuel_file(json: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("fuels.json");
    fs::write(&path, json).expect("write fuel input");
    (dir, path)
}

pub const MDO_ONLY: &str = r#"[
    {"fuel_type": "MDO MGO (Grades DMX to DMB)", "fuel_consumption_within_eu": 100}
]"#;

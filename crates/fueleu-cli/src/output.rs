//! Output formatting for calculation results and table listings.
//!
//! Text renderers return a `String` so they can be tested without capturing
//! stdout; JSON output goes through `serde_json` unchanged.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use fueleu_lib::{
    BiofuelPathway, ComplianceResult, EmissionReport, FuelPropertyRecord, RegulationConstants,
    SimulatedCompliance, ValidationOutcome,
};

use crate::terminal::{format_decimal, ColorPalette};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Serialize any result as pretty JSON followed by a newline.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value).map(|mut s| {
        s.push('\n');
        s
    })
}

/// Render a phase 1 or phase 2 report.
pub fn format_report_text(report: &EmissionReport, palette: &ColorPalette) -> String {
    let p = palette;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}FuelEU Maritime calculation{} {}(target year {}, {} fuel(s)){}",
        p.white_bold,
        p.reset,
        p.gray,
        report.target_year,
        report.fuel_breakdown.len(),
        p.reset
    );
    out.push('\n');

    let _ = writeln!(
        out,
        "{:<3} {:<40} {:>10} {:>10} {:>10} {:>10} {:>14}",
        "#", "Fuel", "In EU (t)", "In/Out (t)", "WtT", "TtW", "Balance"
    );
    for calc in &report.fuel_breakdown {
        let _ = writeln!(
            out,
            "{:<3} {}{:<40}{} {:>10} {:>10} {:>10} {:>10} {:>14}",
            calc.fuel.fuel_letter,
            p.cyan,
            calc.fuel.fuel_type,
            p.reset,
            format_decimal(calc.fuel.fuel_within_eu, 2),
            format_decimal(calc.fuel.fuel_in_out_eu, 2),
            format_decimal(calc.fuel.wtt_ghg, 4),
            format_decimal(calc.intensity.ttw_ghg_intensity, 4),
            format_decimal(calc.compliance.compliance_balance, 2),
        );
    }

    if let Some(result) = &report.final_results {
        out.push('\n');
        out.push_str(&format_compliance_text(result, palette));
    }

    if !report.warnings.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{}Warnings:{}", p.yellow, p.reset);
        for warning in &report.warnings {
            let _ = writeln!(out, "  - {warning}");
        }
    }

    out
}

fn format_compliance_text(result: &ComplianceResult, palette: &ColorPalette) -> String {
    let p = palette;
    let mut out = String::new();
    let balance_color = if result.is_compliant() { p.green } else { p.red };

    let rows: [(&str, String, &str); 8] = [
        (
            "Energy use in scope",
            format_decimal(result.energy_use_in_scope, 0),
            "MJ",
        ),
        (
            "WtT intensity (aggregate)",
            format_decimal(result.wtt_ghg_intensity_aggregate, 6),
            "gCO2eq/MJ",
        ),
        (
            "TtW intensity (aggregate)",
            format_decimal(result.ttw_ghg_intensity_aggregate, 6),
            "gCO2eq/MJ",
        ),
        (
            "GHG intensity (actual)",
            format_decimal(result.ghg_intensity_actual, 6),
            "gCO2eq/MJ",
        ),
        (
            "GHG intensity (target)",
            format_decimal(result.ghg_intensity_target, 6),
            "gCO2eq/MJ",
        ),
        (
            "Compliance balance",
            format!(
                "{balance_color}{}{}",
                format_decimal(result.compliance_balance_tco2eq, 6),
                p.reset
            ),
            "tCO2eq",
        ),
        (
            "Penalty",
            format!("{balance_color}{}{}", format_decimal(result.penalty, 2), p.reset),
            "EUR",
        ),
        (
            "Total GHG emission",
            format_decimal(result.total_ghg_emission, 3),
            "t",
        ),
    ];

    let _ = writeln!(out, "{}Compliance{}", p.white_bold, p.reset);
    for (label, value, unit) in rows {
        let _ = writeln!(out, "  {label:<28} {value} {}{unit}{}", p.gray, p.reset);
    }
    out
}

/// Render the fuel property table.
pub fn format_fuels_text(records: &[&FuelPropertyRecord]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        out.push_str("No matching fuel pathways.\n");
        return out;
    }

    let _ = writeln!(out, "Fuel pathways ({}):", records.len());
    let _ = writeln!(
        out,
        "{:<40} {:>8} {:>8} {:>8} {:>8}",
        "Name", "LCV", "Cf CO2", "Slip %", "WtT"
    );
    for record in records {
        let _ = writeln!(
            out,
            "{:<40} {:>8.4} {:>8.3} {:>8.1} {:>8.2}",
            record.pathway_name,
            record.lcv,
            record.cf_co2,
            record.c_slip_percent,
            record.co2_eq_wtt
        );
    }
    out
}

/// Render the biofuel pathway list.
pub fn format_biofuels_text(pathways: &[BiofuelPathway]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Biofuel pathways ({}):", pathways.len());
    for pathway in pathways {
        let _ = writeln!(out, "{:<66} {:>3}%", pathway.name, pathway.typical_value);
    }
    out
}

/// Render the regulation constants using their published key names.
pub fn format_constants_text(constants: &RegulationConstants) -> serde_json::Result<String> {
    let value = serde_json::to_value(constants)?;
    let mut out = String::new();
    if let Some(map) = value.as_object() {
        for (key, value) in map {
            let _ = writeln!(out, "{key:<32} {value}");
        }
    }
    Ok(out)
}

pub fn format_validation_text(outcome: &ValidationOutcome) -> String {
    match &outcome.error {
        None if outcome.valid => "Fuel data is valid.\n".to_string(),
        Some(error) => format!("Fuel data is invalid: {error}\n"),
        None => "Fuel data is invalid.\n".to_string(),
    }
}

/// Render compliance for a simulation run.
pub fn format_simulated_text(result: &SimulatedCompliance, palette: &ColorPalette) -> String {
    let p = palette;
    let mut out = String::new();
    let _ = writeln!(out, "{}Simulated fuel use (within EU){}", p.white_bold, p.reset);
    for (fuel, emission) in &result.fuels {
        let _ = writeln!(
            out,
            "  {}{:<10}{} {:>12} t  {:>12} t CO2",
            p.cyan,
            fuel.to_string(),
            p.reset,
            format_decimal(emission.consumption_tonnes, 3),
            format_decimal(emission.ghg_emission_tonnes, 3),
        );
    }

    let balance_color = if result.compliance_balance_tco2eq >= 0.0 {
        p.green
    } else {
        p.red
    };
    let _ = writeln!(
        out,
        "  {:<28} {} {}gCO2eq/MJ{}",
        "GHG intensity (actual)",
        format_decimal(result.ghg_intensity_actual, 6),
        p.gray,
        p.reset
    );
    let _ = writeln!(
        out,
        "  {:<28} {} {}gCO2eq/MJ{}",
        "GHG intensity (target)",
        format_decimal(result.ghg_intensity_target, 6),
        p.gray,
        p.reset
    );
    let _ = writeln!(
        out,
        "  {:<28} {balance_color}{}{} {}tCO2eq{}",
        "Compliance balance",
        format_decimal(result.compliance_balance_tco2eq, 6),
        p.reset,
        p.gray,
        p.reset
    );
    let _ = writeln!(
        out,
        "  {:<28} {balance_color}{}{} {}EUR{}",
        "Penalty",
        format_decimal(result.penalty_eur, 2),
        p.reset,
        p.gray,
        p.reset
    );
    let _ = writeln!(
        out,
        "  {:<28} {} {}t{}",
        "Total GHG emission",
        format_decimal(result.total_ghg_emission_tonnes, 3),
        p.gray,
        p.reset
    );
    out
}

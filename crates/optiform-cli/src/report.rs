//! Plain-text and JSON views of requests and solutions.

use std::fmt::Write as _;

use optiform_core::Solution;
use optiform_solver::{SolverRequest, SolverStatus};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub status: SolverStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solve_time_seconds: Option<f64>,
    pub values: Vec<NamedValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duals: Vec<NamedValue>,
}

impl Report {
    pub fn new(solution: &Solution) -> Self {
        let named = |pairs: &[(String, f64)]| -> Vec<NamedValue> {
            pairs
                .iter()
                .map(|(name, value)| NamedValue {
                    name: name.clone(),
                    value: *value,
                })
                .collect()
        };
        Self {
            status: solution.status,
            objective_value: solution.objective_value,
            solve_time_seconds: solution.solve_time_seconds,
            values: named(&solution.values),
            duals: solution.duals.as_deref().map(named).unwrap_or_default(),
        }
    }
}

pub fn render_report_table(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "status: {}", report.status);
    let _ = writeln!(out, "objective: {}", format_option(report.objective_value));
    let _ = writeln!(out, "{:<24} {:>14}", "variable", "value");
    for row in &report.values {
        let _ = writeln!(out, "{:<24} {:>14}", row.name, row.value);
    }
    if !report.duals.is_empty() {
        let _ = writeln!(out, "{:<24} {:>14}", "constraint", "dual");
        for row in &report.duals {
            let _ = writeln!(out, "{:<24} {:>14}", row.name, row.value);
        }
    }
    out
}

/// One line per objective and constraint row with its bounds and nonzero count.
pub fn render_request_table(request: &SolverRequest) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:>12} {:>12} {:>9}",
        "row", "lower", "upper", "nonzeros"
    );
    let objective = format!("objective ({})", request.sense.as_str());
    let _ = writeln!(
        out,
        "{:<24} {:>12} {:>12} {:>9}",
        objective,
        "-",
        "-",
        nonzeros(&request.objective)
    );
    for row in &request.constraints {
        let _ = writeln!(
            out,
            "{:<24} {:>12} {:>12} {:>9}",
            row.name,
            format_option(row.lower),
            format_option(row.upper),
            nonzeros(&row.coefficients)
        );
    }
    out
}

fn nonzeros(coefficients: &[f64]) -> usize {
    coefficients.iter().filter(|c| **c != 0.0).count()
}

fn format_option(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}

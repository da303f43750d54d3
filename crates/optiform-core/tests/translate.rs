#![allow(clippy::float_cmp)]

use optiform_core::{ModelSpec, Sense, TranslateConfig, Translator};
use optiform_expr::extract_coefficient;
use optiform_solver::{
    ObjectiveSense, Solve, SolverConfig, SolverError, SolverRequest, SolverResponse, SolverStatus,
};

const PLANT: &str = r#"{
    "name": "plant",
    "variables": [
        "x1",
        {"name": "x2", "upper": 40, "kind": "integer"},
        {"name": "open", "kind": "binary"}
    ],
    "parameters": {"fixed_cost": 100},
    "objective": {
        "sense": "maximize",
        "name": "profit",
        "expression": "10*x1 + 8*x2 - fixed_cost*open"
    },
    "constraints": [
        {"name": "labor", "expression": "2*x1 + x2 <= 100"},
        {"name": "machine", "expression": "x1 + 2*x2 <= 80"},
        {"name": "link", "expression": "x1 - 100*open", "sense": "<=", "rhs": 0}
    ]
}"#;

/// Answers every request with the point (40, 20, 1), scored by the request itself.
struct KnownOptimum;

impl Solve for KnownOptimum {
    fn solve(&mut self, request: &SolverRequest) -> Result<SolverResponse, SolverError> {
        request.validate()?;
        let values = vec![40.0, 20.0, 1.0];
        Ok(SolverResponse {
            status: SolverStatus::Optimal,
            objective_value: Some(request.evaluate_objective(&values)),
            values,
            duals: Some(vec![4.0, 2.0, 0.0]),
            solve_time_seconds: Some(0.002),
            message: None,
        })
    }
}

#[test]
fn test_rows_match_coefficient_extraction() {
    let spec = ModelSpec::from_json(PLANT).unwrap();
    let translation = Translator::default().translate(&spec).unwrap();
    assert!(translation.diagnostics.is_empty());

    let request = translation.model.to_request(&SolverConfig::new()).unwrap();
    let names: Vec<&str> = request.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["x1", "x2", "open"]);
    assert_eq!(request.sense, ObjectiveSense::Maximize);
    assert_eq!(request.objective, vec![10.0, 8.0, -100.0]);

    // Rows written as plain `<=` relations agree with the extractor column by column.
    for (decl, row) in spec.constraints.iter().zip(&request.constraints).take(2) {
        let lhs = decl.expression.split("<=").next().unwrap();
        for (name, coefficient) in names.iter().zip(&row.coefficients) {
            assert_eq!(*coefficient, extract_coefficient(lhs, name));
        }
    }
    assert_eq!(request.constraints[2].coefficients, vec![1.0, 0.0, -100.0]);
    assert_eq!(request.constraints[2].upper, Some(0.0));
    assert_eq!(request.variables[2].upper, Some(1.0));
    assert!(request.variables[2].integer);
}

#[test]
fn test_translate_then_solve() {
    let spec = ModelSpec::from_json(PLANT).unwrap();
    let model = Translator::default().translate(&spec).unwrap().model;
    assert_eq!(model.get_objective_name(), Some("profit"));
    assert_eq!(model.objective().sense, Some(Sense::Maximize));

    let solution = model
        .solve_with(&mut KnownOptimum, &SolverConfig::new().with_time_limit(5.0))
        .unwrap();
    assert_eq!(solution.status, SolverStatus::Optimal);
    assert_eq!(solution.objective_value, Some(460.0));
    assert_eq!(solution.value("x2"), Some(20.0));
    assert_eq!(solution.dual("machine"), Some(2.0));
}

#[test]
fn test_request_serializes_for_backends() {
    let spec = ModelSpec::from_json(PLANT).unwrap();
    let model = Translator::default().translate(&spec).unwrap().model;
    let request = model.to_request(&SolverConfig::new()).unwrap();

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["sense"], "maximize");
    assert_eq!(json["constraints"][0]["name"], "labor");
    assert!(json["constraints"][0].get("lower").is_none());
    assert!(json["variables"][0].get("upper").is_none());
}

#[test]
fn test_strict_translation_stops_at_first_problem() {
    let text = PLANT.replace("fixed_cost*open", "rent*open");
    let spec = ModelSpec::from_json(&text).unwrap();

    let lenient = Translator::default().translate(&spec).unwrap();
    assert_eq!(lenient.diagnostics.len(), 1);
    assert_eq!(lenient.model.objective().terms[2].1, -1.0);

    let err = Translator::new(TranslateConfig::new().with_strict(true))
        .translate(&spec)
        .unwrap_err();
    assert_eq!(err.code(), "EXPR_UNRESOLVED_COEFFICIENT");

    let zeroed = Translator::new(TranslateConfig::new().with_symbolic_default(0.0))
        .translate(&spec)
        .unwrap();
    assert_eq!(zeroed.model.objective().terms.len(), 2);
}

#[test]
fn test_lp_rendering_of_translated_model() {
    let spec = ModelSpec::from_json(PLANT).unwrap();
    let model = Translator::default().translate(&spec).unwrap().model;
    let lp = model.to_lp_string();
    assert!(lp.starts_with("\\ plant\nMaximize\n"));
    assert!(lp.contains(" labor: 2 x1 + x2 <= 100\n"));
    assert!(lp.contains("Binaries\n open\n"));
    assert!(lp.ends_with("End\n"));
}

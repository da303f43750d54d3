//! Wire format exchanged with solver backends.
//!
//! Everything is dense and positional: `objective[j]` and
//! `constraints[i].coefficients[j]` refer to `variables[j]`. Infinite bounds
//! are encoded as absent fields because JSON has no infinity.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{SolverConfig, SolverError, SolverStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

impl ObjectiveSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectiveSense::Minimize => "minimize",
            ObjectiveSense::Maximize => "maximize",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    #[serde(default)]
    pub integer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSpec {
    pub name: String,
    pub coefficients: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverRequest {
    pub sense: ObjectiveSense,
    pub variables: Vec<VariableSpec>,
    pub objective: Vec<f64>,
    #[serde(default)]
    pub objective_constant: f64,
    #[serde(default)]
    pub constraints: Vec<RowSpec>,
    #[serde(default, skip_serializing_if = "SolverConfig::is_empty")]
    pub config: SolverConfig,
}

impl SolverRequest {
    /// Check dimensions, finiteness and configuration before handing the request off.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.variables.is_empty() {
            return Err(SolverError::EmptyRequest);
        }
        let width = self.variables.len();
        check_len("objective", width, self.objective.len())?;
        check_finite("objective", &self.objective)?;
        check_finite("objective_constant", &[self.objective_constant])?;

        for var in &self.variables {
            let field = format!("bounds of variable '{}'", var.name);
            check_finite(&field, var.lower.iter().chain(var.upper.iter()).copied())?;
        }
        for row in &self.constraints {
            check_len(
                &format!("constraint '{}'", row.name),
                width,
                row.coefficients.len(),
            )?;
            check_finite(&format!("constraint '{}'", row.name), &row.coefficients)?;
            check_finite(
                &format!("bounds of constraint '{}'", row.name),
                row.lower.iter().chain(row.upper.iter()).copied(),
            )?;
        }
        self.config.validate().map_err(SolverError::InvalidConfig)
    }

    /// Objective value of a primal point, including the constant.
    pub fn evaluate_objective(&self, values: &[f64]) -> f64 {
        self.objective_constant
            + self
                .objective
                .iter()
                .zip(values)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverResponse {
    /// Accepts backend spellings such as `"OPTIMAL"` or `"Not Solved"`.
    #[serde(deserialize_with = "deserialize_status")]
    pub status: SolverStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective_value: Option<f64>,
    /// Primal values in variable order.
    #[serde(default)]
    pub values: Vec<f64>,
    /// Constraint duals in row order, when the backend reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duals: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solve_time_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SolverResponse {
    pub fn from_json(text: &str) -> Result<Self, SolverError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Ensure the response carries a solution shaped like `request`.
    pub fn check_against(&self, request: &SolverRequest) -> Result<(), SolverError> {
        if !self.status.is_feasible() {
            return Err(SolverError::SolveFailure {
                status: self.status,
            });
        }
        check_len("values", request.variables.len(), self.values.len())?;
        if let Some(duals) = &self.duals {
            check_len("duals", request.constraints.len(), duals.len())?;
        }
        Ok(())
    }
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<SolverStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(SolverStatus::from_backend(&raw))
}

fn check_len(field: &str, expected: usize, actual: usize) -> Result<(), SolverError> {
    if expected == actual {
        Ok(())
    } else {
        Err(SolverError::DimensionMismatch {
            field: field.to_string(),
            expected,
            actual,
        })
    }
}

fn check_finite(
    field: &str,
    values: impl IntoIterator<Item = impl std::borrow::Borrow<f64>>,
) -> Result<(), SolverError> {
    if values.into_iter().all(|v| v.borrow().is_finite()) {
        Ok(())
    } else {
        Err(SolverError::NonFiniteValue {
            field: field.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn request() -> SolverRequest {
        SolverRequest {
            sense: ObjectiveSense::Maximize,
            variables: vec![
                VariableSpec {
                    name: "x1".to_string(),
                    lower: Some(0.0),
                    upper: None,
                    integer: false,
                },
                VariableSpec {
                    name: "x2".to_string(),
                    lower: Some(0.0),
                    upper: Some(40.0),
                    integer: true,
                },
            ],
            objective: vec![10.0, 8.0],
            objective_constant: 5.0,
            constraints: vec![RowSpec {
                name: "labor".to_string(),
                coefficients: vec![2.0, 1.0],
                lower: None,
                upper: Some(100.0),
            }],
            config: SolverConfig::default(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert_eq!(request().validate(), Ok(()));
    }

    #[test]
    fn test_validate_catches_short_row() {
        let mut req = request();
        req.constraints[0].coefficients.pop();
        let err = req.validate().unwrap_err();
        assert_eq!(err.code(), "REQUEST_DIMENSION_MISMATCH");
    }

    #[test]
    fn test_validate_catches_nan_objective() {
        let mut req = request();
        req.objective[1] = f64::NAN;
        assert_eq!(
            req.validate().unwrap_err(),
            SolverError::NonFiniteValue {
                field: "objective".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_empty_and_bad_config() {
        let mut req = request();
        req.config = SolverConfig::new().with_time_limit(0.0);
        assert_eq!(req.validate().unwrap_err().code(), "SOLVER_INVALID_CONFIG");

        req.variables.clear();
        assert_eq!(req.validate().unwrap_err(), SolverError::EmptyRequest);
    }

    #[test]
    fn test_unbounded_side_is_omitted_on_the_wire() {
        let json = serde_json::to_value(request()).unwrap();
        assert!(json["variables"][0].get("upper").is_none());
        assert!(json["constraints"][0].get("lower").is_none());
        assert!(json.get("config").is_none());
        assert_eq!(json["sense"], "maximize");
    }

    #[test]
    fn test_evaluate_objective_includes_constant() {
        assert_eq!(request().evaluate_objective(&[1.0, 2.0]), 31.0);
    }

    #[test]
    fn test_response_accepts_backend_status_spelling() {
        let json = r#"{"status": "OPTIMAL", "objective_value": 12.0, "values": [1.0, 0.0]}"#;
        let response = SolverResponse::from_json(json).unwrap();
        assert_eq!(response.status, SolverStatus::Optimal);
        assert_eq!(response.check_against(&request()), Ok(()));
    }

    #[test]
    fn test_response_without_solution_fails_check() {
        let response = SolverResponse::from_json(r#"{"status": "Infeasible"}"#).unwrap();
        assert_eq!(
            response.check_against(&request()).unwrap_err().code(),
            "SOLVER_INFEASIBLE"
        );
    }

    #[test]
    fn test_response_value_count_must_match() {
        let json = r#"{"status": "feasible", "values": [1.0]}"#;
        let response = SolverResponse::from_json(json).unwrap();
        assert_eq!(
            response.check_against(&request()).unwrap_err().code(),
            "REQUEST_DIMENSION_MISMATCH"
        );
    }
}

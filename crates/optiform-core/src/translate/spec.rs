//! Structured model description, as emitted by the modelling stage.
//!
//! ```json
//! {
//!   "name": "plant",
//!   "variables": ["x1", {"name": "x2", "upper": 40, "kind": "integer"}],
//!   "parameters": {"cost": 3.5},
//!   "objective": {"sense": "maximize", "expression": "10*x1 + 8*x2"},
//!   "constraints": [
//!     {"name": "labor", "expression": "2*x1 + x2 <= 100"},
//!     {"expression": "cost*x1", "sense": "<=", "rhs": 70}
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::translate::error::TranslateError;
use crate::types::{Sense, VariableKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub variables: Vec<VariableDecl>,
    /// Values for symbolic multipliers used in expressions.
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
    pub objective: ObjectiveDecl,
    #[serde(default)]
    pub constraints: Vec<ConstraintDecl>,
}

impl ModelSpec {
    pub fn from_json(text: &str) -> Result<Self, TranslateError> {
        serde_json::from_str(text).map_err(|err| TranslateError::Decode(err.to_string()))
    }
}

/// Declared variable. A bare string is shorthand for a continuous variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawVariableDecl")]
pub struct VariableDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    #[serde(default)]
    pub kind: VariableKind,
}

impl VariableDecl {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lower: None,
            upper: None,
            kind: VariableKind::Continuous,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVariableDecl {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        lower: Option<f64>,
        #[serde(default)]
        upper: Option<f64>,
        #[serde(default)]
        kind: VariableKind,
    },
}

impl From<RawVariableDecl> for VariableDecl {
    fn from(raw: RawVariableDecl) -> Self {
        match raw {
            RawVariableDecl::Name(name) => VariableDecl::named(name),
            RawVariableDecl::Full {
                name,
                lower,
                upper,
                kind,
            } => VariableDecl {
                name,
                lower,
                upper,
                kind,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveDecl {
    pub sense: Sense,
    pub expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Either an inline relation (`"2*x1 + x2 <= 100"`) or an expression with
/// separate `sense` and `rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sense: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rhs: Option<f64>,
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn decodes_both_variable_forms() {
        let spec = ModelSpec::from_json(
            r#"{
                "variables": ["x1", {"name": "x2", "upper": 40, "kind": "integer"}],
                "objective": {"sense": "max", "expression": "10*x1 + 8*x2"}
            }"#,
        )
        .unwrap();
        assert_eq!(spec.variables[0], VariableDecl::named("x1"));
        assert_eq!(spec.variables[1].upper, Some(40.0));
        assert_eq!(spec.variables[1].kind, VariableKind::Integer);
        assert_eq!(spec.objective.sense, Sense::Maximize);
        assert!(spec.constraints.is_empty());
        assert!(spec.parameters.is_empty());
    }

    #[test]
    fn decodes_constraint_forms() {
        let spec = ModelSpec::from_json(
            r#"{
                "parameters": {"cost": 3.5},
                "objective": {"sense": "minimize", "expression": "cost*x1"},
                "constraints": [
                    {"name": "labor", "expression": "2*x1 <= 100"},
                    {"expression": "x1", "sense": ">=", "rhs": 4}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(spec.parameters["cost"], 3.5);
        assert_eq!(spec.constraints[0].name.as_deref(), Some("labor"));
        assert_eq!(spec.constraints[1].sense.as_deref(), Some(">="));
        assert_eq!(spec.constraints[1].rhs, Some(4.0));
    }

    #[test]
    fn missing_objective_is_a_decode_error() {
        let err = ModelSpec::from_json(r#"{"variables": ["x"]}"#).unwrap_err();
        assert_eq!(err.code(), "SPEC_DECODE");
    }
}

use optiform_expr::ids::VariableId;
use optiform_solver::ObjectiveSense;
use serde::{Deserialize, Serialize};

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    #[serde(alias = "min", alias = "Minimize", alias = "MINIMIZE", alias = "minimise")]
    Minimize,
    #[serde(alias = "max", alias = "Maximize", alias = "MAXIMIZE", alias = "maximise")]
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

impl From<Sense> for ObjectiveSense {
    fn from(sense: Sense) -> Self {
        match sense {
            Sense::Minimize => ObjectiveSense::Minimize,
            Sense::Maximize => ObjectiveSense::Maximize,
        }
    }
}

/// Domain of a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    Continuous,
    Integer,
    Binary,
}

/// Bounds for a variable or constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `[0, +inf)`, the usual domain of a production quantity.
    pub fn non_negative() -> Self {
        Self::new(0.0, f64::INFINITY)
    }

    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn is_valid(&self) -> bool {
        !self.lower.is_nan() && !self.upper.is_nan() && self.lower <= self.upper
    }

    /// Finite sides only, as carried on the solver wire format.
    pub fn finite_sides(&self) -> (Option<f64>, Option<f64>) {
        (
            self.lower.is_finite().then_some(self.lower),
            self.upper.is_finite().then_some(self.upper),
        )
    }
}

/// A decision variable with bounds and integrality constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub bounds: Bounds,
    pub is_integer: bool,
}

impl Variable {
    /// Create a binary variable with bounds [0, 1] and integer constraint.
    pub fn binary() -> Self {
        Self {
            bounds: Bounds::new(0.0, 1.0),
            is_integer: true,
        }
    }

    pub fn continuous(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_integer: false,
        }
    }

    pub fn integer(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_integer: true,
        }
    }

    pub fn of_kind(kind: VariableKind, bounds: Bounds) -> Self {
        match kind {
            VariableKind::Continuous => Self::continuous(bounds),
            VariableKind::Integer => Self::integer(bounds),
            VariableKind::Binary => Self::binary(),
        }
    }

    pub fn is_binary(&self) -> bool {
        self.is_integer && self.bounds == Bounds::new(0.0, 1.0)
    }
}

/// A constraint row's bounds; coefficients live in the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub bounds: Bounds,
}

/// Objective function with a sense, linear terms and a constant offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Objective {
    pub sense: Option<Sense>,
    pub terms: Vec<(VariableId, f64)>,
    pub constant: f64,
}

impl Objective {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn sense_accepts_short_and_capitalized_names() {
        let parsed: Vec<Sense> =
            serde_json::from_str(r#"["min", "Maximize", "maximize", "MINIMIZE"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![Sense::Minimize, Sense::Maximize, Sense::Maximize, Sense::Minimize]
        );
    }

    #[test]
    fn finite_sides_drop_infinities() {
        assert_eq!(Bounds::non_negative().finite_sides(), (Some(0.0), None));
        assert_eq!(Bounds::free().finite_sides(), (None, None));
    }

    #[test]
    fn binary_kind_ignores_bounds() {
        let var = Variable::of_kind(VariableKind::Binary, Bounds::new(0.0, 10.0));
        assert!(var.is_binary());
        let var = Variable::of_kind(VariableKind::Integer, Bounds::new(0.0, 10.0));
        assert!(var.is_integer);
        assert!(!var.is_binary());
    }

    #[test]
    fn bounds_validity() {
        assert!(Bounds::new(1.0, 1.0).is_valid());
        assert!(!Bounds::new(2.0, 1.0).is_valid());
        assert!(!Bounds::new(f64::NAN, 1.0).is_valid());
    }
}

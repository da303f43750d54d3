//! Constraint expressions: linear expression with comparison sense and RHS.

use crate::expr::core::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl ComparisonSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "<=",
            ComparisonSense::GreaterEqual => ">=",
            ComparisonSense::Equal => "=",
        }
    }

    /// Parse an operator token. Strict inequalities map to their non-strict form.
    pub fn from_operator(op: &str) -> Option<Self> {
        match op.trim() {
            "<=" | "<" | "≤" => Some(ComparisonSense::LessEqual),
            ">=" | ">" | "≥" => Some(ComparisonSense::GreaterEqual),
            "=" | "==" => Some(ComparisonSense::Equal),
            _ => None,
        }
    }

    /// Sense after both sides of the relation are swapped.
    pub fn reversed(self) -> Self {
        match self {
            ComparisonSense::LessEqual => ComparisonSense::GreaterEqual,
            ComparisonSense::GreaterEqual => ComparisonSense::LessEqual,
            ComparisonSense::Equal => ComparisonSense::Equal,
        }
    }

    /// Row bounds `(lower, upper)` for `expr <sense> rhs`.
    pub fn bounds(self, rhs: f64) -> (f64, f64) {
        match self {
            ComparisonSense::LessEqual => (f64::NEG_INFINITY, rhs),
            ComparisonSense::GreaterEqual => (rhs, f64::INFINITY),
            ComparisonSense::Equal => (rhs, rhs),
        }
    }
}

impl std::fmt::Display for ComparisonSense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `expr <sense> rhs` where `expr` carries no constant.
#[derive(Debug, Clone)]
pub struct ConstraintExpr {
    expr: Expr,
    sense: ComparisonSense,
    rhs: f64,
}

impl ConstraintExpr {
    pub fn new(expr: Expr, sense: ComparisonSense, rhs: f64) -> Self {
        Self { expr, sense, rhs }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn into_parts(self) -> (Expr, ComparisonSense, f64) {
        (self.expr, self.sense, self.rhs)
    }
}

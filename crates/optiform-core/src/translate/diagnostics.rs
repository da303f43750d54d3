//! Non-fatal findings from lowering expressions.

use std::fmt;

use optiform_expr::LinearExprError;

use crate::translate::error::TranslateError;

/// Where in a model description a finding was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Objective,
    Constraint(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Objective => write!(f, "objective"),
            Location::Constraint(name) => write!(f, "constraint '{name}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// Segment skipped because it does not fit the term grammar.
    MalformedTerm { term: String },
    /// Symbolic multiplier with no parameter value; `fallback` was used instead.
    UnresolvedCoefficient {
        variable: String,
        symbols: Vec<String>,
        fallback: f64,
    },
    /// Variable used in an expression but never declared; it was added.
    UndeclaredVariable { name: String },
    /// Variable named by more than one term; only the first was kept.
    DuplicateTerm { variable: String },
    EmptyExpression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub location: Location,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(location: Location, kind: DiagnosticKind) -> Self {
        Self { location, kind }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            DiagnosticKind::MalformedTerm { .. } => "EXPR_MALFORMED_TERM",
            DiagnosticKind::UnresolvedCoefficient { .. } => "EXPR_UNRESOLVED_COEFFICIENT",
            DiagnosticKind::UndeclaredVariable { .. } => "VARIABLE_UNDECLARED",
            DiagnosticKind::DuplicateTerm { .. } => "EXPR_DUPLICATE_TERM",
            DiagnosticKind::EmptyExpression => "EXPR_EMPTY",
        }
    }

    /// The error this finding becomes under strict translation.
    pub fn into_error(self) -> TranslateError {
        let location = self.location;
        let source = match self.kind {
            DiagnosticKind::MalformedTerm { term } => LinearExprError::MalformedTerm { term },
            DiagnosticKind::UnresolvedCoefficient {
                variable, symbols, ..
            } => LinearExprError::UnresolvedCoefficient { variable, symbols },
            DiagnosticKind::UndeclaredVariable { name } => {
                return TranslateError::UndeclaredVariable { location, name };
            }
            DiagnosticKind::DuplicateTerm { variable } => {
                return TranslateError::DuplicateTerm { location, variable };
            }
            DiagnosticKind::EmptyExpression => LinearExprError::EmptyExpression,
        };
        TranslateError::Expression { location, source }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: ", self.code(), self.location)?;
        match &self.kind {
            DiagnosticKind::MalformedTerm { term } => write!(f, "skipped term '{term}'"),
            DiagnosticKind::UnresolvedCoefficient {
                variable,
                symbols,
                fallback,
            } => write!(
                f,
                "coefficient of '{}' uses unknown {}, assumed {}",
                variable,
                symbols.join("*"),
                fallback
            ),
            DiagnosticKind::UndeclaredVariable { name } => {
                write!(f, "declared variable '{name}' with default bounds")
            }
            DiagnosticKind::DuplicateTerm { variable } => {
                write!(f, "'{variable}' appears more than once, first term kept")
            }
            DiagnosticKind::EmptyExpression => write!(f, "expression has no terms"),
        }
    }
}

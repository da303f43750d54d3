//! Translation errors.

use optiform_expr::LinearExprError;

use crate::model::ModelError;
use crate::translate::diagnostics::Location;

#[derive(Debug, Clone, PartialEq)]
pub enum TranslateError {
    /// Model description is not valid JSON for [`ModelSpec`](crate::ModelSpec).
    Decode(String),
    /// An expression could not be lowered.
    Expression {
        location: Location,
        source: LinearExprError,
    },
    UndeclaredVariable {
        location: Location,
        name: String,
    },
    DuplicateTerm {
        location: Location,
        variable: String,
    },
    /// `sense` is not a comparison operator.
    InvalidSense {
        location: Location,
        value: String,
    },
    /// `rhs` given without a `sense`.
    MissingSense {
        location: Location,
    },
    /// `sense` given without an `rhs`.
    MissingRhs {
        location: Location,
    },
    Model(ModelError),
}

impl TranslateError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            TranslateError::Decode(_) => "SPEC_DECODE",
            TranslateError::Expression { source, .. } => source.code(),
            TranslateError::UndeclaredVariable { .. } => "VARIABLE_UNDECLARED",
            TranslateError::DuplicateTerm { .. } => "EXPR_DUPLICATE_TERM",
            TranslateError::InvalidSense { .. } => "CONSTRAINT_INVALID_SENSE",
            TranslateError::MissingSense { .. } => "CONSTRAINT_MISSING_SENSE",
            TranslateError::MissingRhs { .. } => "CONSTRAINT_MISSING_RHS",
            TranslateError::Model(err) => err.code(),
        }
    }
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::Decode(message) => {
                write!(f, "[{}] Invalid model description: {}", self.code(), message)
            }
            TranslateError::Expression { location, source } => write!(f, "{location}: {source}"),
            TranslateError::UndeclaredVariable { location, name } => write!(
                f,
                "[{}] {}: variable '{}' is not declared",
                self.code(),
                location,
                name
            ),
            TranslateError::DuplicateTerm { location, variable } => write!(
                f,
                "[{}] {}: variable '{}' appears in more than one term",
                self.code(),
                location,
                variable
            ),
            TranslateError::InvalidSense { location, value } => write!(
                f,
                "[{}] {}: '{}' is not one of <=, >=, =",
                self.code(),
                location,
                value
            ),
            TranslateError::MissingSense { location } => write!(
                f,
                "[{}] {}: rhs given without a sense",
                self.code(),
                location
            ),
            TranslateError::MissingRhs { location } => write!(
                f,
                "[{}] {}: sense given without an rhs",
                self.code(),
                location
            ),
            TranslateError::Model(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for TranslateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslateError::Expression { source, .. } => Some(source),
            TranslateError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for TranslateError {
    fn from(err: ModelError) -> Self {
        TranslateError::Model(err)
    }
}

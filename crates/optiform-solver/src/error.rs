//! Solver error types.

use crate::SolverStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Request has no variables.
    EmptyRequest,
    /// A vector in the request or response has the wrong length.
    DimensionMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
    /// NaN or infinite value where a finite number is required.
    NonFiniteValue { field: String },
    /// Invalid solver configuration.
    InvalidConfig(String),
    /// Backend could not be reached or crashed.
    Backend(String),
    /// Response payload could not be decoded.
    Decode(String),
    /// Solver finished without a usable solution.
    SolveFailure { status: SolverStatus },
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::EmptyRequest => "REQUEST_EMPTY",
            SolverError::DimensionMismatch { .. } => "REQUEST_DIMENSION_MISMATCH",
            SolverError::NonFiniteValue { .. } => "REQUEST_NON_FINITE",
            SolverError::InvalidConfig(_) => "SOLVER_INVALID_CONFIG",
            SolverError::Backend(_) => "SOLVER_BACKEND",
            SolverError::Decode(_) => "RESPONSE_DECODE",
            SolverError::SolveFailure { status } => match status {
                SolverStatus::Infeasible => "SOLVER_INFEASIBLE",
                SolverStatus::Unbounded => "SOLVER_UNBOUNDED",
                SolverStatus::TimeLimit => "SOLVER_TIME_LIMIT",
                SolverStatus::IterationLimit => "SOLVER_ITERATION_LIMIT",
                _ => "SOLVER_NO_SOLUTION",
            },
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::EmptyRequest => write!(f, "[{}] Request has no variables", self.code()),
            SolverError::DimensionMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "[{}] {} has {} entries, expected {}",
                self.code(),
                field,
                actual,
                expected
            ),
            SolverError::NonFiniteValue { field } => {
                write!(f, "[{}] {} must be finite", self.code(), field)
            }
            SolverError::InvalidConfig(msg) => {
                write!(f, "[{}] Invalid solver config: {}", self.code(), msg)
            }
            SolverError::Backend(msg) => {
                write!(f, "[{}] Solver backend failed: {}", self.code(), msg)
            }
            SolverError::Decode(msg) => {
                write!(f, "[{}] Cannot decode solver response: {}", self.code(), msg)
            }
            SolverError::SolveFailure { status } => write!(
                f,
                "[{}] Solver finished with status '{}'",
                self.code(),
                status
            ),
        }
    }
}

impl std::error::Error for SolverError {}

impl From<serde_json::Error> for SolverError {
    fn from(err: serde_json::Error) -> Self {
        SolverError::Decode(err.to_string())
    }
}

//! Solver status types.

use serde::{Deserialize, Serialize};

/// Normalized status across backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    /// Optimal solution found.
    Optimal,
    /// Feasible but not proven optimal.
    Feasible,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Solver reached time limit (may have feasible solution).
    TimeLimit,
    /// Solver reached iteration limit (may have feasible solution).
    IterationLimit,
    /// Status is unknown or solver did not complete.
    Unknown,
}

impl SolverStatus {
    /// Map a backend status string to a normalized status.
    ///
    /// Matching ignores case, spaces, dashes and underscores, so OR-Tools'
    /// `OPTIMAL`, PuLP's `Not Solved` and CVXPY's `infeasible_inaccurate`
    /// are all understood. Anything unrecognized is [`SolverStatus::Unknown`].
    pub fn from_backend(value: &str) -> Self {
        let key: String = value
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "optimal" | "optimalinaccurate" => SolverStatus::Optimal,
            "feasible" | "solutionfound" => SolverStatus::Feasible,
            "infeasible" | "infeasibleinaccurate" => SolverStatus::Infeasible,
            "unbounded" | "unboundedinaccurate" => SolverStatus::Unbounded,
            "timelimit" | "usertimelimit" => SolverStatus::TimeLimit,
            "iterationlimit" => SolverStatus::IterationLimit,
            _ => SolverStatus::Unknown,
        }
    }

    pub fn is_optimal(self) -> bool {
        matches!(self, SolverStatus::Optimal)
    }

    /// Check if the status carries a usable solution.
    pub fn is_feasible(self) -> bool {
        matches!(
            self,
            SolverStatus::Optimal
                | SolverStatus::Feasible
                | SolverStatus::TimeLimit
                | SolverStatus::IterationLimit
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Feasible => "feasible",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::TimeLimit => "time_limit",
            SolverStatus::IterationLimit => "iteration_limit",
            SolverStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Backend abstraction.

use crate::{SolverError, SolverRequest, SolverResponse};

/// Adapter that ships a [`SolverRequest`] to a solver library and returns its answer.
///
/// Implementations talk to OR-Tools, PuLP or CVXPY (in-process bindings, a
/// subprocess or a remote service). They should return `Ok` for every answer
/// the backend produced, including infeasible ones, and reserve `Err` for
/// transport or decoding failures.
pub trait Solve {
    fn solve(&mut self, request: &SolverRequest) -> Result<SolverResponse, SolverError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ObjectiveSense, SolverConfig, SolverStatus, VariableSpec};

    /// Returns every variable at its lower bound.
    struct LowerBoundSolver {
        calls: usize,
    }

    impl Solve for LowerBoundSolver {
        fn solve(&mut self, request: &SolverRequest) -> Result<SolverResponse, SolverError> {
            request.validate()?;
            self.calls += 1;
            let values: Vec<f64> = request
                .variables
                .iter()
                .map(|v| v.lower.unwrap_or(0.0))
                .collect();
            Ok(SolverResponse {
                status: SolverStatus::Feasible,
                objective_value: Some(request.evaluate_objective(&values)),
                values,
                duals: None,
                solve_time_seconds: Some(0.0),
                message: None,
            })
        }
    }

    #[test]
    fn test_solve_trait_round_trip() {
        let request = SolverRequest {
            sense: ObjectiveSense::Minimize,
            variables: vec![VariableSpec {
                name: "x".to_string(),
                lower: Some(2.0),
                upper: None,
                integer: false,
            }],
            objective: vec![3.0],
            objective_constant: 0.0,
            constraints: Vec::new(),
            config: SolverConfig::new(),
        };
        let mut solver = LowerBoundSolver { calls: 0 };
        let response = solver.solve(&request).unwrap();
        assert_eq!(solver.calls, 1);
        assert_eq!(response.objective_value, Some(6.0));
        assert!(response.check_against(&request).is_ok());
    }

    #[test]
    fn test_solve_propagates_validation_errors() {
        let request = SolverRequest {
            sense: ObjectiveSense::Minimize,
            variables: Vec::new(),
            objective: Vec::new(),
            objective_constant: 0.0,
            constraints: Vec::new(),
            config: SolverConfig::new(),
        };
        let mut solver = LowerBoundSolver { calls: 0 };
        assert_eq!(solver.solve(&request), Err(SolverError::EmptyRequest));
        assert_eq!(solver.calls, 0);
    }
}

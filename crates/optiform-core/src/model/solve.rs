//! Solver request assembly and solution mapping.

use std::time::Instant;

use optiform_solver::{
    RowSpec, Solve, SolverConfig, SolverError, SolverRequest, SolverResponse, SolverStatus,
    VariableSpec,
};

use crate::model::Model;
use crate::model::error::ModelError;

/// Solver answer keyed by the model's variable and constraint names.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolverStatus,
    pub objective_value: Option<f64>,
    pub values: Vec<(String, f64)>,
    pub duals: Option<Vec<(String, f64)>>,
    pub solve_time_seconds: Option<f64>,
}

impl Solution {
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find_map(|(candidate, value)| (candidate == name).then_some(*value))
    }

    pub fn dual(&self, constraint: &str) -> Option<f64> {
        self.duals.as_ref().and_then(|duals| {
            duals
                .iter()
                .find_map(|(candidate, value)| (candidate == constraint).then_some(*value))
        })
    }
}

impl Model {
    /// Dense solver request: one column per variable, one row per constraint.
    pub fn to_request(&self, config: &SolverConfig) -> Result<SolverRequest, ModelError> {
        if self.variables.is_empty() {
            return Err(ModelError::EmptyModel);
        }
        let sense = self.objective.sense.ok_or(ModelError::NoObjective)?;
        let width = self.variables.len();

        let variables = self
            .variables()
            .map(|(id, name)| {
                let variable = &self.variables[id.index()];
                let (lower, upper) = variable.bounds.finite_sides();
                VariableSpec {
                    name: name.to_string(),
                    lower,
                    upper,
                    integer: variable.is_integer,
                }
            })
            .collect();

        let mut objective = vec![0.0; width];
        for (var_id, coeff) in &self.objective.terms {
            objective[var_id.index()] = *coeff;
        }

        let constraints = self
            .constraints
            .iter()
            .zip(&self.rows)
            .zip(&self.constraint_names)
            .map(|((constraint, row), name)| {
                let mut coefficients = vec![0.0; width];
                for (var_id, coeff) in row {
                    coefficients[var_id.index()] = *coeff;
                }
                let (lower, upper) = constraint.bounds.finite_sides();
                RowSpec {
                    name: name.clone(),
                    coefficients,
                    lower,
                    upper,
                }
            })
            .collect();

        let request = SolverRequest {
            sense: sense.into(),
            variables,
            objective,
            objective_constant: self.objective.constant,
            constraints,
            config: config.clone(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Map a backend response onto this model's names.
    pub fn solution_from_response(&self, response: SolverResponse) -> Result<Solution, ModelError> {
        if !response.status.is_feasible() {
            return Err(SolverError::SolveFailure {
                status: response.status,
            }
            .into());
        }
        if response.values.len() != self.variables.len() {
            return Err(SolverError::DimensionMismatch {
                field: "values".to_string(),
                expected: self.variables.len(),
                actual: response.values.len(),
            }
            .into());
        }
        if let Some(duals) = &response.duals {
            if duals.len() != self.constraints.len() {
                return Err(SolverError::DimensionMismatch {
                    field: "duals".to_string(),
                    expected: self.constraints.len(),
                    actual: duals.len(),
                }
                .into());
            }
        }

        let values = self
            .variable_names
            .iter()
            .cloned()
            .zip(response.values)
            .collect();
        let duals = response
            .duals
            .map(|duals| self.constraint_names.iter().cloned().zip(duals).collect());

        Ok(Solution {
            status: response.status,
            objective_value: response.objective_value,
            values,
            duals,
            solve_time_seconds: response.solve_time_seconds,
        })
    }

    /// Build the request, hand it to `solver` and map the answer back.
    pub fn solve_with<S: Solve>(
        &self,
        solver: &mut S,
        config: &SolverConfig,
    ) -> Result<Solution, ModelError> {
        let started = Instant::now();
        let request = self.to_request(config)?;
        let response = solver.solve(&request).inspect_err(|err| {
            tracing::error!(
                component = "model",
                operation = "solve",
                status = "error",
                error_code = err.code(),
                "Solver backend failed"
            );
        })?;

        let solution = self.solution_from_response(response)?;
        tracing::info!(
            component = "model",
            operation = "solve",
            status = solution.status.as_str(),
            backend = config.backend.map(|b| b.as_str()).unwrap_or("default"),
            variables = request.variables.len(),
            constraints = request.constraints.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Solved model"
        );
        Ok(solution)
    }
}

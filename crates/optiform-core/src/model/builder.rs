//! Model builder methods for adding variables, constraints, and objectives.

use crate::types::{Bounds, Constraint, Objective, Sense, Variable};
use optiform_expr::expr::{ConstraintExpr, Expr};
use optiform_expr::ids::{ConstraintId, VariableId};

use crate::model::Model;
use crate::model::error::ModelError;

impl Model {
    /// Add a named variable. Names are unique within a model.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        variable: Variable,
    ) -> Result<VariableId, ModelError> {
        let name = name.into();
        if !variable.bounds.is_valid() {
            return Err(ModelError::InvalidVariableBounds {
                lower: variable.bounds.lower,
                upper: variable.bounds.upper,
            });
        }
        if self.variable_index.contains_key(&name) {
            return Err(ModelError::DuplicateVariableName { name });
        }

        let id = VariableId::new(self.variables.len() as u32);
        self.variables.push(variable);
        self.variable_index.insert(name.clone(), id);
        self.variable_names.push(name);
        Ok(id)
    }

    /// Add a constraint from a comparison expression (e.g., `x + y <= 10`).
    ///
    /// Unnamed constraints are called `c<n>` after their 1-based position.
    pub fn add_constraint_expr(
        &mut self,
        name: Option<String>,
        constraint: ConstraintExpr,
    ) -> Result<ConstraintId, ModelError> {
        let (expr, sense, rhs) = constraint.into_parts();
        let (lower, upper) = sense.bounds(rhs);
        let bounds = Bounds::new(lower, upper);
        if rhs.is_nan() || !bounds.is_valid() {
            return Err(ModelError::InvalidConstraintBounds { lower, upper });
        }

        let name = name.unwrap_or_else(|| format!("c{}", self.constraints.len() + 1));
        if self.constraint_names.contains(&name) {
            return Err(ModelError::DuplicateConstraintName { name });
        }

        let (terms, _) = expr.into_parts();
        let row = self.normalize_terms(terms)?;

        let id = ConstraintId::new(self.constraints.len() as u32);
        self.constraints.push(Constraint { bounds });
        self.constraint_names.push(name);
        self.rows.push(row);
        Ok(id)
    }

    /// Set the objective function.
    pub fn set_objective(&mut self, objective: Objective) -> Result<(), ModelError> {
        let sense = objective.sense.ok_or(ModelError::NoObjective)?;
        if !objective.constant.is_finite() {
            return Err(ModelError::InvalidCoefficient {
                coefficient: objective.constant,
            });
        }
        let terms = self.normalize_terms(objective.terms)?;
        self.objective = Objective {
            sense: Some(sense),
            terms,
            constant: objective.constant,
        };
        self.objective_name = None;
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = sense.as_str(),
            terms = self.objective.terms.len(),
            "Set objective function"
        );
        Ok(())
    }

    /// Minimize a linear expression.
    ///
    /// Returns an error if the model already has an objective.
    pub fn minimize(&mut self, expr: Expr) -> Result<(), ModelError> {
        self.set_first_objective(Sense::Minimize, expr)
    }

    /// Maximize a linear expression.
    ///
    /// Returns an error if the model already has an objective.
    pub fn maximize(&mut self, expr: Expr) -> Result<(), ModelError> {
        self.set_first_objective(Sense::Maximize, expr)
    }

    fn set_first_objective(&mut self, sense: Sense, expr: Expr) -> Result<(), ModelError> {
        if self.objective.sense.is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        let (terms, constant) = expr.into_parts();
        self.set_objective(Objective {
            sense: Some(sense),
            terms,
            constant,
        })
    }
}

//! Model module for building optimization models.
//!
//! This module provides the core [`Model`] type: named decision variables, an
//! objective and constraint rows, ready to be shipped to a solver.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Methods for adding variables, constraints, and objectives
//! - [`lp`]: CPLEX-LP style text rendering
//! - [`solve`]: Solver request assembly and solution mapping

mod builder;
mod error;
mod lp;
mod solve;

use crate::types::{Constraint, Objective, Variable};
use optiform_expr::ids::{ConstraintId, VariableId};
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

pub use error::ModelError;
pub use solve::Solution;

/// A model with named variables and row-major sparse constraint storage.
///
/// Ids are dense: `VariableId::index()` is the column position in solver
/// requests and `ConstraintId::index()` the row position.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub(crate) name: Option<String>,
    pub(crate) variables: Vec<Variable>,
    pub(crate) variable_names: Vec<String>,
    pub(crate) variable_index: HashMap<String, VariableId>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) constraint_names: Vec<String>,
    // Row storage: constraint index -> merged (variable_id, coefficient) pairs
    pub(crate) rows: Vec<Vec<(VariableId, f64)>>,
    pub(crate) objective: Objective,
    pub(crate) objective_name: Option<String>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn get_variable(&self, id: VariableId) -> Result<&Variable, ModelError> {
        self.variables
            .get(id.index())
            .ok_or(ModelError::InvalidVariableId(id))
    }

    pub fn get_constraint(&self, id: ConstraintId) -> Result<&Constraint, ModelError> {
        self.constraints
            .get(id.index())
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    /// Lookup a variable by name.
    pub fn variable_id(&self, name: &str) -> Option<VariableId> {
        self.variable_index.get(name).copied()
    }

    pub fn variable_name(&self, id: VariableId) -> Option<&str> {
        self.variable_names.get(id.index()).map(String::as_str)
    }

    /// Variables in column order with their names.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &str)> + '_ {
        self.variable_names
            .iter()
            .enumerate()
            .map(|(idx, name)| (VariableId::new(idx as u32), name.as_str()))
    }

    pub fn constraint_name(&self, id: ConstraintId) -> Option<&str> {
        self.constraint_names.get(id.index()).map(String::as_str)
    }

    /// Lookup a constraint by name.
    pub fn constraint_id(&self, name: &str) -> Option<ConstraintId> {
        self.constraint_names
            .iter()
            .position(|candidate| candidate == name)
            .map(|idx| ConstraintId::new(idx as u32))
    }

    /// Merged coefficients of a constraint row, ordered by variable id.
    pub fn get_row(&self, id: ConstraintId) -> Result<&[(VariableId, f64)], ModelError> {
        self.rows
            .get(id.index())
            .map(Vec::as_slice)
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    /// Coefficient of `var_id` in constraint `constraint_id` (zero when absent).
    pub fn coefficient(
        &self,
        var_id: VariableId,
        constraint_id: ConstraintId,
    ) -> Result<f64, ModelError> {
        self.ensure_variable_exists(var_id)?;
        let row = self.get_row(constraint_id)?;
        Ok(row
            .iter()
            .find_map(|(id, coeff)| (*id == var_id).then_some(*coeff))
            .unwrap_or(0.0))
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn get_objective_name(&self) -> Option<&str> {
        self.objective_name.as_deref()
    }

    pub fn set_objective_name(&mut self, name: Option<String>) {
        self.objective_name = name;
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        if id.index() < self.variables.len() {
            Ok(())
        } else {
            Err(ModelError::InvalidVariableId(id))
        }
    }

    /// Merge duplicate variables, drop zero coefficients and reject non-finite ones.
    pub(crate) fn normalize_terms(
        &self,
        terms: Vec<(VariableId, f64)>,
    ) -> Result<Vec<(VariableId, f64)>, ModelError> {
        let started = Instant::now();
        let terms_in = terms.len();

        let mut merged: BTreeMap<VariableId, f64> = BTreeMap::new();
        for (var_id, coeff) in terms {
            self.ensure_variable_exists(var_id)?;
            if !coeff.is_finite() {
                return Err(ModelError::InvalidCoefficient { coefficient: coeff });
            }
            if coeff == 0.0 {
                continue;
            }
            *merged.entry(var_id).or_insert(0.0) += coeff;
        }

        let normalized: Vec<(VariableId, f64)> = merged
            .into_iter()
            .filter(|(_, coeff)| *coeff != 0.0)
            .collect();

        tracing::debug!(
            component = "model",
            operation = "lower_expr",
            status = "success",
            expr_terms_in = terms_in,
            expr_terms_out = normalized.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Lowered linear expression"
        );

        Ok(normalized)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::{Bounds, Sense};
    use optiform_expr::expr::{ComparisonSense, ConstraintExpr, Expr};

    fn production_model() -> (Model, VariableId, VariableId) {
        let mut model = Model::new();
        let x1 = model
            .add_variable("x1", Variable::continuous(Bounds::non_negative()))
            .unwrap();
        let x2 = model
            .add_variable("x2", Variable::integer(Bounds::new(0.0, 40.0)))
            .unwrap();
        (model, x1, x2)
    }

    #[test]
    fn test_new_model_is_empty() {
        let model = Model::new();
        assert_eq!(model.num_variables(), 0);
        assert_eq!(model.num_constraints(), 0);
        assert!(model.objective().sense.is_none());
    }

    #[test]
    fn test_variables_are_named_and_dense() {
        let (model, x1, x2) = production_model();
        assert_eq!(x1.index(), 0);
        assert_eq!(x2.index(), 1);
        assert_eq!(model.variable_id("x2"), Some(x2));
        assert_eq!(model.variable_name(x1), Some("x1"));
        assert_eq!(
            model.variables().collect::<Vec<_>>(),
            vec![(x1, "x1"), (x2, "x2")]
        );
    }

    #[test]
    fn test_duplicate_variable_name_rejected() {
        let (mut model, _, _) = production_model();
        let result = model.add_variable("x1", Variable::binary());
        assert_eq!(
            result,
            Err(ModelError::DuplicateVariableName {
                name: "x1".to_string()
            })
        );
    }

    #[test]
    fn test_variable_bounds_validation() {
        let mut model = Model::new();
        let result = model.add_variable("x", Variable::continuous(Bounds::new(5.0, 1.0)));
        assert!(matches!(
            result,
            Err(ModelError::InvalidVariableBounds { .. })
        ));
    }

    #[test]
    fn test_add_constraint_expr_merges_row() {
        let (mut model, x1, x2) = production_model();
        let expr = Expr::term(x1, 2.0) + Expr::term(x2, 1.0) + Expr::term(x1, 1.0);
        let con = model
            .add_constraint_expr(Some("labor".to_string()), expr.le_scalar(100.0))
            .unwrap();

        assert_eq!(model.get_row(con).unwrap(), &[(x1, 3.0), (x2, 1.0)]);
        assert_eq!(model.coefficient(x2, con).unwrap(), 1.0);
        assert_eq!(model.constraint_id("labor"), Some(con));
        let stored = model.get_constraint(con).unwrap();
        assert!(stored.bounds.lower.is_infinite());
        assert_eq!(stored.bounds.upper, 100.0);
    }

    #[test]
    fn test_unnamed_constraints_get_positional_names() {
        let (mut model, x1, _) = production_model();
        let first = model
            .add_constraint_expr(None, Expr::var(x1).ge_scalar(1.0))
            .unwrap();
        let second = model
            .add_constraint_expr(None, Expr::var(x1).le_scalar(9.0))
            .unwrap();
        assert_eq!(model.constraint_name(first), Some("c1"));
        assert_eq!(model.constraint_name(second), Some("c2"));
    }

    #[test]
    fn test_duplicate_constraint_name_rejected() {
        let (mut model, x1, _) = production_model();
        model
            .add_constraint_expr(Some("cap".to_string()), Expr::var(x1).le_scalar(1.0))
            .unwrap();
        let result =
            model.add_constraint_expr(Some("cap".to_string()), Expr::var(x1).le_scalar(2.0));
        assert_eq!(
            result,
            Err(ModelError::DuplicateConstraintName {
                name: "cap".to_string()
            })
        );
    }

    #[test]
    fn test_constraint_rejects_unknown_variable() {
        let (mut model, _, _) = production_model();
        let ghost = VariableId::new(99);
        let result = model.add_constraint_expr(None, Expr::var(ghost).le_scalar(1.0));
        assert_eq!(result, Err(ModelError::InvalidVariableId(ghost)));
        assert_eq!(model.num_constraints(), 0);
    }

    #[test]
    fn test_constraint_rejects_nan_rhs() {
        let (mut model, x1, _) = production_model();
        let constraint = ConstraintExpr::new(Expr::var(x1), ComparisonSense::Equal, f64::NAN);
        let result = model.add_constraint_expr(None, constraint);
        assert!(matches!(
            result,
            Err(ModelError::InvalidConstraintBounds { .. })
        ));
    }

    #[test]
    fn test_constraint_rejects_infinite_coefficient() {
        let (mut model, x1, _) = production_model();
        let result = model.add_constraint_expr(None, Expr::term(x1, f64::INFINITY).le_scalar(1.0));
        assert!(matches!(result, Err(ModelError::InvalidCoefficient { .. })));
    }

    #[test]
    fn test_maximize_keeps_constant() {
        let (mut model, x1, x2) = production_model();
        let objective = Expr::new(vec![(x1, 10.0), (x2, 8.0)], 5.0);
        model.maximize(objective).unwrap();
        assert_eq!(model.objective().sense, Some(Sense::Maximize));
        assert_eq!(model.objective().terms, vec![(x1, 10.0), (x2, 8.0)]);
        assert_eq!(model.objective().constant, 5.0);
    }

    #[test]
    fn test_multiple_objectives_rejected() {
        let (mut model, x1, _) = production_model();
        model.minimize(Expr::var(x1)).unwrap();
        assert_eq!(
            model.maximize(Expr::var(x1)),
            Err(ModelError::MultipleObjectives)
        );
    }

    #[test]
    fn test_set_objective_rejects_missing_sense() {
        let (mut model, _, _) = production_model();
        let result = model.set_objective(Objective::new());
        assert_eq!(result, Err(ModelError::NoObjective));
    }

    #[test]
    fn test_set_objective_clears_name() {
        let (mut model, x1, _) = production_model();
        model.minimize(Expr::var(x1)).unwrap();
        model.set_objective_name(Some("cost".to_string()));
        assert_eq!(model.get_objective_name(), Some("cost"));

        model
            .set_objective(Objective {
                sense: Some(Sense::Maximize),
                terms: vec![(x1, 2.0)],
                constant: 0.0,
            })
            .unwrap();
        assert!(model.get_objective_name().is_none());
    }
}

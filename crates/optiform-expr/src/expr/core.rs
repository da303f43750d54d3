//! Solver-facing linear expression: `(VariableId, coefficient)` terms plus a constant.
//!
//! Terms are kept in insertion order and may repeat a variable; call
//! [`Expr::normalized_terms`] at the solver boundary to merge them.

use crate::expr::constraint::{ComparisonSense, ConstraintExpr};
use crate::ids::VariableId;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expr {
    constant: f64,
    terms: Vec<(VariableId, f64)>,
}

impl Expr {
    pub fn new(terms: Vec<(VariableId, f64)>, constant: f64) -> Self {
        Self { constant, terms }
    }

    pub fn from_constant(constant: f64) -> Self {
        Self {
            constant,
            terms: Vec::new(),
        }
    }

    /// Single term `coeff * var`; a zero coefficient yields the empty expression.
    pub fn term(var_id: VariableId, coeff: f64) -> Self {
        if coeff == 0.0 {
            return Self::default();
        }
        Self {
            constant: 0.0,
            terms: vec![(var_id, coeff)],
        }
    }

    pub fn var(var_id: VariableId) -> Self {
        Self::term(var_id, 1.0)
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn terms(&self) -> &[(VariableId, f64)] {
        &self.terms
    }

    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(|(_, c)| *c == 0.0)
    }

    pub fn into_parts(self) -> (Vec<(VariableId, f64)>, f64) {
        (self.terms, self.constant)
    }

    /// Append a term in place. Zero coefficients are dropped.
    pub fn push_term(&mut self, var_id: VariableId, coeff: f64) {
        if coeff != 0.0 {
            self.terms.push((var_id, coeff));
        }
    }

    pub fn add_constant(&mut self, value: f64) {
        self.constant += value;
    }

    /// Total coefficient of `var_id`, summing repeated terms.
    pub fn coefficient_of(&self, var_id: VariableId) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| *v == var_id)
            .map(|(_, c)| *c)
            .sum()
    }

    pub fn scale(&self, by: f64) -> Self {
        Self {
            constant: self.constant * by,
            terms: self
                .terms
                .iter()
                .map(|(v, c)| (*v, *c * by))
                .filter(|(_, c)| *c != 0.0)
                .collect(),
        }
    }

    /// Merged terms ordered by variable id, zero sums removed.
    pub fn normalized_terms(&self) -> Vec<(VariableId, f64)> {
        let mut merged: BTreeMap<VariableId, f64> = BTreeMap::new();
        for (var_id, coeff) in &self.terms {
            *merged.entry(*var_id).or_insert(0.0) += *coeff;
        }
        merged.into_iter().filter(|(_, c)| *c != 0.0).collect()
    }

    /// `self <sense> rhs`, with every variable moved left and every constant moved right.
    pub fn compare(&self, sense: ComparisonSense, rhs: &Expr) -> ConstraintExpr {
        let mut lhs = self.clone() - rhs.clone();
        let bound = -lhs.constant;
        lhs.constant = 0.0;
        ConstraintExpr::new(lhs, sense, bound)
    }

    pub fn le_scalar(&self, rhs: f64) -> ConstraintExpr {
        self.compare(ComparisonSense::LessEqual, &Expr::from_constant(rhs))
    }

    pub fn ge_scalar(&self, rhs: f64) -> ConstraintExpr {
        self.compare(ComparisonSense::GreaterEqual, &Expr::from_constant(rhs))
    }

    pub fn eq_scalar(&self, rhs: f64) -> ConstraintExpr {
        self.compare(ComparisonSense::Equal, &Expr::from_constant(rhs))
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(mut self, rhs: Expr) -> Self::Output {
        self.constant += rhs.constant;
        self.terms.extend(rhs.terms);
        self
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Self::Output {
        self + rhs.scale(-1.0)
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

impl std::ops::Mul<f64> for Expr {
    type Output = Expr;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::VariableId;
    use crate::expr::{ComparisonSense, Expr, LinearExprError, from_dense};

    fn x() -> VariableId {
        VariableId::new(0)
    }

    fn y() -> VariableId {
        VariableId::new(1)
    }

    #[test]
    fn zero_term_is_empty() {
        let e = Expr::term(x(), 0.0);
        assert!(e.terms().is_empty());
        assert!(e.is_constant());
    }

    #[test]
    fn coefficient_of_sums_repeats() {
        let e = Expr::term(x(), 2.0) + Expr::term(y(), 4.0) + Expr::term(x(), 0.5);
        assert_eq!(e.coefficient_of(x()), 2.5);
        assert_eq!(e.coefficient_of(VariableId::new(9)), 0.0);
    }

    #[test]
    fn normalized_terms_drops_cancelled_variables() {
        let e = Expr::term(x(), 2.0) - Expr::term(x(), 2.0) + Expr::term(y(), -1.0);
        assert_eq!(e.normalized_terms(), vec![(y(), -1.0)]);
    }

    #[test]
    fn compare_moves_constants_right() {
        // 2x + 3 <= y + 10  ->  2x - y <= 7
        let lhs = Expr::new(vec![(x(), 2.0)], 3.0);
        let rhs = Expr::new(vec![(y(), 1.0)], 10.0);
        let c = lhs.compare(ComparisonSense::LessEqual, &rhs);
        assert_eq!(c.sense(), ComparisonSense::LessEqual);
        assert_eq!(c.rhs(), 7.0);
        assert_eq!(c.expr().constant(), 0.0);
        assert_eq!(c.expr().normalized_terms(), vec![(x(), 2.0), (y(), -1.0)]);
    }

    #[test]
    fn scalar_comparisons() {
        let e = Expr::new(vec![(x(), 1.0)], -4.0);
        assert_eq!(e.ge_scalar(1.0).rhs(), 5.0);
        assert_eq!(e.eq_scalar(0.0).sense(), ComparisonSense::Equal);
    }

    #[test]
    fn negation_scales_constant() {
        let e = -Expr::new(vec![(x(), 3.0)], 2.0);
        assert_eq!(e.constant(), -2.0);
        assert_eq!(e.terms(), &[(x(), -3.0)]);
    }

    #[test]
    fn from_dense_filters_zero_columns() {
        let e = from_dense(&[x(), y()], &[0.0, 8.0]).expect("dense row should build");
        assert_eq!(e.terms(), &[(y(), 8.0)]);
    }

    #[test]
    fn from_dense_rejects_length_mismatch() {
        let err = from_dense(&[x(), y()], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            LinearExprError::MismatchedLengths {
                variables: 2,
                coefficients: 1
            }
        );
    }
}

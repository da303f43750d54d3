//! Builders for expressions coming from dense coefficient rows.

use crate::expr::core::Expr;
use crate::expr::error::LinearExprError;
use crate::ids::VariableId;

/// Zip a dense coefficient row with its column variables.
///
/// Zero coefficients are dropped; lengths must agree.
pub fn from_dense(variables: &[VariableId], coefficients: &[f64]) -> Result<Expr, LinearExprError> {
    if variables.len() != coefficients.len() {
        return Err(LinearExprError::MismatchedLengths {
            variables: variables.len(),
            coefficients: coefficients.len(),
        });
    }
    let terms = variables
        .iter()
        .copied()
        .zip(coefficients.iter().copied())
        .filter(|(_, c)| *c != 0.0)
        .collect();
    Ok(Expr::new(terms, 0.0))
}

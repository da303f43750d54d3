//! Linear expressions for optimization modeling.
//!
//! Two layers live here:
//! - [`expr`]: solver-facing expressions over [`VariableId`]s
//! - [`parse`]: the string layer that turns text such as `"10*x1 - cost*x2"`
//!   into terms and numeric coefficients

pub mod expr;
pub mod ids;
pub mod parse;

pub use expr::{ComparisonSense, ConstraintExpr, Expr, LinearExprError, from_dense};
pub use ids::{ConstraintId, VariableId};
pub use parse::{
    Coefficient, CoefficientResolution, ExtractOptions, LinearExpression, LinearRelation, Sign,
    Term, extract_coefficient, extract_coefficient_with, resolve_coefficient,
};

//! Expression types for optimization modeling.
//!
//! - `core`      : Expr: linear terms + constant
//! - `constraint`: ConstraintExpr: expression with comparison sense and RHS
//! - `builders`  : dense-row construction
//! - `error`     : construction and parsing errors

pub mod builders;
pub mod constraint;
pub mod core;
pub mod error;

pub use builders::from_dense;
pub use constraint::{ComparisonSense, ConstraintExpr};
pub use core::Expr;
pub use error::LinearExprError;

//! Text layer: flat sum-of-products expressions such as `"10*x1 - cost*x2 + 5"`.
//!
//! Grammar, per term: an optional sign, then `factor (* factor)*` where the
//! last factor is the variable and the others are numeric literals or
//! symbolic names. A term made only of numeric factors is a constant.
//! There are no parentheses, no division and no powers.
//!
//! Parsing is lenient by default: segments that do not fit the grammar are
//! skipped (and remembered) rather than rejected, so a coefficient lookup
//! always produces a number.

mod extract;
mod lexer;
mod linear;
mod relation;
mod term;

pub use extract::{
    DEFAULT_SYMBOLIC_COEFFICIENT, ExtractOptions, extract_coefficient, extract_coefficient_with,
    resolve_coefficient,
};
pub use linear::LinearExpression;
pub use relation::LinearRelation;
pub use term::{Coefficient, CoefficientResolution, PendingFactor, Sign, Term};

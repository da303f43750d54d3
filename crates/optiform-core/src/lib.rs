//! Optiform core: named models and text-to-solver translation.
//!
//! A [`ModelSpec`] (the structured output of a modelling stage) is lowered by
//! the [`Translator`] into a [`Model`], which in turn produces the dense
//! [`optiform_solver::SolverRequest`] consumed by external solvers.

pub mod model;
pub mod translate;
pub mod types;

pub use model::{Model, ModelError, Solution};
pub use translate::{
    ConstraintDecl, Diagnostic, DiagnosticKind, Location, ModelSpec, ObjectiveDecl,
    TranslateConfig, TranslateError, Translation, Translator, VariableDecl,
};
pub use types::{Bounds, Constraint, Objective, Sense, Variable, VariableKind};

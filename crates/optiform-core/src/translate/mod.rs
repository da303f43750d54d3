//! Translation of text-based model descriptions into a [`Model`](crate::Model).
//!
//! - [`spec`]: serde shape of the model description
//! - [`config`]: translation options
//! - [`diagnostics`]: non-fatal findings collected while lowering
//! - [`translator`]: the lowering itself

mod config;
mod diagnostics;
mod error;
mod spec;
mod translator;

pub use config::TranslateConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind, Location};
pub use error::TranslateError;
pub use spec::{ConstraintDecl, ModelSpec, ObjectiveDecl, VariableDecl};
pub use translator::{Translation, Translator};

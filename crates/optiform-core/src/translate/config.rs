//! Translation options.

use std::collections::BTreeMap;

use optiform_expr::ExtractOptions;

/// Options for [`Translator`](crate::Translator). Unset fields fall back to
/// the lenient defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslateConfig {
    /// Turn every diagnostic into an error.
    pub strict: Option<bool>,
    /// Declare variables that only appear in expressions.
    pub declare_undeclared: Option<bool>,
    /// Stand-in for symbolic multipliers without a parameter value.
    pub symbolic_default: Option<f64>,
    /// Sum repeated terms of one variable instead of keeping the first.
    pub combine_duplicates: Option<bool>,
    /// Lower bound for variables declared without one.
    pub default_lower_bound: Option<f64>,
}

impl TranslateConfig {
    /// Create a configuration with all lenient defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn diagnostics into errors.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Declare variables that are used but never listed.
    pub fn with_declare_undeclared(mut self, declare: bool) -> Self {
        self.declare_undeclared = Some(declare);
        self
    }

    /// Set the value assumed for unresolved symbolic multipliers.
    pub fn with_symbolic_default(mut self, value: f64) -> Self {
        self.symbolic_default = Some(value);
        self
    }

    /// Sum repeated terms of one variable.
    pub fn with_combine_duplicates(mut self, enabled: bool) -> Self {
        self.combine_duplicates = Some(enabled);
        self
    }

    /// Set the lower bound of variables declared without one.
    pub fn with_default_lower_bound(mut self, value: f64) -> Self {
        self.default_lower_bound = Some(value);
        self
    }

    /// Check if every option is unset.
    pub fn is_empty(&self) -> bool {
        self.strict.is_none()
            && self.declare_undeclared.is_none()
            && self.symbolic_default.is_none()
            && self.combine_duplicates.is_none()
            && self.default_lower_bound.is_none()
    }

    pub fn is_strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }

    pub fn declares_undeclared(&self) -> bool {
        self.declare_undeclared.unwrap_or(true)
    }

    pub fn lower_bound(&self) -> f64 {
        self.default_lower_bound.unwrap_or(0.0)
    }

    /// Extraction options for one model, with its parameter table.
    pub fn extract_options(&self, parameters: &BTreeMap<String, f64>) -> ExtractOptions {
        let mut options = ExtractOptions::new().with_parameters(parameters.clone());
        options.symbolic_default = self.symbolic_default;
        options.combine_duplicates = self.combine_duplicates;
        options
    }
}

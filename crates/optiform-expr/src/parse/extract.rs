//! Coefficient extraction from expression text.

use std::collections::BTreeMap;

use crate::parse::linear::LinearExpression;
use crate::parse::term::CoefficientResolution;

/// Value used for a symbolic multiplier with no known parameter.
pub const DEFAULT_SYMBOLIC_COEFFICIENT: f64 = 1.0;

/// Options for coefficient lookups.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Stand-in for unresolved symbolic multipliers. `None` uses
    /// [`DEFAULT_SYMBOLIC_COEFFICIENT`].
    pub symbolic_default: Option<f64>,
    /// Sum every term naming the variable. `None` means first match wins.
    pub combine_duplicates: Option<bool>,
    /// Known values for symbolic multipliers such as `cost`.
    pub parameters: BTreeMap<String, f64>,
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbolic_default(mut self, value: f64) -> Self {
        self.symbolic_default = Some(value);
        self
    }

    pub fn with_combine_duplicates(mut self, enabled: bool) -> Self {
        self.combine_duplicates = Some(enabled);
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn with_parameters(mut self, parameters: BTreeMap<String, f64>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn symbolic_fallback(&self) -> f64 {
        self.symbolic_default
            .unwrap_or(DEFAULT_SYMBOLIC_COEFFICIENT)
    }

    pub fn sums_duplicates(&self) -> bool {
        self.combine_duplicates.unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.symbolic_default.is_none()
            && self.combine_duplicates.is_none()
            && self.parameters.is_empty()
    }
}

/// Numeric coefficient of `variable` in `expression`.
///
/// Absent variables give `0.0`, bare variables `1.0`, and symbolic
/// multipliers the signed [`DEFAULT_SYMBOLIC_COEFFICIENT`]. Malformed
/// segments are ignored. `variable` is matched exactly, without trimming.
///
/// ```
/// use optiform_expr::extract_coefficient;
///
/// assert_eq!(extract_coefficient("10*x1 + 8*x2", "x2"), 8.0);
/// assert_eq!(extract_coefficient("-5*x1 + 3*x2", "x1"), -5.0);
/// assert_eq!(extract_coefficient("10*x1 + 8*x2", "x3"), 0.0);
/// ```
pub fn extract_coefficient(expression: &str, variable: &str) -> f64 {
    extract_coefficient_with(expression, variable, &ExtractOptions::default())
}

pub fn extract_coefficient_with(expression: &str, variable: &str, options: &ExtractOptions) -> f64 {
    resolve_coefficient(expression, variable, options).value(options.symbolic_fallback())
}

/// Like [`extract_coefficient_with`] but keeps unresolved symbols visible to the caller.
pub fn resolve_coefficient(
    expression: &str,
    variable: &str,
    options: &ExtractOptions,
) -> CoefficientResolution {
    LinearExpression::parse(expression).coefficient(variable, options)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn explicit_literal_coefficients() {
        assert_eq!(extract_coefficient("10*x1 + 8*x2", "x1"), 10.0);
        assert_eq!(extract_coefficient("10*x1 + 8*x2", "x2"), 8.0);
    }

    #[test]
    fn bare_variables_default_to_one() {
        assert_eq!(extract_coefficient("x1 + x2", "x1"), 1.0);
        assert_eq!(extract_coefficient("x1 - x2", "x2"), -1.0);
    }

    #[test]
    fn sign_comes_from_leading_operator() {
        assert_eq!(extract_coefficient("-5*x1 + 3*x2", "x1"), -5.0);
        assert_eq!(extract_coefficient("-5*x1 + 3*x2", "x2"), 3.0);
    }

    #[test]
    fn symbolic_multiplier_falls_back_to_one() {
        assert_eq!(extract_coefficient("cost*x1 + revenue*x2", "x1"), 1.0);
        assert_eq!(extract_coefficient("cost*x1 - revenue*x2", "x2"), -1.0);
    }

    #[test]
    fn absent_variable_is_zero() {
        assert_eq!(extract_coefficient("10*x1 + 8*x2", "x3"), 0.0);
        assert_eq!(extract_coefficient("", "x1"), 0.0);
    }

    #[test]
    fn repeated_calls_agree() {
        let first = extract_coefficient("4.5*y - 2*z", "z");
        let second = extract_coefficient("4.5*y - 2*z", "z");
        assert_eq!(first, second);
        assert_eq!(first, -2.0);
    }

    #[test]
    fn whitespace_around_factors_is_ignored() {
        assert_eq!(extract_coefficient("  10 *  x1+8*x2 ", "x1"), 10.0);
    }

    #[test]
    fn variable_must_match_exactly() {
        assert_eq!(extract_coefficient("10*x10 + 3*x1", "x1"), 3.0);
        assert_eq!(extract_coefficient("10*x1", " x1"), 0.0);
    }

    #[test]
    fn malformed_terms_contribute_zero() {
        assert_eq!(extract_coefficient("10*x1 + 8*", "x1"), 10.0);
        assert_eq!(extract_coefficient("(2*x1) + 3*x2", "x1"), 0.0);
        assert_eq!(extract_coefficient("x1*x2 + 2*x3", "x1"), 0.0);
    }

    #[test]
    fn dangling_exponent_leaves_neighbours_intact() {
        assert_eq!(extract_coefficient("5e + x2", "x2"), 1.0);
        assert_eq!(extract_coefficient("10*x1 + 3*2e - x2", "x2"), -1.0);
        assert_eq!(extract_coefficient("10*x1 + 3*2e - x2", "x1"), 10.0);
    }

    #[test]
    fn scientific_literals() {
        assert_eq!(extract_coefficient("1.5e-3*x1 + x2", "x1"), 1.5e-3);
    }

    #[test]
    fn parameters_replace_symbols() {
        let options = ExtractOptions::new()
            .with_parameter("cost", 12.5)
            .with_symbolic_default(0.0);
        assert_eq!(
            extract_coefficient_with("cost*x1 + revenue*x2", "x1", &options),
            12.5
        );
        assert_eq!(
            extract_coefficient_with("cost*x1 + revenue*x2", "x2", &options),
            0.0
        );
    }

    #[test]
    fn resolve_reports_unknown_symbols() {
        let resolution = resolve_coefficient("cost*x1", "x1", &ExtractOptions::new());
        assert!(!resolution.is_resolved());
        assert_eq!(resolution.unresolved_symbols(), vec!["cost"]);
        assert_eq!(resolution.value(DEFAULT_SYMBOLIC_COEFFICIENT), 1.0);
    }

    #[test]
    fn options_builder() {
        assert!(ExtractOptions::new().is_empty());
        let options = ExtractOptions::new().with_combine_duplicates(true);
        assert!(!options.is_empty());
        assert!(options.sums_duplicates());
        assert_eq!(options.symbolic_fallback(), 1.0);
    }
}

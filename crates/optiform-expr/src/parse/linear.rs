//! Parsed linear expression.

use crate::expr::LinearExprError;
use crate::parse::extract::ExtractOptions;
use crate::parse::lexer::split_signed;
use crate::parse::term::{CoefficientResolution, Sign, Term};

/// Ordered terms of a flat expression plus the segments that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpression {
    terms: Vec<Term>,
    skipped: Vec<String>,
}

impl LinearExpression {
    /// Lenient parse. Never fails; malformed segments end up in [`skipped`](Self::skipped).
    pub fn parse(input: &str) -> Self {
        let mut parsed = Self::default();
        for segment in split_signed(input) {
            match Term::parse(segment.sign, segment.text) {
                Some(term) => parsed.terms.push(term),
                None => parsed.skipped.push(display_segment(segment.sign, segment.text)),
            }
        }
        parsed
    }

    /// Parse, rejecting empty input and the first malformed segment.
    pub fn parse_strict(input: &str) -> Result<Self, LinearExprError> {
        let parsed = Self::parse(input);
        if let Some(term) = parsed.skipped.first() {
            return Err(LinearExprError::MalformedTerm { term: term.clone() });
        }
        if parsed.terms.is_empty() {
            return Err(LinearExprError::EmptyExpression);
        }
        Ok(parsed)
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Segments that did not fit the grammar, in input order.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Distinct variable names in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.terms.iter().filter_map(Term::variable) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Sum of the constant terms.
    pub fn constant(&self) -> f64 {
        self.terms
            .iter()
            .filter(|term| term.is_constant())
            .map(|term| term.resolve(&Default::default()).value(0.0))
            .sum()
    }

    /// Coefficient of `variable`.
    ///
    /// The first matching term wins unless the options ask for duplicates to be summed.
    pub fn coefficient(&self, variable: &str, options: &ExtractOptions) -> CoefficientResolution {
        let mut matches = self
            .terms
            .iter()
            .filter(|term| term.variable() == Some(variable))
            .map(|term| term.resolve(&options.parameters));

        if !options.sums_duplicates() {
            return matches.next().unwrap_or(CoefficientResolution::Absent);
        }
        matches.fold(CoefficientResolution::Absent, CoefficientResolution::merge)
    }
}

fn display_segment(sign: Sign, text: &str) -> String {
    match (sign, text.is_empty()) {
        (Sign::Plus, true) => "+".to_string(),
        (Sign::Minus, true) => "-".to_string(),
        (Sign::Plus, false) => text.to_string(),
        (Sign::Minus, false) => format!("-{text}"),
    }
}

//! Terms and coefficient resolution.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn combine(self, other: Sign) -> Sign {
        if self == other { Sign::Plus } else { Sign::Minus }
    }

    pub fn apply(self, value: f64) -> f64 {
        match self {
            Sign::Plus => value,
            Sign::Minus => -value,
        }
    }
}

/// Multiplier written in front of a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Coefficient {
    /// Bare variable, as in `x1`.
    Implicit,
    /// Product of numeric factors, as in `10*x1` or `2*0.5*x1`.
    Literal(f64),
    /// At least one named factor, as in `cost*x1` or `2*cost*x1`.
    Symbolic { scale: f64, symbols: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    sign: Sign,
    coefficient: Coefficient,
    variable: Option<String>,
}

impl Term {
    /// Parse one unsigned segment. Returns `None` when it does not fit the grammar.
    pub(crate) fn parse(sign: Sign, text: &str) -> Option<Self> {
        let factors: Vec<&str> = text.split('*').map(str::trim).collect();
        if factors.iter().any(|factor| factor.is_empty()) {
            return None;
        }
        let (last, leading) = factors.split_last()?;

        if let Some(value) = numeric_literal(last) {
            let mut product = value;
            for factor in leading {
                product *= numeric_literal(factor)?;
            }
            return product.is_finite().then(|| Term {
                sign,
                coefficient: Coefficient::Literal(product),
                variable: None,
            });
        }

        if !is_identifier(last) {
            return None;
        }

        let mut scale = 1.0;
        let mut explicit = false;
        let mut symbols = Vec::new();
        for factor in leading {
            if let Some(value) = numeric_literal(factor) {
                scale *= value;
                explicit = true;
            } else if is_identifier(factor) {
                symbols.push((*factor).to_string());
            } else {
                return None;
            }
        }
        if !scale.is_finite() {
            return None;
        }

        let coefficient = if !symbols.is_empty() {
            Coefficient::Symbolic { scale, symbols }
        } else if explicit {
            Coefficient::Literal(scale)
        } else {
            Coefficient::Implicit
        };

        Some(Term {
            sign,
            coefficient,
            variable: Some((*last).to_string()),
        })
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn coefficient(&self) -> &Coefficient {
        &self.coefficient
    }

    /// Variable name, or `None` for a constant term.
    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    pub fn is_constant(&self) -> bool {
        self.variable.is_none()
    }

    /// Signed numeric multiplier, substituting known `parameters` for symbols.
    pub fn resolve(&self, parameters: &BTreeMap<String, f64>) -> CoefficientResolution {
        match &self.coefficient {
            Coefficient::Implicit => CoefficientResolution::Resolved(self.sign.apply(1.0)),
            Coefficient::Literal(value) => CoefficientResolution::Resolved(self.sign.apply(*value)),
            Coefficient::Symbolic { scale, symbols } => {
                let mut factor = self.sign.apply(*scale);
                let mut missing = Vec::new();
                for symbol in symbols {
                    match parameters.get(symbol) {
                        Some(value) => factor *= value,
                        None => missing.push(symbol.clone()),
                    }
                }
                if missing.is_empty() {
                    CoefficientResolution::Resolved(factor)
                } else {
                    CoefficientResolution::Unresolved {
                        known: 0.0,
                        pending: vec![PendingFactor {
                            factor,
                            symbols: missing,
                        }],
                    }
                }
            }
        }
    }
}

/// Part of a coefficient still waiting on named parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFactor {
    /// Signed product of every numeric and resolved factor.
    pub factor: f64,
    pub symbols: Vec<String>,
}

/// Outcome of looking a variable up in an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum CoefficientResolution {
    /// Variable does not appear.
    Absent,
    Resolved(f64),
    /// At least one matching term has a symbolic multiplier with no known value.
    Unresolved {
        known: f64,
        pending: Vec<PendingFactor>,
    },
}

impl CoefficientResolution {
    /// Collapse to a number. Each pending symbol product is replaced by `symbolic_default`.
    pub fn value(&self, symbolic_default: f64) -> f64 {
        match self {
            CoefficientResolution::Absent => 0.0,
            CoefficientResolution::Resolved(value) => *value,
            CoefficientResolution::Unresolved { known, pending } => {
                known
                    + pending
                        .iter()
                        .map(|part| part.factor * symbolic_default)
                        .sum::<f64>()
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, CoefficientResolution::Unresolved { .. })
    }

    pub fn unresolved_symbols(&self) -> Vec<&str> {
        match self {
            CoefficientResolution::Unresolved { pending, .. } => pending
                .iter()
                .flat_map(|part| part.symbols.iter().map(String::as_str))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Sum of two lookups for the same variable.
    pub(crate) fn merge(self, other: CoefficientResolution) -> CoefficientResolution {
        use CoefficientResolution::{Absent, Resolved, Unresolved};
        match (self, other) {
            (Absent, other) | (other, Absent) => other,
            (Resolved(a), Resolved(b)) => Resolved(a + b),
            (Resolved(a), Unresolved { known, pending })
            | (Unresolved { known, pending }, Resolved(a)) => Unresolved {
                known: known + a,
                pending,
            },
            (
                Unresolved {
                    known: a,
                    pending: mut left,
                },
                Unresolved {
                    known: b,
                    pending: right,
                },
            ) => {
                left.extend(right);
                Unresolved {
                    known: a + b,
                    pending: left,
                }
            }
        }
    }
}

/// Numeric literal: starts with a digit or `.` and parses to a finite `f64`.
///
/// Rejects names like `inf` and `nan` that `f64::from_str` would accept.
pub(crate) fn numeric_literal(text: &str) -> Option<f64> {
    let first = text.chars().next()?;
    if !(first.is_ascii_digit() || first == '.') {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if first.is_ascii_digit() || first == '.' || !is_identifier_char(first) {
        return false;
    }
    chars.all(is_identifier_char)
}

fn is_identifier_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, '+' | '-' | '*' | '/' | '^' | '(' | ')' | '=' | '<' | '>')
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<Term> {
        Term::parse(Sign::Plus, text)
    }

    #[test]
    fn bare_variable_is_implicit() {
        let term = parse("x1").expect("term");
        assert_eq!(term.variable(), Some("x1"));
        assert_eq!(term.coefficient(), &Coefficient::Implicit);
    }

    #[test]
    fn numeric_factors_multiply() {
        let term = parse("2 * 0.5 * x_2").expect("term");
        assert_eq!(term.coefficient(), &Coefficient::Literal(1.0));
        assert_eq!(term.variable(), Some("x_2"));
    }

    #[test]
    fn mixed_factors_keep_symbols() {
        let term = parse("3*cost*x1").expect("term");
        assert_eq!(
            term.coefficient(),
            &Coefficient::Symbolic {
                scale: 3.0,
                symbols: vec!["cost".to_string()]
            }
        );
    }

    #[test]
    fn numeric_only_segment_is_constant() {
        let term = parse("4*25").expect("term");
        assert!(term.is_constant());
        assert_eq!(term.coefficient(), &Coefficient::Literal(100.0));
    }

    #[test]
    fn malformed_segments_are_rejected() {
        for text in ["*x1", "10*", "x1*10", "10 x1", "x**2", "(x1)", "x/2", "1e400*x"] {
            assert!(parse(text).is_none(), "{text} should not parse");
        }
    }

    #[test]
    fn inf_and_nan_are_names_not_numbers() {
        assert_eq!(numeric_literal("inf"), None);
        assert_eq!(numeric_literal("nan"), None);
        assert!(is_identifier("inf"));
        assert_eq!(numeric_literal(".5"), Some(0.5));
    }

    #[test]
    fn resolve_substitutes_parameters() {
        let term = Term::parse(Sign::Minus, "2*cost*x1").expect("term");
        let mut params = BTreeMap::new();
        assert!(!term.resolve(&params).is_resolved());

        params.insert("cost".to_string(), 4.0);
        assert_eq!(
            term.resolve(&params),
            CoefficientResolution::Resolved(-8.0)
        );
    }

    #[test]
    fn unresolved_value_uses_default_for_symbol_product() {
        let term = Term::parse(Sign::Minus, "2*cost*x1").expect("term");
        let resolution = term.resolve(&BTreeMap::new());
        assert_eq!(resolution.value(1.0), -2.0);
        assert_eq!(resolution.value(0.0), 0.0);
        assert_eq!(resolution.unresolved_symbols(), vec!["cost"]);
    }

    #[test]
    fn merge_accumulates_known_and_pending() {
        let merged = CoefficientResolution::Resolved(3.0)
            .merge(CoefficientResolution::Absent)
            .merge(CoefficientResolution::Unresolved {
                known: 0.0,
                pending: vec![PendingFactor {
                    factor: 2.0,
                    symbols: vec!["rate".to_string()],
                }],
            });
        assert_eq!(merged.value(1.0), 5.0);
        assert!(!merged.is_resolved());
    }
}

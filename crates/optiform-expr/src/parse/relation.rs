//! Relations such as `10*x1 + 8*x2 <= 100`.

use crate::expr::{ComparisonSense, LinearExprError};
use crate::parse::linear::LinearExpression;

#[derive(Debug, Clone, PartialEq)]
pub struct LinearRelation {
    lhs: LinearExpression,
    sense: ComparisonSense,
    rhs: LinearExpression,
}

impl LinearRelation {
    /// Split on the single comparison operator and parse both sides leniently.
    pub fn parse(input: &str) -> Result<Self, LinearExprError> {
        let operators = find_operators(input);
        let (start, end, sense) = match operators.as_slice() {
            [] => {
                return Err(LinearExprError::MissingComparison {
                    input: input.to_string(),
                });
            }
            [single] => *single,
            _ => {
                return Err(LinearExprError::MultipleComparisons {
                    input: input.to_string(),
                });
            }
        };
        Ok(Self {
            lhs: LinearExpression::parse(&input[..start]),
            sense,
            rhs: LinearExpression::parse(&input[end..]),
        })
    }

    pub fn lhs(&self) -> &LinearExpression {
        &self.lhs
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    pub fn rhs(&self) -> &LinearExpression {
        &self.rhs
    }

    pub fn into_parts(self) -> (LinearExpression, ComparisonSense, LinearExpression) {
        (self.lhs, self.sense, self.rhs)
    }
}

/// Byte ranges and senses of every comparison operator in `input`.
fn find_operators(input: &str) -> Vec<(usize, usize, ComparisonSense)> {
    let mut found = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if !matches!(ch, '<' | '>' | '=' | '≤' | '≥') {
            continue;
        }
        let mut end = idx + ch.len_utf8();
        if matches!(ch, '<' | '>' | '=') {
            if let Some(&(next_idx, '=')) = chars.peek() {
                end = next_idx + 1;
                chars.next();
            }
        }
        if let Some(sense) = ComparisonSense::from_operator(&input[idx..end]) {
            found.push((idx, end, sense));
        }
    }
    found
}

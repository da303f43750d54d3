//! Expression construction and parsing errors.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinearExprError {
    /// Dense row inputs of different lengths.
    MismatchedLengths { variables: usize, coefficients: usize },
    /// Input contained no terms at all.
    EmptyExpression,
    /// A segment that is not `[coefficient *]... variable` or a numeric constant.
    MalformedTerm { term: String },
    /// A symbolic multiplier that no parameter resolves.
    UnresolvedCoefficient {
        variable: String,
        symbols: Vec<String>,
    },
    /// Relation text without a comparison operator.
    MissingComparison { input: String },
    /// Relation text with more than one comparison operator.
    MultipleComparisons { input: String },
}

impl LinearExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LinearExprError::MismatchedLengths { .. } => "EXPR_MISMATCHED_LENGTHS",
            LinearExprError::EmptyExpression => "EXPR_EMPTY",
            LinearExprError::MalformedTerm { .. } => "EXPR_MALFORMED_TERM",
            LinearExprError::UnresolvedCoefficient { .. } => "EXPR_UNRESOLVED_COEFFICIENT",
            LinearExprError::MissingComparison { .. } => "RELATION_MISSING_COMPARISON",
            LinearExprError::MultipleComparisons { .. } => "RELATION_MULTIPLE_COMPARISONS",
        }
    }
}

impl std::fmt::Display for LinearExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinearExprError::MismatchedLengths {
                variables,
                coefficients,
            } => write!(
                f,
                "[{}] {} variables but {} coefficients",
                self.code(),
                variables,
                coefficients
            ),
            LinearExprError::EmptyExpression => {
                write!(f, "[{}] Expression has no terms", self.code())
            }
            LinearExprError::MalformedTerm { term } => {
                write!(f, "[{}] Cannot parse term '{}'", self.code(), term)
            }
            LinearExprError::UnresolvedCoefficient { variable, symbols } => write!(
                f,
                "[{}] Coefficient of '{}' depends on unknown parameter(s) {}",
                self.code(),
                variable,
                symbols.join(", ")
            ),
            LinearExprError::MissingComparison { input } => write!(
                f,
                "[{}] No comparison operator in '{}'",
                self.code(),
                input
            ),
            LinearExprError::MultipleComparisons { input } => write!(
                f,
                "[{}] More than one comparison operator in '{}'",
                self.code(),
                input
            ),
        }
    }
}

impl std::error::Error for LinearExprError {}

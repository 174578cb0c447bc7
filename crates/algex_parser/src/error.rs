use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error at position {position}: expected {expected}")]
    Syntax { position: usize, expected: String },
    /// `\frac` whose denominator literal is zero, negative, or not an integer
    #[error("invalid denominator at position {position}")]
    InvalidDenominator { position: usize },
    #[error("expression nested deeper than {limit} levels")]
    TooComplex { limit: usize },
}

impl ParseError {
    pub(crate) fn syntax(position: usize, expected: impl Into<String>) -> Self {
        ParseError::Syntax {
            position,
            expected: expected.into(),
        }
    }
}

//! Error types for algex_ast crate.

use thiserror::Error;

/// Errors raised by exact rational arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RationalError {
    #[error("division by zero")]
    DivisionByZero,

    /// A fraction was built with a zero denominator
    #[error("invalid denominator")]
    InvalidDenominator,

    /// Decimal text that is not `[-]digits[.digits]`
    #[error("malformed decimal literal '{0}'")]
    Malformed(String),
}

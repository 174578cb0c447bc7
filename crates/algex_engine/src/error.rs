use algex_ast::RationalError;
use algex_parser::ParseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Every failure surfaced to callers of the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("syntax error at position {position}: expected {expected}")]
    Syntax { position: usize, expected: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid denominator")]
    InvalidDenominator,
    #[error("division by a non-constant expression is not supported")]
    UnsupportedDivision,
    #[error("negative exponents are only supported on constants")]
    UnsupportedNegativeExponent,
    #[error("square root has no exact rational value")]
    UnsupportedRadical,
    #[error("'{0}' cannot be factorized into primes")]
    NotFactorable(String),
    #[error("unrecognized problem type")]
    UnrecognizedProblemType,
    #[error("input too complex: {0}")]
    InputTooComplex(String),
    #[error("{operation} does not apply to this expression")]
    NotApplicable { operation: &'static str },
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
}

impl From<ParseError> for EngineError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Syntax { position, expected } => EngineError::Syntax { position, expected },
            ParseError::InvalidDenominator { .. } => EngineError::InvalidDenominator,
            ParseError::TooComplex { limit } => {
                EngineError::InputTooComplex(format!("nested deeper than {limit} levels"))
            }
        }
    }
}

impl From<RationalError> for EngineError {
    fn from(err: RationalError) -> Self {
        match err {
            RationalError::DivisionByZero => EngineError::DivisionByZero,
            RationalError::InvalidDenominator => EngineError::InvalidDenominator,
            RationalError::Malformed(_) => EngineError::Syntax {
                position: 0,
                expected: "decimal number".to_string(),
            },
        }
    }
}

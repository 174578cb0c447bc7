pub mod error;
pub mod latex_parser;

pub use error::ParseError;
pub use latex_parser::{
    literal_fraction, parse_latex, parse_latex_with_limit, tokenize, Spanned, Token,
    DEFAULT_MAX_DEPTH,
};

//! Transformation library: every entry takes surface syntax and returns
//! surface syntax (or a typed failure).

pub mod decimal;
pub mod factorize;
pub mod indices;
pub mod number_calc;

use algex_ast::{Expr, Rational};
use algex_parser::{literal_fraction, parse_latex_with_limit};

use crate::error::Result;
use crate::flatten::{collect_raw_terms, flatten};
use crate::options::EngineOptions;
use crate::polynomial::{combine_like_terms, Polynomial};
use crate::render::render;

pub use decimal::{convert_decimal, DecimalConversion};
pub use factorize::{prime_factorize, prime_factors};
pub use indices::{simplify_indices, simplify_one_term};
pub use number_calc::number_calculate;

pub(crate) fn parse(input: &str, options: &EngineOptions) -> Result<Expr> {
    Ok(parse_latex_with_limit(input, options.max_depth)?)
}

/// Parse and flatten in one step.
pub fn to_polynomial(input: &str, options: &EngineOptions) -> Result<Polynomial> {
    flatten(&parse(input, options)?, options)
}

/// Combine like terms of the top-level sum: `3x+2y-x+5y` -> `2x+7y`.
pub fn combine(input: &str, options: &EngineOptions) -> Result<String> {
    let tree = parse(input, options)?;
    let terms = collect_raw_terms(&tree, options)?;
    Ok(render(&combine_like_terms(terms)))
}

/// Remove all brackets: `2x(x+3)` -> `2x^{2}+6x`.
pub fn expand(input: &str, options: &EngineOptions) -> Result<String> {
    Ok(render(&to_polynomial(input, options)?))
}

/// Reduce a single `\frac{n}{d}`, or every fractional coefficient of a polynomial.
pub fn reduce_fraction(input: &str, options: &EngineOptions) -> Result<String> {
    if let Some((n, d)) = literal_fraction(input) {
        return Ok(Rational::new(n, d)?.to_latex());
    }
    expand(input, options)
}

/// Stable expected form used to compare answers.
pub fn normalize(input: &str, options: &EngineOptions) -> Result<String> {
    let poly = to_polynomial(input, options)?;
    debug_assert!(poly.is_canonical());
    Ok(render(&poly))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn opts() -> EngineOptions {
        EngineOptions::default()
    }

    #[test]
    fn test_combine() {
        assert_eq!(combine("3x+2y-x+5y", &opts()).unwrap(), "2x+7y");
        assert_eq!(combine("x^{2}+3-x^{2}", &opts()).unwrap(), "3");
        assert_eq!(combine("2a-2a", &opts()).unwrap(), "0");
    }

    #[test]
    fn test_expand() {
        assert_eq!(expand("2x(x+3)", &opts()).unwrap(), "2x^{2}+6x");
        assert_eq!(expand("(x+2)(x-3)", &opts()).unwrap(), "x^{2}-x-6");
        assert_eq!(
            expand("3(2(a+1)-a)", &opts()).unwrap(),
            "3a+6"
        );
    }

    #[test]
    fn test_expand_syntax_error() {
        assert!(matches!(
            expand("2x(x+3", &opts()),
            Err(EngineError::Syntax { position: 6, .. })
        ));
    }

    #[test]
    fn test_reduce_fraction() {
        assert_eq!(reduce_fraction("\\frac{12}{18}", &opts()).unwrap(), "\\frac{2}{3}");
        assert_eq!(reduce_fraction("\\frac{18}{6}", &opts()).unwrap(), "3");
        assert_eq!(
            reduce_fraction("\\frac{2}{4}x+\\frac{6}{9}", &opts()).unwrap(),
            "\\frac{1}{2}x+\\frac{2}{3}"
        );
        assert_eq!(
            reduce_fraction("\\frac{3}{0}", &opts()),
            Err(EngineError::InvalidDenominator)
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("1x + 0y - 1", &opts()).unwrap(), "x-1");
        assert_eq!(normalize("b a + a b", &opts()).unwrap(), "2ab");
        assert_eq!(normalize("y + x^{2} + x", &opts()).unwrap(), "x^{2}+x+y");
    }
}

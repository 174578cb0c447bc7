//! Expression tree -> canonical polynomial, by distributivity.

use algex_ast::{BinOp, Expr};

use crate::error::{EngineError, Result};
use crate::options::EngineOptions;
use crate::polynomial::{Polynomial, Term};

pub fn flatten(expr: &Expr, options: &EngineOptions) -> Result<Polynomial> {
    match expr {
        Expr::Number(r) => Ok(Polynomial::constant(r.clone())),
        Expr::Variable(name) => Ok(Polynomial::variable(name)),
        Expr::Group(inner) => flatten(inner, options),
        Expr::Negate(inner) => Ok(flatten(inner, options)?.neg()),
        Expr::Binary(op, l, r) => {
            let left = flatten(l, options)?;
            let right = flatten(r, options)?;
            match op {
                BinOp::Add => Ok(left.add(&right)),
                BinOp::Sub => Ok(left.sub(&right)),
                BinOp::Mul => left.mul(&right, &options.poly_budget()),
                BinOp::Div => divide(&left, &right),
            }
        }
        Expr::Power(base, exp) => power(&flatten(base, options)?, *exp, options),
        Expr::Sqrt(inner) => {
            let radicand = flatten(inner, options)?;
            radicand
                .as_constant()
                .and_then(|c| c.sqrt_exact())
                .map(Polynomial::constant)
                .ok_or(EngineError::UnsupportedRadical)
        }
    }
}

/// Polynomial long division is out of scope: the divisor must be a constant.
fn divide(left: &Polynomial, right: &Polynomial) -> Result<Polynomial> {
    match right.as_constant() {
        Some(c) if c.is_zero() => Err(EngineError::DivisionByZero),
        Some(c) => Ok(left.scale(&c.recip()?)),
        None => Err(EngineError::UnsupportedDivision),
    }
}

fn power(base: &Polynomial, exp: i64, options: &EngineOptions) -> Result<Polynomial> {
    if exp.unsigned_abs() > u64::from(options.max_power_exponent) {
        tracing::warn!(exp, max = options.max_power_exponent, "exponent exceeds budget");
        return Err(EngineError::InputTooComplex(format!("exponent {exp}")));
    }
    if exp >= 0 {
        // bounded by max_power_exponent above
        return base.pow(exp as u32, &options.poly_budget());
    }
    match base.as_constant() {
        Some(c) => {
            let e = i32::try_from(exp)
                .map_err(|_| EngineError::InputTooComplex(format!("exponent {exp}")))?;
            let value = Polynomial::constant(c.pow(e)?);
            value.check_coefficients(&options.poly_budget())?;
            Ok(value)
        }
        None => Err(EngineError::UnsupportedNegativeExponent),
    }
}

/// Terms of the top-level sum before like terms are combined. Sums and
/// differences are opened; every other node contributes its flattened terms.
pub fn collect_raw_terms(expr: &Expr, options: &EngineOptions) -> Result<Vec<Term>> {
    let mut out = Vec::new();
    collect_into(expr, false, options, &mut out)?;
    Ok(out)
}

fn collect_into(
    expr: &Expr,
    negate: bool,
    options: &EngineOptions,
    out: &mut Vec<Term>,
) -> Result<()> {
    match expr {
        Expr::Group(inner) => collect_into(inner, negate, options, out),
        Expr::Negate(inner) => collect_into(inner, !negate, options, out),
        Expr::Binary(BinOp::Add, l, r) => {
            collect_into(l, negate, options, out)?;
            collect_into(r, negate, options, out)
        }
        Expr::Binary(BinOp::Sub, l, r) => {
            collect_into(l, negate, options, out)?;
            collect_into(r, !negate, options, out)
        }
        other => {
            let poly = flatten(other, options)?;
            out.extend(
                poly.terms()
                    .iter()
                    .map(|t| if negate { t.neg() } else { t.clone() }),
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use algex_parser::parse_latex;

    fn expand(input: &str) -> Result<String> {
        let tree = parse_latex(input).unwrap();
        Ok(render(&flatten(&tree, &EngineOptions::default())?))
    }

    #[test]
    fn test_flatten_distributes() {
        assert_eq!(expand("2x(x+3)").unwrap(), "2x^{2}+6x");
        assert_eq!(expand("(a+b)(a-b)").unwrap(), "a^{2}-b^{2}");
        assert_eq!(expand("(x+1)^{2}").unwrap(), "x^{2}+2x+1");
    }

    #[test]
    fn test_flatten_negate_and_subtract() {
        assert_eq!(expand("-(x-2y)").unwrap(), "-x+2y");
        assert_eq!(expand("x-(x+1)").unwrap(), "-1");
    }

    #[test]
    fn test_flatten_division_by_constant() {
        assert_eq!(expand("(4x+2)\\div2").unwrap(), "2x+1");
        assert_eq!(expand("\\frac{x}{3}").unwrap(), "\\frac{1}{3}x");
        assert_eq!(expand("\\frac{6x}{4}").unwrap(), "\\frac{3}{2}x");
    }

    #[test]
    fn test_flatten_division_errors() {
        assert_eq!(expand("x\\div(2-2)"), Err(EngineError::DivisionByZero));
        assert_eq!(expand("1\\div x"), Err(EngineError::UnsupportedDivision));
    }

    #[test]
    fn test_flatten_powers() {
        assert_eq!(expand("(x+y)^{0}").unwrap(), "1");
        assert_eq!(expand("2^{-2}").unwrap(), "\\frac{1}{4}");
        assert_eq!(
            expand("(x+1)^{-1}"),
            Err(EngineError::UnsupportedNegativeExponent)
        );
        assert_eq!(expand("x^{-1}"), Err(EngineError::UnsupportedNegativeExponent));
        assert_eq!(expand("0^{-1}"), Err(EngineError::DivisionByZero));
        assert!(matches!(
            expand("(x+1)^{100}"),
            Err(EngineError::InputTooComplex(_))
        ));
    }

    #[test]
    fn test_flatten_nested_powers_stay_bounded() {
        assert_eq!(expand("((x^{2})^{3})^{4}").unwrap(), "x^{24}");
        assert!(matches!(
            expand("(((x^{32})^{32})^{32})"),
            Err(EngineError::InputTooComplex(_))
        ));
        assert!(matches!(
            expand("(((2^{32})^{32})^{32})"),
            Err(EngineError::InputTooComplex(_))
        ));
        assert!(matches!(
            expand("(((2^{32})^{32})^{32})^{-1}"),
            Err(EngineError::InputTooComplex(_))
        ));
    }

    #[test]
    fn test_flatten_sqrt() {
        assert_eq!(expand("\\sqrt{\\frac{9}{4}}x").unwrap(), "\\frac{3}{2}x");
        assert_eq!(expand("\\sqrt{2}"), Err(EngineError::UnsupportedRadical));
    }

    #[test]
    fn test_collect_raw_terms_keeps_duplicates() {
        let tree = parse_latex("3x+2y-x+5y").unwrap();
        let raw = collect_raw_terms(&tree, &EngineOptions::default()).unwrap();
        assert_eq!(raw.len(), 4);
        assert_eq!(raw[2].coefficient, algex_ast::Rational::from(-1));
    }
}

//! Index laws over a single product/quotient chain.
//!
//! Exponents are summed across `×`, subtracted across `÷`, and multiplied
//! through powers of groups. `simplify_indices` folds numeric factors into a
//! coefficient; `simplify_one_term` keeps integer bases (`2^{3}\times2^{2}` ->
//! `2^{5}`) and accepts `\sqrt{}` as the exponent 1/2.

use std::collections::BTreeMap;

use algex_ast::{BinOp, Expr, Rational};
use num_bigint::BigInt;
use num_traits::One;

use crate::error::{EngineError, Result};
use crate::options::EngineOptions;
use crate::transform::parse;

const SIMPLIFY_INDICES: &str = "simplify-indices";
const SIMPLIFY_ONE_TERM: &str = "simplify-one-term";

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Base {
    Integer(BigInt),
    Variable(String),
}

impl Base {
    fn to_latex(&self) -> String {
        match self {
            Base::Integer(n) => n.to_string(),
            Base::Variable(v) => v.clone(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Numbers fold into the coefficient
    Coefficient,
    /// Integers above 1 are bases; square roots allowed
    OneTerm,
}

impl Mode {
    fn operation(self) -> &'static str {
        match self {
            Mode::Coefficient => SIMPLIFY_INDICES,
            Mode::OneTerm => SIMPLIFY_ONE_TERM,
        }
    }
}

struct IndexChain<'o> {
    mode: Mode,
    options: &'o EngineOptions,
    coefficient: Rational,
    exponents: BTreeMap<Base, Rational>,
}

impl<'o> IndexChain<'o> {
    fn new(mode: Mode, options: &'o EngineOptions) -> Self {
        Self {
            mode,
            options,
            coefficient: Rational::one(),
            exponents: BTreeMap::new(),
        }
    }

    fn not_applicable(&self) -> EngineError {
        EngineError::NotApplicable {
            operation: self.mode.operation(),
        }
    }

    /// Integer form of `k`, within the exponent budget.
    fn integer_exponent(&self, k: &Rational) -> Result<i32> {
        let k = k.to_integer().ok_or_else(|| self.not_applicable())?;
        let limit = self.options.max_power_exponent;
        i32::try_from(k)
            .ok()
            .filter(|e| e.unsigned_abs() <= limit)
            .ok_or_else(|| EngineError::InputTooComplex("exponent outside budget".to_string()))
    }

    fn bump(&mut self, base: Base, k: &Rational) {
        let entry = self.exponents.entry(base).or_insert_with(Rational::zero);
        *entry = entry.clone() + k.clone();
    }

    /// Account for `expr^k`.
    fn collect(&mut self, expr: &Expr, k: &Rational) -> Result<()> {
        match expr {
            Expr::Group(inner) => self.collect(inner, k),
            Expr::Variable(name) => {
                self.bump(Base::Variable(name.clone()), k);
                Ok(())
            }
            Expr::Number(r) => self.number(r, k),
            Expr::Binary(BinOp::Mul, l, r) => {
                self.collect(l, k)?;
                self.collect(r, k)
            }
            Expr::Binary(BinOp::Div, l, r) => {
                self.collect(l, k)?;
                self.collect(r, &-k)
            }
            Expr::Power(base, n) => self.collect(base, &(k * &Rational::from(*n))),
            Expr::Sqrt(inner) if self.mode == Mode::OneTerm => {
                let half = k.checked_div(&Rational::from(2))?;
                self.collect(inner, &half)
            }
            Expr::Negate(inner) => {
                // (-a)^k = (-1)^k a^k
                if self.integer_exponent(k)? % 2 != 0 {
                    self.coefficient = -self.coefficient.clone();
                }
                self.collect(inner, k)
            }
            Expr::Binary(BinOp::Add | BinOp::Sub, _, _) | Expr::Sqrt(_) => {
                Err(self.not_applicable())
            }
        }
    }

    fn number(&mut self, r: &Rational, k: &Rational) -> Result<()> {
        if r.is_one() {
            return Ok(());
        }
        if self.mode == Mode::OneTerm && r.is_integer() && !r.is_negative() && !r.is_zero() {
            if let Some(n) = r.to_integer() {
                self.bump(Base::Integer(n), k);
                return Ok(());
            }
        }
        let e = self.integer_exponent(k)?;
        self.coefficient = &self.coefficient * &r.pow(e)?;
        Ok(())
    }

    fn distinct_bases(&self) -> usize {
        self.exponents.len()
    }

    fn render(&self) -> String {
        if self.coefficient.is_zero() {
            return "0".to_string();
        }
        let mut numer_factors = Vec::new();
        let mut denom_factors = Vec::new();
        for (base, exp) in &self.exponents {
            if exp.is_zero() {
                continue;
            }
            if exp.is_negative() {
                denom_factors.push(render_power(base, &exp.abs()));
            } else {
                numer_factors.push(render_power(base, exp));
            }
        }

        let magnitude = self.coefficient.abs();
        let numer_coeff = magnitude.numer();
        let denom_coeff = magnitude.denom();

        let mut numer = Vec::new();
        if !numer_coeff.is_one() || numer_factors.is_empty() {
            numer.push(numer_coeff.to_string());
        }
        numer.extend(numer_factors);

        let mut denom = Vec::new();
        if !denom_coeff.is_one() {
            denom.push(denom_coeff.to_string());
        }
        denom.extend(denom_factors);

        let sign = if self.coefficient.is_negative() { "-" } else { "" };
        if denom.is_empty() {
            format!("{sign}{}", join_factors(&numer))
        } else {
            format!(
                "{sign}\\frac{{{}}}{{{}}}",
                join_factors(&numer),
                join_factors(&denom)
            )
        }
    }
}

/// Juxtapose factors, with `\times` where two digits would touch.
fn join_factors(factors: &[String]) -> String {
    let mut out = String::new();
    for factor in factors {
        if !out.is_empty() && factor.starts_with(|c: char| c.is_ascii_digit()) {
            out.push_str("\\times");
        }
        out.push_str(factor);
    }
    out
}

/// `exp` is positive here.
fn render_power(base: &Base, exp: &Rational) -> String {
    let base = base.to_latex();
    if exp.is_one() {
        base
    } else if exp.numer().is_one() && *exp.denom() == BigInt::from(2) {
        format!("\\sqrt{{{base}}}")
    } else {
        format!("{base}^{{{}}}", exp.to_latex())
    }
}

/// `x^{3}\times x^{2}\div x^{4}` -> `x`; zero exponents vanish, negative
/// exponents move under a fraction bar.
pub fn simplify_indices(input: &str, options: &EngineOptions) -> Result<String> {
    let tree = parse(input, options)?;
    let mut chain = IndexChain::new(Mode::Coefficient, options);
    chain.collect(&tree, &Rational::one())?;
    tracing::trace!(bases = chain.distinct_bases(), "collected index chain");
    Ok(chain.render())
}

/// `2^{3}\times2^{2}` -> `2^{5}`, `\sqrt{x}\times x^{2}` -> `x^{\frac{5}{2}}`.
pub fn simplify_one_term(input: &str, options: &EngineOptions) -> Result<String> {
    let tree = parse(input, options)?;
    let mut chain = IndexChain::new(Mode::OneTerm, options);
    chain.collect(&tree, &Rational::one())?;
    if chain.distinct_bases() > 1 {
        return Err(chain.not_applicable());
    }
    Ok(chain.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(input: &str) -> Result<String> {
        simplify_indices(input, &EngineOptions::default())
    }

    fn one_term(input: &str) -> Result<String> {
        simplify_one_term(input, &EngineOptions::default())
    }

    #[test]
    fn test_simplify_indices() {
        assert_eq!(indices("x^{5}\\times x^{2}\\div x^{3}").unwrap(), "x^{4}");
        assert_eq!(indices("x^{3}\\times x^{2}\\div x^{4}").unwrap(), "x");
        assert_eq!(indices("a^{2}\\div a^{2}").unwrap(), "1");
        assert_eq!(indices("x^{2}\\div x^{5}").unwrap(), "\\frac{1}{x^{3}}");
    }

    #[test]
    fn test_simplify_indices_power_of_power() {
        assert_eq!(indices("(x^{2})^{3}").unwrap(), "x^{6}");
        assert_eq!(indices("(2x^{2})^{3}").unwrap(), "8x^{6}");
        assert_eq!(indices("(-x)^{3}").unwrap(), "-x^{3}");
    }

    #[test]
    fn test_simplify_indices_coefficients() {
        assert_eq!(indices("6x^{4}\\div(4x)").unwrap(), "\\frac{3x^{3}}{2}");
        assert_eq!(indices("2x^{-2}").unwrap(), "\\frac{2}{x^{2}}");
    }

    #[test]
    fn test_simplify_indices_rejects_sums() {
        assert_eq!(
            indices("x^{2}+x"),
            Err(EngineError::NotApplicable {
                operation: SIMPLIFY_INDICES
            })
        );
        assert!(indices("\\sqrt{x}").is_err());
    }

    #[test]
    fn test_simplify_indices_zero_base() {
        assert_eq!(indices("0^{-1}"), Err(EngineError::DivisionByZero));
    }

    #[test]
    fn test_simplify_one_term() {
        assert_eq!(one_term("2^{3}\\times2^{2}").unwrap(), "2^{5}");
        assert_eq!(one_term("\\sqrt{x}\\times x^{2}").unwrap(), "x^{\\frac{5}{2}}");
        assert_eq!(one_term("x^{3}\\div x^{5}").unwrap(), "\\frac{1}{x^{2}}");
        assert_eq!(one_term("x^{2}\\div x^{\\frac{3}{2}}").ok(), None);
        assert_eq!(one_term("\\sqrt{x^{3}}\\div x").unwrap(), "\\sqrt{x}");
        assert_eq!(one_term("3^{4}\\div3^{4}").unwrap(), "1");
    }

    #[test]
    fn test_simplify_one_term_needs_single_base() {
        assert_eq!(
            one_term("2^{3}\\times x"),
            Err(EngineError::NotApplicable {
                operation: SIMPLIFY_ONE_TERM
            })
        );
    }
}

//! Polynomial -> surface syntax.

use crate::polynomial::{Monomial, Polynomial, Term};

/// Render a canonical polynomial: `2x^{2}-\frac{1}{2}xy+3`.
pub fn render(poly: &Polynomial) -> String {
    if poly.is_zero() {
        return "0".to_string();
    }
    let mut out = String::new();
    for (i, term) in poly.terms().iter().enumerate() {
        if term.coefficient.is_negative() {
            out.push('-');
        } else if i > 0 {
            out.push('+');
        }
        out.push_str(&render_unsigned(term));
    }
    out
}

/// A single term with its sign.
pub fn render_term(term: &Term) -> String {
    let body = render_unsigned(term);
    if term.coefficient.is_negative() {
        format!("-{body}")
    } else {
        body
    }
}

fn render_unsigned(term: &Term) -> String {
    let magnitude = term.coefficient.abs();
    let mut out = String::new();
    if term.is_constant() || !magnitude.is_one() {
        out.push_str(&magnitude.to_latex());
    }
    out.push_str(&render_monomial(&term.monomial));
    out
}

/// Variables in alphabetical order, `^{e}` omitted for e = 1.
pub fn render_monomial(monomial: &Monomial) -> String {
    let mut out = String::new();
    for (name, exp) in monomial.iter() {
        out.push_str(name);
        if exp != 1 {
            out.push_str(&format!("^{{{exp}}}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use algex_ast::Rational;

    fn term(c: Rational, pairs: &[(&str, u32)]) -> Term {
        Term::new(c, Monomial::from_pairs(pairs.iter().copied()))
    }

    #[test]
    fn test_render_zero() {
        assert_eq!(render(&Polynomial::zero()), "0");
    }

    #[test]
    fn test_render_unit_coefficients() {
        let p = Polynomial::from_terms([
            term(Rational::from(1), &[("x", 2)]),
            term(Rational::from(-1), &[("x", 1)]),
            term(Rational::from(1), &[]),
        ]);
        assert_eq!(render(&p), "x^{2}-x+1");
    }

    #[test]
    fn test_render_leading_negative_and_fractions() {
        let p = Polynomial::from_terms([
            term(Rational::new(-1, 2).unwrap(), &[("x", 1), ("y", 1)]),
            term(Rational::new(2, 3).unwrap(), &[]),
        ]);
        assert_eq!(render(&p), "-\\frac{1}{2}xy+\\frac{2}{3}");
    }

    #[test]
    fn test_render_term() {
        assert_eq!(render_term(&term(Rational::from(-3), &[("b", 1), ("a", 2)])), "-3a^{2}b");
        assert_eq!(render_term(&term(Rational::from(-1), &[])), "-1");
    }
}

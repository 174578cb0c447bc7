//! Canonical polynomial over Q
//!
//! Representation: terms stored as (coefficient, monomial) pairs.
//! Monomial = BTreeMap of variable name -> positive exponent.
//! Terms are kept combined and sorted: descending total degree, then the
//! variable/exponent pairs compared in alphabetical variable order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use algex_ast::Rational;

use crate::error::{EngineError, Result};

// =============================================================================
// Monomial
// =============================================================================

/// Product of variables, each with a strictly positive exponent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Monomial(BTreeMap<String, u32>);

impl Monomial {
    /// The empty monomial (constant term)
    pub fn one() -> Self {
        Self(BTreeMap::new())
    }

    pub fn var(name: &str) -> Self {
        Self(BTreeMap::from([(name.to_string(), 1)]))
    }

    /// Zero exponents are dropped.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut map = BTreeMap::new();
        for (name, exp) in pairs {
            if exp > 0 {
                let entry = map.entry(name.to_string()).or_insert(0u32);
                *entry = entry.saturating_add(exp);
            }
        }
        Self(map)
    }

    pub fn is_constant(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_degree(&self) -> u64 {
        self.0.values().map(|&e| u64::from(e)).sum()
    }

    pub fn exponent(&self, name: &str) -> u32 {
        self.0.get(name).copied().unwrap_or(0)
    }

    /// Variables and exponents in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, &exp)| (name.as_str(), exp))
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// x^a * x^b = x^(a+b); `None` when an exponent leaves `u32`.
    pub fn mul(&self, other: &Self) -> Option<Self> {
        let mut map = self.0.clone();
        for (name, &exp) in &other.0 {
            let entry = map.entry(name.clone()).or_insert(0);
            *entry = entry.checked_add(exp)?;
        }
        Some(Self(map))
    }
}

impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .total_degree()
            .cmp(&self.total_degree())
            .then_with(|| {
                for ((va, ea), (vb, eb)) in self.0.iter().zip(other.0.iter()) {
                    let ord = va.cmp(vb).then_with(|| eb.cmp(ea));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                self.0.len().cmp(&other.0.len())
            })
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// Term
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    pub coefficient: Rational,
    pub monomial: Monomial,
}

impl Term {
    pub fn new(coefficient: Rational, monomial: Monomial) -> Self {
        Self {
            coefficient,
            monomial,
        }
    }

    pub fn constant(value: Rational) -> Self {
        Self::new(value, Monomial::one())
    }

    pub fn is_constant(&self) -> bool {
        self.monomial.is_constant()
    }

    pub fn neg(&self) -> Self {
        Self::new(-&self.coefficient, self.monomial.clone())
    }

    pub fn mul(&self, other: &Self) -> Option<Self> {
        Some(Self::new(
            &self.coefficient * &other.coefficient,
            self.monomial.mul(&other.monomial)?,
        ))
    }
}

// =============================================================================
// Budget
// =============================================================================

/// Size limits for products and powers. Each limit fails with
/// `InputTooComplex` rather than letting nested powers compound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolyBudget {
    pub max_terms: usize,
    pub max_total_degree: u32,
    pub max_coefficient_bits: u64,
}

impl Default for PolyBudget {
    fn default() -> Self {
        Self {
            max_terms: 500,
            max_total_degree: 1024,
            max_coefficient_bits: 4096,
        }
    }
}

/// Bit length of the larger of numerator and denominator.
fn coefficient_bits(c: &Rational) -> u64 {
    c.numer().bits().max(c.denom().bits())
}

// =============================================================================
// Polynomial
// =============================================================================

/// Combined, sorted list of terms. No zero coefficients, no repeated monomials.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Polynomial {
    terms: Vec<Term>,
}

/// Group terms by monomial, sum coefficients, drop zeros, sort canonically.
pub fn combine_like_terms(terms: impl IntoIterator<Item = Term>) -> Polynomial {
    let mut map: BTreeMap<Monomial, Rational> = BTreeMap::new();
    for term in terms {
        let entry = map.entry(term.monomial).or_insert_with(Rational::zero);
        *entry = entry.clone() + term.coefficient;
    }
    Polynomial {
        terms: map
            .into_iter()
            .filter(|(_, c)| !c.is_zero())
            .map(|(m, c)| Term::new(c, m))
            .collect(),
    }
}

impl Polynomial {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::constant(Rational::one())
    }

    pub fn constant(value: Rational) -> Self {
        combine_like_terms([Term::constant(value)])
    }

    pub fn variable(name: &str) -> Self {
        combine_like_terms([Term::new(Rational::one(), Monomial::var(name))])
    }

    pub fn from_terms(terms: impl IntoIterator<Item = Term>) -> Self {
        combine_like_terms(terms)
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value when the polynomial has no variables (the zero polynomial is 0).
    pub fn as_constant(&self) -> Option<Rational> {
        match self.terms.as_slice() {
            [] => Some(Rational::zero()),
            [t] if t.is_constant() => Some(t.coefficient.clone()),
            _ => None,
        }
    }

    pub fn variables(&self) -> BTreeSet<&str> {
        self.terms
            .iter()
            .flat_map(|t| t.monomial.variables())
            .collect()
    }

    pub fn total_degree(&self) -> u64 {
        self.terms
            .iter()
            .map(|t| t.monomial.total_degree())
            .max()
            .unwrap_or(0)
    }

    /// Strictly increasing in monomial order and free of zero coefficients.
    pub fn is_canonical(&self) -> bool {
        self.terms.iter().all(|t| !t.coefficient.is_zero())
            && self
                .terms
                .windows(2)
                .all(|w| w[0].monomial < w[1].monomial)
    }

    pub fn neg(&self) -> Self {
        Self {
            terms: self.terms.iter().map(Term::neg).collect(),
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        combine_like_terms(self.terms.iter().chain(other.terms.iter()).cloned())
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiply every coefficient by `k`
    pub fn scale(&self, k: &Rational) -> Self {
        combine_like_terms(
            self.terms
                .iter()
                .map(|t| Term::new(&t.coefficient * k, t.monomial.clone())),
        )
    }

    /// Fails when any coefficient is wider than the budget allows.
    pub fn check_coefficients(&self, budget: &PolyBudget) -> Result<()> {
        let widest = self
            .terms
            .iter()
            .map(|t| coefficient_bits(&t.coefficient))
            .max()
            .unwrap_or(0);
        if widest > budget.max_coefficient_bits {
            tracing::warn!(
                bits = widest,
                max_bits = budget.max_coefficient_bits,
                "coefficient exceeds size budget"
            );
            return Err(EngineError::InputTooComplex(format!(
                "coefficient of {widest} bits"
            )));
        }
        Ok(())
    }

    /// Distributive cross-product, bounded by the term, degree and
    /// coefficient budgets.
    pub fn mul(&self, other: &Self, budget: &PolyBudget) -> Result<Self> {
        let max_terms = budget.max_terms;
        if self.terms.len().saturating_mul(other.terms.len()) > max_terms.saturating_mul(4) {
            tracing::warn!(
                left = self.terms.len(),
                right = other.terms.len(),
                "product exceeds term budget"
            );
            return Err(EngineError::InputTooComplex(format!(
                "product of {} and {} terms",
                self.terms.len(),
                other.terms.len()
            )));
        }

        let max_degree = u64::from(budget.max_total_degree);
        let mut products = Vec::with_capacity(self.terms.len() * other.terms.len());
        for a in &self.terms {
            for b in &other.terms {
                let term = a
                    .mul(b)
                    .filter(|t| t.monomial.total_degree() <= max_degree)
                    .ok_or_else(|| {
                        tracing::warn!(max_degree, "product exceeds degree budget");
                        EngineError::InputTooComplex(format!("degree above {max_degree}"))
                    })?;
                products.push(term);
            }
        }
        let product = combine_like_terms(products);

        if product.len() > max_terms {
            tracing::warn!(terms = product.len(), max_terms, "product exceeds term budget");
            return Err(EngineError::InputTooComplex(format!(
                "product with {} terms",
                product.len()
            )));
        }
        product.check_coefficients(budget)?;
        Ok(product)
    }

    /// Repeated multiplication; `p^0` is 1.
    pub fn pow(&self, exp: u32, budget: &PolyBudget) -> Result<Self> {
        let mut result = Self::one();
        for _ in 0..exp {
            result = result.mul(self, budget)?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(c: i64, pairs: &[(&str, u32)]) -> Term {
        Term::new(Rational::from(c), Monomial::from_pairs(pairs.iter().copied()))
    }

    #[test]
    fn test_monomial_order() {
        let x2 = Monomial::from_pairs([("x", 2)]);
        let xy = Monomial::from_pairs([("x", 1), ("y", 1)]);
        let y2 = Monomial::from_pairs([("y", 2)]);
        let x = Monomial::var("x");
        let y = Monomial::var("y");
        let one = Monomial::one();

        let mut monos = vec![one.clone(), y.clone(), y2.clone(), x.clone(), xy.clone(), x2.clone()];
        monos.sort();
        assert_eq!(monos, vec![x2, xy, y2, x, y, one]);
    }

    #[test]
    fn test_combine_like_terms() {
        let p = combine_like_terms([
            term(3, &[("x", 1)]),
            term(2, &[("y", 1)]),
            term(-1, &[("x", 1)]),
            term(5, &[("y", 1)]),
        ]);
        assert_eq!(p.terms(), &[term(2, &[("x", 1)]), term(7, &[("y", 1)])]);
    }

    #[test]
    fn test_combine_drops_zero() {
        let p = combine_like_terms([term(1, &[("x", 1)]), term(-1, &[("x", 1)])]);
        assert!(p.is_zero());
        assert_eq!(p.as_constant(), Some(Rational::zero()));
    }

    #[test]
    fn test_combine_is_idempotent() {
        let p = combine_like_terms([
            term(4, &[]),
            term(1, &[("x", 2)]),
            term(-3, &[("x", 1)]),
            term(2, &[("x", 2)]),
        ]);
        let again = combine_like_terms(p.terms().to_vec());
        assert_eq!(p, again);
        assert!(p.is_canonical());
    }

    #[test]
    fn test_mul() {
        // (x + 1)(x - 1) = x^2 - 1
        let a = Polynomial::from_terms([term(1, &[("x", 1)]), term(1, &[])]);
        let b = Polynomial::from_terms([term(1, &[("x", 1)]), term(-1, &[])]);
        let p = a.mul(&b, &PolyBudget::default()).unwrap();
        assert_eq!(p.terms(), &[term(1, &[("x", 2)]), term(-1, &[])]);
    }

    #[test]
    fn test_pow_zero_is_one() {
        let a = Polynomial::from_terms([term(1, &[("x", 1)]), term(1, &[])]);
        let budget = PolyBudget::default();
        assert_eq!(a.pow(0, &budget).unwrap(), Polynomial::one());
        assert_eq!(Polynomial::zero().pow(0, &budget).unwrap(), Polynomial::one());
    }

    #[test]
    fn test_mul_budget() {
        let a = Polynomial::from_terms((0..10).map(|i| term(1, &[("x", i)])));
        let b = Polynomial::from_terms((0..10).map(|i| term(1, &[("y", i)])));
        let budget = |max_terms| PolyBudget {
            max_terms,
            ..PolyBudget::default()
        };
        assert!(matches!(a.mul(&b, &budget(50)), Err(EngineError::InputTooComplex(_))));
        assert_eq!(a.mul(&b, &budget(100)).unwrap().len(), 100);
    }

    #[test]
    fn test_exponent_overflow_is_too_complex() {
        let big = Polynomial::from_terms([term(1, &[("x", u32::MAX - 1)])]);
        let x = Polynomial::variable("x");
        assert_eq!(
            Monomial::from_pairs([("x", u32::MAX)]).mul(&Monomial::var("x")),
            None
        );
        let budget = PolyBudget {
            max_total_degree: u32::MAX,
            ..PolyBudget::default()
        };
        assert!(big.mul(&x, &budget).is_ok());
        assert!(matches!(
            big.mul(&big, &budget),
            Err(EngineError::InputTooComplex(_))
        ));
    }

    #[test]
    fn test_degree_budget() {
        let budget = PolyBudget {
            max_total_degree: 10,
            ..PolyBudget::default()
        };
        let x = Polynomial::variable("x");
        assert_eq!(x.pow(10, &budget).unwrap().total_degree(), 10);
        assert!(matches!(x.pow(11, &budget), Err(EngineError::InputTooComplex(_))));
    }

    #[test]
    fn test_coefficient_budget() {
        let budget = PolyBudget {
            max_coefficient_bits: 64,
            ..PolyBudget::default()
        };
        let two = Polynomial::constant(Rational::from(2));
        assert!(two.pow(63, &budget).is_ok());
        assert!(matches!(two.pow(65, &budget), Err(EngineError::InputTooComplex(_))));
        let half = Polynomial::constant(Rational::new(1, 2).unwrap());
        assert!(matches!(half.pow(65, &budget), Err(EngineError::InputTooComplex(_))));
    }
}

//! Budgets for the engine.
//!
//! Every call is bounded in size; inputs that would exceed a budget fail with
//! `EngineError::InputTooComplex` instead of growing without limit.

use serde::{Deserialize, Serialize};

use crate::polynomial::PolyBudget;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Maximum parser recursion depth (brackets, fractions, unary signs)
    pub max_depth: usize,
    /// Maximum number of terms a product may materialize
    pub max_terms: usize,
    /// Largest exponent a polynomial may be raised to
    pub max_power_exponent: u32,
    /// Largest total degree of any term, after nested powers compound
    pub max_total_degree: u32,
    /// Largest bit length of a coefficient's numerator or denominator
    pub max_coefficient_bits: u64,
    /// Largest integer accepted by prime factorization
    pub max_factor_input: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_depth: algex_parser::DEFAULT_MAX_DEPTH,
            max_terms: 500,
            max_power_exponent: 32,
            max_total_degree: 1024,
            max_coefficient_bits: 4096,
            max_factor_input: 1_000_000_000_000,
        }
    }
}

impl EngineOptions {
    pub fn poly_budget(&self) -> PolyBudget {
        PolyBudget {
            max_terms: self.max_terms,
            max_total_degree: self.max_total_degree,
            max_coefficient_bits: self.max_coefficient_bits,
        }
    }
}

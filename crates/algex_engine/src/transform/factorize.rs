//! Prime factorization by trial division.

use num_bigint::BigInt;

use crate::error::{EngineError, Result};
use crate::options::EngineOptions;
use crate::transform::to_polynomial;

/// `(prime, multiplicity)` pairs in ascending prime order. `n < 2` has none.
pub fn prime_factors(mut n: u64) -> Vec<(u64, u32)> {
    let mut factors = Vec::new();
    let mut p = 2u64;
    while p.saturating_mul(p) <= n {
        let mut count = 0;
        while n % p == 0 {
            n /= p;
            count += 1;
        }
        if count > 0 {
            factors.push((p, count));
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if n > 1 {
        factors.push((n, 1));
    }
    factors
}

/// `60` -> `2^{2}\times3\times5`.
pub fn prime_factorize(input: &str, options: &EngineOptions) -> Result<String> {
    let not_factorable = || EngineError::NotFactorable(input.trim().to_string());

    let value = to_polynomial(input, options)?
        .as_constant()
        .filter(|c| c.is_integer())
        .and_then(|c| c.to_integer())
        .ok_or_else(not_factorable)?;

    let n = u64::try_from(&value)
        .ok()
        .filter(|&n| n <= options.max_factor_input)
        .ok_or_else(|| {
            if value < BigInt::from(2) {
                not_factorable()
            } else {
                tracing::warn!(%value, max = options.max_factor_input, "factorization input exceeds budget");
                EngineError::InputTooComplex(format!("{value} exceeds factorization limit"))
            }
        })?;
    if n < 2 {
        return Err(not_factorable());
    }

    let rendered: Vec<String> = prime_factors(n)
        .into_iter()
        .map(|(p, e)| if e == 1 { p.to_string() } else { format!("{p}^{{{e}}}") })
        .collect();
    Ok(rendered.join("\\times"))
}

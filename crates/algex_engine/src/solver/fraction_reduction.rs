//! Step-by-step reduction of a literal fraction.

use algex_ast::Rational;
use algex_parser::literal_fraction;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;

use super::{Archetype, Solution, SolutionStep};
use crate::error::{EngineError, Result};
use crate::options::EngineOptions;

/// A single top-level `\frac{n}{d}` of integer literals.
pub struct FractionReduction;

impl FractionReduction {
    fn steps(numer: &BigInt, denom: &BigInt) -> Result<Vec<SolutionStep>> {
        let original = format!("\\frac{{{numer}}}{{{denom}}}");
        let reduced = Rational::new(numer.clone(), denom.clone())?.to_latex();
        let gcd = numer.gcd(denom);

        if gcd.is_one() {
            return Ok(vec![SolutionStep::new(
                "The fraction is already in lowest terms",
                original,
                Some(reduced),
            )]);
        }

        Ok(vec![
            SolutionStep::new("Write down the fraction", original.clone(), None),
            SolutionStep::new(
                "Find the greatest common divisor of numerator and denominator",
                format!("\\gcd({numer}, {denom})"),
                Some(gcd.to_string()),
            ),
            SolutionStep::new(
                "Divide numerator and denominator by the greatest common divisor",
                format!("\\frac{{{numer}\\div{gcd}}}{{{denom}\\div{gcd}}}"),
                Some(reduced.clone()),
            ),
            SolutionStep::new(
                "Write the reduced fraction",
                format!("{original}={reduced}"),
                Some(reduced),
            ),
        ])
    }
}

impl Archetype for FractionReduction {
    fn name(&self) -> &'static str {
        "fraction-reduction"
    }

    fn matches(&self, input: &str) -> bool {
        literal_fraction(input).is_some()
    }

    fn solve(&self, input: &str, _options: &EngineOptions) -> Result<Solution> {
        let (numer, denom) = literal_fraction(input).ok_or(EngineError::UnrecognizedProblemType)?;
        if denom == BigInt::from(0) {
            return Err(EngineError::InvalidDenominator);
        }
        let steps = Self::steps(&numer, &denom)?;
        let final_answer = steps.last().and_then(|s| s.result.clone());
        Ok(Solution {
            archetype: self.name().to_string(),
            steps,
            final_answer,
        })
    }
}

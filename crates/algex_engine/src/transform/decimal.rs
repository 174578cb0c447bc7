//! Decimal -> exact fraction.

use algex_ast::Rational;
use num_bigint::BigInt;
use num_traits::One;

use crate::error::{EngineError, Result};

/// Fewest fractional digits for which a repeating pattern is recognized.
const MIN_REPEAT_DIGITS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecimalConversion {
    pub value: Rational,
    /// Digit block treated as repeating forever, if any
    pub repeating_block: Option<String>,
}

impl DecimalConversion {
    pub fn to_latex(&self) -> String {
        self.value.to_latex()
    }
}

/// Shortest non-zero block that tiles `digits` at least twice.
fn repeating_block(digits: &str) -> Option<&str> {
    if digits.len() < MIN_REPEAT_DIGITS {
        return None;
    }
    (1..=digits.len() / 2)
        .filter(|len| digits.len() % len == 0)
        .map(|len| &digits[..len])
        .find(|block| {
            !block.bytes().all(|b| b == b'0')
                && digits
                    .as_bytes()
                    .chunks(block.len())
                    .all(|c| c == block.as_bytes())
        })
}

/// `[sign]digits.digits` with at least one digit.
pub(crate) fn is_decimal_literal(input: &str) -> bool {
    let text = input.trim();
    let body = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    body.split_once('.').is_some_and(|(int_part, frac_part)| {
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        all_digits(int_part) && all_digits(frac_part) && body.len() > 1
    })
}

fn malformed() -> EngineError {
    EngineError::Syntax {
        position: 0,
        expected: "decimal number".to_string(),
    }
}

/// `0.333` -> `\frac{1}{3}`, `0.1212` -> `\frac{4}{33}`, `0.125` -> `\frac{1}{8}`.
pub fn convert_decimal(input: &str) -> Result<DecimalConversion> {
    let text = input.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let Some((int_part, frac_part)) = body.split_once('.') else {
        return Ok(DecimalConversion {
            value: Rational::from_decimal(text)?,
            repeating_block: None,
        });
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(malformed());
    }
    let block = match repeating_block(frac_part) {
        Some(block) => block,
        None => {
            return Ok(DecimalConversion {
                value: Rational::from_decimal(text)?,
                repeating_block: None,
            })
        }
    };

    let whole = if int_part.is_empty() {
        Rational::zero()
    } else {
        Rational::from_decimal(int_part)?
    };
    let numer: BigInt = block.parse().map_err(|_| malformed())?;
    // 0.(b) = b / (10^len - 1)
    let len = u32::try_from(block.len())
        .map_err(|_| EngineError::InputTooComplex("repeating block".to_string()))?;
    let denom = BigInt::from(10u32).pow(len) - BigInt::one();
    let magnitude = whole + Rational::new(numer, denom)?;

    tracing::trace!(block, "repeating decimal");
    Ok(DecimalConversion {
        value: if negative { -magnitude } else { magnitude },
        repeating_block: Some(block.to_string()),
    })
}

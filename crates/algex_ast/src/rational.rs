//! Exact rational numbers.
//!
//! `Rational` wraps `BigRational`, which keeps every value reduced with a
//! positive denominator. All arithmetic returns a new reduced value; the only
//! fallible operations are the ones that can divide by zero.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::error::RationalError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rational(BigRational);

impl Rational {
    /// Build `numer / denom`, reduced, with the sign carried by the numerator.
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Result<Self, RationalError> {
        let denom = denom.into();
        if denom.is_zero() {
            return Err(RationalError::InvalidDenominator);
        }
        Ok(Self(BigRational::new(numer.into(), denom)))
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self(BigRational::from_integer(value.into()))
    }

    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    pub fn one() -> Self {
        Self(BigRational::one())
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Integer value, when the denominator is 1.
    pub fn to_integer(&self) -> Option<BigInt> {
        self.is_integer().then(|| self.0.to_integer())
    }

    pub fn checked_div(&self, other: &Self) -> Result<Self, RationalError> {
        if other.is_zero() {
            return Err(RationalError::DivisionByZero);
        }
        Ok(Self(&self.0 / &other.0))
    }

    pub fn recip(&self) -> Result<Self, RationalError> {
        Self::one().checked_div(self)
    }

    /// Integer power. Negative exponents invert first, so `0^-n` fails.
    pub fn pow(&self, exp: i32) -> Result<Self, RationalError> {
        let base = if exp < 0 { self.recip()? } else { self.clone() };
        let e = exp.unsigned_abs();
        Ok(Self(BigRational::new(
            base.numer().pow(e),
            base.denom().pow(e),
        )))
    }

    /// Exact square root when both numerator and denominator are perfect squares.
    pub fn sqrt_exact(&self) -> Option<Self> {
        if self.is_negative() {
            return None;
        }
        let n = self.numer().sqrt();
        let d = self.denom().sqrt();
        if &(&n * &n) == self.numer() && &(&d * &d) == self.denom() {
            Some(Self(BigRational::new(n, d)))
        } else {
            None
        }
    }

    /// Interpret `[+-]digits[.digits]` exactly: scale by `10^k` for `k`
    /// fractional digits, then reduce.
    pub fn from_decimal(text: &str) -> Result<Self, RationalError> {
        let malformed = || RationalError::Malformed(text.to_string());
        let trimmed = text.trim();
        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(malformed());
        }
        if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }
        let digits = format!("{int_part}{frac_part}");
        let numer: BigInt = digits.parse().map_err(|_| malformed())?;
        let scale = u32::try_from(frac_part.len()).map_err(|_| malformed())?;
        let denom = BigInt::from(10u32).pow(scale);
        let value = Self::new(numer, denom)?;
        Ok(if negative { -value } else { value })
    }

    /// Surface form: plain integer, or `\frac{|n|}{d}` with the sign outside.
    pub fn to_latex(&self) -> String {
        if self.is_integer() {
            return self.numer().to_string();
        }
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}\\frac{{{}}}{{{}}}",
            sign,
            self.numer().abs(),
            self.denom()
        )
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_latex())
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<BigInt> for Rational {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<&Rational> for &Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                Rational($trait::$method(&self.0, &rhs.0))
            }
        }

        impl $trait for Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                Rational($trait::$method(self.0, rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

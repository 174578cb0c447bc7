//! Plain-text arithmetic over exact rationals.
//!
//! Accepts integers, `a/b` fractions and `a b/c` mixed numbers joined by
//! `+ - × ÷ * ( )` (plus `\times`, `\div`, `·`). A `/` written with spaces
//! around it is a division; written tight between two integers it is a
//! fraction literal.

use algex_ast::Rational;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, one_of, space1},
    combinator::{map, value},
    sequence::separated_pair,
    IResult,
};
use num_bigint::BigInt;

use crate::error::{EngineError, Result};
use crate::options::EngineOptions;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Literal(Rational),
    Plus,
    Minus,
    Times,
    Divide,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
struct Spanned {
    token: Token,
    offset: usize,
}

enum Literal<'a> {
    Mixed(&'a str, (&'a str, &'a str)),
    Fraction(&'a str, &'a str),
    Integer(&'a str),
}

fn fraction(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(digit1, char('/'), digit1)(input)
}

/// Longest form first: `2 1/3`, then `1/3`, then `2`.
fn literal(input: &str) -> IResult<&str, Literal<'_>> {
    alt((
        map(separated_pair(digit1, space1, fraction), |(w, f)| {
            Literal::Mixed(w, f)
        }),
        map(fraction, |(n, d)| Literal::Fraction(n, d)),
        map(digit1, Literal::Integer),
    ))(input)
}

fn operator(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Plus, char('+')),
        value(Token::Minus, one_of("-−")),
        value(Token::Times, alt((tag("\\times"), tag("\\cdot"), tag("×"), tag("*"), tag("·")))),
        value(Token::Divide, alt((tag("\\div"), tag("÷"), tag("/")))),
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
    ))(input)
}

fn integer(digits: &str, offset: usize) -> Result<BigInt> {
    digits.parse().map_err(|_| EngineError::Syntax {
        position: offset,
        expected: "integer".to_string(),
    })
}

fn fraction_value(numer: &str, denom: &str, offset: usize) -> Result<Rational> {
    Rational::new(integer(numer, offset)?, integer(denom, offset)?)
        .map_err(|_| EngineError::InvalidDenominator)
}

fn literal_value(lit: Literal<'_>, offset: usize) -> Result<Rational> {
    match lit {
        Literal::Integer(digits) => Ok(Rational::from(integer(digits, offset)?)),
        Literal::Fraction(n, d) => fraction_value(n, d, offset),
        Literal::Mixed(whole, (n, d)) => {
            let whole = Rational::from(integer(whole, offset)?);
            Ok(whole + fraction_value(n, d, offset)?)
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut remaining = input;

    loop {
        remaining = remaining.trim_start();
        if remaining.is_empty() {
            break;
        }
        let offset = input.len() - remaining.len();

        if let Ok((rest, lit)) = literal(remaining) {
            tokens.push(Spanned {
                token: Token::Literal(literal_value(lit, offset)?),
                offset,
            });
            remaining = rest;
            continue;
        }

        match operator(remaining) {
            Ok((rest, token)) => {
                tokens.push(Spanned { token, offset });
                remaining = rest;
            }
            Err(_) => {
                return Err(EngineError::Syntax {
                    position: offset,
                    expected: "number, operator or bracket".to_string(),
                })
            }
        }
    }

    Ok(tokens)
}

struct Calculator<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    end: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Calculator<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn syntax(&self, expected: &str) -> EngineError {
        EngineError::Syntax {
            position: self.tokens.get(self.pos).map_or(self.end, |t| t.offset),
            expected: expected.to_string(),
        }
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.max_depth {
            tracing::warn!(max_depth = self.max_depth, "calculation nested too deeply");
            return Err(EngineError::InputTooComplex(format!(
                "nested deeper than {} levels",
                self.max_depth
            )));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn sum(&mut self) -> Result<Rational> {
        let mut acc = self.product()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    acc = acc + self.product()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    acc = acc - self.product()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn product(&mut self) -> Result<Rational> {
        let mut acc = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Times) => {
                    self.pos += 1;
                    acc = acc * self.unary()?;
                }
                Some(Token::Divide) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    acc = acc.checked_div(&divisor)?;
                }
                // 2(3+4)
                Some(Token::LParen) => {
                    acc = acc * self.atom()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn unary(&mut self) -> Result<Rational> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.nested(|c| c.unary())?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.nested(|c| c.unary())
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> Result<Rational> {
        match self.peek() {
            Some(Token::Literal(value)) => {
                let value = value.clone();
                self.pos += 1;
                Ok(value)
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let inner = self.nested(|c| c.sum())?;
                if self.peek() != Some(&Token::RParen) {
                    return Err(self.syntax("')'"));
                }
                self.pos += 1;
                Ok(inner)
            }
            _ => Err(self.syntax("number or '('")),
        }
    }
}

/// Lexes as plain numbers and operators; nothing is evaluated.
pub(crate) fn is_calculation(input: &str) -> bool {
    tokenize(input).is_ok_and(|tokens| !tokens.is_empty())
}

/// Evaluate without rendering.
pub fn evaluate(input: &str, options: &EngineOptions) -> Result<Rational> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EngineError::Syntax {
            position: 0,
            expected: "expression".to_string(),
        });
    }
    let mut calc = Calculator {
        tokens: &tokens,
        pos: 0,
        end: input.len(),
        depth: 0,
        max_depth: options.max_depth,
    };
    let value = calc.sum()?;
    if calc.peek().is_some() {
        return Err(calc.syntax("operator"));
    }
    Ok(value)
}

/// `1/2 + 1/3` -> `\frac{5}{6}`, `2 1/2 × 2` -> `5`.
pub fn number_calculate(input: &str, options: &EngineOptions) -> Result<String> {
    Ok(evaluate(input, options)?.to_latex())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(input: &str) -> Result<String> {
        number_calculate(input, &EngineOptions::default())
    }

    #[test]
    fn test_fractions() {
        assert_eq!(calc("1/2 + 1/3").unwrap(), "\\frac{5}{6}");
        assert_eq!(calc("3/4 - 1/4").unwrap(), "\\frac{1}{2}");
        assert_eq!(calc("2/3 × 3/4").unwrap(), "\\frac{1}{2}");
        assert_eq!(calc("1/2 ÷ 1/4").unwrap(), "2");
    }

    #[test]
    fn test_mixed_numbers() {
        assert_eq!(calc("2 1/2 × 2").unwrap(), "5");
        assert_eq!(calc("1 1/3 + 2/3").unwrap(), "2");
        assert_eq!(calc("-1 1/2").unwrap(), "-\\frac{3}{2}");
    }

    #[test]
    fn test_precedence_and_brackets() {
        assert_eq!(calc("2 + 3 * 4").unwrap(), "14");
        assert_eq!(calc("(2 + 3) * 4").unwrap(), "20");
        assert_eq!(calc("2(3 + 4)").unwrap(), "14");
        assert_eq!(calc("10 / 4").unwrap(), "\\frac{5}{2}");
        assert_eq!(calc("8 \\div 2 \\times 3").unwrap(), "12");
    }

    #[test]
    fn test_zero_denominators() {
        assert_eq!(calc("3/0"), Err(EngineError::InvalidDenominator));
        assert_eq!(calc("1 ÷ (2 - 2)"), Err(EngineError::DivisionByZero));
        assert_eq!(calc("1 / 0/5"), Err(EngineError::DivisionByZero));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(
            calc("(1 + 2"),
            Err(EngineError::Syntax {
                position: 6,
                expected: "')'".to_string()
            })
        );
        assert!(matches!(calc("x + 1"), Err(EngineError::Syntax { position: 0, .. })));
        assert!(matches!(calc("1 +"), Err(EngineError::Syntax { position: 3, .. })));
        assert!(matches!(calc("1 2"), Err(EngineError::Syntax { position: 2, .. })));
        assert!(calc("").is_err());
    }
}

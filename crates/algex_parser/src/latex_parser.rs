//! LaTeX-flavoured surface syntax to expression tree.
//!
//! Uses a hybrid approach: nom-based tokenizer + recursive descent parser.
//!
//! # Example
//! ```ignore
//! let expr = parse_latex("2x(x+3)")?;
//! // Binary(Mul, Binary(Mul, 2, x), Group(x + 3))
//! ```

use algex_ast::{Expr, Rational};
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1, one_of, satisfy},
    combinator::{map, opt, recognize, value},
    sequence::{pair, preceded},
    IResult,
};
use num_bigint::BigInt;

use crate::error::ParseError;

/// Recursion limit used by [`parse_latex`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

// ============================================================================
// Token Definition
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Number(String),   // "123", "0.25"
    Variable(String), // "x" (always a single letter)

    // Operators
    Plus,   // +
    Minus,  // -
    Times,  // \times, \cdot, *, ×
    Divide, // \div, /, ÷
    Caret,  // ^

    // Grouping
    LBrace, // {
    RBrace, // }
    LParen, // (
    RParen, // )

    // LaTeX Commands
    Frac, // \frac
    Sqrt, // \sqrt
}

/// A token and the byte offset where it starts in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

// ============================================================================
// Tokenizer (using nom)
// ============================================================================

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Command name after a backslash, e.g. `frac` for `\frac`.
fn latex_command(input: &str) -> IResult<&str, &str> {
    preceded(char('\\'), take_while1(is_alpha))(input)
}

/// Thin/medium/thick spaces: `\,` `\;` `\:` `\!` `\ `
fn latex_spacing(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('\\'), one_of(",;:! ")))(input)
}

fn number(input: &str) -> IResult<&str, Token> {
    map(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            recognize(pair(char('.'), digit1)),
        )),
        |digits: &str| Token::Number(digits.to_string()),
    )(input)
}

fn variable(input: &str) -> IResult<&str, Token> {
    map(satisfy(is_alpha), |c| Token::Variable(c.to_string()))(input)
}

fn operator_or_grouping(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Plus, char('+')),
        value(Token::Minus, one_of("-−")),
        value(Token::Times, one_of("*×")),
        value(Token::Divide, one_of("/÷")),
        value(Token::Caret, char('^')),
        value(Token::LBrace, char('{')),
        value(Token::RBrace, char('}')),
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
    ))(input)
}

/// Tokenize an entire surface string.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut tokens = Vec::new();
    let mut remaining = input;

    loop {
        remaining = remaining.trim_start();
        if remaining.is_empty() {
            break;
        }
        let offset = input.len() - remaining.len();

        if let Ok((rest, _)) = latex_spacing(remaining) {
            remaining = rest;
            continue;
        }

        if let Ok((rest, name)) = latex_command(remaining) {
            let token = match name {
                "frac" | "dfrac" | "tfrac" => Some(Token::Frac),
                "sqrt" => Some(Token::Sqrt),
                "times" | "cdot" => Some(Token::Times),
                "div" => Some(Token::Divide),
                // Sizing hints around brackets carry no meaning
                "left" | "right" => None,
                _ => return Err(ParseError::syntax(offset, "a supported command")),
            };
            if let Some(token) = token {
                tokens.push(Spanned { token, offset });
            }
            remaining = rest;
            continue;
        }

        match alt((number, operator_or_grouping, variable))(remaining) {
            Ok((rest, token)) => {
                tokens.push(Spanned { token, offset });
                remaining = rest;
            }
            Err(_) => {
                return Err(ParseError::syntax(
                    offset,
                    "number, variable, operator or bracket",
                ));
            }
        }
    }

    Ok(tokens)
}

fn is_integer_literal(text: &str) -> bool {
    !text.contains('.')
}

/// `[Number]` or `[Minus, Number]`, returned as (negative, digits).
fn signed_literal(tokens: &[Spanned]) -> Option<(bool, &str)> {
    match tokens {
        [Spanned {
            token: Token::Number(text),
            ..
        }] => Some((false, text)),
        [Spanned {
            token: Token::Minus,
            ..
        }, Spanned {
            token: Token::Number(text),
            ..
        }] => Some((true, text)),
        _ => None,
    }
}

fn integer_fraction(
    numer: &str,
    denom: &str,
    negative: bool,
    position: usize,
) -> Result<Rational, ParseError> {
    let n: BigInt = numer
        .parse()
        .map_err(|_| ParseError::syntax(position, "integer"))?;
    let d: BigInt = denom
        .parse()
        .map_err(|_| ParseError::syntax(position, "integer"))?;
    let value =
        Rational::new(n, d).map_err(|_| ParseError::InvalidDenominator { position })?;
    Ok(if negative { -value } else { value })
}

// ============================================================================
// Parser (Recursive Descent)
// ============================================================================

pub struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    end: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// `end` is the input length, reported as the position of errors at EOF.
    pub fn new(tokens: &'a [Spanned], end: usize, max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            depth: 0,
            max_depth,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |t| t.offset)
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<(), ParseError> {
        if self.peek() == Some(&expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(ParseError::syntax(self.position(), what))
        }
    }

    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::TooComplex {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Parse expression (lowest precedence: addition/subtraction)
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.nested(|p| p.parse_sum())
    }

    fn parse_sum(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    let right = self.parse_term()?;
                    left = Expr::add(left, right);
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    let right = self.parse_term()?;
                    left = Expr::sub(left, right);
                }
                _ => break,
            }
        }

        Ok(left)
    }

    /// Parse term (multiplication/division, explicit or implicit)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            match self.peek() {
                Some(Token::Times) => {
                    self.pos += 1;
                    let right = self.parse_unary()?;
                    left = Expr::mul(left, right);
                }
                Some(Token::Divide) => {
                    self.pos += 1;
                    let right = self.parse_unary()?;
                    left = Expr::div(left, right);
                }
                // Implicit multiplication: 2x, x(y+1), (a)(b), 3\frac{x}{2}
                Some(Token::Variable(_))
                | Some(Token::LParen)
                | Some(Token::LBrace)
                | Some(Token::Frac)
                | Some(Token::Sqrt) => {
                    let right = self.parse_power()?;
                    left = Expr::mul(left, right);
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                let inner = self.nested(|p| p.parse_unary())?;
                Ok(Expr::neg(inner))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.nested(|p| p.parse_unary())
            }
            _ => self.parse_power(),
        }
    }

    /// Parse power (exponentiation with ^, integer exponents only)
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_atom()?;

        if let Some(Token::Caret) = self.peek() {
            self.pos += 1;
            let exp = self.parse_exponent()?;
            Ok(Expr::pow(base, exp))
        } else {
            Ok(base)
        }
    }

    /// `{[-]n}` or a bare `n`; a following `^` binds to the exponent (right-associative).
    fn parse_exponent(&mut self) -> Result<i64, ParseError> {
        let start = self.position();
        let (negative, text) = match self.peek().cloned() {
            Some(Token::LBrace) => {
                self.pos += 1;
                let negative = if self.peek() == Some(&Token::Minus) {
                    self.pos += 1;
                    true
                } else {
                    false
                };
                let text = match self.peek().cloned() {
                    Some(Token::Number(text)) if is_integer_literal(&text) => text,
                    _ => return Err(ParseError::syntax(self.position(), "integer exponent")),
                };
                self.pos += 1;
                self.expect(Token::RBrace, "'}' closing the exponent")?;
                (negative, text)
            }
            Some(Token::Number(text)) if is_integer_literal(&text) => {
                self.pos += 1;
                (false, text)
            }
            _ => return Err(ParseError::syntax(start, "integer exponent")),
        };

        let limit = self.max_depth;
        let magnitude: i64 = text
            .parse()
            .map_err(|_| ParseError::TooComplex { limit })?;
        let mut exp = if negative { -magnitude } else { magnitude };

        if let Some(Token::Caret) = self.peek() {
            self.pos += 1;
            let upper = self.nested(|p| p.parse_exponent())?;
            let upper = u32::try_from(upper)
                .map_err(|_| ParseError::syntax(start, "non-negative integer exponent"))?;
            exp = exp
                .checked_pow(upper)
                .ok_or(ParseError::TooComplex { limit })?;
        }

        Ok(exp)
    }

    /// Parse atom (numbers, variables, groups, fractions, roots)
    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let start = self.position();
        match self.peek().cloned() {
            Some(Token::Number(text)) => {
                self.pos += 1;
                let value = Rational::from_decimal(&text)
                    .map_err(|_| ParseError::syntax(start, "number"))?;
                if is_integer_literal(&text) {
                    if let Some(part) = self.mixed_fraction_part()? {
                        return Ok(Expr::Number(value + part));
                    }
                }
                Ok(Expr::Number(value))
            }
            Some(Token::Variable(name)) => {
                self.pos += 1;
                Ok(Expr::Variable(name))
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let inner = self.parse_expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(Expr::group(inner))
            }
            Some(Token::LBrace) => {
                self.pos += 1;
                let inner = self.parse_expr()?;
                self.expect(Token::RBrace, "'}'")?;
                Ok(inner)
            }
            Some(Token::Frac) => self.parse_frac(),
            Some(Token::Sqrt) => {
                self.pos += 1;
                self.expect(Token::LBrace, "'{' after \\sqrt")?;
                let radicand = self.parse_expr()?;
                self.expect(Token::RBrace, "'}' closing \\sqrt")?;
                Ok(Expr::sqrt(radicand))
            }
            _ => Err(ParseError::syntax(start, "operand")),
        }
    }

    /// `\frac{p}{q}` of integer literals directly after an integer: a mixed number.
    fn mixed_fraction_part(&mut self) -> Result<Option<Rational>, ParseError> {
        let tokens = self.tokens;
        let Some(window) = tokens.get(self.pos..self.pos + 7) else {
            return Ok(None);
        };
        let texts = match window {
            [Spanned {
                token: Token::Frac,
                ..
            }, Spanned {
                token: Token::LBrace,
                ..
            }, Spanned {
                token: Token::Number(p),
                ..
            }, Spanned {
                token: Token::RBrace,
                ..
            }, Spanned {
                token: Token::LBrace,
                ..
            }, q @ Spanned {
                token: Token::Number(q_text),
                ..
            }, Spanned {
                token: Token::RBrace,
                ..
            }] if is_integer_literal(p) && is_integer_literal(q_text) => (p, q_text, q.offset),
            _ => return Ok(None),
        };
        let (p, q, position) = texts;
        let part = integer_fraction(p, q, false, position)?;
        self.pos += 7;
        Ok(Some(part))
    }

    fn parse_frac(&mut self) -> Result<Expr, ParseError> {
        let tokens = self.tokens;
        self.pos += 1;

        self.expect(Token::LBrace, "'{' after \\frac")?;
        let numer_start = self.pos;
        let numer = self.parse_expr()?;
        let numer_end = self.pos;
        self.expect(Token::RBrace, "'}' closing the numerator")?;

        self.expect(Token::LBrace, "'{' opening the denominator")?;
        let denom_position = self.position();
        let denom_start = self.pos;
        let denom = self.parse_expr()?;
        let denom_end = self.pos;
        self.expect(Token::RBrace, "'}' closing the denominator")?;

        let Some((denom_negative, denom_text)) = signed_literal(&tokens[denom_start..denom_end])
        else {
            return Ok(Expr::div(numer, denom));
        };
        let zero = denom
            .as_number()
            .is_some_and(|d| d.is_zero());
        if denom_negative || !is_integer_literal(denom_text) || zero {
            return Err(ParseError::InvalidDenominator {
                position: denom_position,
            });
        }

        match signed_literal(&tokens[numer_start..numer_end]) {
            Some((negative, numer_text)) if is_integer_literal(numer_text) => Ok(Expr::Number(
                integer_fraction(numer_text, denom_text, negative, denom_position)?,
            )),
            _ => Ok(Expr::div(numer, denom)),
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Parse a surface string into an expression tree.
pub fn parse_latex(input: &str) -> Result<Expr, ParseError> {
    parse_latex_with_limit(input, DEFAULT_MAX_DEPTH)
}

/// Parse with an explicit recursion limit.
pub fn parse_latex_with_limit(input: &str, max_depth: usize) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::syntax(0, "expression"));
    }

    let mut parser = Parser::new(&tokens, input.len(), max_depth);
    let result = parser.parse_expr()?;

    // Ensure all tokens were consumed
    if let Some(tok) = parser.peek() {
        let expected = match tok {
            Token::RParen => "matching '(' for ')'",
            Token::RBrace => "matching '{' for '}'",
            _ => "operator",
        };
        return Err(ParseError::syntax(parser.position(), expected));
    }

    Ok(result)
}

/// Numerator and denominator of an input that is exactly one `\frac{n}{d}`
/// of unsigned integer literals.
pub fn literal_fraction(input: &str) -> Option<(BigInt, BigInt)> {
    let tokens = tokenize(input).ok()?;
    match tokens.as_slice() {
        [Spanned {
            token: Token::Frac,
            ..
        }, Spanned {
            token: Token::LBrace,
            ..
        }, Spanned {
            token: Token::Number(n),
            ..
        }, Spanned {
            token: Token::RBrace,
            ..
        }, Spanned {
            token: Token::LBrace,
            ..
        }, Spanned {
            token: Token::Number(d),
            ..
        }, Spanned {
            token: Token::RBrace,
            ..
        }] if is_integer_literal(n) && is_integer_literal(d) => {
            Some((n.parse().ok()?, d.parse().ok()?))
        }
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

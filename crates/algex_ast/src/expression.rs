//! Expression tree produced by the parser.

use crate::rational::Rational;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "\\times",
            BinOp::Div => "\\div",
        }
    }
}

/// Parsed expression tree. Built once per parse and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Number(Rational),
    Variable(String),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// Base raised to an integer exponent
    Power(Box<Expr>, i64),
    Negate(Box<Expr>),
    /// Explicit parentheses, kept for analysis and ignored by evaluation
    Group(Box<Expr>),
    Sqrt(Box<Expr>),
}

impl Expr {
    pub fn num(value: i64) -> Self {
        Expr::Number(Rational::from_integer(value))
    }

    pub fn var(name: &str) -> Self {
        Expr::Variable(name.to_string())
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Self::binary(BinOp::Add, left, right)
    }

    pub fn sub(left: Expr, right: Expr) -> Self {
        Self::binary(BinOp::Sub, left, right)
    }

    pub fn mul(left: Expr, right: Expr) -> Self {
        Self::binary(BinOp::Mul, left, right)
    }

    pub fn div(left: Expr, right: Expr) -> Self {
        Self::binary(BinOp::Div, left, right)
    }

    pub fn pow(base: Expr, exp: i64) -> Self {
        Expr::Power(Box::new(base), exp)
    }

    pub fn neg(inner: Expr) -> Self {
        Expr::Negate(Box::new(inner))
    }

    pub fn group(inner: Expr) -> Self {
        Expr::Group(Box::new(inner))
    }

    pub fn sqrt(inner: Expr) -> Self {
        Expr::Sqrt(Box::new(inner))
    }

    /// Skip any number of enclosing groups.
    pub fn ungrouped(&self) -> &Expr {
        let mut cur = self;
        while let Expr::Group(inner) = cur {
            cur = inner;
        }
        cur
    }

    pub fn as_number(&self) -> Option<&Rational> {
        match self.ungrouped() {
            Expr::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Depth of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable(_) => 1,
            Expr::Binary(_, l, r) => 1 + l.depth().max(r.depth()),
            Expr::Power(inner, _)
            | Expr::Negate(inner)
            | Expr::Group(inner)
            | Expr::Sqrt(inner) => 1 + inner.depth(),
        }
    }

    /// Whether any node satisfies `pred`.
    pub fn any(&self, pred: &dyn Fn(&Expr) -> bool) -> bool {
        if pred(self) {
            return true;
        }
        match self {
            Expr::Number(_) | Expr::Variable(_) => false,
            Expr::Binary(_, l, r) => l.any(pred) || r.any(pred),
            Expr::Power(inner, _)
            | Expr::Negate(inner)
            | Expr::Group(inner)
            | Expr::Sqrt(inner) => inner.any(pred),
        }
    }
}

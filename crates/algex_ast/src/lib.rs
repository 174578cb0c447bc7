pub mod error;
pub mod expression;
pub mod rational;

pub use error::RationalError;
pub use expression::{BinOp, Expr};
pub use rational::Rational;

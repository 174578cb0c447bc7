//! Exact, deterministic transformations over short algebraic expressions
//! written in LaTeX-flavoured surface syntax.
//!
//! ```ignore
//! use algex_engine::apply_operation;
//!
//! assert_eq!(apply_operation("expand", "2x(x+3)")?, "2x^{2}+6x");
//! ```

pub mod analysis;
pub mod engine;
pub mod error;
pub mod flatten;
pub mod options;
pub mod polynomial;
pub mod render;
pub mod solver;
pub mod transform;

pub use analysis::{AnalysisReport, BracketInfo, ExpressionType, FractionInfo, VariableInfo};
pub use engine::{analyze, apply_operation, check_operation_available, solve, Engine, Operation};
pub use error::{EngineError, Result};
pub use options::EngineOptions;
pub use polynomial::{Monomial, PolyBudget, Polynomial, Term};
pub use render::render;
pub use solver::{Archetype, Dispatcher, Recognition, Solution, SolutionStep};

pub use algex_ast::{Expr, Rational};

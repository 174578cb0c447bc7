//! Public entry points: named operations, analysis and worked solutions.

use std::fmt;
use std::str::FromStr;

use algex_parser::{tokenize, Token};

use crate::analysis::{
    self, analyze_brackets, analyze_fractions, has_like_terms, index_bases, is_index_chain,
    AnalysisReport,
};
use crate::error::{EngineError, Result};
use crate::flatten::collect_raw_terms;
use crate::options::EngineOptions;
use crate::solver::{Dispatcher, Solution};
use crate::transform::{self, decimal, number_calc};

/// Operations reachable through [`Engine::apply_operation`], keyed by a
/// stable name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Combine,
    Reduce,
    Expand,
    PrimeFactorize,
    SimplifyIndices,
    Normalize,
    DecimalFraction,
    SimplifyOneTerm,
    NumberCalculate,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::Combine,
        Operation::Reduce,
        Operation::Expand,
        Operation::PrimeFactorize,
        Operation::SimplifyIndices,
        Operation::Normalize,
        Operation::DecimalFraction,
        Operation::SimplifyOneTerm,
        Operation::NumberCalculate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Combine => "combine",
            Operation::Reduce => "reduce",
            Operation::Expand => "expand",
            Operation::PrimeFactorize => "prime-factorize",
            Operation::SimplifyIndices => "simplify-indices",
            Operation::Normalize => "normalize",
            Operation::DecimalFraction => "decimal-fraction",
            Operation::SimplifyOneTerm => "simplify-one-term",
            Operation::NumberCalculate => "number-calculate",
        }
    }
}

impl FromStr for Operation {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| EngineError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stateless apart from its budgets and the registered archetypes; safe to
/// share across threads.
pub struct Engine {
    options: EngineOptions,
    dispatcher: Dispatcher,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            options,
            dispatcher: Dispatcher::new(),
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Archetypes registered here are tried after the built-in ones.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    pub fn apply(&self, operation: Operation, input: &str) -> Result<String> {
        tracing::debug!(operation = operation.name(), input, "apply operation");
        let options = &self.options;
        match operation {
            Operation::Combine => transform::combine(input, options),
            Operation::Reduce => transform::reduce_fraction(input, options),
            Operation::Expand => transform::expand(input, options),
            Operation::PrimeFactorize => transform::prime_factorize(input, options),
            Operation::SimplifyIndices => transform::simplify_indices(input, options),
            Operation::Normalize => transform::normalize(input, options),
            Operation::DecimalFraction => {
                transform::convert_decimal(input).map(|c| c.to_latex())
            }
            Operation::SimplifyOneTerm => transform::simplify_one_term(input, options),
            Operation::NumberCalculate => transform::number_calculate(input, options),
        }
    }

    pub fn apply_operation(&self, operation_name: &str, input: &str) -> Result<String> {
        self.apply(operation_name.parse()?, input)
    }

    pub fn analyze(&self, input: &str) -> AnalysisReport {
        analysis::analyze(input, &self.options)
    }

    pub fn solve(&self, input: &str) -> Result<Solution> {
        self.dispatcher.solve(input, &self.options)
    }

    /// Whether `operation_name` would do something useful on `input`.
    /// Unknown operation names are never available.
    ///
    /// Only the text, tokens and parsed tree are inspected; no transform is
    /// run, so a check stays cheap on inputs the transform would reject as
    /// too complex.
    pub fn check_operation_available(&self, operation_name: &str, input: &str) -> bool {
        let Ok(operation) = operation_name.parse::<Operation>() else {
            return false;
        };
        let options = &self.options;
        let tree = || transform::parse(input, options);
        let available = match operation {
            Operation::Combine => tree()
                .and_then(|tree| collect_raw_terms(&tree, options))
                .is_ok_and(|terms| has_like_terms(&terms)),
            Operation::Reduce => {
                analyze_fractions(input, options.max_depth).has_fraction && tree().is_ok()
            }
            Operation::Expand => {
                let brackets = analyze_brackets(input);
                brackets.has_brackets() && brackets.balanced && tree().is_ok()
            }
            Operation::PrimeFactorize => self.is_factorable_literal(input),
            Operation::SimplifyIndices => tree().is_ok_and(|tree| is_index_chain(&tree, false)),
            Operation::Normalize => tree().is_ok(),
            Operation::DecimalFraction => decimal::is_decimal_literal(input),
            Operation::SimplifyOneTerm => tree()
                .is_ok_and(|tree| is_index_chain(&tree, true) && index_bases(&tree).len() <= 1),
            Operation::NumberCalculate => number_calc::is_calculation(input),
        };
        tracing::trace!(operation = operation.name(), available, "availability check");
        available
    }

    /// A lone integer literal in `2..=max_factor_input`.
    fn is_factorable_literal(&self, input: &str) -> bool {
        let Ok(tokens) = tokenize(input) else {
            return false;
        };
        match tokens.as_slice() {
            [only] => match &only.token {
                Token::Number(digits) => digits
                    .parse::<u64>()
                    .is_ok_and(|n| (2..=self.options.max_factor_input).contains(&n)),
                _ => false,
            },
            _ => false,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// [`Engine::apply_operation`] with default budgets.
pub fn apply_operation(operation_name: &str, input: &str) -> Result<String> {
    Engine::new().apply_operation(operation_name, input)
}

pub fn analyze(input: &str) -> AnalysisReport {
    Engine::new().analyze(input)
}

pub fn solve(input: &str) -> Result<Solution> {
    Engine::new().solve(input)
}

pub fn check_operation_available(operation_name: &str, input: &str) -> bool {
    Engine::new().check_operation_available(operation_name, input)
}

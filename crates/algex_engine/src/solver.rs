//! Worked solutions.
//!
//! A [`Dispatcher`] holds archetypes in priority order. The first archetype
//! whose matcher accepts the input produces the steps; new archetypes are
//! added with [`Dispatcher::register`] without touching existing ones.

pub mod fraction_reduction;

use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::options::EngineOptions;

pub use fraction_reduction::FractionReduction;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SolutionStep {
    pub description: String,
    /// What is done in this step, in surface syntax
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl SolutionStep {
    pub fn new(description: &str, operation: impl Into<String>, result: Option<String>) -> Self {
        Self {
            description: description.to_string(),
            operation: operation.into(),
            result,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub archetype: String,
    pub steps: Vec<SolutionStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_answer: Option<String>,
}

/// A problem shape the solver can explain step by step.
pub trait Archetype: Send + Sync {
    fn name(&self) -> &'static str;

    /// Cheap structural test; `solve` is only called after a match.
    fn matches(&self, input: &str) -> bool;

    fn solve(&self, input: &str, options: &EngineOptions) -> Result<Solution>;
}

pub enum Recognition<'d> {
    Unrecognized,
    Recognized(&'d dyn Archetype),
}

pub struct Dispatcher {
    archetypes: Vec<Box<dyn Archetype>>,
}

impl Dispatcher {
    /// Built-in archetypes.
    pub fn new() -> Self {
        let mut dispatcher = Self::empty();
        dispatcher.register(Box::new(FractionReduction));
        dispatcher
    }

    pub fn empty() -> Self {
        Self {
            archetypes: Vec::new(),
        }
    }

    /// Append with the lowest priority so far.
    pub fn register(&mut self, archetype: Box<dyn Archetype>) {
        self.archetypes.push(archetype);
    }

    pub fn archetype_names(&self) -> Vec<&'static str> {
        self.archetypes.iter().map(|a| a.name()).collect()
    }

    pub fn recognize(&self, input: &str) -> Recognition<'_> {
        match self.archetypes.iter().find(|a| a.matches(input)) {
            Some(archetype) => Recognition::Recognized(archetype.as_ref()),
            None => Recognition::Unrecognized,
        }
    }

    pub fn solve(&self, input: &str, options: &EngineOptions) -> Result<Solution> {
        match self.recognize(input) {
            Recognition::Recognized(archetype) => {
                tracing::debug!(archetype = archetype.name(), "recognized problem");
                archetype.solve(input, options)
            }
            Recognition::Unrecognized => {
                tracing::debug!(input, "no archetype matched");
                Err(EngineError::UnrecognizedProblemType)
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

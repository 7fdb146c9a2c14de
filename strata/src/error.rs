//! The single error returned when resolution fails.

use thiserror::Error;

use crate::problem::{
    ConstructionProblem, LoaderProblem, ProblemList, RequirementProblem, ValueProblem,
};

/// Errors that end a resolution attempt.
///
/// Every variant carries the complete list of problems found; a resolution
/// never fails with only part of them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolutionError {
    /// The catalog or loader list is inconsistent; no loader was run.
    #[error("configuration cannot be resolved; no loader was run:\n{0}")]
    Construction(Box<ProblemList>),

    /// Loading finished but produced loader, value or requirement problems.
    #[error("configuration is invalid:\n{0}")]
    Invalid(Box<ProblemList>),
}

impl ResolutionError {
    /// Every problem, in the order found.
    #[must_use]
    pub fn problems(&self) -> &ProblemList {
        match self {
            Self::Construction(problems) | Self::Invalid(problems) => problems,
        }
    }

    /// Problems with the catalog or loader list.
    pub fn construction_problems(&self) -> impl Iterator<Item = &ConstructionProblem> {
        self.problems().construction()
    }

    /// Problems reading sources.
    pub fn loader_problems(&self) -> impl Iterator<Item = &LoaderProblem> {
        self.problems().loader()
    }

    /// Explicit values rejected by validators.
    pub fn value_problems(&self) -> impl Iterator<Item = &ValueProblem> {
        self.problems().value()
    }

    /// Required properties left unset.
    pub fn requirement_problems(&self) -> impl Iterator<Item = &RequirementProblem> {
        self.problems().requirement()
    }
}

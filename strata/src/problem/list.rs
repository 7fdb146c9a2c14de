//! Ordered collection of problems found during one resolution.

use std::fmt;

use super::{
    ConstructionProblem, LoaderProblem, Problem, ProblemKind, RequirementProblem, ValueProblem,
};

/// Problems in the order they were found.
///
/// # Examples
///
/// ```
/// use strata::{PropertyId, ProblemKind, ProblemList, RequirementProblem};
///
/// let mut problems = ProblemList::default();
/// problems.push(RequirementProblem::RequiredPropertyMissing {
///     property: PropertyId::new("app", Vec::<String>::new(), "NAME"),
/// });
/// assert_eq!(problems.len(), 1);
/// assert_eq!(problems.of_kind(ProblemKind::Requirement).count(), 1);
/// assert!(problems.to_string().starts_with("1: required property 'app.NAME'"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProblemList(Vec<Problem>);

impl ProblemList {
    /// Create a list from problems already collected.
    #[must_use]
    pub const fn new(problems: Vec<Problem>) -> Self {
        Self(problems)
    }

    /// Append one problem of any kind.
    pub fn push(&mut self, problem: impl Into<Problem>) {
        self.0.push(problem.into());
    }

    /// Iterate over every problem.
    #[must_use = "iterators should be consumed to inspect problems"]
    pub fn iter(&self) -> std::slice::Iter<'_, Problem> {
        self.0.iter()
    }

    /// Number of problems.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no problem was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the problems of one kind.
    pub fn of_kind(&self, kind: ProblemKind) -> impl Iterator<Item = &Problem> {
        self.0.iter().filter(move |problem| problem.kind() == kind)
    }

    /// Construction problems, in order.
    pub fn construction(&self) -> impl Iterator<Item = &ConstructionProblem> {
        self.0.iter().filter_map(|problem| match problem {
            Problem::Construction(inner) => Some(inner),
            _ => None,
        })
    }

    /// Loader problems, in order.
    pub fn loader(&self) -> impl Iterator<Item = &LoaderProblem> {
        self.0.iter().filter_map(|problem| match problem {
            Problem::Loader(inner) => Some(inner),
            _ => None,
        })
    }

    /// Value problems, in order.
    pub fn value(&self) -> impl Iterator<Item = &ValueProblem> {
        self.0.iter().filter_map(|problem| match problem {
            Problem::Value(inner) => Some(inner),
            _ => None,
        })
    }

    /// Requirement problems, in order.
    pub fn requirement(&self) -> impl Iterator<Item = &RequirementProblem> {
        self.0.iter().filter_map(|problem| match problem {
            Problem::Requirement(inner) => Some(inner),
            _ => None,
        })
    }
}

impl fmt::Display for ProblemList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, problem) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {problem}", i + 1)?;
        }
        Ok(())
    }
}

impl<P: Into<Problem>> Extend<P> for ProblemList {
    fn extend<T: IntoIterator<Item = P>>(&mut self, iter: T) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl<P: Into<Problem>> FromIterator<P> for ProblemList {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a ProblemList {
    type Item = &'a Problem;
    type IntoIter = std::slice::Iter<'a, Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ProblemList {
    type Item = Problem;
    type IntoIter = std::vec::IntoIter<Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

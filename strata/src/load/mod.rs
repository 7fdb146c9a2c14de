//! Loaders read one external source each and turn its raw entries into
//! candidate property values.
//!
//! Loaders run one after another in the order the engine was configured
//! with. Each receives a [`LoadRequest`] exposing the catalog, the naming
//! index and the values supplied by the loaders before it, and returns its
//! findings as [`LoaderValues`]. Loaders never fail outright: unreadable
//! sources, unknown keys and unparsable values are recorded as
//! [`LoaderProblem`]s alongside whatever could be read.
//!
//! Most loaders produce `key → raw text` pairs; [`PairCollector`] implements
//! the shared matching, trimming and parsing rules for them.

mod collect;
mod command_line;
mod directory;
mod environment;
mod file;
mod fixed;
mod system;

use std::fmt;

use serde::Serialize;

use crate::{Catalog, LoaderProblem, NamingIndex, PropValue, PropertyId, ResolutionContext};

pub use collect::PairCollector;
pub use command_line::CommandLineLoader;
pub use directory::{Binding, DirectoryError, DirectoryLoader, DirectorySource, StaticDirectory};
pub use environment::EnvironmentLoader;
pub use file::{FileLoader, FileSource};
pub use fixed::FixedValueLoader;
pub use system::SystemPropertiesLoader;

/// Identity of a loader; two loaders in one engine may not share it.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LoaderId(String);

impl LoaderId {
    /// Creates an identity.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LoaderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LoaderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Strategy reading one external source.
///
/// Implementations hold no state between calls; everything a load needs comes
/// from the loader's own configuration and the [`LoadRequest`].
pub trait Loader: fmt::Debug + Send + Sync {
    /// Identity of the loader, used for provenance and duplicate detection.
    fn id(&self) -> LoaderId;

    /// Whether keys that name no property are reported as problems.
    fn unknown_key_is_problem(&self) -> bool;

    /// Reads the source.
    fn load(&self, request: &LoadRequest<'_>) -> LoaderValues;
}

/// Read-only inputs available to a loader.
#[derive(Clone, Copy, Debug)]
pub struct LoadRequest<'a> {
    catalog: &'a Catalog,
    names: &'a NamingIndex,
    so_far: &'a ResolutionContext,
}

impl<'a> LoadRequest<'a> {
    /// Bundles the inputs for one loader run.
    #[must_use]
    pub const fn new(
        catalog: &'a Catalog,
        names: &'a NamingIndex,
        so_far: &'a ResolutionContext,
    ) -> Self {
        Self {
            catalog,
            names,
            so_far,
        }
    }

    /// Declared properties.
    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Names of the declared properties.
    #[must_use]
    pub const fn names(&self) -> &'a NamingIndex {
        self.names
    }

    /// Values supplied by the loaders that ran earlier.
    #[must_use]
    pub const fn so_far(&self) -> &'a ResolutionContext {
        self.so_far
    }

    /// Starts collecting raw pairs on behalf of `loader`.
    #[must_use]
    pub fn collector(&self, loader: &dyn Loader) -> PairCollector<'a> {
        PairCollector::new(self.catalog, self.names, loader)
    }
}

/// One property mentioned by a loader.
#[derive(Clone, Debug)]
pub struct LoaderEntry {
    property: PropertyId,
    value: Option<PropValue>,
    problem: Option<LoaderProblem>,
}

impl LoaderEntry {
    /// Property the entry is for.
    #[must_use]
    pub const fn property(&self) -> &PropertyId {
        &self.property
    }

    /// Parsed value; `None` for an explicit null or a failed parse.
    #[must_use]
    pub const fn value(&self) -> Option<&PropValue> {
        self.value.as_ref()
    }

    /// Problem that prevented the value from being used.
    #[must_use]
    pub const fn problem(&self) -> Option<&LoaderProblem> {
        self.problem.as_ref()
    }

    /// Returns `true` when the entry sets the property, possibly to null.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        self.problem.is_none()
    }
}

/// Everything one loader found in its source.
#[derive(Clone, Debug)]
pub struct LoaderValues {
    loader: LoaderId,
    entries: Vec<LoaderEntry>,
    problems: Vec<LoaderProblem>,
}

impl LoaderValues {
    /// Starts an empty result for `loader`.
    #[must_use]
    pub const fn new(loader: LoaderId) -> Self {
        Self {
            loader,
            entries: Vec::new(),
            problems: Vec::new(),
        }
    }

    /// Records an explicit value, `None` meaning explicit null.
    pub fn push_value(&mut self, property: PropertyId, value: Option<PropValue>) {
        self.entries.push(LoaderEntry {
            property,
            value,
            problem: None,
        });
    }

    /// Records a property the loader found but could not use.
    pub fn push_failed(&mut self, property: PropertyId, problem: LoaderProblem) {
        self.entries.push(LoaderEntry {
            property,
            value: None,
            problem: Some(problem),
        });
    }

    /// Records a problem not tied to an entry.
    pub fn push_problem(&mut self, problem: LoaderProblem) {
        self.problems.push(problem);
    }

    /// Loader that produced the values.
    #[must_use]
    pub const fn loader(&self) -> &LoaderId {
        &self.loader
    }

    /// Entries in the order they were found.
    #[must_use]
    pub fn entries(&self) -> &[LoaderEntry] {
        &self.entries
    }

    /// Explicit entries as property and value pairs.
    pub fn explicit(&self) -> impl Iterator<Item = (&PropertyId, Option<&PropValue>)> {
        self.entries
            .iter()
            .filter(|entry| entry.is_explicit())
            .map(|entry| (&entry.property, entry.value.as_ref()))
    }

    /// Returns `true` when an entry, failed or not, mentions `property`.
    #[must_use]
    pub fn mentions(&self, property: &PropertyId) -> bool {
        self.entries.iter().any(|entry| &entry.property == property)
    }

    /// Returns `true` when the loader set `property`, possibly to null.
    #[must_use]
    pub fn is_explicit(&self, property: &PropertyId) -> bool {
        self.explicit().any(|(id, _)| id == property)
    }

    /// Every problem: those of failed entries first, then the rest.
    pub fn problems(&self) -> impl Iterator<Item = &LoaderProblem> {
        self.entries
            .iter()
            .filter_map(LoaderEntry::problem)
            .chain(&self.problems)
    }
}

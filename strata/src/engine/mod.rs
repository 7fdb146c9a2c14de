//! The resolution engine and its builder.

mod construction;
mod resolve;

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
#[cfg(any(test, feature = "test-support"))]
use tracing::debug;

use crate::load::{CommandLineLoader, EnvironmentLoader, Loader};
use crate::{CaseInsensitiveNaming, Catalog, NamingStrategy, StrataResult, ValueMap};

type Outcome = StrataResult<Arc<ValueMap>>;

/// Resolves a catalog against an ordered list of loaders, once.
///
/// The first call to [`Engine::values`] runs resolution; every later call,
/// from any thread, observes the same outcome, whether success or failure.
/// Concurrent first calls wait for a single resolution rather than racing.
///
/// # Examples
///
/// ```
/// use strata::load::FixedValueLoader;
/// use strata::{Catalog, Declaration, Engine, PropertyId, PropertySpec, ValueType};
///
/// let name = PropertyId::new("app", Vec::<String>::new(), "NAME");
/// let catalog = Catalog::new(vec![Declaration::new(
///     name.clone(),
///     PropertySpec::builder(ValueType::Str).required().build(),
/// )]);
///
/// let engine = Engine::builder(catalog).build();
/// let error = engine.values().expect_err("NAME is required");
/// assert_eq!(error.requirement_problems().count(), 1);
/// assert!(engine.is_resolved());
/// ```
pub struct Engine {
    catalog: Arc<Catalog>,
    naming: Arc<dyn NamingStrategy>,
    loaders: Mutex<Vec<Arc<dyn Loader>>>,
    outcome: ArcSwapOption<Outcome>,
}

impl Engine {
    /// Starts configuring an engine for `catalog`.
    #[must_use]
    pub fn builder(catalog: Catalog) -> EngineBuilder {
        EngineBuilder {
            catalog,
            naming: Arc::new(CaseInsensitiveNaming),
            loaders: Vec::new(),
        }
    }

    /// Resolved values, resolving on first use.
    ///
    /// # Errors
    ///
    /// Returns the shared [`ResolutionError`](crate::ResolutionError) when the
    /// configuration is inconsistent or invalid. The same error is returned to
    /// every caller.
    pub fn values(&self) -> Outcome {
        if let Some(outcome) = self.outcome.load_full() {
            return Outcome::clone(&outcome);
        }
        let loaders = self.loaders.lock();
        if let Some(outcome) = self.outcome.load_full() {
            return Outcome::clone(&outcome);
        }
        let outcome = resolve::run(&self.catalog, &self.naming, &loaders);
        self.outcome.store(Some(Arc::new(outcome.clone())));
        outcome
    }

    /// Same as [`Engine::values`].
    ///
    /// # Errors
    ///
    /// See [`Engine::values`].
    pub fn resolve(&self) -> Outcome {
        self.values()
    }

    /// Published outcome, without resolving.
    #[must_use]
    pub fn current(&self) -> Option<Outcome> {
        self.outcome
            .load_full()
            .map(|outcome| Outcome::clone(&outcome))
    }

    /// Returns `true` once an outcome has been published.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.outcome.load().is_some()
    }

    /// Catalog the engine resolves.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolves again and replaces the published outcome.
    ///
    /// With `Some(loaders)` the new list replaces the configured one first.
    /// Readers holding the previous [`ValueMap`] keep it; new readers see the
    /// new outcome only once it is complete.
    ///
    /// # Errors
    ///
    /// Returns the new [`ResolutionError`](crate::ResolutionError) when the
    /// configuration is inconsistent or invalid; it is published as well.
    #[cfg(any(test, feature = "test-support"))]
    pub fn rebuild(&self, loaders: Option<Vec<Arc<dyn Loader>>>) -> Outcome {
        let mut current = self.loaders.lock();
        if let Some(replacement) = loaders {
            *current = replacement;
        }
        debug!(loaders = current.len(), "rebuilding configuration");
        let outcome = resolve::run(&self.catalog, &self.naming, &current);
        self.outcome.store(Some(Arc::new(outcome.clone())));
        outcome
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("properties", &self.catalog.len())
            .field("naming", &self.naming)
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}

/// Configures an [`Engine`].
#[derive(Debug)]
#[must_use]
pub struct EngineBuilder {
    catalog: Catalog,
    naming: Arc<dyn NamingStrategy>,
    loaders: Vec<Arc<dyn Loader>>,
}

impl EngineBuilder {
    /// Replaces the default [`CaseInsensitiveNaming`].
    pub fn naming(mut self, naming: impl NamingStrategy + 'static) -> Self {
        self.naming = Arc::new(naming);
        self
    }

    /// Appends a loader; earlier loaders take precedence.
    pub fn loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loaders.push(Arc::new(loader));
        self
    }

    /// Appends a loader shared with other components.
    pub fn shared_loader(mut self, loader: Arc<dyn Loader>) -> Self {
        self.loaders.push(loader);
        self
    }

    /// Appends the command line, from `args`, followed by the process
    /// environment.
    pub fn with_standard_loaders<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.loader(CommandLineLoader::new(args))
            .loader(EnvironmentLoader::from_process())
    }

    /// Builds the engine; nothing is resolved until values are requested.
    pub fn build(self) -> Engine {
        Engine {
            catalog: Arc::new(self.catalog),
            naming: self.naming,
            loaders: Mutex::new(self.loaders),
            outcome: ArcSwapOption::empty(),
        }
    }
}

#[cfg(test)]
mod tests;

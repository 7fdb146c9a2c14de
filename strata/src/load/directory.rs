//! Values from a naming directory.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::{LoadRequest, Loader, LoaderId, LoaderValues};

/// One name bound in a directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Binding {
    /// Full name of the binding, including any root prefix.
    pub name: String,
    /// Bound text; `None` when the binding holds no value.
    pub value: Option<String>,
}

/// Failure listing the bindings of a directory.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct DirectoryError {
    message: String,
}

impl DirectoryError {
    /// Creates an error with the given description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Access to a hierarchical name service such as JNDI or a key-value store.
pub trait DirectorySource: fmt::Debug + Send + Sync {
    /// Name of the directory used in problem reports.
    fn name(&self) -> String;

    /// Every binding currently visible.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] when the directory cannot be reached.
    fn bindings(&self) -> Result<Vec<Binding>, DirectoryError>;
}

/// An in-memory directory.
#[derive(Clone, Debug, Default)]
pub struct StaticDirectory {
    name: String,
    bindings: Vec<Binding>,
}

impl StaticDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: Vec::new(),
        }
    }

    /// Binds text to `name`.
    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.bindings.push(Binding {
            name: name.into(),
            value: Some(value.into()),
        });
        self
    }

    /// Binds `name` to nothing.
    #[must_use]
    pub fn bind_empty(mut self, name: impl Into<String>) -> Self {
        self.bindings.push(Binding {
            name: name.into(),
            value: None,
        });
        self
    }
}

impl DirectorySource for StaticDirectory {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn bindings(&self) -> Result<Vec<Binding>, DirectoryError> {
        Ok(self.bindings.clone())
    }
}

/// Reads bindings below a set of root prefixes.
///
/// A binding is considered when its name starts with one of the roots; the
/// root is stripped and the rest is matched against property names, then
/// against their URI forms. Bindings outside every root are ignored. With no
/// roots configured every binding is considered. Inside the roots, unknown
/// names are problems.
///
/// # Examples
///
/// ```
/// use strata::load::{DirectoryLoader, Loader, StaticDirectory};
///
/// let directory = StaticDirectory::new("jndi").bind("java:comp/env/app/Server/PORT", "80");
/// let loader = DirectoryLoader::new(directory).with_roots(["java:comp/env/"]);
/// assert_eq!(loader.id().as_str(), "directory:jndi");
/// ```
#[derive(Clone, Debug)]
pub struct DirectoryLoader {
    id: LoaderId,
    source: Arc<dyn DirectorySource>,
    roots: Vec<String>,
    unknown_is_problem: bool,
}

impl DirectoryLoader {
    /// Reads `source`; the identity is `directory:` followed by its name.
    #[must_use]
    pub fn new(source: impl DirectorySource + 'static) -> Self {
        Self::shared(Arc::new(source))
    }

    /// Reads a source shared with other components.
    #[must_use]
    pub fn shared(source: Arc<dyn DirectorySource>) -> Self {
        Self {
            id: LoaderId::new(format!("directory:{}", source.name())),
            source,
            roots: Vec::new(),
            unknown_is_problem: true,
        }
    }

    /// Restricts the loader to bindings under `roots`.
    #[must_use]
    pub fn with_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the loader identity.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<LoaderId>) -> Self {
        self.id = id.into();
        self
    }

    /// Controls whether unknown names are reported as problems.
    #[must_use]
    pub const fn report_unknown_keys(mut self, report: bool) -> Self {
        self.unknown_is_problem = report;
        self
    }

    fn relative<'n>(&self, name: &'n str) -> Option<&'n str> {
        if self.roots.is_empty() {
            return Some(name);
        }
        self.roots
            .iter()
            .find_map(|root| name.strip_prefix(root.as_str()))
            .filter(|rest| !rest.is_empty())
    }
}

impl Loader for DirectoryLoader {
    fn id(&self) -> LoaderId {
        self.id.clone()
    }

    fn unknown_key_is_problem(&self) -> bool {
        self.unknown_is_problem
    }

    fn load(&self, request: &LoadRequest<'_>) -> LoaderValues {
        let mut collector = request.collector(self);
        match self.source.bindings() {
            Ok(bindings) => {
                for binding in &bindings {
                    if let Some(key) = self.relative(&binding.name) {
                        collector.offer_uri(key, binding.value.as_deref());
                    }
                }
            }
            Err(error) => collector.source_problem(self.source.name(), &error),
        }
        collector.finish()
    }
}

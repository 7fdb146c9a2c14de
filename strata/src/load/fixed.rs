//! Values fixed by the application itself.

use super::{LoadRequest, Loader, LoaderId, LoaderValues};
use crate::{PropValue, PropertyId};

#[derive(Clone, Debug)]
enum Fixed {
    Typed(PropertyId, Option<PropValue>),
    Raw(String, String),
}

/// Supplies values set in code, typically as the last loader so that they
/// act as application-level defaults, or first to pin values in tests.
///
/// Typed values bypass string parsing but must still match the property's
/// value type. Every entry must name a declared property.
///
/// # Examples
///
/// ```
/// use strata::load::{FixedValueLoader, Loader};
/// use strata::PropertyId;
///
/// let port = PropertyId::new("app.Server", Vec::<String>::new(), "PORT");
/// let loader = FixedValueLoader::new().value(port, 8080).raw("app.Server.HOST", "localhost");
/// assert_eq!(loader.id().as_str(), "fixed");
/// ```
#[derive(Clone, Debug)]
pub struct FixedValueLoader {
    id: LoaderId,
    entries: Vec<Fixed>,
}

impl FixedValueLoader {
    /// Identity used unless [`FixedValueLoader::with_id`] overrides it.
    pub const DEFAULT_ID: &'static str = "fixed";

    /// Starts with no values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: LoaderId::new(Self::DEFAULT_ID),
            entries: Vec::new(),
        }
    }

    /// Replaces the loader identity.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<LoaderId>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets `property` to a typed value.
    #[must_use]
    pub fn value(mut self, property: PropertyId, value: impl Into<PropValue>) -> Self {
        let typed: PropValue = value.into();
        self.entries.push(Fixed::Typed(property, Some(typed)));
        self
    }

    /// Sets `property` to an explicit null.
    #[must_use]
    pub fn null(mut self, property: PropertyId) -> Self {
        self.entries.push(Fixed::Typed(property, None));
        self
    }

    /// Sets the property matching `name` to raw text, parsed as any loader
    /// would parse it.
    #[must_use]
    pub fn raw(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push(Fixed::Raw(name.into(), value.into()));
        self
    }
}

impl Default for FixedValueLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for FixedValueLoader {
    fn id(&self) -> LoaderId {
        self.id.clone()
    }

    fn unknown_key_is_problem(&self) -> bool {
        true
    }

    fn load(&self, request: &LoadRequest<'_>) -> LoaderValues {
        let mut collector = request.collector(self);
        for entry in &self.entries {
            match entry {
                Fixed::Typed(property, value) => collector.offer_value(
                    property.clone(),
                    &property.canonical_name(),
                    value.clone(),
                ),
                Fixed::Raw(name, raw) => collector.offer(name, Some(raw)),
            }
        }
        collector.finish()
    }
}

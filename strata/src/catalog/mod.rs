//! Declared properties and the catalog that holds them.
//!
//! The catalog is assembled by whoever discovers declarations (a build
//! script, a registry, or hand-written code) and is read-only afterwards.

mod spec;

use std::collections::HashMap;
use std::fmt;

pub use spec::{Aliases, PropertySpec, PropertySpecBuilder};

/// Stable identity of a declared property.
///
/// Ordering follows the owner path, then the inner path segments, then the
/// field name, which is also the catalog's iteration order.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PropertyId {
    owner: String,
    inner_path: Vec<String>,
    field: String,
}

impl PropertyId {
    /// Creates an identity from the owning group's canonical path, the nested
    /// path segments below it and the field name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::PropertyId;
    ///
    /// let id = PropertyId::new("org.acme.Server", ["tls"], "CERT");
    /// assert_eq!(id.canonical_name(), "org.acme.Server.tls.CERT");
    /// ```
    #[must_use]
    pub fn new<I, S>(owner: impl Into<String>, inner_path: I, field: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owner: owner.into(),
            inner_path: inner_path.into_iter().map(Into::into).collect(),
            field: field.into(),
        }
    }

    /// Canonical path of the group owning the property.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Nested path segments between the owner and the field.
    #[must_use]
    pub fn inner_path(&self) -> &[String] {
        &self.inner_path
    }

    /// Field name of the property.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Owner path and inner segments joined with `.`.
    #[must_use]
    pub fn declaration_path(&self) -> String {
        std::iter::once(self.owner.as_str())
            .chain(self.inner_path.iter().map(String::as_str))
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Declaration path followed by the field name.
    #[must_use]
    pub fn canonical_name(&self) -> String {
        let path = self.declaration_path();
        if path.is_empty() {
            self.field.clone()
        } else {
            format!("{path}.{}", self.field)
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

/// One declared property: its identity and its specification.
#[derive(Clone, Debug)]
pub struct Declaration {
    id: PropertyId,
    spec: PropertySpec,
}

impl Declaration {
    /// Pairs an identity with its specification.
    #[must_use]
    pub const fn new(id: PropertyId, spec: PropertySpec) -> Self {
        Self { id, spec }
    }

    /// Identity of the declared property.
    #[must_use]
    pub const fn id(&self) -> &PropertyId {
        &self.id
    }

    /// Specification of the declared property.
    #[must_use]
    pub const fn spec(&self) -> &PropertySpec {
        &self.spec
    }
}

/// Every declared property, sorted by identity.
///
/// Duplicate identities are retained so that the engine can report them; the
/// first declaration of an identity is the one lookups return.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    declarations: Vec<Declaration>,
    index: HashMap<PropertyId, usize>,
}

impl Catalog {
    /// Builds a catalog from declarations in any order.
    #[must_use]
    pub fn new(mut declarations: Vec<Declaration>) -> Self {
        declarations.sort_by(|a, b| a.id.cmp(&b.id));
        let mut index = HashMap::with_capacity(declarations.len());
        for (position, declaration) in declarations.iter().enumerate() {
            index.entry(declaration.id.clone()).or_insert(position);
        }
        Self {
            declarations,
            index,
        }
    }

    /// Iterates over every declaration in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    /// Specification declared for `id`.
    #[must_use]
    pub fn get(&self, id: &PropertyId) -> Option<&PropertySpec> {
        self.index
            .get(id)
            .and_then(|&position| self.declarations.get(position))
            .map(Declaration::spec)
    }

    /// Returns `true` when `id` is declared.
    #[must_use]
    pub fn contains(&self, id: &PropertyId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of declarations, duplicates included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` when nothing is declared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Identities declared more than once, once per extra declaration.
    #[must_use]
    pub fn duplicates(&self) -> Vec<&PropertyId> {
        self.declarations
            .windows(2)
            .filter_map(|pair| match pair {
                [first, second] if first.id == second.id => Some(&second.id),
                _ => None,
            })
            .collect()
    }
}

impl FromIterator<Declaration> for Catalog {
    fn from_iter<T: IntoIterator<Item = Declaration>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

//! Canonical names, aliases and the normalisation used to match them.
//!
//! Every property has one canonical name derived from its identity plus any
//! aliases it declares. A [`NamingStrategy`] turns each of those into a
//! [`Name`] whose *effective* forms are used only to match keys found in
//! sources; the actual name is what reports and exports show.

mod index;

use std::fmt;

use thiserror::Error;

use crate::{PropertyId, PropertySpec};

pub use index::NamingIndex;

/// A property name and the forms used to match it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Name {
    actual: String,
    effective_in: String,
    effective_out: String,
}

impl Name {
    /// Name as declared.
    #[must_use]
    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// Normalised form compared against keys read from sources.
    #[must_use]
    pub fn effective_in(&self) -> &str {
        &self.effective_in
    }

    /// Form used when exporting values.
    #[must_use]
    pub fn effective_out(&self) -> &str {
        &self.effective_out
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.actual)
    }
}

/// Canonical name and aliases of one property.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyNaming {
    canonical: Name,
    in_aliases: Vec<Name>,
    out_aliases: Vec<Name>,
}

impl PropertyNaming {
    /// Canonical name derived from the property identity.
    #[must_use]
    pub const fn canonical(&self) -> &Name {
        &self.canonical
    }

    /// Aliases recognised when reading sources.
    #[must_use]
    pub fn in_aliases(&self) -> &[Name] {
        &self.in_aliases
    }

    /// Aliases used when exporting values.
    #[must_use]
    pub fn out_aliases(&self) -> &[Name] {
        &self.out_aliases
    }

    /// Canonical name followed by every in-alias.
    pub fn inbound(&self) -> impl Iterator<Item = &Name> {
        std::iter::once(&self.canonical).chain(&self.in_aliases)
    }

    /// Canonical name followed by every out-alias.
    pub fn outbound(&self) -> impl Iterator<Item = &Name> {
        std::iter::once(&self.canonical).chain(&self.out_aliases)
    }
}

/// Policy turning declared identities into names and matching keys.
pub trait NamingStrategy: fmt::Debug + Send + Sync {
    /// Normalises a name or source key for matching.
    fn normalize(&self, name: &str) -> String;

    /// Builds a [`Name`] from a declared name.
    fn name(&self, actual: &str) -> Name {
        Name {
            actual: actual.to_owned(),
            effective_in: self.normalize(actual),
            effective_out: actual.to_owned(),
        }
    }

    /// Builds the canonical name and aliases of the property `id`.
    fn build_names(&self, spec: &PropertySpec, id: &PropertyId) -> PropertyNaming {
        PropertyNaming {
            canonical: self.name(&id.canonical_name()),
            in_aliases: spec.aliases().inbound().map(|a| self.name(a)).collect(),
            out_aliases: spec.aliases().outbound().map(|a| self.name(a)).collect(),
        }
    }
}

/// Matches names regardless of case by upper-casing them.
///
/// # Examples
///
/// ```rust
/// use strata::{CaseInsensitiveNaming, NamingStrategy};
///
/// let name = CaseInsensitiveNaming.name("app.Server.port");
/// assert_eq!(name.effective_in(), "APP.SERVER.PORT");
/// assert_eq!(name.effective_out(), "app.Server.port");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CaseInsensitiveNaming;

impl NamingStrategy for CaseInsensitiveNaming {
    fn normalize(&self, name: &str) -> String {
        name.to_uppercase()
    }
}

/// Matches names exactly as declared.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaseSensitiveNaming;

impl NamingStrategy for CaseSensitiveNaming {
    fn normalize(&self, name: &str) -> String {
        name.to_owned()
    }
}

/// Reason a name cannot be used.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum IllegalName {
    /// The name is empty.
    #[error("the name is empty")]
    Empty,
    /// The name contains whitespace.
    #[error("names may not contain whitespace")]
    Whitespace,
    /// The name contains a reserved character.
    #[error("names may not contain '{0}'")]
    Reserved(char),
    /// The name begins or ends with a dot.
    #[error("names may not begin or end with '.'")]
    EdgeDot,
}

const RESERVED: [char; 3] = ['=', '?', '/'];

/// Checks that `name` can be used as a property name or alias.
///
/// # Errors
///
/// Returns the first rule the name breaks.
///
/// # Examples
///
/// ```rust
/// use strata::{IllegalName, check_name};
///
/// assert!(check_name("app.port").is_ok());
/// assert_eq!(check_name("a b"), Err(IllegalName::Whitespace));
/// assert_eq!(check_name("a=b"), Err(IllegalName::Reserved('=')));
/// assert_eq!(check_name(".a"), Err(IllegalName::EdgeDot));
/// ```
pub fn check_name(name: &str) -> Result<(), IllegalName> {
    if name.is_empty() {
        return Err(IllegalName::Empty);
    }
    if name.chars().any(char::is_whitespace) {
        return Err(IllegalName::Whitespace);
    }
    if let Some(reserved) = name.chars().find(|c| RESERVED.contains(c)) {
        return Err(IllegalName::Reserved(reserved));
    }
    if name.starts_with('.') || name.ends_with('.') {
        return Err(IllegalName::EdgeDot);
    }
    Ok(())
}

/// Projects a dotted name into a URI-safe path by replacing `.` with `/`.
///
/// `None` and the empty string pass through unchanged.
///
/// # Examples
///
/// ```rust
/// use strata::uri_name;
///
/// assert_eq!(uri_name(Some("a.b.C")), Some("a/b/C".to_owned()));
/// assert_eq!(uri_name(Some("")), Some(String::new()));
/// assert_eq!(uri_name(None), None);
/// ```
#[must_use]
pub fn uri_name(name: Option<&str>) -> Option<String> {
    name.map(|n| n.replace('.', "/"))
}

#[cfg(test)]
mod tests;

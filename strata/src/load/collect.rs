//! Shared handling of `key → raw text` pairs.

use std::error::Error;

use tracing::trace;

use super::{LoaderId, LoaderValues};
use crate::{Catalog, LoaderProblem, NamingIndex, PropValue, PropertyId, ValueType};

/// Turns the raw pairs of one loader into [`LoaderValues`].
///
/// Keys are matched through the naming index; values are trimmed with the
/// property's trimmer and parsed to its value type. A trimmed-away value is an
/// explicit null, except for flags, where it means `true`. A property set a
/// second time keeps its first value and the repeat is reported.
#[derive(Debug)]
pub struct PairCollector<'a> {
    catalog: &'a Catalog,
    names: &'a NamingIndex,
    unknown_is_problem: bool,
    values: LoaderValues,
}

impl<'a> PairCollector<'a> {
    pub(crate) fn new(
        catalog: &'a Catalog,
        names: &'a NamingIndex,
        loader: &dyn super::Loader,
    ) -> Self {
        Self {
            catalog,
            names,
            unknown_is_problem: loader.unknown_key_is_problem(),
            values: LoaderValues::new(loader.id()),
        }
    }

    /// Offers a pair whose key is matched by name.
    pub fn offer(&mut self, key: &str, raw: Option<&str>) {
        let names = self.names;
        match names.match_name(key) {
            Some(property) => self.offer_for(property.clone(), key, raw),
            None => self.unknown(key),
        }
    }

    /// Offers a pair whose key is matched by name, then by URI name.
    pub fn offer_uri(&mut self, key: &str, raw: Option<&str>) {
        let names = self.names;
        match names.match_name(key).or_else(|| names.match_uri_name(key)) {
            Some(property) => self.offer_for(property.clone(), key, raw),
            None => self.unknown(key),
        }
    }

    /// Offers raw text for a property already identified.
    pub fn offer_for(&mut self, property: PropertyId, key: &str, raw: Option<&str>) {
        let catalog = self.catalog;
        let Some(spec) = catalog.get(&property) else {
            self.unknown(key);
            return;
        };
        if self.repeated(&property, key) {
            return;
        }
        let value_type = spec.value_type();
        let parsed = match raw.and_then(|text| spec.trimmer().trim(text)) {
            None if value_type == ValueType::Flag => Ok(Some(PropValue::Bool(true))),
            None => Ok(None),
            Some(text) => value_type.parse(text).map(Some),
        };
        match parsed {
            Ok(value) => self.values.push_value(property, value),
            Err(error) => {
                let problem = LoaderProblem::StringConversion {
                    loader: self.loader().clone(),
                    property: property.clone(),
                    error,
                };
                self.values.push_failed(property, problem);
            }
        }
    }

    /// Offers an already typed value, `None` meaning explicit null.
    pub fn offer_value(&mut self, property: PropertyId, key: &str, value: Option<PropValue>) {
        let catalog = self.catalog;
        let Some(spec) = catalog.get(&property) else {
            self.unknown(key);
            return;
        };
        if self.repeated(&property, key) {
            return;
        }
        let expected = spec.value_type();
        match value.map(|v| expected.coerce(v)) {
            Some(value) if !expected.accepts(&value) => {
                let problem = LoaderProblem::TypeMismatch {
                    loader: self.loader().clone(),
                    property: property.clone(),
                    value,
                    expected,
                };
                self.values.push_failed(property, problem);
            }
            value => self.values.push_value(property, value),
        }
    }

    /// Notes a key that names no property.
    pub fn unknown(&mut self, key: &str) {
        if self.unknown_is_problem {
            let problem = LoaderProblem::UnknownName {
                loader: self.loader().clone(),
                name: key.to_owned(),
            };
            self.values.push_problem(problem);
        } else {
            trace!(loader = %self.loader(), key, "ignoring unknown key");
        }
    }

    /// Reports a value whose shape cannot be mapped to a property.
    pub fn unsupported(&mut self, key: &str, message: impl Into<String>) {
        let problem = LoaderProblem::UnsupportedValue {
            loader: self.loader().clone(),
            key: key.to_owned(),
            message: message.into(),
        };
        self.values.push_problem(problem);
    }

    /// Reports that the source could not be read.
    ///
    /// The error's message becomes the problem's description.
    pub fn source_problem(&mut self, source_name: impl Into<String>, error: &dyn Error) {
        let problem = LoaderProblem::SourceUnreadable {
            loader: self.loader().clone(),
            source_name: source_name.into(),
            message: error.to_string(),
        };
        self.values.push_problem(problem);
    }

    /// Identity of the loader the pairs belong to.
    #[must_use]
    pub const fn loader(&self) -> &LoaderId {
        self.values.loader()
    }

    /// Finishes collection.
    #[must_use]
    pub fn finish(self) -> LoaderValues {
        self.values
    }

    fn repeated(&mut self, property: &PropertyId, key: &str) -> bool {
        if !self.values.mentions(property) {
            return false;
        }
        let problem = LoaderProblem::DuplicateValue {
            loader: self.loader().clone(),
            property: property.clone(),
            name: key.to_owned(),
        };
        self.values.push_problem(problem);
        true
    }
}

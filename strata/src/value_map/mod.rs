//! Immutable snapshot of resolved values.

use std::collections::{HashMap, HashSet};
use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::load::{LoaderId, LoaderValues};
use crate::{Catalog, NamingIndex, PropValue, PropertyId};

/// One loader's explicit value for a property.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Provenance {
    /// Loader that supplied the value.
    pub loader: LoaderId,
    /// Value supplied, `None` for an explicit null.
    pub value: Option<PropValue>,
}

/// Resolved configuration values.
///
/// The map holds, for every property some loader set explicitly, the value of
/// the first loader in configured order plus the values later loaders supplied
/// for provenance. Properties nobody set fall back to their defaults. An
/// explicit null counts as set and hides the default.
///
/// A `ValueMap` is never modified after the engine publishes it, so it can be
/// shared freely between threads.
#[derive(Debug)]
pub struct ValueMap {
    catalog: Arc<Catalog>,
    names: Arc<NamingIndex>,
    supplied: HashMap<PropertyId, Vec<Provenance>>,
}

impl ValueMap {
    pub(crate) fn new(catalog: Arc<Catalog>, names: Arc<NamingIndex>) -> Self {
        Self {
            catalog,
            names,
            supplied: HashMap::new(),
        }
    }

    /// Records the explicit entries of one loader behind any earlier ones.
    fn record(&mut self, values: &LoaderValues) {
        for (property, value) in values.explicit() {
            self.supplied
                .entry(property.clone())
                .or_default()
                .push(Provenance {
                    loader: values.loader().clone(),
                    value: value.cloned(),
                });
        }
    }

    /// The winning explicit value, `None` when unset or explicitly null.
    #[must_use]
    pub fn explicit_value(&self, id: &PropertyId) -> Option<&PropValue> {
        self.winner(id).and_then(|winner| winner.value.as_ref())
    }

    /// Returns `true` when some loader set the property, even to null.
    #[must_use]
    pub fn is_explicitly_set(&self, id: &PropertyId) -> bool {
        self.winner(id).is_some()
    }

    /// The explicit value when set, otherwise the declared default.
    #[must_use]
    pub fn effective_value(&self, id: &PropertyId) -> Option<&PropValue> {
        match self.winner(id) {
            Some(winner) => winner.value.as_ref(),
            None => self.catalog.get(id).and_then(|spec| spec.default_value()),
        }
    }

    /// Every explicit value supplied for `id`, winner first.
    #[must_use]
    pub fn provenance(&self, id: &PropertyId) -> &[Provenance] {
        self.supplied.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Loader whose value won for `id`.
    #[must_use]
    pub fn source_of(&self, id: &PropertyId) -> Option<&LoaderId> {
        self.winner(id).map(|winner| &winner.loader)
    }

    /// Property matching `name` under the naming strategy in use.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&PropertyId> {
        self.names.match_name(name)
    }

    /// Effective value of a string property.
    #[must_use]
    pub fn get_str(&self, id: &PropertyId) -> Option<&str> {
        self.effective_value(id).and_then(PropValue::as_str)
    }

    /// Effective value of a boolean or flag property.
    #[must_use]
    pub fn get_bool(&self, id: &PropertyId) -> Option<bool> {
        self.effective_value(id).and_then(PropValue::as_bool)
    }

    /// Effective value of an integer or long property.
    #[must_use]
    pub fn get_i64(&self, id: &PropertyId) -> Option<i64> {
        self.effective_value(id).and_then(PropValue::as_i64)
    }

    /// Effective value of any numeric property.
    #[must_use]
    pub fn get_f64(&self, id: &PropertyId) -> Option<f64> {
        self.effective_value(id).and_then(PropValue::as_f64)
    }

    /// Catalog the values were resolved against.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Name and value pairs for export.
    ///
    /// Every property with a non-null effective value is listed under its
    /// canonical name and each out-alias, in catalog order.
    #[must_use]
    pub fn export(&self) -> Vec<(&str, &PropValue)> {
        let mut seen = HashSet::new();
        let mut pairs = Vec::new();
        for declaration in self.catalog.iter() {
            let id = declaration.id();
            if !seen.insert(id) {
                continue;
            }
            if let (Some(naming), Some(value)) = (self.names.naming(id), self.effective_value(id)) {
                pairs.extend(naming.outbound().map(|name| (name.effective_out(), value)));
            }
        }
        pairs
    }

    /// Renders [`ValueMap::export`] as a flat JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .export()
            .into_iter()
            .map(|(name, value)| (name.to_owned(), Value::from(value)))
            .collect();
        Value::Object(map)
    }

    fn winner(&self, id: &PropertyId) -> Option<&Provenance> {
        self.supplied.get(id).and_then(|values| values.first())
    }
}

/// Values supplied by the loaders that have run so far.
///
/// Loaders receive the context read-only and may use it to configure
/// themselves, for example to find a file whose path an earlier loader set.
#[derive(Debug)]
pub struct ResolutionContext {
    values: ValueMap,
}

impl ResolutionContext {
    /// Starts an empty context; mostly useful for exercising a loader alone.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, names: Arc<NamingIndex>) -> Self {
        Self {
            values: ValueMap::new(catalog, names),
        }
    }

    /// Adds a loader's explicit values behind those of earlier loaders.
    pub fn merge(&mut self, values: &LoaderValues) {
        self.values.record(values);
    }

    /// Freezes the accumulated values.
    pub(crate) fn finish(self) -> ValueMap {
        self.values
    }
}

impl Deref for ResolutionContext {
    type Target = ValueMap;

    fn deref(&self) -> &ValueMap {
        &self.values
    }
}

#[cfg(test)]
mod tests;

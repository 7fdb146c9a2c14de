//! Lookup from source keys to property identities.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::{NamingStrategy, PropertyNaming, uri_name};
use crate::{Catalog, PropertyId};

/// A name claimed by two different properties.
#[derive(Clone, Debug)]
pub(crate) struct NameCollision {
    pub(crate) name: String,
    pub(crate) property: PropertyId,
    pub(crate) conflict: PropertyId,
}

/// Names of every catalogued property, indexed for matching source keys.
#[derive(Debug)]
pub struct NamingIndex {
    strategy: Arc<dyn NamingStrategy>,
    namings: HashMap<PropertyId, PropertyNaming>,
    inbound: HashMap<String, PropertyId>,
    inbound_uri: HashMap<String, PropertyId>,
}

impl NamingIndex {
    /// Indexes the names of every property in `catalog`.
    ///
    /// When two properties claim the same name the first in catalog order
    /// keeps it.
    #[must_use]
    pub fn build(catalog: &Catalog, strategy: Arc<dyn NamingStrategy>) -> Self {
        Self::build_checked(catalog, strategy).0
    }

    pub(crate) fn build_checked(
        catalog: &Catalog,
        strategy: Arc<dyn NamingStrategy>,
    ) -> (Self, Vec<NameCollision>) {
        let mut index = Self {
            strategy,
            namings: HashMap::with_capacity(catalog.len()),
            inbound: HashMap::new(),
            inbound_uri: HashMap::new(),
        };
        let mut outbound = HashMap::new();
        let mut collisions = Vec::new();
        for declaration in catalog {
            let id = declaration.id();
            if index.namings.contains_key(id) {
                continue;
            }
            let naming = index.strategy.build_names(declaration.spec(), id);
            for name in naming.inbound() {
                claim(&mut index.inbound, name.effective_in(), id, &mut collisions);
                if let Some(uri) = uri_name(Some(name.effective_in())) {
                    index.inbound_uri.entry(uri).or_insert_with(|| id.clone());
                }
            }
            for name in naming.outbound() {
                claim(&mut outbound, name.effective_out(), id, &mut collisions);
            }
            index.namings.insert(id.clone(), naming);
        }
        let mut seen = HashSet::new();
        collisions.retain(|c| seen.insert((c.property.clone(), c.conflict.clone())));
        (index, collisions)
    }

    /// Names of the property `id`.
    #[must_use]
    pub fn naming(&self, id: &PropertyId) -> Option<&PropertyNaming> {
        self.namings.get(id)
    }

    /// Property whose canonical name or in-alias matches `key`.
    #[must_use]
    pub fn match_name(&self, key: &str) -> Option<&PropertyId> {
        self.inbound.get(&self.strategy.normalize(key))
    }

    /// Property whose URI-projected canonical name or in-alias matches `key`.
    #[must_use]
    pub fn match_uri_name(&self, key: &str) -> Option<&PropertyId> {
        self.inbound_uri.get(&self.strategy.normalize(key))
    }

    /// Strategy the names were built with.
    #[must_use]
    pub fn strategy(&self) -> &dyn NamingStrategy {
        self.strategy.as_ref()
    }
}

fn claim(
    names: &mut HashMap<String, PropertyId>,
    name: &str,
    id: &PropertyId,
    collisions: &mut Vec<NameCollision>,
) {
    match names.entry(name.to_owned()) {
        Entry::Vacant(slot) => {
            slot.insert(id.clone());
        }
        Entry::Occupied(slot) if slot.get() != id => collisions.push(NameCollision {
            name: name.to_owned(),
            property: id.clone(),
            conflict: slot.get().clone(),
        }),
        Entry::Occupied(_) => {}
    }
}

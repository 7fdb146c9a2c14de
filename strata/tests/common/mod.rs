//! Shared builders for the scenario tests.

use strata::{Catalog, Declaration, PropertyId, PropertySpec};

/// Identity of a top-level property named `field`.
pub fn top(field: &str) -> PropertyId {
    PropertyId::new("", Vec::<String>::new(), field)
}

/// Catalog holding one property.
pub fn single(id: &PropertyId, spec: PropertySpec) -> Catalog {
    Catalog::new(vec![Declaration::new(id.clone(), spec)])
}

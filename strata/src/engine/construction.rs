//! Consistency checks run before any loader.

use std::collections::HashSet;
use std::sync::Arc;

use crate::load::Loader;
use crate::naming::check_name;
use crate::validate::failures;
use crate::{Catalog, ConstructionProblem, Declaration, NamingIndex, NamingStrategy, ProblemList};

/// Checks the catalog and loader list and builds the naming index.
///
/// Every check runs so that all construction problems are reported at once.
pub(super) fn check(
    catalog: &Catalog,
    naming: &Arc<dyn NamingStrategy>,
    loaders: &[Arc<dyn Loader>],
) -> Result<NamingIndex, ProblemList> {
    let mut problems = ProblemList::default();

    problems.extend(
        catalog
            .duplicates()
            .into_iter()
            .map(|property| ConstructionProblem::DuplicateProperty {
                property: property.clone(),
            }),
    );
    check_loaders(loaders, &mut problems);

    let mut seen = HashSet::new();
    for declaration in catalog.iter().filter(|d| seen.insert(d.id())) {
        check_names(declaration, &mut problems);
        check_spec(declaration, &mut problems);
    }

    let (index, collisions) = NamingIndex::build_checked(catalog, Arc::clone(naming));
    problems.extend(
        collisions
            .into_iter()
            .map(|collision| ConstructionProblem::NonUniqueName {
                property: collision.property,
                name: collision.name,
                conflict: collision.conflict,
            }),
    );

    if problems.is_empty() {
        Ok(index)
    } else {
        Err(problems)
    }
}

fn check_loaders(loaders: &[Arc<dyn Loader>], problems: &mut ProblemList) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for loader in loaders {
        let id = loader.id();
        if !seen.insert(id.clone()) && reported.insert(id.clone()) {
            problems.push(ConstructionProblem::DuplicateLoader { loader: id });
        }
    }
}

fn check_names(declaration: &Declaration, problems: &mut ProblemList) {
    let id = declaration.id();
    let canonical = id.canonical_name();
    let aliases = declaration.spec().aliases().all();
    for name in std::iter::once(canonical.as_str()).chain(aliases) {
        if let Err(reason) = check_name(name) {
            problems.push(ConstructionProblem::IllegalName {
                property: id.clone(),
                name: name.to_owned(),
                reason,
            });
        }
    }
}

fn check_spec(declaration: &Declaration, problems: &mut ProblemList) {
    let id = declaration.id();
    let spec = declaration.spec();
    let value_type = spec.value_type();
    let mut usable = Vec::new();
    for validator in spec.validators() {
        if !validator.is_specification_valid() {
            problems.push(ConstructionProblem::InvalidValidator {
                property: id.clone(),
                validator: validator.description(),
            });
        } else if !validator.supports(value_type) {
            problems.push(ConstructionProblem::UnsupportedValidator {
                property: id.clone(),
                validator: validator.description(),
                value_type,
            });
        } else {
            usable.push(Arc::clone(validator));
        }
    }

    let Some(default) = spec.default_value() else {
        return;
    };
    if !value_type.accepts(default) {
        problems.push(ConstructionProblem::InvalidDefault {
            property: id.clone(),
            value: default.clone(),
            reason: format!("expected a {value_type} value"),
        });
        return;
    }
    for validator in failures(&usable, default) {
        problems.push(ConstructionProblem::InvalidDefault {
            property: id.clone(),
            value: default.clone(),
            reason: format!("it must be {}", validator.description()),
        });
    }
}

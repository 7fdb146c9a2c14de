//! The resolution phases.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::construction;
use crate::load::{LoadRequest, Loader, LoaderValues};
use crate::validate::failures;
use crate::{
    Catalog, NamingStrategy, ProblemList, RequirementProblem, ResolutionContext, ResolutionError,
    StrataResult, ValueMap, ValueProblem,
};

/// Runs construction checks, every loader and the requirement check.
pub(super) fn run(
    catalog: &Arc<Catalog>,
    naming: &Arc<dyn NamingStrategy>,
    loaders: &[Arc<dyn Loader>],
) -> StrataResult<Arc<ValueMap>> {
    let names = match construction::check(catalog, naming, loaders) {
        Ok(index) => Arc::new(index),
        Err(problems) => {
            warn!(
                problems = problems.len(),
                "configuration is inconsistent; no loader was run"
            );
            return Err(Arc::new(ResolutionError::Construction(Box::new(problems))));
        }
    };

    let mut context = ResolutionContext::new(Arc::clone(catalog), Arc::clone(&names));
    let mut problems = ProblemList::default();
    for loader in loaders {
        let values = loader.load(&LoadRequest::new(catalog, &names, &context));
        debug!(
            loader = %values.loader(),
            values = values.explicit().count(),
            problems = values.problems().count(),
            "loader finished"
        );
        problems.extend(values.problems().cloned());
        validate(catalog, &values, &mut problems);
        context.merge(&values);
    }
    check_requirements(catalog, &context, &mut problems);

    if problems.is_empty() {
        info!(
            properties = catalog.len(),
            loaders = loaders.len(),
            "configuration resolved"
        );
        Ok(Arc::new(context.finish()))
    } else {
        warn!(
            loader = problems.loader().count(),
            value = problems.value().count(),
            requirement = problems.requirement().count(),
            "configuration is invalid"
        );
        Err(Arc::new(ResolutionError::Invalid(Box::new(problems))))
    }
}

/// Checks every non-null explicit value of one loader against its validators.
fn validate(catalog: &Catalog, values: &LoaderValues, problems: &mut ProblemList) {
    for (property, value) in values.explicit() {
        let (Some(spec), Some(value)) = (catalog.get(property), value) else {
            continue;
        };
        for validator in failures(spec.validators(), value) {
            problems.push(ValueProblem::ValidationFailed {
                loader: values.loader().clone(),
                property: property.clone(),
                value: value.clone(),
                validator: validator.description(),
            });
        }
    }
}

fn check_requirements(catalog: &Catalog, context: &ResolutionContext, problems: &mut ProblemList) {
    let mut seen = HashSet::new();
    for declaration in catalog.iter().filter(|d| seen.insert(d.id())) {
        let id = declaration.id();
        if declaration.spec().is_required() && context.explicit_value(id).is_none() {
            problems.push(RequirementProblem::RequiredPropertyMissing {
                property: id.clone(),
            });
        }
    }
}

//! Unit tests for precedence, null handling and export.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::json;

use super::{ResolutionContext, ValueMap};
use crate::load::{LoaderId, LoaderValues};
use crate::{
    CaseInsensitiveNaming, Catalog, Declaration, NamingIndex, PropValue, PropertyId, PropertySpec,
    ValueType,
};

fn id(field: &str) -> PropertyId {
    PropertyId::new("svc", Vec::<String>::new(), field)
}

#[fixture]
fn context() -> ResolutionContext {
    let catalog = Arc::new(Catalog::new(vec![
        Declaration::new(
            id("TIMEOUT"),
            PropertySpec::builder(ValueType::Int)
                .default_value(50)
                .alias_out("timeout_ms")
                .build(),
        ),
        Declaration::new(
            id("NAME"),
            PropertySpec::builder(ValueType::Str)
                .default_value("svc")
                .build(),
        ),
        Declaration::new(id("HOST"), PropertySpec::builder(ValueType::Str).build()),
    ]));
    let naming = Arc::new(CaseInsensitiveNaming);
    let names = Arc::new(NamingIndex::build(&catalog, naming));
    ResolutionContext::new(catalog, names)
}

fn supplied(loader: &str, entries: &[(PropertyId, Option<PropValue>)]) -> LoaderValues {
    let mut values = LoaderValues::new(LoaderId::new(loader));
    for (property, value) in entries {
        values.push_value(property.clone(), value.clone());
    }
    values
}

fn finish(mut context: ResolutionContext, loaders: &[LoaderValues]) -> ValueMap {
    for values in loaders {
        context.merge(values);
    }
    context.finish()
}

#[rstest]
fn absent_properties_fall_back_to_defaults(context: ResolutionContext) {
    let map = finish(context, &[]);
    assert!(!map.is_explicitly_set(&id("TIMEOUT")));
    assert_eq!(map.explicit_value(&id("TIMEOUT")), None);
    assert_eq!(
        map.effective_value(&id("TIMEOUT")),
        Some(&PropValue::Int(50))
    );
    assert_eq!(map.get_i64(&id("TIMEOUT")), Some(50));
}

#[rstest]
fn explicit_null_hides_the_default(context: ResolutionContext) {
    let map = finish(context, &[supplied("cmd-line", &[(id("TIMEOUT"), None)])]);
    assert!(map.is_explicitly_set(&id("TIMEOUT")));
    assert_eq!(map.explicit_value(&id("TIMEOUT")), None);
    assert_eq!(map.effective_value(&id("TIMEOUT")), None);
}

#[rstest]
fn first_writer_wins_even_with_null(context: ResolutionContext) {
    let map = finish(
        context,
        &[
            supplied("cmd-line", &[(id("HOST"), None)]),
            supplied("env", &[(id("HOST"), Some("example.org".into()))]),
        ],
    );
    assert_eq!(map.get_str(&id("HOST")), None);
    assert_eq!(map.source_of(&id("HOST")), Some(&LoaderId::new("cmd-line")));
    let provenance = map.provenance(&id("HOST"));
    assert_eq!(provenance.len(), 2);
    assert_eq!(
        provenance.get(1).and_then(|p| p.value.as_ref()),
        Some(&PropValue::from("example.org"))
    );
    assert!(map.provenance(&id("NAME")).is_empty());
}

#[rstest]
fn context_exposes_values_of_earlier_loaders(mut context: ResolutionContext) {
    context.merge(&supplied("file", &[(id("HOST"), Some("db".into()))]));
    assert_eq!(context.get_str(&id("HOST")), Some("db"));
    assert_eq!(context.lookup("SVC.host"), Some(&id("HOST")));
}

#[rstest]
fn export_lists_canonical_and_out_names(context: ResolutionContext) {
    let map = finish(
        context,
        &[supplied(
            "cmd-line",
            &[(id("TIMEOUT"), Some(PropValue::Int(10))), (id("NAME"), None)],
        )],
    );
    let exported: Vec<_> = map
        .export()
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value.clone()))
        .collect();
    assert_eq!(
        exported,
        vec![
            ("svc.TIMEOUT".to_owned(), PropValue::Int(10)),
            ("timeout_ms".to_owned(), PropValue::Int(10)),
        ]
    );
    assert_eq!(
        map.to_json(),
        json!({ "svc.TIMEOUT": 10, "timeout_ms": 10 })
    );
}

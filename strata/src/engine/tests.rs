//! Unit tests for engine construction, resolution and rebuilds.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::{fixture, rstest};

use super::Engine;
use crate::load::{
    CommandLineLoader, FileLoader, FixedValueLoader, LoadRequest, Loader, LoaderId, LoaderValues,
};
use crate::validate::{NumericValidator, OneOf, RegexMatch};
use crate::{
    Catalog, ConstructionProblem, Declaration, PropValue, PropertyId, PropertySpec, ValueType,
};

fn server(field: &str) -> PropertyId {
    PropertyId::new("app.Server", Vec::<String>::new(), field)
}

fn server_catalog() -> Catalog {
    Catalog::new(vec![
        Declaration::new(
            server("PORT"),
            PropertySpec::builder(ValueType::Int)
                .default_value(8080)
                .validator(NumericValidator::greater_than(0))
                .build(),
        ),
        Declaration::new(
            server("HOST"),
            PropertySpec::builder(ValueType::Str).build(),
        ),
    ])
}

#[fixture]
fn catalog() -> Catalog {
    server_catalog()
}

/// Wraps a loader and counts how often it runs.
#[derive(Debug)]
struct Counting {
    inner: FixedValueLoader,
    calls: Arc<AtomicUsize>,
}

impl Counting {
    fn new(inner: FixedValueLoader) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = Self {
            inner,
            calls: Arc::clone(&calls),
        };
        (loader, calls)
    }
}

impl Loader for Counting {
    fn id(&self) -> LoaderId {
        self.inner.id()
    }

    fn unknown_key_is_problem(&self) -> bool {
        self.inner.unknown_key_is_problem()
    }

    fn load(&self, request: &LoadRequest<'_>) -> LoaderValues {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.load(request)
    }
}

#[rstest]
fn first_loader_wins_and_later_values_are_provenance(catalog: Catalog) {
    let engine = Engine::builder(catalog)
        .loader(CommandLineLoader::new(["--app.Server.PORT=9090"]))
        .loader(FileLoader::from_bytes(
            "defaults",
            "app.Server.PORT=7070\napp.Server.HOST=example.org",
        ))
        .build();
    let values = engine.values().expect("valid configuration");
    assert_eq!(values.get_i64(&server("PORT")), Some(9090));
    assert_eq!(values.get_str(&server("HOST")), Some("example.org"));
    let sources: Vec<_> = values
        .provenance(&server("PORT"))
        .iter()
        .map(|p| p.loader.to_string())
        .collect();
    assert_eq!(sources, vec!["cmd-line", "file:defaults"]);
    assert_eq!(
        values.source_of(&server("HOST")),
        Some(&LoaderId::new("file:defaults"))
    );
}

#[rstest]
fn repeated_calls_share_one_outcome(catalog: Catalog) {
    let (loader, calls) = Counting::new(FixedValueLoader::new().value(server("PORT"), 1));
    let engine = Engine::builder(catalog).loader(loader).build();
    assert!(engine.current().is_none());
    let first = engine.values().expect("valid configuration");
    let second = engine.resolve().expect("valid configuration");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(engine.current().is_some());
}

#[rstest]
fn failures_are_cached_too(catalog: Catalog) {
    let (loader, calls) = Counting::new(FixedValueLoader::new().value(server("PORT"), 0));
    let engine = Engine::builder(catalog).loader(loader).build();
    let first = engine.values().expect_err("port must be positive");
    let second = engine.values().expect_err("port must be positive");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.value_problems().count(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn duplicate_loader_aborts_before_loading(catalog: Catalog) {
    let (first, first_calls) = Counting::new(FixedValueLoader::new());
    let (second, second_calls) = Counting::new(FixedValueLoader::new());
    let engine = Engine::builder(catalog)
        .loader(first)
        .loader(second)
        .build();
    let error = engine.values().expect_err("duplicate loader");
    let problems: Vec<_> = error.construction_problems().collect();
    assert!(matches!(
        problems.as_slice(),
        [ConstructionProblem::DuplicateLoader { loader }] if loader.as_str() == "fixed"
    ));
    assert_eq!(error.problems().len(), 1);
    assert_eq!(first_calls.load(Ordering::SeqCst), 0);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn construction_reports_every_inconsistency() {
    let catalog = Catalog::new(vec![
        Declaration::new(
            server("MODE"),
            PropertySpec::builder(ValueType::Str)
                .validator(OneOf::new(Vec::<String>::new()))
                .validator(NumericValidator::less_than(3))
                .default_value("slow")
                .validator(RegexMatch::new("fast|safe"))
                .build(),
        ),
        Declaration::new(
            server("LIMIT"),
            PropertySpec::builder(ValueType::Int)
                .default_value("ten")
                .alias_in("bad name")
                .build(),
        ),
        Declaration::new(
            server("OTHER"),
            PropertySpec::builder(ValueType::Int)
                .alias_in("app.Server.LIMIT")
                .build(),
        ),
    ]);
    let engine = Engine::builder(catalog).build();
    let error = engine.values().expect_err("inconsistent catalog");
    let kinds: Vec<_> = error
        .construction_problems()
        .map(|problem| match problem {
            ConstructionProblem::DuplicateProperty { .. } => "duplicate-property",
            ConstructionProblem::DuplicateLoader { .. } => "duplicate-loader",
            ConstructionProblem::IllegalName { .. } => "illegal-name",
            ConstructionProblem::NonUniqueName { .. } => "non-unique-name",
            ConstructionProblem::InvalidValidator { .. } => "invalid-validator",
            ConstructionProblem::UnsupportedValidator { .. } => "unsupported-validator",
            ConstructionProblem::InvalidDefault { .. } => "invalid-default",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "illegal-name",
            "invalid-default",
            "invalid-validator",
            "unsupported-validator",
            "invalid-default",
            "non-unique-name",
        ]
    );
}

#[rstest]
fn duplicate_declarations_are_reported(catalog: Catalog) {
    let mut declarations: Vec<_> = catalog.iter().cloned().collect();
    declarations.push(Declaration::new(
        server("HOST"),
        PropertySpec::builder(ValueType::Str).build(),
    ));
    let engine = Engine::builder(Catalog::new(declarations)).build();
    let error = engine.values().expect_err("duplicate property");
    let problems: Vec<_> = error.construction_problems().collect();
    assert!(matches!(
        problems.as_slice(),
        [ConstructionProblem::DuplicateProperty { property }] if property == &server("HOST")
    ));
}

#[rstest]
fn every_loader_value_is_validated(catalog: Catalog) {
    let engine = Engine::builder(catalog)
        .loader(CommandLineLoader::new(["--app.Server.PORT=-1"]))
        .loader(FixedValueLoader::new().value(server("PORT"), 0))
        .build();
    let error = engine.values().expect_err("both values are out of range");
    let loaders: Vec<_> = error
        .problems()
        .iter()
        .filter_map(|problem| problem.loader().map(ToString::to_string))
        .collect();
    assert_eq!(loaders, vec!["cmd-line", "fixed"]);
}

#[rstest]
fn rebuild_swaps_the_published_outcome(catalog: Catalog) {
    let engine = Engine::builder(catalog)
        .loader(FixedValueLoader::new().value(server("PORT"), 1))
        .build();
    let before = engine.values().expect("valid configuration");

    let replacement: Vec<Arc<dyn Loader>> =
        vec![Arc::new(FixedValueLoader::new().value(server("PORT"), 2))];
    let after = engine.rebuild(Some(replacement)).expect("rebuilt");

    assert_eq!(before.get_i64(&server("PORT")), Some(1));
    assert_eq!(after.get_i64(&server("PORT")), Some(2));
    let current = engine.values().expect("valid configuration");
    assert!(Arc::ptr_eq(&current, &after));
}

#[rstest]
fn rebuild_publishes_failures(catalog: Catalog) {
    let engine = Engine::builder(catalog).build();
    assert!(engine.values().is_ok());
    let replacement: Vec<Arc<dyn Loader>> =
        vec![Arc::new(FixedValueLoader::new().value(server("PORT"), -5))];
    assert!(engine.rebuild(Some(replacement)).is_err());
    assert!(engine.values().is_err());
    assert!(engine.rebuild(None).is_err());
}

#[rstest]
fn concurrent_callers_observe_one_resolution(catalog: Catalog) {
    let (loader, calls) = Counting::new(FixedValueLoader::new().value(server("PORT"), 3));
    let engine = Engine::builder(catalog).loader(loader).build();
    let maps: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| engine.values().expect("valid configuration")))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("resolver thread"))
            .collect()
    });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(maps.windows(2).all(|pair| match pair {
        [a, b] => Arc::ptr_eq(a, b),
        _ => true,
    }));
    let port = maps.first().and_then(|m| m.get_i64(&server("PORT")));
    assert_eq!(port, Some(3));
}

#[test]
fn standard_loaders_read_arguments_then_environment() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("APP.SERVER.HOST", "from-env");
        jail.set_env("APP.SERVER.PORT", "1111");
        let engine = Engine::builder(server_catalog())
            .with_standard_loaders(["--app.Server.PORT=2222"])
            .build();
        let values = engine.values().expect("valid configuration");
        assert_eq!(values.get_i64(&server("PORT")), Some(2222));
        assert_eq!(values.get_str(&server("HOST")), Some("from-env"));
        assert_eq!(
            values.explicit_value(&server("HOST")),
            Some(&PropValue::from("from-env"))
        );
        Ok(())
    });
}

//! Unit tests for problem classification and list rendering.

use rstest::rstest;

use super::{
    ConstructionProblem, LoaderProblem, Problem, ProblemKind, ProblemList, RequirementProblem,
    ValueProblem,
};
use crate::load::LoaderId;
use crate::{PropValue, PropertyId, ValueType};

fn id(field: &str) -> PropertyId {
    PropertyId::new("svc", Vec::<String>::new(), field)
}

fn mixed() -> ProblemList {
    [
        Problem::from(LoaderProblem::StringConversion {
            loader: LoaderId::new("file"),
            property: id("TIMEOUT"),
            error: ValueType::Int.parse("soon").expect_err("not a number"),
        }),
        Problem::from(ValueProblem::ValidationFailed {
            loader: LoaderId::new("env"),
            property: id("PORT"),
            value: PropValue::Int(0),
            validator: "greater than 0".into(),
        }),
        Problem::from(RequirementProblem::RequiredPropertyMissing {
            property: id("NAME"),
        }),
        Problem::from(LoaderProblem::UnknownName {
            loader: LoaderId::new("file"),
            name: "stray".into(),
        }),
    ]
    .into_iter()
    .collect()
}

#[rstest]
#[case(ProblemKind::Construction, 0)]
#[case(ProblemKind::Loader, 2)]
#[case(ProblemKind::Value, 1)]
#[case(ProblemKind::Requirement, 1)]
fn filters_by_kind(#[case] kind: ProblemKind, #[case] expected: usize) {
    assert_eq!(mixed().of_kind(kind).count(), expected);
}

#[test]
fn typed_filters_match_kind_filters() {
    let problems = mixed();
    assert_eq!(problems.loader().count(), 2);
    assert_eq!(problems.value().count(), 1);
    assert_eq!(problems.requirement().count(), 1);
    assert_eq!(problems.construction().count(), 0);
}

#[test]
fn problems_expose_property_and_loader() {
    let problems = mixed();
    let summary: Vec<_> = problems
        .iter()
        .map(|p| {
            (
                p.property().map(PropertyId::canonical_name),
                p.loader().map(ToString::to_string),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (Some("svc.TIMEOUT".to_owned()), Some("file".to_owned())),
            (Some("svc.PORT".to_owned()), Some("env".to_owned())),
            (Some("svc.NAME".to_owned()), None),
            (None, Some("file".to_owned())),
        ]
    );
}

#[test]
fn display_numbers_each_problem() {
    let rendered = mixed().to_string();
    let lines: Vec<_> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    let first = lines.first().copied().unwrap_or_default();
    assert!(first.starts_with("1: loader 'file'"));
    assert!(lines.get(3).is_some_and(|l| l.starts_with("4: ")));
    assert!(rendered.contains("'soon' is not a valid integer value"));
}

#[test]
fn duplicate_loader_has_no_property() {
    let problem = Problem::from(ConstructionProblem::DuplicateLoader {
        loader: LoaderId::new("cmd-line"),
    });
    assert_eq!(problem.kind(), ProblemKind::Construction);
    assert!(problem.property().is_none());
    assert_eq!(problem.loader(), Some(&LoaderId::new("cmd-line")));
    assert_eq!(
        problem.message(),
        "loader 'cmd-line' is configured more than once"
    );
}

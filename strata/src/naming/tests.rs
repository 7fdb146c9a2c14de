//! Unit tests for name construction, legality and matching.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::{
    CaseInsensitiveNaming, CaseSensitiveNaming, IllegalName, NamingIndex, NamingStrategy,
    check_name, uri_name,
};
use crate::{Catalog, Declaration, PropertyId, PropertySpec, ValueType};

#[fixture]
fn timeout_id() -> PropertyId {
    PropertyId::new("a.b", Vec::<String>::new(), "C")
}

#[fixture]
fn catalog(timeout_id: PropertyId) -> Catalog {
    Catalog::new(vec![
        Declaration::new(
            timeout_id,
            PropertySpec::builder(ValueType::Str)
                .alias_in("Foo")
                .alias_out("exported.c")
                .alias_in_out("both")
                .build(),
        ),
        Declaration::new(
            PropertyId::new("a.b", Vec::<String>::new(), "D"),
            PropertySpec::builder(ValueType::Int).build(),
        ),
    ])
}

#[rstest]
fn builds_canonical_and_directional_aliases(catalog: Catalog, timeout_id: PropertyId) {
    let index = NamingIndex::build(&catalog, Arc::new(CaseInsensitiveNaming));
    let naming = index.naming(&timeout_id).expect("declared property");
    assert_eq!(naming.canonical().actual(), "a.b.C");
    assert_eq!(naming.canonical().effective_in(), "A.B.C");
    let inbound: Vec<_> = naming.in_aliases().iter().map(|n| n.actual()).collect();
    let outbound: Vec<_> = naming.out_aliases().iter().map(|n| n.actual()).collect();
    assert_eq!(inbound, vec!["Foo", "both"]);
    assert_eq!(outbound, vec!["exported.c", "both"]);
}

#[rstest]
#[case("FOO")]
#[case("foo")]
#[case("a.B.c")]
#[case("BOTH")]
fn case_insensitive_matching(catalog: Catalog, timeout_id: PropertyId, #[case] key: &str) {
    let index = NamingIndex::build(&catalog, Arc::new(CaseInsensitiveNaming));
    assert_eq!(index.match_name(key), Some(&timeout_id));
}

#[rstest]
fn out_aliases_are_not_matched_on_input(catalog: Catalog) {
    let index = NamingIndex::build(&catalog, Arc::new(CaseInsensitiveNaming));
    assert_eq!(index.match_name("exported.c"), None);
}

#[rstest]
fn case_sensitive_matching(catalog: Catalog, timeout_id: PropertyId) {
    let index = NamingIndex::build(&catalog, Arc::new(CaseSensitiveNaming));
    assert_eq!(index.match_name("Foo"), Some(&timeout_id));
    assert_eq!(index.match_name("FOO"), None);
}

#[rstest]
fn uri_form_matching(catalog: Catalog, timeout_id: PropertyId) {
    let index = NamingIndex::build(&catalog, Arc::new(CaseInsensitiveNaming));
    assert_eq!(index.match_uri_name("a/b/c"), Some(&timeout_id));
    assert_eq!(index.match_name("a/b/C"), None);
}

#[test]
fn colliding_names_are_reported_once_per_pair() {
    let first = PropertyId::new("x", Vec::<String>::new(), "A");
    let second = PropertyId::new("x", Vec::<String>::new(), "B");
    let catalog = Catalog::new(vec![
        Declaration::new(
            first.clone(),
            PropertySpec::builder(ValueType::Str)
                .alias_in_out("shared")
                .build(),
        ),
        Declaration::new(
            second.clone(),
            PropertySpec::builder(ValueType::Str)
                .alias_in_out("SHARED")
                .build(),
        ),
    ]);
    let (index, collisions) = NamingIndex::build_checked(&catalog, Arc::new(CaseInsensitiveNaming));
    assert_eq!(collisions.len(), 1);
    let collision = collisions.first().expect("one collision");
    assert_eq!(collision.property, second);
    assert_eq!(collision.conflict, first);
    assert_eq!(collision.name, "SHARED");
    assert_eq!(index.match_name("shared"), Some(&first));
}

#[rstest]
#[case("", Err(IllegalName::Empty))]
#[case("a\tb", Err(IllegalName::Whitespace))]
#[case("a?b", Err(IllegalName::Reserved('?')))]
#[case("a/b", Err(IllegalName::Reserved('/')))]
#[case("a.", Err(IllegalName::EdgeDot))]
#[case("a.b-c_D", Ok(()))]
fn name_legality(#[case] name: &str, #[case] expected: Result<(), IllegalName>) {
    assert_eq!(check_name(name), expected);
}

#[test]
fn uri_projection_passes_empty_and_missing_through() {
    assert_eq!(uri_name(Some("x.y")), Some("x/y".to_owned()));
    assert_eq!(uri_name(Some("")), Some(String::new()));
    assert_eq!(uri_name(None), None);
}

#[test]
fn effective_out_keeps_declared_case() {
    let name = CaseInsensitiveNaming.name("Mixed.Case");
    assert_eq!(name.effective_out(), "Mixed.Case");
    assert_eq!(name.to_string(), "Mixed.Case");
}

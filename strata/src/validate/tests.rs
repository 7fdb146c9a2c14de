//! Unit tests for the built-in validators.

use std::sync::Arc;

use rstest::rstest;

use super::{EndsWith, NumericValidator, OneOf, RegexMatch, StartsWith, Validator, failures};
use crate::{PropValue, ValueType};

#[rstest]
#[case(NumericValidator::greater_than(5), PropValue::Int(6), true)]
#[case(NumericValidator::greater_than(5), PropValue::Int(5), false)]
#[case(NumericValidator::greater_than_or_equal(5), PropValue::Long(5), true)]
#[case(NumericValidator::less_than(2.5), PropValue::Double(2.4), true)]
#[case(NumericValidator::less_than(2.5), PropValue::Int(3), false)]
#[case(NumericValidator::less_than_or_equal(10), PropValue::Double(10.0), true)]
#[case(NumericValidator::less_than(i64::MAX), PropValue::Long(i64::MAX - 1), true)]
#[case(NumericValidator::greater_than(0), PropValue::Double(f64::NAN), false)]
#[case(NumericValidator::greater_than(0), PropValue::from("7"), false)]
fn numeric_comparisons(
    #[case] validator: NumericValidator,
    #[case] value: PropValue,
    #[case] expected: bool,
) {
    assert_eq!(
        validator.is_valid(&value),
        expected,
        "{}",
        validator.description()
    );
}

#[test]
fn numeric_specification() {
    assert!(NumericValidator::greater_than(1).is_specification_valid());
    let not_a_number = NumericValidator::greater_than(f64::NAN);
    assert!(!not_a_number.is_specification_valid());
    assert!(NumericValidator::less_than(1).supports(ValueType::Double));
    assert!(!NumericValidator::less_than(1).supports(ValueType::Str));
    assert_eq!(
        NumericValidator::greater_than_or_equal(3).description(),
        "greater than or equal to 3"
    );
}

#[rstest]
#[case(StartsWith::new("abc"), "abcdef", true)]
#[case(StartsWith::new("abc"), "ABCdef", false)]
#[case(StartsWith::ignoring_case("abc"), "ABCdef", true)]
#[case(StartsWith::ignoring_case("abc"), "xabc", false)]
fn starts_with(#[case] validator: StartsWith, #[case] text: &str, #[case] expected: bool) {
    assert_eq!(validator.is_valid(&PropValue::from(text)), expected);
}

#[rstest]
#[case(EndsWith::new(".toml"), "app.toml", true)]
#[case(EndsWith::new(".toml"), "app.TOML", false)]
#[case(EndsWith::ignoring_case(".toml"), "app.TOML", true)]
fn ends_with(#[case] validator: EndsWith, #[case] text: &str, #[case] expected: bool) {
    assert_eq!(validator.is_valid(&PropValue::from(text)), expected);
}

#[rstest]
#[case(OneOf::new(["debug", "info"]), "info", true)]
#[case(OneOf::new(["debug", "info"]), "INFO", false)]
#[case(OneOf::ignoring_case(["debug", "info"]), "INFO", true)]
#[case(OneOf::ignoring_case(["debug", "info"]), "warn", false)]
fn one_of(#[case] validator: OneOf, #[case] text: &str, #[case] expected: bool) {
    assert_eq!(validator.is_valid(&PropValue::from(text)), expected);
}

#[test]
fn empty_one_of_is_not_a_valid_specification() {
    assert!(!OneOf::new(Vec::<String>::new()).is_specification_valid());
}

#[rstest]
#[case(RegexMatch::new("[a-z]+"), "abc", true)]
#[case(RegexMatch::new("[a-z]+"), "abc1", false)]
#[case(RegexMatch::new("[a-z]+"), "ABC", false)]
#[case(RegexMatch::ignoring_case("[a-z]+"), "ABC", true)]
fn regex_requires_a_full_match(
    #[case] validator: RegexMatch,
    #[case] text: &str,
    #[case] expected: bool,
) {
    assert_eq!(validator.is_valid(&PropValue::from(text)), expected);
}

#[test]
fn invalid_regex_is_reported_not_panicked() {
    let validator = RegexMatch::new("([unclosed");
    assert!(!validator.is_specification_valid());
    assert!(!validator.is_valid(&PropValue::from("anything")));
}

#[test]
fn failures_reports_every_rejecting_validator() {
    let validators: Vec<Arc<dyn Validator>> = vec![
        Arc::new(StartsWith::new("a")),
        Arc::new(EndsWith::new("z")),
        Arc::new(OneOf::new(["abz"])),
    ];
    let failed = failures(&validators, &PropValue::from("abc"));
    let descriptions: Vec<_> = failed.iter().map(|v| v.description()).collect();
    assert_eq!(
        descriptions,
        vec!["ends with 'z'".to_owned(), "is one of [abz]".to_owned()]
    );
}

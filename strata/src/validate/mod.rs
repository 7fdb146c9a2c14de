//! Validators that constrain the values a property accepts.
//!
//! A property may carry any number of validators; a value is valid only when
//! every one of them accepts it. All validators are always consulted so that
//! each failing rule is reported on its own.
//!
//! ```rust
//! use strata::PropValue;
//! use strata::validate::{NumericValidator, StartsWith, Validator};
//!
//! let positive = NumericValidator::greater_than(0);
//! assert!(positive.is_valid(&PropValue::Int(3)));
//! assert!(!positive.is_valid(&PropValue::Int(0)));
//!
//! let scheme = StartsWith::ignoring_case("https://");
//! assert!(scheme.is_valid(&PropValue::from("HTTPS://example.org")));
//! ```

mod numeric;
mod string;

use std::fmt;
use std::sync::Arc;

use crate::{PropValue, ValueType};

pub use numeric::{Comparison, Number, NumericValidator};
pub use string::{EndsWith, OneOf, RegexMatch, StartsWith};

/// A rule that values of a property must satisfy.
pub trait Validator: fmt::Debug + Send + Sync {
    /// Returns `true` when `value` satisfies the rule.
    ///
    /// Values of a type the validator does not [support](Self::supports) are
    /// never valid.
    fn is_valid(&self, value: &PropValue) -> bool;

    /// Human readable summary of the rule, such as `greater than 5`.
    fn description(&self) -> String;

    /// Returns `true` when the validator's own parameters are usable.
    fn is_specification_valid(&self) -> bool {
        true
    }

    /// Returns `true` when the rule can be applied to values of `value_type`.
    fn supports(&self, value_type: ValueType) -> bool;
}

/// Returns every validator in `validators` that rejects `value`.
///
/// No validator is skipped after an earlier failure.
#[must_use]
pub fn failures<'a>(
    validators: &'a [Arc<dyn Validator>],
    value: &PropValue,
) -> Vec<&'a Arc<dyn Validator>> {
    validators
        .iter()
        .filter(|validator| !validator.is_valid(value))
        .collect()
}

#[cfg(test)]
mod tests;

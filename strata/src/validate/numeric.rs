//! Comparisons against a numeric bound.

use std::cmp::Ordering;
use std::fmt;

use super::Validator;
use crate::{PropValue, ValueType};

/// Relationship a value must have with the bound.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Comparison {
    /// Strictly greater than the bound.
    GreaterThan,
    /// Greater than or equal to the bound.
    GreaterThanOrEqual,
    /// Strictly less than the bound.
    LessThan,
    /// Less than or equal to the bound.
    LessThanOrEqual,
}

impl Comparison {
    const fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::GreaterThan => matches!(ordering, Ordering::Greater),
            Self::GreaterThanOrEqual => matches!(ordering, Ordering::Greater | Ordering::Equal),
            Self::LessThan => matches!(ordering, Ordering::Less),
            Self::LessThanOrEqual => matches!(ordering, Ordering::Less | Ordering::Equal),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GreaterThan => "greater than",
            Self::GreaterThanOrEqual => "greater than or equal to",
            Self::LessThan => "less than",
            Self::LessThanOrEqual => "less than or equal to",
        })
    }
}

/// Bound of a numeric comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// Integral bound, compared exactly against integers and longs.
    Integer(i64),
    /// Floating point bound.
    Float(f64),
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Compares integer, long and double values against a fixed bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericValidator {
    comparison: Comparison,
    bound: Number,
}

impl NumericValidator {
    /// Creates a validator applying `comparison` against `bound`.
    #[must_use]
    pub fn new(comparison: Comparison, bound: impl Into<Number>) -> Self {
        Self {
            comparison,
            bound: bound.into(),
        }
    }

    /// Values must be strictly greater than `bound`.
    #[must_use]
    pub fn greater_than(bound: impl Into<Number>) -> Self {
        Self::new(Comparison::GreaterThan, bound)
    }

    /// Values must be greater than or equal to `bound`.
    #[must_use]
    pub fn greater_than_or_equal(bound: impl Into<Number>) -> Self {
        Self::new(Comparison::GreaterThanOrEqual, bound)
    }

    /// Values must be strictly less than `bound`.
    #[must_use]
    pub fn less_than(bound: impl Into<Number>) -> Self {
        Self::new(Comparison::LessThan, bound)
    }

    /// Values must be less than or equal to `bound`.
    #[must_use]
    pub fn less_than_or_equal(bound: impl Into<Number>) -> Self {
        Self::new(Comparison::LessThanOrEqual, bound)
    }

    fn compare(&self, value: &PropValue) -> Option<Ordering> {
        if let (Some(v), Number::Integer(bound)) = (value.as_i64(), self.bound) {
            return Some(v.cmp(&bound));
        }
        let bound = match self.bound {
            Number::Integer(b) => PropValue::Long(b).as_f64()?,
            Number::Float(b) => b,
        };
        value.as_f64()?.partial_cmp(&bound)
    }
}

impl Validator for NumericValidator {
    fn is_valid(&self, value: &PropValue) -> bool {
        self.compare(value)
            .is_some_and(|ordering| self.comparison.holds(ordering))
    }

    fn description(&self) -> String {
        format!("{} {}", self.comparison, self.bound)
    }

    fn is_specification_valid(&self) -> bool {
        match self.bound {
            Number::Integer(_) => true,
            Number::Float(b) => !b.is_nan(),
        }
    }

    fn supports(&self, value_type: ValueType) -> bool {
        value_type.is_numeric()
    }
}

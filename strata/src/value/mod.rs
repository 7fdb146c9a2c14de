//! Typed values and the primitives that turn raw source text into them.

mod trim;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub use trim::Trimmer;

/// Value type of a declared property.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Free text.
    Str,
    /// A boolean that must be spelled out.
    Bool,
    /// A boolean whose bare presence in a source means `true`.
    Flag,
    /// A 32-bit signed integer.
    Int,
    /// A 64-bit signed integer.
    Long,
    /// A 64-bit floating point number.
    Double,
}

const TRUE_WORDS: [&str; 6] = ["true", "t", "yes", "y", "on", "1"];
const FALSE_WORDS: [&str; 6] = ["false", "f", "no", "n", "off", "0"];

impl ValueType {
    /// Trimmer applied to raw text when a property does not choose one.
    ///
    /// Strings keep quoted whitespace; every other type trims to null.
    #[must_use]
    pub const fn default_trimmer(self) -> Trimmer {
        match self {
            Self::Str => Trimmer::QuotedSpacePreserving,
            Self::Bool | Self::Flag | Self::Int | Self::Long | Self::Double => Trimmer::TrimToNull,
        }
    }

    /// Parses already-trimmed text into a value of this type.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when `raw` is not a valid literal for the type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::{PropValue, ValueType};
    ///
    /// assert_eq!(ValueType::Int.parse("42"), Ok(PropValue::Int(42)));
    /// assert_eq!(ValueType::Bool.parse("Yes"), Ok(PropValue::Bool(true)));
    /// assert!(ValueType::Long.parse("forty").is_err());
    /// ```
    pub fn parse(self, raw: &str) -> Result<PropValue, ParseError> {
        let error = || ParseError {
            raw: raw.to_owned(),
            expected: self,
        };
        match self {
            Self::Str => Ok(PropValue::Str(raw.to_owned())),
            Self::Bool | Self::Flag => parse_bool(raw).map(PropValue::Bool).ok_or_else(error),
            Self::Int => raw.parse().map(PropValue::Int).map_err(|_| error()),
            Self::Long => raw.parse().map(PropValue::Long).map_err(|_| error()),
            Self::Double => raw.parse().map(PropValue::Double).map_err(|_| error()),
        }
    }

    /// Returns `true` when `value` is a value of this type.
    #[must_use]
    pub const fn accepts(self, value: &PropValue) -> bool {
        matches!(
            (self, value),
            (Self::Str, PropValue::Str(_))
                | (Self::Bool | Self::Flag, PropValue::Bool(_))
                | (Self::Int, PropValue::Int(_))
                | (Self::Long, PropValue::Long(_))
                | (Self::Double, PropValue::Double(_))
        )
    }

    /// Widens `value` to this type when that loses nothing.
    ///
    /// Integers widen to longs and doubles. Values that cannot be widened are
    /// returned unchanged so that type checks can report them.
    #[must_use]
    pub fn coerce(self, value: PropValue) -> PropValue {
        match (self, value) {
            (Self::Long, PropValue::Int(v)) => PropValue::Long(i64::from(v)),
            (Self::Double, PropValue::Int(v)) => PropValue::Double(f64::from(v)),
            (_, other) => other,
        }
    }

    /// Returns `true` for the numeric types.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Long | Self::Double)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    let lowered = raw.to_ascii_lowercase();
    if TRUE_WORDS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Str => "string",
            Self::Bool => "boolean",
            Self::Flag => "flag",
            Self::Int => "integer",
            Self::Long => "long",
            Self::Double => "double",
        };
        f.write_str(name)
    }
}

/// Failure to convert raw text into a typed value.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("'{raw}' is not a valid {expected} value")]
pub struct ParseError {
    /// Text that failed to parse.
    pub raw: String,
    /// Type the text was expected to hold.
    pub expected: ValueType,
}

/// A typed configuration value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Text value.
    Str(String),
    /// Boolean value, also used by flags.
    Bool(bool),
    /// 32-bit integer value.
    Int(i32),
    /// 64-bit integer value.
    Long(i64),
    /// Floating point value.
    Double(f64),
}

impl PropValue {
    /// Borrows the text of a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value of a boolean or flag.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns an integer or long value widened to `i64`.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v as i64),
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns any numeric value as `f64`.
    ///
    /// Longs beyond 2^53 lose precision.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "documented lossy widening")]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(f64::from(*v)),
            Self::Long(v) => Some(*v as f64),
            Self::Double(v) => Some(*v),
            Self::Str(_) | Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&PropValue> for serde_json::Value {
    fn from(value: &PropValue) -> Self {
        match value {
            PropValue::Str(s) => Self::from(s.as_str()),
            PropValue::Bool(b) => Self::from(*b),
            PropValue::Int(v) => Self::from(*v),
            PropValue::Long(v) => Self::from(*v),
            PropValue::Double(v) => Self::from(*v),
        }
    }
}

//! Text validators, each available in case-sensitive and insensitive forms.

use regex::{Regex, RegexBuilder};

use super::Validator;
use crate::{PropValue, ValueType};

fn fold(text: &str, ignore_case: bool) -> String {
    if ignore_case {
        text.to_lowercase()
    } else {
        text.to_owned()
    }
}

const fn case_note(ignore_case: bool) -> &'static str {
    if ignore_case { " (ignoring case)" } else { "" }
}

/// Text must begin with a prefix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StartsWith {
    prefix: String,
    ignore_case: bool,
}

impl StartsWith {
    /// Case-sensitive prefix check.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ignore_case: false,
        }
    }

    /// Case-insensitive prefix check.
    #[must_use]
    pub fn ignoring_case(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ignore_case: true,
        }
    }
}

impl Validator for StartsWith {
    fn is_valid(&self, value: &PropValue) -> bool {
        value.as_str().is_some_and(|text| {
            fold(text, self.ignore_case).starts_with(&fold(&self.prefix, self.ignore_case))
        })
    }

    fn description(&self) -> String {
        format!(
            "starts with '{}'{}",
            self.prefix,
            case_note(self.ignore_case)
        )
    }

    fn supports(&self, value_type: ValueType) -> bool {
        value_type == ValueType::Str
    }
}

/// Text must end with a suffix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EndsWith {
    suffix: String,
    ignore_case: bool,
}

impl EndsWith {
    /// Case-sensitive suffix check.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ignore_case: false,
        }
    }

    /// Case-insensitive suffix check.
    #[must_use]
    pub fn ignoring_case(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ignore_case: true,
        }
    }
}

impl Validator for EndsWith {
    fn is_valid(&self, value: &PropValue) -> bool {
        value.as_str().is_some_and(|text| {
            fold(text, self.ignore_case).ends_with(&fold(&self.suffix, self.ignore_case))
        })
    }

    fn description(&self) -> String {
        format!("ends with '{}'{}", self.suffix, case_note(self.ignore_case))
    }

    fn supports(&self, value_type: ValueType) -> bool {
        value_type == ValueType::Str
    }
}

/// Text must equal one of a fixed set of choices.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OneOf {
    choices: Vec<String>,
    ignore_case: bool,
}

impl OneOf {
    /// Case-sensitive membership check.
    #[must_use]
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            ignore_case: false,
        }
    }

    /// Case-insensitive membership check.
    #[must_use]
    pub fn ignoring_case<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignore_case: true,
            ..Self::new(choices)
        }
    }
}

impl Validator for OneOf {
    fn is_valid(&self, value: &PropValue) -> bool {
        value.as_str().is_some_and(|text| {
            let folded = fold(text, self.ignore_case);
            self.choices
                .iter()
                .any(|choice| fold(choice, self.ignore_case) == folded)
        })
    }

    fn description(&self) -> String {
        format!(
            "is one of [{}]{}",
            self.choices.join(", "),
            case_note(self.ignore_case)
        )
    }

    /// An empty choice list would reject every value.
    fn is_specification_valid(&self) -> bool {
        !self.choices.is_empty()
    }

    fn supports(&self, value_type: ValueType) -> bool {
        value_type == ValueType::Str
    }
}

/// The whole text must match a regular expression.
#[derive(Clone, Debug)]
pub struct RegexMatch {
    pattern: String,
    ignore_case: bool,
    compiled: Option<Regex>,
}

impl RegexMatch {
    /// Case-sensitive pattern match.
    ///
    /// A pattern that does not compile is kept and reported by
    /// [`Validator::is_specification_valid`].
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::build(pattern.into(), false)
    }

    /// Case-insensitive pattern match.
    #[must_use]
    pub fn ignoring_case(pattern: impl Into<String>) -> Self {
        Self::build(pattern.into(), true)
    }

    fn build(pattern: String, ignore_case: bool) -> Self {
        let compiled = RegexBuilder::new(&format!("^(?:{pattern})$"))
            .case_insensitive(ignore_case)
            .build()
            .ok();
        Self {
            pattern,
            ignore_case,
            compiled,
        }
    }
}

impl Validator for RegexMatch {
    fn is_valid(&self, value: &PropValue) -> bool {
        match (&self.compiled, value.as_str()) {
            (Some(regex), Some(text)) => regex.is_match(text),
            _ => false,
        }
    }

    fn description(&self) -> String {
        format!("matches /{}/{}", self.pattern, case_note(self.ignore_case))
    }

    fn is_specification_valid(&self) -> bool {
        self.compiled.is_some()
    }

    fn supports(&self, value_type: ValueType) -> bool {
        value_type == ValueType::Str
    }
}

//! Structured records of configuration failures.
//!
//! Problems fall into four kinds, ordered by when they can be detected:
//! construction problems describe an inconsistent catalog or loader list and
//! stop resolution before any loader runs; loader, value and requirement
//! problems are collected across a whole loading pass and reported together.

mod list;

use thiserror::Error;

use crate::load::LoaderId;
use crate::naming::IllegalName;
use crate::{ParseError, PropValue, PropertyId, ValueType};

pub use list::ProblemList;

/// Inconsistency in the catalog or loader list.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum ConstructionProblem {
    /// The same property identity is declared twice.
    #[error("property '{property}' is declared more than once")]
    DuplicateProperty {
        /// Identity declared more than once.
        property: PropertyId,
    },

    /// Two loaders share an identity.
    #[error("loader '{loader}' is configured more than once")]
    DuplicateLoader {
        /// Identity shared by the loaders.
        loader: LoaderId,
    },

    /// A canonical name or alias breaks the naming rules.
    #[error("property '{property}' has an illegal name '{name}': {reason}")]
    IllegalName {
        /// Property declaring the name.
        property: PropertyId,
        /// Offending name.
        name: String,
        /// Rule the name breaks.
        reason: IllegalName,
    },

    /// A name is claimed by more than one property.
    #[error("name '{name}' of property '{property}' is already used by '{conflict}'")]
    NonUniqueName {
        /// Property declared later in catalog order.
        property: PropertyId,
        /// Contested name, in its normalised form.
        name: String,
        /// Property that claimed the name first.
        conflict: PropertyId,
    },

    /// A validator's own parameters are unusable.
    #[error("validator '{validator}' of property '{property}' has invalid parameters")]
    InvalidValidator {
        /// Property carrying the validator.
        property: PropertyId,
        /// Description of the validator.
        validator: String,
    },

    /// A validator cannot check values of the property's type.
    #[error("validator '{validator}' of property '{property}' cannot check {value_type} values")]
    UnsupportedValidator {
        /// Property carrying the validator.
        property: PropertyId,
        /// Description of the validator.
        validator: String,
        /// Value type of the property.
        value_type: ValueType,
    },

    /// A default value has the wrong type or fails a validator.
    #[error("default value '{value}' of property '{property}' is invalid: {reason}")]
    InvalidDefault {
        /// Property declaring the default.
        property: PropertyId,
        /// Offending default.
        value: PropValue,
        /// Why the default was rejected.
        reason: String,
    },
}

/// Failure while a loader read its source.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum LoaderProblem {
    /// The source could not be read or decoded.
    #[error("loader '{loader}' could not read '{source_name}': {message}")]
    SourceUnreadable {
        /// Loader that failed.
        loader: LoaderId,
        /// Path or name of the source.
        source_name: String,
        /// Description of the failure.
        message: String,
    },

    /// A key in the source does not name any property.
    #[error("loader '{loader}' found unknown property name '{name}'")]
    UnknownName {
        /// Loader that read the key.
        loader: LoaderId,
        /// Key as found in the source.
        name: String,
    },

    /// Raw text could not be converted to the property's type.
    #[error("loader '{loader}' could not convert the value of '{property}': {error}")]
    StringConversion {
        /// Loader that read the value.
        loader: LoaderId,
        /// Property the value was meant for.
        property: PropertyId,
        /// Parse failure.
        error: ParseError,
    },

    /// A typed value does not have the property's type.
    #[error("loader '{loader}' supplied '{value}' for '{property}', which expects a {expected}")]
    TypeMismatch {
        /// Loader that supplied the value.
        loader: LoaderId,
        /// Property the value was meant for.
        property: PropertyId,
        /// Offending value.
        value: PropValue,
        /// Type the property expects.
        expected: ValueType,
    },

    /// The source holds a value shape that cannot be mapped to a property.
    #[error("loader '{loader}' cannot use the value of '{key}': {message}")]
    UnsupportedValue {
        /// Loader that read the value.
        loader: LoaderId,
        /// Key holding the value.
        key: String,
        /// Description of the unsupported shape.
        message: String,
    },

    /// The source sets the same property more than once.
    #[error("loader '{loader}' sets '{property}' more than once (again as '{name}')")]
    DuplicateValue {
        /// Loader that read the values.
        loader: LoaderId,
        /// Property set more than once.
        property: PropertyId,
        /// Key of the ignored repeat.
        name: String,
    },
}

impl LoaderProblem {
    /// Loader that reported the problem.
    #[must_use]
    pub const fn loader(&self) -> &LoaderId {
        match self {
            Self::SourceUnreadable { loader, .. }
            | Self::UnknownName { loader, .. }
            | Self::StringConversion { loader, .. }
            | Self::TypeMismatch { loader, .. }
            | Self::UnsupportedValue { loader, .. }
            | Self::DuplicateValue { loader, .. } => loader,
        }
    }

    /// Property the problem concerns, when one was identified.
    #[must_use]
    pub const fn property(&self) -> Option<&PropertyId> {
        match self {
            Self::StringConversion { property, .. }
            | Self::TypeMismatch { property, .. }
            | Self::DuplicateValue { property, .. } => Some(property),
            Self::SourceUnreadable { .. }
            | Self::UnknownName { .. }
            | Self::UnsupportedValue { .. } => None,
        }
    }
}

/// An explicit value that fails one of its property's validators.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum ValueProblem {
    /// The value was rejected by a validator.
    #[error("value '{value}' of '{property}' from loader '{loader}' must be {validator}")]
    ValidationFailed {
        /// Loader that supplied the value.
        loader: LoaderId,
        /// Property the value belongs to.
        property: PropertyId,
        /// Rejected value.
        value: PropValue,
        /// Description of the rejecting validator.
        validator: String,
    },
}

/// A required property that no loader set.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum RequirementProblem {
    /// No loader supplied a non-null value.
    #[error("required property '{property}' has no value")]
    RequiredPropertyMissing {
        /// Property left unset.
        property: PropertyId,
    },
}

/// Kind of a [`Problem`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ProblemKind {
    /// See [`ConstructionProblem`].
    Construction,
    /// See [`LoaderProblem`].
    Loader,
    /// See [`ValueProblem`].
    Value,
    /// See [`RequirementProblem`].
    Requirement,
}

/// One configuration failure of any kind.
#[derive(Clone, Debug, Error)]
pub enum Problem {
    /// Inconsistent catalog or loader list.
    #[error("{0}")]
    Construction(#[from] ConstructionProblem),
    /// Failure reading a source.
    #[error("{0}")]
    Loader(#[from] LoaderProblem),
    /// Explicit value failing validation.
    #[error("{0}")]
    Value(#[from] ValueProblem),
    /// Required property left unset.
    #[error("{0}")]
    Requirement(#[from] RequirementProblem),
}

impl Problem {
    /// Kind of the problem.
    #[must_use]
    pub const fn kind(&self) -> ProblemKind {
        match self {
            Self::Construction(_) => ProblemKind::Construction,
            Self::Loader(_) => ProblemKind::Loader,
            Self::Value(_) => ProblemKind::Value,
            Self::Requirement(_) => ProblemKind::Requirement,
        }
    }

    /// Property the problem concerns, if any.
    #[must_use]
    pub const fn property(&self) -> Option<&PropertyId> {
        match self {
            Self::Construction(problem) => match problem {
                ConstructionProblem::DuplicateProperty { property }
                | ConstructionProblem::IllegalName { property, .. }
                | ConstructionProblem::NonUniqueName { property, .. }
                | ConstructionProblem::InvalidValidator { property, .. }
                | ConstructionProblem::UnsupportedValidator { property, .. }
                | ConstructionProblem::InvalidDefault { property, .. } => Some(property),
                ConstructionProblem::DuplicateLoader { .. } => None,
            },
            Self::Loader(problem) => problem.property(),
            Self::Value(ValueProblem::ValidationFailed { property, .. })
            | Self::Requirement(RequirementProblem::RequiredPropertyMissing { property }) => {
                Some(property)
            }
        }
    }

    /// Loader the problem originated from, if any.
    #[must_use]
    pub const fn loader(&self) -> Option<&LoaderId> {
        match self {
            Self::Construction(ConstructionProblem::DuplicateLoader { loader })
            | Self::Value(ValueProblem::ValidationFailed { loader, .. }) => Some(loader),
            Self::Loader(problem) => Some(problem.loader()),
            Self::Construction(_) | Self::Requirement(_) => None,
        }
    }

    /// Human readable description of the problem.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests;

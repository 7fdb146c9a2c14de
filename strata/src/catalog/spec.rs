//! Property specifications and their builder.

use std::sync::Arc;

use crate::validate::Validator;
use crate::{PropValue, Trimmer, ValueType};

/// Alternative names of a property, split by direction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Aliases {
    in_only: Vec<String>,
    out_only: Vec<String>,
    in_and_out: Vec<String>,
}

impl Aliases {
    /// Aliases recognised only when reading sources.
    #[must_use]
    pub fn in_only(&self) -> &[String] {
        &self.in_only
    }

    /// Aliases used only when exporting values.
    #[must_use]
    pub fn out_only(&self) -> &[String] {
        &self.out_only
    }

    /// Aliases used in both directions.
    #[must_use]
    pub fn in_and_out(&self) -> &[String] {
        &self.in_and_out
    }

    /// Every alias recognised when reading sources.
    pub fn inbound(&self) -> impl Iterator<Item = &str> {
        self.in_only
            .iter()
            .chain(&self.in_and_out)
            .map(String::as_str)
    }

    /// Every alias used when exporting values.
    pub fn outbound(&self) -> impl Iterator<Item = &str> {
        self.out_only
            .iter()
            .chain(&self.in_and_out)
            .map(String::as_str)
    }

    /// Every alias in declaration order: in-only, out-only, then both.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.in_only
            .iter()
            .chain(&self.out_only)
            .chain(&self.in_and_out)
            .map(String::as_str)
    }
}

/// Immutable description of a declared property.
#[derive(Clone, Debug)]
pub struct PropertySpec {
    value_type: ValueType,
    default_value: Option<PropValue>,
    validators: Vec<Arc<dyn Validator>>,
    required: bool,
    trimmer: Trimmer,
    aliases: Aliases,
    description: Option<String>,
}

impl PropertySpec {
    /// Starts building a specification for a property of `value_type`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::validate::NumericValidator;
    /// use strata::{PropValue, PropertySpec, ValueType};
    ///
    /// let spec = PropertySpec::builder(ValueType::Long)
    ///     .default_value(30)
    ///     .validator(NumericValidator::greater_than(0))
    ///     .alias_in("timeout")
    ///     .build();
    /// assert_eq!(spec.default_value(), Some(&PropValue::Long(30)));
    /// assert!(!spec.is_required());
    /// ```
    #[must_use]
    pub fn builder(value_type: ValueType) -> PropertySpecBuilder {
        PropertySpecBuilder::new(value_type)
    }

    /// Type values of the property are parsed into.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Value used when no loader supplies one.
    #[must_use]
    pub const fn default_value(&self) -> Option<&PropValue> {
        self.default_value.as_ref()
    }

    /// Rules every explicit value must satisfy.
    #[must_use]
    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    /// Whether some loader must supply a non-null value.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Trimming applied to raw text before parsing.
    #[must_use]
    pub const fn trimmer(&self) -> Trimmer {
        self.trimmer
    }

    /// Alternative names of the property.
    #[must_use]
    pub const fn aliases(&self) -> &Aliases {
        &self.aliases
    }

    /// Free-form description for reports and samples.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Builder for [`PropertySpec`].
#[derive(Debug)]
#[must_use]
pub struct PropertySpecBuilder {
    spec: PropertySpec,
}

impl PropertySpecBuilder {
    fn new(value_type: ValueType) -> Self {
        Self {
            spec: PropertySpec {
                value_type,
                default_value: None,
                validators: Vec::new(),
                required: false,
                trimmer: value_type.default_trimmer(),
                aliases: Aliases::default(),
                description: None,
            },
        }
    }

    /// Sets the default value.
    ///
    /// Integers are widened for long and double properties. A default of the
    /// wrong type is kept and reported when the engine checks the catalog.
    pub fn default_value(mut self, value: impl Into<PropValue>) -> Self {
        self.spec.default_value = Some(self.spec.value_type.coerce(value.into()));
        self
    }

    /// Adds a validator.
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.spec.validators.push(Arc::new(validator));
        self
    }

    /// Adds an already shared validator.
    pub fn shared_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.spec.validators.push(validator);
        self
    }

    /// Marks the property as required.
    pub fn required(mut self) -> Self {
        self.spec.required = true;
        self
    }

    /// Overrides the trimmer chosen by the value type.
    pub fn trimmer(mut self, trimmer: Trimmer) -> Self {
        self.spec.trimmer = trimmer;
        self
    }

    /// Adds an alias recognised only when reading sources.
    pub fn alias_in(mut self, alias: impl Into<String>) -> Self {
        self.spec.aliases.in_only.push(alias.into());
        self
    }

    /// Adds an alias used only when exporting values.
    pub fn alias_out(mut self, alias: impl Into<String>) -> Self {
        self.spec.aliases.out_only.push(alias.into());
        self
    }

    /// Adds an alias used in both directions.
    pub fn alias_in_out(mut self, alias: impl Into<String>) -> Self {
        self.spec.aliases.in_and_out.push(alias.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.spec.description = Some(description.into());
        self
    }

    /// Freezes the specification.
    pub fn build(self) -> PropertySpec {
        self.spec
    }
}

//! iCalendar property type and the generic property accessors (RFC 5545 §3.8).

use serde::Serialize;

use super::parameter::{Parameter, Parameters};
use super::value_type::ValueType;
use crate::error::{RfcError, RfcResult};

/// A single `NAME;params:value` content line.
///
/// TEXT-typed values are held unescaped; every other value type keeps its
/// literal wire text for typed parsing by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    /// Property name as written.
    pub name: String,
    pub params: Parameters,
    pub value: String,
}

/// Whether `name` can be written as a property or parameter name: one or
/// more ASCII letters, digits or `-`.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

impl Property {
    /// Creates a property without parameters.
    ///
    /// `name` must satisfy [`is_valid_name`]; use [`Property::try_new`] for
    /// names that are not known in advance.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(is_valid_name(&name), "invalid property name {name:?}");
        Self {
            name,
            params: Parameters::new(),
            value: value.into(),
        }
    }

    /// Creates a property without parameters, checking the name.
    ///
    /// ## Errors
    ///
    /// Returns `RfcError::InvalidValue` when `name` is empty or holds
    /// anything other than ASCII letters, digits and `-`.
    pub fn try_new(name: impl Into<String>, value: impl Into<String>) -> RfcResult<Self> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(RfcError::invalid_value(
                &name,
                "property names are ASCII letters, digits and '-'",
            ));
        }
        Ok(Self::new(name, value))
    }

    /// Creates a property with parameters. A later parameter replaces an
    /// earlier one with the same name.
    #[must_use]
    pub fn with_params(
        name: impl Into<String>,
        value: impl Into<String>,
        params: impl IntoIterator<Item = Parameter>,
    ) -> Self {
        let mut property = Self::new(name, value);
        property.params = params.into_iter().collect();
        property
    }

    /// Returns whether this property has the given name (ASCII case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns all values of a parameter.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&[String]> {
        self.params.get(name)
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.params.first(name)
    }

    /// Returns the single value of a parameter.
    ///
    /// ## Errors
    ///
    /// Returns `ParameterNotFound` when absent and `ParameterCardinality`
    /// when the parameter carries more than one value.
    pub fn parameter_value(&self, name: &str) -> RfcResult<&str> {
        match self.params.get(name) {
            Some([value]) => Ok(value),
            Some(values) => Err(RfcError::ParameterCardinality {
                property: self.name.clone(),
                parameter: name.to_string(),
                count: values.len(),
            }),
            None => Err(RfcError::ParameterNotFound {
                property: self.name.clone(),
                parameter: name.to_string(),
            }),
        }
    }

    /// Sets a parameter, replacing any existing values.
    pub fn set_param(&mut self, param: Parameter) {
        self.params.insert(param.name, param.values);
    }

    /// Returns the effective value type of this property.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        ValueType::resolve(&self.name, &self.params)
    }
}

/// Ordered property list shared by calendars and components.
///
/// All lookups are linear scans matching names case-insensitively.
pub trait PropertyList {
    fn properties(&self) -> &[Property];

    fn properties_mut(&mut self) -> &mut Vec<Property>;

    /// Returns the first property with the given name.
    fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties().iter().find(|p| p.is_named(name))
    }

    fn get_property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties_mut().iter_mut().find(|p| p.is_named(name))
    }

    /// Returns all properties with the given name, in order.
    fn get_properties(&self, name: &str) -> Vec<&Property> {
        self.properties()
            .iter()
            .filter(|p| p.is_named(name))
            .collect()
    }

    fn has_property(&self, name: &str) -> bool {
        self.get_property(name).is_some()
    }

    /// Returns the value of the first property with the given name.
    fn property_value(&self, name: &str) -> Option<&str> {
        self.get_property(name).map(|p| p.value.as_str())
    }

    /// Returns the first property with the given name.
    ///
    /// ## Errors
    ///
    /// Returns `RfcError::PropertyNotFound` when no property matches.
    fn require_property(&self, name: &str) -> RfcResult<&Property> {
        self.get_property(name)
            .ok_or_else(|| RfcError::PropertyNotFound(name.to_string()))
    }

    /// Replaces the first property with the same name, or appends.
    fn set_property(&mut self, property: Property) {
        if let Some(existing) = self.get_property_mut(&property.name) {
            *existing = property;
        } else {
            self.properties_mut().push(property);
        }
    }

    /// Appends a property. Used for repeatable properties.
    fn add_property(&mut self, property: Property) {
        self.properties_mut().push(property);
    }

    /// Removes every property with the same name, then appends.
    fn replace_property(&mut self, property: Property) -> Vec<Property> {
        let removed = self.remove_property(&property.name);
        self.properties_mut().push(property);
        removed
    }

    /// Removes all properties with the given name.
    fn remove_property(&mut self, name: &str) -> Vec<Property> {
        self.remove_property_if(name, |_| true)
    }

    /// Removes properties with the given name and exact value.
    fn remove_property_value(&mut self, name: &str, value: &str) -> Vec<Property> {
        self.remove_property_if(name, |p| p.value == value)
    }

    /// Removes properties with the given name for which `predicate` holds.
    fn remove_property_if<F>(&mut self, name: &str, mut predicate: F) -> Vec<Property>
    where
        F: FnMut(&Property) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(self.properties_mut())
            .into_iter()
            .partition(|p| p.is_named(name) && predicate(p));
        *self.properties_mut() = kept;
        removed
    }
}

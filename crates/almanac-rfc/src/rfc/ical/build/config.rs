//! Serializer options.

use std::collections::BTreeMap;

use almanac_core::config::{NewlineStyle, SerializationSettings};
use almanac_core::constants::{DEFAULT_MAX_LINE_LENGTH, MIN_LINE_LENGTH};

use crate::error::{RfcError, RfcResult};

/// Output options for [`serialize_with`](super::serialize_with).
///
/// Line lengths are octet counts for one folded segment, excluding the
/// line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeConfig {
    max_line_length: usize,
    newline: NewlineStyle,
    /// Keys are uppercased property names.
    property_max_length: BTreeMap<String, usize>,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            newline: NewlineStyle::Crlf,
            property_max_length: BTreeMap::new(),
        }
    }
}

impl SerializeConfig {
    /// ## Errors
    /// Returns `RfcError::InvalidConfiguration` if `max_line_length` is too
    /// small to hold a folded segment.
    pub fn new(max_line_length: usize) -> RfcResult<Self> {
        check_length("max_line_length", max_line_length)?;
        Ok(Self {
            max_line_length,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_newline(mut self, newline: NewlineStyle) -> Self {
        self.newline = newline;
        self
    }

    /// Overrides the line length for one property name (case-insensitive).
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidConfiguration` if `max_line_length` is too small.
    pub fn with_property_max_length(
        mut self,
        property: &str,
        max_line_length: usize,
    ) -> RfcResult<Self> {
        check_length(property, max_line_length)?;
        self.property_max_length
            .insert(property.to_ascii_uppercase(), max_line_length);
        Ok(self)
    }

    /// Builds a config from loaded application settings.
    ///
    /// ## Errors
    /// Returns an error if the settings fail validation.
    pub fn from_settings(settings: &SerializationSettings) -> RfcResult<Self> {
        settings.validate()?;
        let mut config = Self::new(settings.max_line_length)?.with_newline(settings.newline);
        for (name, &limit) in &settings.property_max_length {
            config = config.with_property_max_length(name, limit)?;
        }
        Ok(config)
    }

    #[must_use]
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    #[must_use]
    pub fn newline(&self) -> NewlineStyle {
        self.newline
    }

    /// Line length that applies to a property, falling back to the global limit.
    #[must_use]
    pub fn max_length_for(&self, property: &str) -> usize {
        self.property_max_length
            .get(&property.to_ascii_uppercase())
            .copied()
            .unwrap_or(self.max_line_length)
    }
}

fn check_length(what: &str, length: usize) -> RfcResult<()> {
    if length < MIN_LINE_LENGTH {
        return Err(RfcError::InvalidConfiguration(format!(
            "line length for {what} must be at least {MIN_LINE_LENGTH}, got {length}"
        )));
    }
    Ok(())
}

use thiserror::Error;

use crate::rfc::ical::parse::ParseError;

/// iCalendar codec errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("I/O error while {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to write property {property}")]
    Write {
        property: String,
        #[source]
        source: std::io::Error,
    },

    #[error("property not found: {0}")]
    PropertyNotFound(String),

    #[error("parameter {parameter} not found on property {property}")]
    ParameterNotFound { property: String, parameter: String },

    #[error("expected exactly one value for parameter {parameter} on property {property}, found {count}")]
    ParameterCardinality {
        property: String,
        parameter: String,
        count: usize,
    },

    #[error("invalid value for {property}: {reason}")]
    InvalidValue { property: String, reason: String },

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    CoreError(#[from] almanac_core::error::CoreError),
}

impl RfcError {
    pub(crate) fn invalid_value(property: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.to_string(),
            reason: reason.into(),
        }
    }
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;

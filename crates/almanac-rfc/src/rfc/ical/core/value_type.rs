//! Property value data types (RFC 5545 §3.3).

use std::fmt;

use super::parameter::Parameters;
use super::names::param;

/// Value data type of a property, as named by the `VALUE` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Binary,
    Boolean,
    CalAddress,
    Date,
    DateTime,
    Duration,
    Float,
    Integer,
    Period,
    Recur,
    Text,
    Time,
    Uri,
    UtcOffset,
    /// An `x-name` or `iana-token` value type carried verbatim.
    Other(String),
}

impl ValueType {
    /// Parses a `VALUE` parameter value (case-insensitive).
    #[must_use]
    pub fn from_param(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "BINARY" => Self::Binary,
            "BOOLEAN" => Self::Boolean,
            "CAL-ADDRESS" => Self::CalAddress,
            "DATE" => Self::Date,
            "DATE-TIME" => Self::DateTime,
            "DURATION" => Self::Duration,
            "FLOAT" => Self::Float,
            "INTEGER" => Self::Integer,
            "PERIOD" => Self::Period,
            "RECUR" => Self::Recur,
            "TEXT" => Self::Text,
            "TIME" => Self::Time,
            "URI" => Self::Uri,
            "UTC-OFFSET" => Self::UtcOffset,
            _ => Self::Other(s.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Binary => "BINARY",
            Self::Boolean => "BOOLEAN",
            Self::CalAddress => "CAL-ADDRESS",
            Self::Date => "DATE",
            Self::DateTime => "DATE-TIME",
            Self::Duration => "DURATION",
            Self::Float => "FLOAT",
            Self::Integer => "INTEGER",
            Self::Period => "PERIOD",
            Self::Recur => "RECUR",
            Self::Text => "TEXT",
            Self::Time => "TIME",
            Self::Uri => "URI",
            Self::UtcOffset => "UTC-OFFSET",
            Self::Other(s) => s,
        }
    }

    /// Returns the default value type for a property name.
    ///
    /// Unknown, `X-` and IANA properties default to TEXT.
    #[must_use]
    pub fn default_for(property: &str) -> Self {
        match property.to_ascii_uppercase().as_str() {
            "ATTACH" | "TZURL" | "URL" | "SOURCE" | "IMAGE" | "CONFERENCE" => Self::Uri,
            "GEO" => Self::Float,
            "PERCENT-COMPLETE" | "PRIORITY" | "REPEAT" | "SEQUENCE" => Self::Integer,
            "COMPLETED" | "DTEND" | "DUE" | "DTSTART" | "RECURRENCE-ID" | "EXDATE" | "RDATE"
            | "CREATED" | "DTSTAMP" | "LAST-MODIFIED" => Self::DateTime,
            "DURATION" | "TRIGGER" | "REFRESH-INTERVAL" => Self::Duration,
            "FREEBUSY" => Self::Period,
            "TZOFFSETFROM" | "TZOFFSETTO" => Self::UtcOffset,
            "ATTENDEE" | "ORGANIZER" => Self::CalAddress,
            "RRULE" | "EXRULE" => Self::Recur,
            _ => Self::Text,
        }
    }

    /// Resolves the effective value type of a property.
    ///
    /// A `VALUE` parameter with exactly one value overrides the per-name default.
    #[must_use]
    pub fn resolve(property: &str, params: &Parameters) -> Self {
        match params.get(param::VALUE) {
            Some([value]) => Self::from_param(value),
            _ => Self::default_for(property),
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_property_name() {
        assert_eq!(ValueType::default_for("SUMMARY"), ValueType::Text);
        assert_eq!(ValueType::default_for("dtstart"), ValueType::DateTime);
        assert_eq!(ValueType::default_for("ATTENDEE"), ValueType::CalAddress);
        assert_eq!(ValueType::default_for("RRULE"), ValueType::Recur);
        assert_eq!(ValueType::default_for("GEO"), ValueType::Float);
        assert_eq!(ValueType::default_for("X-CUSTOM-FIELD"), ValueType::Text);
    }

    #[test]
    fn value_param_overrides_default() {
        let mut params = Parameters::new();
        params.append("VALUE", "TEXT");
        assert_eq!(ValueType::resolve("DTSTART", &params), ValueType::Text);

        let mut params = Parameters::new();
        params.append("VALUE", "uri");
        assert_eq!(ValueType::resolve("DESCRIPTION", &params), ValueType::Uri);
    }

    #[test]
    fn multi_valued_value_param_is_ignored() {
        let mut params = Parameters::new();
        params.append("VALUE", "DATE");
        params.append("VALUE", "TEXT");
        assert_eq!(ValueType::resolve("SUMMARY", &params), ValueType::Text);
        assert_eq!(ValueType::resolve("DUE", &params), ValueType::DateTime);
    }

    #[test]
    fn unknown_value_type_is_kept() {
        let vt = ValueType::from_param("X-LOCATION-REF");
        assert_eq!(vt, ValueType::Other("X-LOCATION-REF".into()));
        assert_eq!(vt.to_string(), "X-LOCATION-REF");
        assert!(!vt.is_text());
    }
}

//! iCalendar serialization (RFC 5545).
//!
//! This module provides serializers for iCalendar content:
//! - Config: line length and newline options
//! - Escape: Text and parameter value escaping
//! - Fold: Content line folding at word boundaries
//! - Serializer: Full document serialization to strings or writers
//! - Values: Canonical text for typed values

mod config;
mod escape;
mod fold;
mod serializer;
mod values;

pub use config::SerializeConfig;
pub use escape::{escape_param_value, escape_text};
pub use fold::fold_line;
pub use serializer::{
    serialize, serialize_component, serialize_property, serialize_with, write_calendar,
};
pub use values::{format_date, format_date_time_utc, format_floating, format_utc_offset};

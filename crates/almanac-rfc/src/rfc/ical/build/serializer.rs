//! iCalendar serializer (RFC 5545).
//!
//! Serializes a calendar tree to compliant text. Properties are written in
//! stored order, parameters sorted by name.

use std::convert::Infallible;
use std::io::Write;

use super::config::SerializeConfig;
use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::names::{BEGIN, END, component::VCALENDAR, param};
use crate::rfc::ical::core::{Calendar, Component, Property};

/// Destination for finished physical lines.
trait Sink {
    type Error;

    /// Writes already-terminated text produced for `property`.
    fn write_text(&mut self, property: &str, text: &str) -> Result<(), Self::Error>;
}

impl Sink for String {
    type Error = Infallible;

    fn write_text(&mut self, _property: &str, text: &str) -> Result<(), Infallible> {
        self.push_str(text);
        Ok(())
    }
}

/// Writer sink counting what it has written.
struct IoSink<W> {
    writer: W,
    bytes: usize,
    lines: usize,
}

impl<W: Write> Sink for IoSink<W> {
    type Error = RfcError;

    fn write_text(&mut self, property: &str, text: &str) -> RfcResult<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|source| RfcError::Write {
                property: property.to_string(),
                source,
            })?;
        self.bytes += text.len();
        self.lines += text.matches('\n').count();
        Ok(())
    }
}

/// Serializes a calendar with the default configuration.
#[must_use]
pub fn serialize(calendar: &Calendar) -> String {
    serialize_with(calendar, &SerializeConfig::default())
}

#[must_use]
pub fn serialize_with(calendar: &Calendar, config: &SerializeConfig) -> String {
    let mut out = String::new();
    let Ok(()) = write_calendar_to(&mut out, calendar, config);
    out
}

/// Streams a calendar to `writer`.
///
/// ## Errors
///
/// Returns `RfcError::Write` naming the property being written when the
/// writer fails; output written so far is left in place.
#[tracing::instrument(skip_all, fields(components = calendar.components.len()))]
pub fn write_calendar<W: Write>(
    calendar: &Calendar,
    config: &SerializeConfig,
    writer: W,
) -> RfcResult<()> {
    tracing::debug!(
        max_line_length = config.max_line_length(),
        newline = ?config.newline(),
        "Serializing calendar"
    );
    let mut sink = IoSink {
        writer,
        bytes: 0,
        lines: 0,
    };
    if let Err(error) = write_calendar_to(&mut sink, calendar, config) {
        tracing::warn!(bytes = sink.bytes, %error, "Calendar serialization failed");
        return Err(error);
    }
    sink.writer.flush().map_err(|source| RfcError::Io {
        context: "flushing serialized calendar".to_string(),
        source,
    })?;
    tracing::debug!(bytes = sink.bytes, lines = sink.lines, "Calendar serialized");
    Ok(())
}

/// Serializes one component subtree.
#[must_use]
pub fn serialize_component(component: &Component, config: &SerializeConfig) -> String {
    let mut out = String::new();
    let Ok(()) = write_component(&mut out, component, config);
    out
}

/// Serializes one property as folded, terminated physical lines.
#[must_use]
pub fn serialize_property(property: &Property, config: &SerializeConfig) -> String {
    fold_line(
        &content_line(property),
        config.max_length_for(&property.name),
        config.newline(),
    )
}

fn write_calendar_to<S: Sink>(
    sink: &mut S,
    calendar: &Calendar,
    config: &SerializeConfig,
) -> Result<(), S::Error> {
    write_delimiter(sink, BEGIN, VCALENDAR, config)?;
    for property in &calendar.properties {
        write_property(sink, property, config)?;
    }
    for component in &calendar.components {
        write_component(sink, component, config)?;
    }
    write_delimiter(sink, END, VCALENDAR, config)
}

fn write_component<S: Sink>(
    sink: &mut S,
    component: &Component,
    config: &SerializeConfig,
) -> Result<(), S::Error> {
    let name = component.name();
    write_delimiter(sink, BEGIN, name, config)?;
    for property in &component.body().properties {
        write_property(sink, property, config)?;
    }
    for child in component.children() {
        write_component(sink, child, config)?;
    }
    write_delimiter(sink, END, name, config)
}

fn write_property<S: Sink>(
    sink: &mut S,
    property: &Property,
    config: &SerializeConfig,
) -> Result<(), S::Error> {
    sink.write_text(&property.name, &serialize_property(property, config))
}

fn write_delimiter<S: Sink>(
    sink: &mut S,
    delimiter: &str,
    component: &str,
    config: &SerializeConfig,
) -> Result<(), S::Error> {
    let line = format!("{delimiter}:{component}{}", config.newline().as_str());
    sink.write_text(delimiter, &line)
}

/// Assembles the unfolded `NAME;params:value` line.
fn content_line(property: &Property) -> String {
    let mut line = String::with_capacity(property.name.len() + property.value.len() + 16);
    line.push_str(&property.name);

    for (key, values) in &property.params {
        let quoted = key.eq_ignore_ascii_case(param::ALTREP);
        line.push(';');
        line.push_str(key);
        line.push('=');
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                line.push(',');
            }
            line.push_str(&escape_param_value(value, quoted));
        }
    }

    line.push(':');
    if property.value_type().is_text() {
        line.push_str(&escape_text(&property.value));
    } else {
        line.push_str(&property.value);
    }
    line
}

#[cfg(test)]
mod tests {
    use std::io;

    use almanac_core::config::NewlineStyle;
    use tracing_test::traced_test;

    use super::*;
    use crate::rfc::ical::core::{Parameter, PropertyList};
    use crate::rfc::ical::parse::parse_str;

    fn calendar_with_event(event: Component) -> Calendar {
        let mut cal = Calendar::empty();
        cal.add_property(Property::new("VERSION", "2.0"));
        cal.add_component(event);
        cal
    }

    #[test]
    fn serialize_simple_vevent() {
        let mut event = Component::event();
        event.add_property(Property::new("UID", "test-uid-123"));
        event.add_property(Property::new("SUMMARY", "Test Event"));

        let output = serialize(&calendar_with_event(event));

        assert_eq!(
            output,
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:test-uid-123\r\nSUMMARY:Test Event\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n"
        );
    }

    #[test]
    fn serialize_escapes_text_only() {
        let mut event = Component::event();
        event.add_property(Property::new("SUMMARY", "Meeting, important"));
        event.add_property(Property::new("DESCRIPTION", "Line 1\nLine 2"));
        event.add_property(Property::new("RRULE", "FREQ=WEEKLY;BYDAY=MO,TU"));

        let output = serialize_component(&event, &SerializeConfig::default());

        assert!(output.contains("SUMMARY:Meeting\\, important\r\n"));
        assert!(output.contains("DESCRIPTION:Line 1\\nLine 2\r\n"));
        assert!(output.contains("RRULE:FREQ=WEEKLY;BYDAY=MO,TU\r\n"));
    }

    #[test]
    fn parameters_are_sorted_and_escaped() {
        let prop = Property::with_params(
            "ATTENDEE",
            "mailto:jane@example.com",
            [
                Parameter::rsvp(true),
                Parameter::cn("Doe, Jane"),
                Parameter::altrep("cid:x;y"),
            ],
        );
        assert_eq!(
            serialize_property(&prop, &SerializeConfig::default()),
            "ATTENDEE;ALTREP=\"cid:x;y\";CN=Doe\\, Jane;RSVP=TRUE:mailto:jane@example.com\r\n"
        );
    }

    #[test]
    fn multi_valued_parameters_are_comma_joined() {
        let prop = Property::with_params(
            "ATTENDEE",
            "mailto:c@x",
            [Parameter::member(["mailto:a@x", "mailto:b@x"])],
        );
        assert_eq!(
            serialize_property(&prop, &SerializeConfig::default()),
            "ATTENDEE;MEMBER=mailto\\:a@x,mailto\\:b@x:mailto:c@x\r\n"
        );
    }

    #[test]
    fn serialize_folds_long_lines() {
        let mut event = Component::event();
        let long_summary = "A".repeat(100);
        event.add_property(Property::new("SUMMARY", &long_summary));

        let output = serialize_component(&event, &SerializeConfig::default());

        assert!(output.contains("\r\n "));
        let unfolded = output.replace("\r\n ", "");
        assert!(unfolded.contains(&format!("SUMMARY:{long_summary}\r\n")));
    }

    #[test]
    fn per_property_limit_and_newline_apply() {
        let mut event = Component::event();
        event.add_property(Property::new("SUMMARY", "x".repeat(20)));
        event.add_property(Property::new("DESCRIPTION", "y".repeat(20)));

        let config = SerializeConfig::new(75)
            .unwrap()
            .with_newline(NewlineStyle::Lf)
            .with_property_max_length("DESCRIPTION", 10)
            .unwrap();
        let output = serialize_component(&event, &config);

        assert!(!output.contains('\r'));
        assert!(output.contains(&format!("SUMMARY:{}\n", "x".repeat(20))));
        assert!(output.contains("DESCRIPTIO\n N:yyyyyyy\n yyyyyyyyy\n yyyy\n"));
    }

    #[test]
    fn unknown_component_names_are_kept() {
        let event = Component::from_token("X-Vendor");
        let output = serialize_component(&event, &SerializeConfig::default());
        assert_eq!(output, "BEGIN:X-Vendor\r\nEND:X-Vendor\r\n");
    }

    #[test]
    fn write_calendar_matches_string_output() {
        let mut event = Component::event();
        event.add_property(Property::new("UID", "1"));
        let cal = calendar_with_event(event);

        let mut buffer = Vec::new();
        write_calendar(&cal, &SerializeConfig::default(), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), serialize(&cal));
    }

    #[traced_test]
    #[test]
    fn write_calendar_reports_bytes_written() {
        let mut event = Component::event();
        event.add_property(Property::new("UID", "1"));
        let cal = calendar_with_event(event);

        let mut buffer = Vec::new();
        write_calendar(&cal, &SerializeConfig::default(), &mut buffer).unwrap();
        assert!(logs_contain("Calendar serialized"));
        assert!(logs_contain(&format!("bytes={}", buffer.len())));
        assert!(logs_contain("lines=6"));
    }

    #[test_log::test]
    fn write_failure_names_the_property() {
        struct FailAfter(usize);

        impl io::Write for FailAfter {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                if self.0 == 0 {
                    return Err(io::Error::other("sink closed"));
                }
                self.0 -= 1;
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut event = Component::event();
        event.add_property(Property::new("UID", "1"));
        event.add_property(Property::new("SUMMARY", "boom"));
        let cal = calendar_with_event(event);

        // BEGIN:VCALENDAR, VERSION, BEGIN:VEVENT, UID succeed.
        let err = write_calendar(&cal, &SerializeConfig::default(), FailAfter(4)).unwrap_err();
        assert!(matches!(err, RfcError::Write { ref property, .. } if property == "SUMMARY"));
    }

    #[test]
    fn roundtrip_simple() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:roundtrip@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T140000Z\r\n\
SUMMARY:Roundtrip Test\\, with comma\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let parsed = parse_str(input).unwrap();
        let output = serialize(&parsed);
        assert_eq!(output, input);
        assert_eq!(parse_str(&output).unwrap(), parsed);
    }
}

//! iCalendar document parser (RFC 5545).
//!
//! Drives a `BEGIN`/`END` state machine over unfolded content lines and
//! builds the component tree.

use std::io::{BufRead, BufReader, Read};

use super::error::{ParseError, ParseErrorKind};
use super::lexer::parse_property;
use super::unfold::{ContentLine, LineUnfolder};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::names::{BEGIN, END, component::VCALENDAR};
use crate::rfc::ical::core::{Calendar, Component, Property};

/// Deepest component nesting accepted below `VCALENDAR`.
pub const MAX_NESTING_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for `BEGIN:VCALENDAR`.
    Begin,
    /// Accumulating calendar-level properties.
    Properties,
    /// At least one child component has been read.
    Components,
    /// `END:VCALENDAR` seen.
    End,
}

/// Streaming iCalendar parser.
///
/// When `parse` fails, the calendar built so far (its properties and every
/// completed top-level component) stays available through
/// [`Parser::partial`].
#[derive(Debug)]
pub struct Parser<R> {
    lines: LineUnfolder<R>,
    calendar: Calendar,
    state: State,
}

impl<R: BufRead> Parser<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineUnfolder::new(reader),
            calendar: Calendar::empty(),
            state: State::Begin,
        }
    }

    /// Parses one `VCALENDAR` object from the stream.
    ///
    /// ## Errors
    ///
    /// Returns an error on a read failure, a malformed content line or a
    /// `BEGIN`/`END` structure violation. Nothing is skipped or repaired.
    #[tracing::instrument(skip(self))]
    pub fn parse(&mut self) -> RfcResult<Calendar> {
        tracing::debug!("Parsing iCalendar stream");

        let result = self.run();
        match &result {
            Ok(calendar) => tracing::debug!(
                properties = calendar.properties.len(),
                components = calendar.components.len(),
                lines = self.lines.line_number(),
                "iCalendar stream parsed"
            ),
            Err(error) => {
                let line = if let RfcError::Parse(parse) = error {
                    parse.line
                } else {
                    self.lines.line_number()
                };
                tracing::warn!(line, %error, "iCalendar parse failed");
            }
        }
        result
    }

    fn run(&mut self) -> RfcResult<Calendar> {
        while let Some(line) = self.lines.read_next_line()? {
            if line.is_empty() {
                continue;
            }
            self.step(&line)?;
        }

        match self.state {
            State::End => Ok(std::mem::take(&mut self.calendar)),
            State::Begin => Err(structural(
                ParseErrorKind::ExpectedBegin,
                self.lines.line_number().max(1),
                "expected BEGIN:VCALENDAR, found end of input",
            )),
            State::Properties | State::Components => Err(structural(
                ParseErrorKind::OutOfLines,
                self.lines.line_number(),
                format!("missing END:{VCALENDAR}"),
            )),
        }
    }

    /// The calendar built so far.
    #[must_use]
    pub fn partial(&self) -> &Calendar {
        &self.calendar
    }

    #[must_use]
    pub fn into_partial(self) -> Calendar {
        self.calendar
    }

    fn step(&mut self, line: &ContentLine) -> RfcResult<()> {
        let prop = parse_property(&line.text, line.number)?;
        tracing::trace!(line = line.number, name = %prop.name, state = ?self.state, "Content line");

        match self.state {
            State::Begin => {
                if !prop.is_named(BEGIN) {
                    return Err(structural(
                        ParseErrorKind::ExpectedBegin,
                        line.number,
                        format!("expected BEGIN:{VCALENDAR}, got {}", prop.name),
                    ));
                }
                if !is_vcalendar(&prop) {
                    return Err(structural(
                        ParseErrorKind::ExpectedVCalendar,
                        line.number,
                        format!("expected BEGIN:{VCALENDAR}, got BEGIN:{}", prop.value),
                    ));
                }
                self.state = State::Properties;
            }
            State::Properties | State::Components => {
                if prop.is_named(END) {
                    if !is_vcalendar(&prop) {
                        return Err(structural(
                            ParseErrorKind::ExpectedEnd,
                            line.number,
                            format!("expected END:{VCALENDAR}, got END:{}", prop.value),
                        ));
                    }
                    self.state = State::End;
                } else if prop.is_named(BEGIN) {
                    if is_vcalendar(&prop) {
                        return Err(nested_vcalendar(line.number));
                    }
                    self.state = State::Components;
                    let component = parse_component(&mut self.lines, &prop.value, line.number, 1)?;
                    self.calendar.components.push(component);
                } else if self.state == State::Properties {
                    self.calendar.properties.push(prop);
                } else {
                    return Err(structural(
                        ParseErrorKind::ExpectedBeginOrEnd,
                        line.number,
                        format!("expected BEGIN or END, got {}", prop.name),
                    ));
                }
            }
            State::End => {
                return Err(structural(
                    ParseErrorKind::ContentAfterEnd,
                    line.number,
                    format!("{} after END:{VCALENDAR}", prop.name),
                ));
            }
        }
        Ok(())
    }
}

/// Parses a component body after its `BEGIN:<token>` line, through the
/// matching `END:<token>`.
#[tracing::instrument(level = "trace", skip(lines))]
fn parse_component<R: BufRead>(
    lines: &mut LineUnfolder<R>,
    token: &str,
    begin_line: usize,
    depth: usize,
) -> RfcResult<Component> {
    if depth > MAX_NESTING_DEPTH {
        return Err(structural(
            ParseErrorKind::NestingTooDeep,
            begin_line,
            format!("BEGIN:{token} exceeds {MAX_NESTING_DEPTH} levels"),
        ));
    }

    tracing::trace!(token, line = begin_line, depth, "Component opened");
    let mut component = Component::from_token(token);
    loop {
        let Some(line) = lines.read_next_line()? else {
            return Err(structural(
                ParseErrorKind::OutOfLines,
                lines.line_number(),
                format!("missing END:{token}"),
            ));
        };
        if line.is_empty() {
            continue;
        }

        let prop = parse_property(&line.text, line.number)?;
        if prop.is_named(END) {
            if prop.value == token {
                tracing::trace!(
                    token,
                    line = line.number,
                    properties = component.body().properties.len(),
                    children = component.children().len(),
                    "Component closed"
                );
                return Ok(component);
            }
            return Err(structural(
                ParseErrorKind::UnbalancedEnd,
                line.number,
                format!("expected END:{token}, got END:{}", prop.value),
            ));
        }
        if prop.is_named(BEGIN) {
            if is_vcalendar(&prop) {
                return Err(nested_vcalendar(line.number));
            }
            let child = parse_component(lines, &prop.value, line.number, depth + 1)?;
            component.children_mut().push(child);
            continue;
        }
        component.body_mut().properties.push(prop);
    }
}

fn is_vcalendar(prop: &Property) -> bool {
    prop.value.eq_ignore_ascii_case(VCALENDAR)
}

fn nested_vcalendar(line: usize) -> RfcError {
    structural(
        ParseErrorKind::VCalendarNotWhereExpected,
        line,
        format!("BEGIN:{VCALENDAR} inside another component"),
    )
}

fn structural(kind: ParseErrorKind, line: usize, context: impl Into<String>) -> RfcError {
    ParseError::new(kind, line, 1).with_context(context).into()
}

/// Parses an iCalendar document held in memory.
///
/// ## Errors
///
/// Returns an error if the input is not a well-formed `VCALENDAR` object.
pub fn parse_str(input: &str) -> RfcResult<Calendar> {
    Parser::new(input.as_bytes()).parse()
}

/// Parses an iCalendar document from any reader, buffering it.
///
/// ## Errors
///
/// Returns an error on a read failure or if the stream is not a well-formed
/// `VCALENDAR` object.
pub fn parse_reader<R: Read>(reader: R) -> RfcResult<Calendar> {
    Parser::new(BufReader::new(reader)).parse()
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::rfc::ical::core::{ComponentKind, PropertyList};

    fn structural_kind(input: &str) -> (ParseErrorKind, usize) {
        match parse_str(input) {
            Err(RfcError::Parse(err)) => (err.kind, err.line),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test_log::test]
    fn parse_minimal_calendar() {
        let cal = parse_str("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n").unwrap();
        assert_eq!(cal.property_value("VERSION"), Some("2.0"));
        assert!(cal.components.is_empty());
    }

    #[test_log::test]
    fn parse_event_with_alarm() {
        let input = "\
BEGIN:VCALENDAR\r
PRODID:-//Test//EN\r
VERSION:2.0\r
BEGIN:VEVENT\r
UID:1\r
SUMMARY:Hi\r
BEGIN:VALARM\r
ACTION:DISPLAY\r
TRIGGER:-PT15M\r
END:VALARM\r
END:VEVENT\r
END:VCALENDAR\r
";
        let cal = parse_str(input).unwrap();
        assert_eq!(cal.properties.len(), 2);
        assert_eq!(cal.components.len(), 1);

        let event = &cal.components[0];
        assert!(event.is(ComponentKind::Event));
        assert_eq!(event.property_value("UID"), Some("1"));
        assert_eq!(event.property_value("SUMMARY"), Some("Hi"));
        assert_eq!(event.children().len(), 1);
        assert!(event.children()[0].is(ComponentKind::Alarm));
        assert_eq!(event.children()[0].property_value("TRIGGER"), Some("-PT15M"));
    }

    #[test]
    fn unknown_components_and_properties_are_kept() {
        let input = "BEGIN:VCALENDAR\nX-WR-CALNAME:Home\nBEGIN:X-VENDOR-THING\nX-CUSTOM-FIELD:value\nEND:X-VENDOR-THING\nEND:VCALENDAR\n";
        let cal = parse_str(input).unwrap();
        assert_eq!(cal.property_value("X-WR-CALNAME"), Some("Home"));
        let vendor = &cal.components[0];
        assert_eq!(vendor.kind(), None);
        assert_eq!(vendor.name(), "X-VENDOR-THING");
        assert_eq!(vendor.property_value("X-CUSTOM-FIELD"), Some("value"));
    }

    #[test]
    fn begin_and_end_are_case_insensitive() {
        let cal = parse_str("begin:vcalendar\nBEGIN:vevent\nEND:vevent\nend:VCalendar\n").unwrap();
        assert!(cal.components[0].is(ComponentKind::Event));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let cal = parse_str("\r\nBEGIN:VCALENDAR\r\n\r\nVERSION:2.0\r\n\r\nEND:VCALENDAR\r\n\r\n").unwrap();
        assert_eq!(cal.properties.len(), 1);
    }

    #[test]
    fn parse_reader_buffers_input() {
        let input = b"BEGIN:VCALENDAR\r\nBEGIN:VTODO\r\nUID:t\r\nEND:VTODO\r\nEND:VCALENDAR\r\n";
        let cal = parse_reader(&input[..]).unwrap();
        assert!(cal.components[0].is(ComponentKind::Todo));
    }

    #[traced_test]
    #[test]
    fn components_are_traced_open_and_closed() {
        parse_str("BEGIN:VCALENDAR\nBEGIN:VEVENT\nBEGIN:VALARM\nEND:VALARM\nEND:VEVENT\nEND:VCALENDAR\n")
            .unwrap();
        assert!(logs_contain("Component opened"));
        assert!(logs_contain("Component closed"));
        assert!(logs_contain("VALARM"));
        assert!(logs_contain("iCalendar stream parsed"));
    }

    #[traced_test]
    #[test]
    fn read_failures_are_logged() {
        let input = b"BEGIN:VCALENDAR\r\nSUMMARY:\xff\r\nEND:VCALENDAR\r\n";
        let err = parse_reader(&input[..]).unwrap_err();
        assert!(matches!(&err, RfcError::Parse(e) if e.kind == ParseErrorKind::InvalidUtf8));
        assert!(logs_contain("iCalendar parse failed"));
    }

    #[traced_test]
    #[test]
    fn end_of_input_failures_are_logged() {
        parse_str("BEGIN:VCALENDAR\nVERSION:2.0\n").unwrap_err();
        assert!(logs_contain("iCalendar parse failed"));
        assert!(logs_contain("missing END:VCALENDAR"));
    }

    #[test]
    fn empty_input_expects_begin() {
        assert_eq!(structural_kind(""), (ParseErrorKind::ExpectedBegin, 1));
    }

    #[test]
    fn first_line_must_begin_vcalendar() {
        assert_eq!(structural_kind("VERSION:2.0\n"), (ParseErrorKind::ExpectedBegin, 1));
        assert_eq!(
            structural_kind("BEGIN:VEVENT\nEND:VEVENT\n"),
            (ParseErrorKind::ExpectedVCalendar, 1)
        );
    }

    #[test]
    fn missing_end_vcalendar_runs_out_of_lines() {
        let err = parse_str("BEGIN:VCALENDAR\nVERSION:2.0\n").unwrap_err();
        let RfcError::Parse(err) = err else {
            panic!("expected parse error");
        };
        assert_eq!(err.kind, ParseErrorKind::OutOfLines);
        assert_eq!(err.context.as_deref(), Some("missing END:VCALENDAR"));
    }

    #[test]
    fn missing_child_end_runs_out_of_lines() {
        let err = parse_str("BEGIN:VCALENDAR\nBEGIN:VEVENT\nUID:1\n").unwrap_err();
        let RfcError::Parse(err) = err else {
            panic!("expected parse error");
        };
        assert_eq!(err.kind, ParseErrorKind::OutOfLines);
        assert_eq!(err.line, 3);
        assert_eq!(err.context.as_deref(), Some("missing END:VEVENT"));
    }

    #[test]
    fn mismatched_child_end_is_unbalanced() {
        let input = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nBEGIN:VALARM\nEND:VEVENT\nEND:VCALENDAR\n";
        assert_eq!(structural_kind(input), (ParseErrorKind::UnbalancedEnd, 4));
    }

    #[test]
    fn child_end_must_match_begin_exactly() {
        let input = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nEND:vevent\nEND:VCALENDAR\n";
        assert_eq!(structural_kind(input), (ParseErrorKind::UnbalancedEnd, 3));
    }

    #[test]
    fn top_level_end_must_close_vcalendar() {
        let input = "BEGIN:VCALENDAR\nEND:VEVENT\n";
        assert_eq!(structural_kind(input), (ParseErrorKind::ExpectedEnd, 2));
    }

    #[test]
    fn nested_vcalendar_is_rejected() {
        assert_eq!(
            structural_kind("BEGIN:VCALENDAR\nBEGIN:VCALENDAR\n"),
            (ParseErrorKind::VCalendarNotWhereExpected, 2)
        );
        assert_eq!(
            structural_kind("BEGIN:VCALENDAR\nBEGIN:VEVENT\nBEGIN:VCALENDAR\n"),
            (ParseErrorKind::VCalendarNotWhereExpected, 3)
        );
    }

    #[test]
    fn properties_after_components_are_rejected() {
        let input = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nEND:VEVENT\nVERSION:2.0\nEND:VCALENDAR\n";
        assert_eq!(structural_kind(input), (ParseErrorKind::ExpectedBeginOrEnd, 4));
    }

    #[test]
    fn content_after_end_is_rejected() {
        let input = "BEGIN:VCALENDAR\nEND:VCALENDAR\nBEGIN:VCALENDAR\n";
        assert_eq!(structural_kind(input), (ParseErrorKind::ContentAfterEnd, 3));
    }

    #[test]
    fn grammar_errors_propagate_with_line() {
        let input = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nATTENDEE;RSVP:mailto:a@x\nEND:VEVENT\nEND:VCALENDAR\n";
        assert_eq!(structural_kind(input), (ParseErrorKind::MissingParameterValue, 3));
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let depth = MAX_NESTING_DEPTH + 1;
        let mut input = String::from("BEGIN:VCALENDAR\n");
        for _ in 0..depth {
            input.push_str("BEGIN:X-LEVEL\n");
        }
        let (kind, line) = structural_kind(&input);
        assert_eq!(kind, ParseErrorKind::NestingTooDeep);
        assert_eq!(line, depth + 1);
    }

    #[test]
    fn nesting_at_limit_is_accepted() {
        let mut input = String::from("BEGIN:VCALENDAR\n");
        for _ in 0..MAX_NESTING_DEPTH {
            input.push_str("BEGIN:X-LEVEL\n");
        }
        for _ in 0..MAX_NESTING_DEPTH {
            input.push_str("END:X-LEVEL\n");
        }
        input.push_str("END:VCALENDAR\n");
        assert!(parse_str(&input).is_ok());
    }

    #[test_log::test]
    fn partial_result_survives_failure() {
        let input = "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
BEGIN:VEVENT\r
UID:done\r
END:VEVENT\r
BEGIN:VEVENT\r
UID:broken\r
END:VTODO\r
END:VCALENDAR\r
";
        let mut parser = Parser::new(input.as_bytes());
        assert!(parser.parse().is_err());

        let partial = parser.into_partial();
        assert_eq!(partial.property_value("VERSION"), Some("2.0"));
        assert_eq!(partial.components.len(), 1);
        assert_eq!(partial.components[0].property_value("UID"), Some("done"));
    }

    #[test]
    fn successful_parse_leaves_partial_empty() {
        let mut parser = Parser::new(&b"BEGIN:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR\n"[..]);
        let cal = parser.parse().unwrap();
        assert_eq!(cal.properties.len(), 1);
        assert!(parser.partial().properties.is_empty());
    }
}

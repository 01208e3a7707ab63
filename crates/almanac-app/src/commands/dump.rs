use std::io::{self, Read, Write};

use almanac_rfc::rfc::ical::core::{Calendar, Component, Property};
use almanac_rfc::rfc::ical::parse::parse_reader;
use anyhow::{Context, Result};

use super::{input_name, open_input};
use crate::cli::DumpArgs;

const INDENT: &str = "  ";

/// ## Errors
/// Returns an error if the input cannot be parsed or stdout cannot be
/// written.
#[tracing::instrument]
pub fn run(args: &DumpArgs) -> Result<()> {
    let input = open_input(args.input.as_deref())?;
    dump(input, args.json, io::stdout().lock())
        .with_context(|| format!("failed to dump {}", input_name(args.input.as_deref())))
}

/// Writes the parsed tree of `input` as JSON or as an outline.
///
/// ## Errors
/// Returns an error if parsing or writing fails.
pub fn dump<R: Read, W: Write>(input: R, json: bool, mut out: W) -> Result<()> {
    let calendar = parse_reader(input)?;
    if json {
        serde_json::to_writer_pretty(&mut out, &calendar)?;
        writeln!(out)?;
    } else {
        write_outline(&calendar, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn write_outline<W: Write>(calendar: &Calendar, out: &mut W) -> io::Result<()> {
    writeln!(out, "VCALENDAR")?;
    for property in &calendar.properties {
        write_property(property, 1, out)?;
    }
    for component in &calendar.components {
        write_component(component, 1, out)?;
    }
    Ok(())
}

fn write_component<W: Write>(component: &Component, depth: usize, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}{}", INDENT.repeat(depth), component.name())?;
    let body = component.body();
    for property in &body.properties {
        write_property(property, depth + 1, out)?;
    }
    for child in &body.children {
        write_component(child, depth + 1, out)?;
    }
    Ok(())
}

fn write_property<W: Write>(property: &Property, depth: usize, out: &mut W) -> io::Result<()> {
    write!(out, "{}{}", INDENT.repeat(depth), property.name)?;
    for (name, values) in &property.params {
        write!(out, " {name}={}", values.join(","))?;
    }
    writeln!(out, " = {:?}", property.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:1\r\nDTSTART;TZID=Europe/Paris:20260101T090000\r\nBEGIN:VALARM\r\nACTION:DISPLAY\r\nEND:VALARM\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";

    #[test]
    fn outline_is_indented_by_depth() {
        let mut out = Vec::new();
        dump(INPUT.as_bytes(), false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "VCALENDAR\n  VERSION = \"2.0\"\n  VEVENT\n    UID = \"1\"\n    DTSTART TZID=Europe/Paris = \"20260101T090000\"\n    VALARM\n      ACTION = \"DISPLAY\"\n"
        );
    }

    #[test]
    fn json_output_is_valid() {
        let mut out = Vec::new();
        dump(INPUT.as_bytes(), true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value.get("components").is_some(), "{value}");
        assert!(value.get("properties").is_some(), "{value}");
    }
}

use std::io::{Read, Write};
use std::path::Path;

use almanac_rfc::error::RfcResult;
use almanac_rfc::rfc::ical::parse::parse_reader;
use anyhow::Result;

use super::{input_name, open_input};
use crate::cli::CheckArgs;

/// Component counts for a calendar that parsed cleanly.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub properties: usize,
    pub components: usize,
}

/// Checks every file, printing one line each. Returns the number of
/// files that failed.
///
/// ## Errors
/// Returns an error only if writing the report fails.
#[tracing::instrument]
pub fn run(args: &CheckArgs) -> Result<usize> {
    let mut stdout = std::io::stdout().lock();
    let mut failures = 0;

    for path in &args.files {
        if !report(path, &mut stdout)? {
            failures += 1;
        }
    }

    tracing::info!(files = args.files.len(), failures, "Check finished");
    Ok(failures)
}

/// Writes the outcome for one path and returns whether it parsed.
fn report<W: Write>(path: &Path, out: &mut W) -> Result<bool> {
    let name = input_name(Some(path));
    let outcome = open_input(Some(path)).and_then(|input| check_reader(input).map_err(Into::into));

    match outcome {
        Ok(summary) => {
            writeln!(
                out,
                "ok     {name} ({} properties, {} components)",
                summary.properties, summary.components
            )?;
            Ok(true)
        }
        Err(error) => {
            writeln!(out, "error  {name}: {error:#}")?;
            Ok(false)
        }
    }
}

/// Parses one calendar and counts what it holds.
///
/// ## Errors
/// Returns the first read, grammar or structural error.
pub fn check_reader<R: Read>(input: R) -> RfcResult<Summary> {
    let calendar = parse_reader(input)?;
    Ok(Summary {
        properties: calendar.properties.len(),
        components: calendar.components.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_top_level_items() {
        let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//x//y\r\nBEGIN:VEVENT\r\nUID:1\r\nEND:VEVENT\r\nBEGIN:VTODO\r\nUID:2\r\nEND:VTODO\r\nEND:VCALENDAR\r\n";
        assert_eq!(
            check_reader(input.as_bytes()).unwrap(),
            Summary {
                properties: 2,
                components: 2,
            }
        );
    }

    #[test]
    fn reports_grammar_errors() {
        let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nSUMMARY;CN=\"open:x\r\nEND:VCALENDAR\r\n";
        let err = check_reader(input.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn missing_file_is_reported_not_raised() {
        let mut out = Vec::new();
        let ok = report(Path::new("/nonexistent/almanac-check.ics"), &mut out).unwrap();
        assert!(!ok);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("error  /nonexistent/almanac-check.ics: failed to open"), "{text}");
    }
}

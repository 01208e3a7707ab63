use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

use almanac_core::config::Settings;
use almanac_rfc::rfc::ical::build::{SerializeConfig, write_calendar};
use almanac_rfc::rfc::ical::parse::parse_reader;
use anyhow::{Context, Result};

use super::{input_name, open_input};
use crate::cli::FmtArgs;

/// ## Errors
/// Returns an error if the input cannot be read or parsed, the settings are
/// invalid, or the output cannot be written.
#[tracing::instrument(skip(settings))]
pub fn run(args: &FmtArgs, settings: &Settings) -> Result<()> {
    let config = serialize_config(args, settings)?;
    let input = open_input(args.input.as_deref())?;
    let name = input_name(args.input.as_deref());

    let result = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            format_document(input, &config, BufWriter::new(file))
        }
        None => format_document(input, &config, io::stdout().lock()),
    };
    result.with_context(|| format!("failed to format {name}"))
}

/// Settings from configuration, overridden by command-line flags.
///
/// ## Errors
/// Returns an error if the resulting line length is too small.
pub fn serialize_config(args: &FmtArgs, settings: &Settings) -> Result<SerializeConfig> {
    let mut serialization = settings.serialization.clone();
    if let Some(length) = args.line_length {
        serialization.max_line_length = length;
    }
    if let Some(newline) = args.newline {
        serialization.newline = newline;
    }
    Ok(SerializeConfig::from_settings(&serialization)?)
}

/// Parses one calendar from `input` and writes it back out.
///
/// ## Errors
/// Returns an error if parsing or writing fails.
pub fn format_document<R: Read, W: Write>(
    input: R,
    config: &SerializeConfig,
    output: W,
) -> Result<()> {
    let calendar = parse_reader(input)?;
    tracing::debug!(components = calendar.components.len(), "Calendar parsed");
    write_calendar(&calendar, config, output)?;
    Ok(())
}

//! Subcommand implementations.
//!
//! Each command works on readers and writers so it can be driven from tests
//! without touching the filesystem.

pub mod check;
pub mod dump;
pub mod fmt;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Opens `path` for reading, or stdin for `None` and `-`.
///
/// ## Errors
/// Returns an error if the file cannot be opened.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path.as_os_str() == "-" => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(file))
        }
    }
}

/// Display name for an input path.
fn input_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
}

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_MAX_LINE_LENGTH, ENV_PREFIX, MIN_LINE_LENGTH};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    #[serde(default)]
    pub serialization: SerializationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Line terminator written between content lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewlineStyle {
    #[default]
    Crlf,
    Lf,
}

impl NewlineStyle {
    /// ## Summary
    /// Returns the literal terminator sequence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

impl FromStr for NewlineStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "crlf" => Ok(Self::Crlf),
            "lf" => Ok(Self::Lf),
            other => Err(CoreError::InvalidInput(format!(
                "unknown newline style '{other}', expected 'crlf' or 'lf'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerializationSettings {
    pub max_line_length: usize,
    pub newline: NewlineStyle,
    /// Per-property octet limits, keyed by property name.
    pub property_max_length: BTreeMap<String, usize>,
}

impl Default for SerializationSettings {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            newline: NewlineStyle::default(),
            property_max_length: BTreeMap::new(),
        }
    }
}

impl SerializationSettings {
    /// ## Summary
    /// Checks that every configured line length leaves room for a folded segment.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` naming the first length below the minimum.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_line_length < MIN_LINE_LENGTH {
            return Err(CoreError::ValidationError(format!(
                "serialization.max_line_length must be at least {MIN_LINE_LENGTH}, got {}",
                self.max_line_length
            )));
        }
        for (name, &limit) in &self.property_max_length {
            if limit < MIN_LINE_LENGTH {
                return Err(CoreError::ValidationError(format!(
                    "serialization.property_max_length.{name} must be at least {MIN_LINE_LENGTH}, got {limit}"
                )));
            }
        }
        Ok(())
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `almanac.toml`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the configuration fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// ## Summary
    /// Same as [`Settings::load`], additionally reading a required file at `path`.
    ///
    /// ## Errors
    /// Returns an error if `path` cannot be read or the merged configuration is invalid.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::defaults()?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        // Env
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// ## Summary
    /// Builds settings from TOML text layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let builder =
            Self::defaults()?.add_source(config::File::from_str(toml, config::FileFormat::Toml));
        Self::finish(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder().set_default("logging.level", "warn")?)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder.build()?.try_deserialize::<Self>()?;
        settings.serialization.validate()?;
        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config(path: Option<&Path>) -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::trace!(error = %e, "No .env file loaded");
    }

    Settings::load_from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn defaults_apply_without_sources() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(settings.serialization, SerializationSettings::default());
        assert_eq!(settings.serialization.max_line_length, 75);
        assert_eq!(settings.serialization.newline, NewlineStyle::Crlf);
    }

    #[test_log::test]
    fn toml_overrides_serialization() {
        let settings = Settings::from_toml_str(
            r#"
[logging]
level = "trace"

[serialization]
max_line_length = 60
newline = "lf"

[serialization.property_max_length]
DESCRIPTION = 40
"#,
        )
        .unwrap();

        assert_eq!(settings.logging.level, "trace");
        assert_eq!(settings.serialization.max_line_length, 60);
        assert_eq!(settings.serialization.newline, NewlineStyle::Lf);
        let limits = &settings.serialization.property_max_length;
        assert_eq!(limits.len(), 1);
        assert_eq!(limits.values().next(), Some(&40));
    }

    #[test]
    fn rejects_too_short_line_length() {
        let result = Settings::from_toml_str("[serialization]\nmax_line_length = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_checks_property_limits() {
        let mut settings = SerializationSettings::default();
        settings.property_max_length.insert("SUMMARY".into(), 2);
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("SUMMARY"));
    }

    #[test]
    fn newline_style_from_str() {
        assert_eq!("CRLF".parse::<NewlineStyle>().unwrap(), NewlineStyle::Crlf);
        assert_eq!("lf".parse::<NewlineStyle>().unwrap(), NewlineStyle::Lf);
        assert!("cr".parse::<NewlineStyle>().is_err());
        assert_eq!(NewlineStyle::Lf.as_str(), "\n");
    }
}

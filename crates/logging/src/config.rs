//! crates/logging/src/config.rs
//! Logger configuration from directives, the environment, or serde.

use serde::{Deserialize, Serialize};

use crate::error::{LoggingError, LoggingResult};
use crate::level::Level;
use crate::mode::Mode;

/// Environment variable holding the level name.
pub const LEVEL_ENV: &str = "LOGGING_LEVEL";

/// Environment variable holding the mode name.
pub const MODE_ENV: &str = "LOGGING_MODE";

/// Level and mode a [`Logger`](crate::Logger) should run with.
///
/// Missing fields fall back to the logger defaults when deserializing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum severity that passes filtering.
    pub level: Level,
    /// Rendering mode.
    pub mode: Mode,
}

impl LoggerConfig {
    /// Parses a comma separated list of directives.
    ///
    /// ```
    /// use logging::{Level, LoggerConfig, Mode};
    ///
    /// let config = LoggerConfig::parse("level=debug, mode=development")?;
    /// assert_eq!(config.level, Level::Debug);
    /// assert_eq!(config.mode, Mode::Development);
    /// # Ok::<(), logging::LoggingError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Fails on the first directive [`apply_directive`](Self::apply_directive)
    /// rejects.
    pub fn parse(directives: &str) -> LoggingResult<Self> {
        let mut config = Self::default();
        for directive in directives.split(',') {
            if !directive.trim().is_empty() {
                config.apply_directive(directive)?;
            }
        }
        Ok(config)
    }

    /// Applies one `key=value` directive. Keys are `level` and `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::InvalidDirective`] when the directive has no
    /// `=` or an unknown key, and [`LoggingError::InvalidLevel`] or
    /// [`LoggingError::InvalidMode`] when the value is not recognized.
    pub fn apply_directive(&mut self, directive: &str) -> LoggingResult<()> {
        let (key, value) = parse_directive(directive)?;
        match key {
            "level" => self.level = value.parse()?,
            "mode" => self.mode = value.parse()?,
            _ => return Err(LoggingError::InvalidDirective(directive.trim().to_owned())),
        }
        Ok(())
    }

    /// Reads [`LEVEL_ENV`] and [`MODE_ENV`] from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when a variable is set to an unrecognized name.
    pub fn from_env() -> LoggingResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from variables returned by `lookup`.
    ///
    /// Unset and blank variables keep the default.
    ///
    /// # Errors
    ///
    /// Fails when a variable holds an unrecognized name.
    pub fn from_lookup<F>(lookup: F) -> LoggingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(level) = non_blank(lookup(LEVEL_ENV)) {
            config.level = level.trim().parse()?;
        }
        if let Some(mode) = non_blank(lookup(MODE_ENV)) {
            config.mode = mode.trim().parse()?;
        }
        Ok(config)
    }
}

fn parse_directive(directive: &str) -> LoggingResult<(&str, &str)> {
    let trimmed = directive.trim();
    let (key, value) = trimmed
        .split_once('=')
        .ok_or_else(|| LoggingError::InvalidDirective(trimmed.to_owned()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(LoggingError::InvalidDirective(trimmed.to_owned()));
    }
    Ok((key, value.trim()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

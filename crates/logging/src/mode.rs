//! crates/logging/src/mode.rs
//! Rendering modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoggingError;

/// Rendering style of emitted events.
///
/// In [`Mode::Development`] events render as indented, multi-line JSON; in
/// [`Mode::Production`] they render as a single compact line.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Human-oriented, pretty-printed output.
    Development,
    /// Machine-oriented, single-line output.
    #[default]
    Production,
}

impl Mode {
    /// The supported modes.
    pub const SUPPORTED: [Self; 2] = [Self::Development, Self::Production];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    /// Reports whether this is [`Mode::Development`].
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = LoggingError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::SUPPORTED
            .into_iter()
            .find(|mode| mode.as_str() == name)
            .ok_or_else(|| LoggingError::InvalidMode(name.to_owned()))
    }
}

impl TryFrom<&str> for Mode {
    type Error = LoggingError;

    fn try_from(name: &str) -> Result<Self, LoggingError> {
        name.parse()
    }
}

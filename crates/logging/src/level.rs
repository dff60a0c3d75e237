//! crates/logging/src/level.rs
//! Severity levels and their inclusion rules.

use std::fmt;
use std::str::FromStr;

use logging_sink::Channel;
use serde::{Deserialize, Serialize};

use crate::error::LoggingError;

/// Severity of a log event.
///
/// The four levels are totally ordered by verbosity: `Error` is the most
/// severe and least verbose, `Debug` the least severe and most verbose. When
/// a level is used as the active threshold of a [`Logger`](crate::Logger),
/// it lets through every level it [`includes`](Self::includes).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Failures.
    #[default]
    Error,
    /// Conditions worth attention that are not failures.
    Warn,
    /// Routine progress.
    Info,
    /// Developer diagnostics.
    Debug,
}

const ERROR_INCLUDES: [Level; 1] = [Level::Error];
const WARN_INCLUDES: [Level; 2] = [Level::Warn, ERROR_INCLUDES[0]];
const INFO_INCLUDES: [Level; 3] = [Level::Info, WARN_INCLUDES[0], WARN_INCLUDES[1]];
const DEBUG_INCLUDES: [Level; 4] = [
    Level::Debug,
    INFO_INCLUDES[0],
    INFO_INCLUDES[1],
    INFO_INCLUDES[2],
];

impl Level {
    /// Every level, most severe first.
    pub const ALL: [Self; 4] = [Self::Error, Self::Warn, Self::Info, Self::Debug];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Returns the next more severe level, or `None` for [`Level::Error`].
    #[must_use]
    pub const fn more_severe(self) -> Option<Self> {
        match self {
            Self::Error => None,
            Self::Warn => Some(Self::Error),
            Self::Info => Some(Self::Warn),
            Self::Debug => Some(Self::Info),
        }
    }

    /// Levels surfaced when `self` is the active threshold.
    ///
    /// Each set is `self` followed by the set of the next more severe level,
    /// bottoming out at `[Error]`. The sets are built at compile time.
    ///
    /// ```
    /// use logging::Level;
    ///
    /// assert_eq!(Level::Warn.included_levels(), [Level::Warn, Level::Error]);
    /// assert_eq!(Level::Error.included_levels(), [Level::Error]);
    /// ```
    #[must_use]
    pub const fn included_levels(self) -> &'static [Self] {
        match self {
            Self::Error => &ERROR_INCLUDES,
            Self::Warn => &WARN_INCLUDES,
            Self::Info => &INFO_INCLUDES,
            Self::Debug => &DEBUG_INCLUDES,
        }
    }

    /// Reports whether events at `other` pass when `self` is the threshold.
    ///
    /// Holds iff `other` is `self` or more severe than `self`.
    #[must_use]
    pub fn includes(self, other: Self) -> bool {
        self.included_levels().contains(&other)
    }

    /// Console channel the default handler writes events of this level to.
    ///
    /// Debug events share the generic [`Channel::Log`] channel.
    #[must_use]
    pub const fn channel(self) -> Channel {
        match self {
            Self::Error => Channel::Error,
            Self::Warn => Channel::Warn,
            Self::Info => Channel::Info,
            Self::Debug => Channel::Log,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggingError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == tag)
            .ok_or_else(|| LoggingError::InvalidLevel(tag.to_owned()))
    }
}

impl TryFrom<&str> for Level {
    type Error = LoggingError;

    fn try_from(tag: &str) -> Result<Self, LoggingError> {
        tag.parse()
    }
}

//! crates/logging/src/event.rs
//! The immutable record of one logging occurrence.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::Meta;
use crate::level::Level;
use crate::mode::Mode;

const DEVELOPMENT_INDENT: &[u8] = b"    ";

/// One emitted log event.
///
/// Events are built by [`Client::log`](crate::Client::log) once the level
/// passes the logger's threshold and are never mutated afterwards. Their
/// textual form is JSON carrying `level`, `message`, `meta`, `tags` and
/// `mode`; the layout follows the event's [`Mode`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    level: Level,
    message: Value,
    meta: Meta,
    tags: Vec<String>,
    mode: Mode,
}

impl LogEvent {
    pub(crate) const fn new(
        level: Level,
        message: Value,
        meta: Meta,
        tags: Vec<String>,
        mode: Mode,
    ) -> Self {
        Self {
            level,
            message,
            meta,
            tags,
            mode,
        }
    }

    /// Severity of the event.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Severity name (`"error"`, `"warn"`, `"info"` or `"debug"`).
    #[must_use]
    pub const fn level_name(&self) -> &'static str {
        self.level.as_str()
    }

    /// The normalized message.
    #[must_use]
    pub const fn message(&self) -> &Value {
        &self.message
    }

    /// The message as text, when it is a JSON string.
    #[must_use]
    pub fn message_str(&self) -> Option<&str> {
        self.message.as_str()
    }

    /// Merged metadata.
    #[must_use]
    pub const fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Tags in emission order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Reports whether `tag` is among the event's tags.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    /// Mode the logger was in when the event was emitted.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Renders the event as JSON bytes in the layout its mode selects.
    ///
    /// Development mode indents nested values by four spaces; production
    /// mode writes one compact line.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(128);
        match self.mode {
            Mode::Production => serde_json::to_writer(&mut buffer, self)?,
            Mode::Development => {
                let formatter = PrettyFormatter::with_indent(DEVELOPMENT_INDENT);
                let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
                self.serialize(&mut serializer)?;
            }
        }
        Ok(buffer)
    }

    /// Renders the event as a JSON string in the layout its mode selects.
    pub fn render(&self) -> serde_json::Result<String> {
        let bytes = self.to_json()?;
        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.render().map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

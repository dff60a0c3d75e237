//! crates/logging-sink/src/channel.rs
//! The five named output channels of a console.

use std::fmt;

/// Named output channel of a [`Console`](crate::Console).
///
/// Consoles expose exactly five channels. The generic [`Channel::Log`] channel
/// is the plain "print a line" entry point; the remaining channels carry the
/// severity their name suggests.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Channel {
    /// Generic output.
    Log,
    /// Debug output.
    Debug,
    /// Informational output.
    Info,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
}

impl Channel {
    /// Every channel, in declaration order.
    pub const ALL: [Self; 5] = [Self::Log, Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Returns the lowercase channel name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Reports whether the channel belongs on the diagnostic (stderr) stream.
    ///
    /// ```
    /// use logging_sink::Channel;
    ///
    /// assert!(Channel::Error.is_diagnostic());
    /// assert!(Channel::Warn.is_diagnostic());
    /// assert!(!Channel::Debug.is_diagnostic());
    /// ```
    #[must_use]
    pub const fn is_diagnostic(self) -> bool {
        matches!(self, Self::Warn | Self::Error)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! crates/logging-sink/src/console.rs
//! The console contract and the standard-stream implementation.

use std::io::{self, Write};

use crate::channel::Channel;

/// A five-channel text sink.
///
/// Every channel accepts a single textual argument. Implementations decide
/// where each channel ends up; callers only pick the channel. The trait is
/// object safe so consoles can be stored as `Arc<dyn Console>` and swapped at
/// runtime through a [`ConsoleSlot`](crate::ConsoleSlot).
pub trait Console: Send + Sync {
    /// Writes `text` to `channel`.
    fn write(&self, channel: Channel, text: &str) -> io::Result<()>;

    /// Writes to the generic [`Channel::Log`] channel.
    fn log(&self, text: &str) -> io::Result<()> {
        self.write(Channel::Log, text)
    }

    /// Writes to [`Channel::Debug`].
    fn debug(&self, text: &str) -> io::Result<()> {
        self.write(Channel::Debug, text)
    }

    /// Writes to [`Channel::Info`].
    fn info(&self, text: &str) -> io::Result<()> {
        self.write(Channel::Info, text)
    }

    /// Writes to [`Channel::Warn`].
    fn warn(&self, text: &str) -> io::Result<()> {
        self.write(Channel::Warn, text)
    }

    /// Writes to [`Channel::Error`].
    fn error(&self, text: &str) -> io::Result<()> {
        self.write(Channel::Error, text)
    }
}

/// Console backed by the process' standard streams.
///
/// [`Channel::Log`], [`Channel::Debug`] and [`Channel::Info`] go to stdout;
/// [`Channel::Warn`] and [`Channel::Error`] go to stderr. Each write is a
/// single newline-terminated line issued while holding the stream lock, so
/// lines from concurrent writers never interleave.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    /// Creates a standard-stream console.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn write(&self, channel: Channel, text: &str) -> io::Result<()> {
        if channel.is_diagnostic() {
            let mut stderr = io::stderr().lock();
            writeln!(stderr, "{text}")
        } else {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}")?;
            stdout.flush()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        writes: Mutex<Vec<(Channel, String)>>,
    }

    impl Console for Recorder {
        fn write(&self, channel: Channel, text: &str) -> io::Result<()> {
            self.writes
                .lock()
                .expect("recorder lock")
                .push((channel, text.to_owned()));
            Ok(())
        }
    }

    #[test]
    fn named_methods_route_to_matching_channel() {
        let recorder = Recorder::default();
        recorder.log("a").expect("log");
        recorder.debug("b").expect("debug");
        recorder.info("c").expect("info");
        recorder.warn("d").expect("warn");
        recorder.error("e").expect("error");

        let writes = recorder.writes.into_inner().expect("recorder lock");
        let channels: Vec<_> = writes.iter().map(|(channel, _)| *channel).collect();
        assert_eq!(channels, Channel::ALL);
        assert_eq!(writes[4].1, "e");
    }

    #[test]
    fn console_is_object_safe() {
        let console: Box<dyn Console> = Box::new(Recorder::default());
        console.info("boxed").expect("boxed write");
    }

    #[test]
    fn std_console_writes_every_channel() {
        let console = StdConsole::new();
        for channel in Channel::ALL {
            console
                .write(channel, "std console smoke test")
                .expect("standard streams accept writes");
        }
    }
}

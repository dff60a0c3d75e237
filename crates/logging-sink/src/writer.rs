//! crates/logging-sink/src/writer.rs
//! Console that funnels every channel into a single [`io::Write`] target.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::channel::Channel;
use crate::console::Console;

/// Controls whether a [`WriterConsole`] tags each line with its channel name.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ChannelPrefix {
    /// Write the text verbatim.
    #[default]
    Omit,
    /// Prefix each line with `[channel] `.
    Include,
}

/// Console writing every channel into one writer.
///
/// The writer sits behind a mutex so the console can be shared between
/// threads; each call produces exactly one newline-terminated line. This is
/// the adapter to reach for when logs must land in a file or an in-memory
/// buffer instead of the standard streams.
///
/// ```
/// use logging_sink::{Channel, ChannelPrefix, Console, WriterConsole};
///
/// let console = WriterConsole::with_prefix(Vec::new(), ChannelPrefix::Include);
/// console.warn("disk almost full")?;
/// console.write(Channel::Log, "done")?;
///
/// let output = String::from_utf8(console.into_inner()).unwrap();
/// assert_eq!(output, "[warn] disk almost full\n[log] done\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct WriterConsole<W> {
    writer: Mutex<W>,
    prefix: ChannelPrefix,
}

impl<W> WriterConsole<W> {
    /// Creates a console that writes text verbatim.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_prefix(writer, ChannelPrefix::Omit)
    }

    /// Creates a console with an explicit [`ChannelPrefix`] policy.
    #[must_use]
    pub fn with_prefix(writer: W, prefix: ChannelPrefix) -> Self {
        Self {
            writer: Mutex::new(writer),
            prefix,
        }
    }

    /// Returns the prefix policy.
    #[must_use]
    pub const fn prefix(&self) -> ChannelPrefix {
        self.prefix
    }

    /// Consumes the console and returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> WriterConsole<W> {
    /// Flushes the underlying writer.
    pub fn flush(&self) -> io::Result<()> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

impl<W> Console for WriterConsole<W>
where
    W: Write + Send,
{
    fn write(&self, channel: Channel, text: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        match self.prefix {
            ChannelPrefix::Omit => writeln!(writer, "{text}"),
            ChannelPrefix::Include => writeln!(writer, "[{channel}] {text}"),
        }
    }
}

impl<W> fmt::Debug for WriterConsole<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterConsole")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_call() {
        let console = WriterConsole::new(Vec::new());
        console.info("first").expect("write");
        console.error("second").expect("write");

        let output = String::from_utf8(console.into_inner()).expect("utf-8");
        assert_eq!(output, "first\nsecond\n");
    }

    #[test]
    fn prefix_names_the_channel() {
        let console = WriterConsole::with_prefix(Vec::new(), ChannelPrefix::Include);
        for channel in Channel::ALL {
            console.write(channel, "x").expect("write");
        }

        let output = String::from_utf8(console.into_inner()).expect("utf-8");
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines,
            ["[log] x", "[debug] x", "[info] x", "[warn] x", "[error] x"]
        );
    }

    #[test]
    fn default_prefix_is_omit() {
        assert_eq!(ChannelPrefix::default(), ChannelPrefix::Omit);
        assert_eq!(WriterConsole::new(Vec::<u8>::new()).prefix(), ChannelPrefix::Omit);
    }

    #[test]
    fn flush_reaches_writer() {
        let console = WriterConsole::new(io::BufWriter::new(Vec::new()));
        console.log("buffered").expect("write");
        console.flush().expect("flush");

        let inner = console
            .into_inner()
            .into_inner()
            .expect("buffer already flushed");
        assert_eq!(inner, b"buffered\n");
    }
}

//! crates/logging-sink/src/memory.rs
//! In-memory console that records every write.

use std::io;
use std::sync::{Mutex, PoisonError};

use crate::channel::Channel;
use crate::console::Console;

/// A single write captured by a [`MemoryConsole`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsoleRecord {
    /// Channel the text was written to.
    pub channel: Channel,
    /// The written text, without a trailing newline.
    pub text: String,
}

/// Console that keeps every write in memory.
///
/// Useful for tests and for embedding hosts that forward console output
/// elsewhere themselves.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    records: Mutex<Vec<ConsoleRecord>>,
}

impl MemoryConsole {
    /// Creates an empty console.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record captured so far, in write order.
    #[must_use]
    pub fn records(&self) -> Vec<ConsoleRecord> {
        self.lock().clone()
    }

    /// Returns the texts written to `channel`, in write order.
    #[must_use]
    pub fn texts(&self, channel: Channel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|record| record.channel == channel)
            .map(|record| record.text.clone())
            .collect()
    }

    /// Removes and returns every captured record.
    pub fn take(&self) -> Vec<ConsoleRecord> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of captured records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ConsoleRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Console for MemoryConsole {
    fn write(&self, channel: Channel, text: &str) -> io::Result<()> {
        self.lock().push(ConsoleRecord {
            channel,
            text: text.to_owned(),
        });
        Ok(())
    }
}

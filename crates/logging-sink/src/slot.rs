//! crates/logging-sink/src/slot.rs
//! Swappable console holder and the process-wide console.

use std::fmt;
use std::io;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::channel::Channel;
use crate::console::{Console, StdConsole};

/// Holder for the console currently in effect.
///
/// Code that wants its output to be redirectable writes through a slot
/// instead of a concrete console. Redirecting is a plain value swap via
/// [`replace`](Self::replace): the caller receives the previous console and
/// decides when to put it back.
///
/// ```
/// use std::sync::Arc;
/// use logging_sink::{Channel, Console, ConsoleSlot, MemoryConsole};
///
/// let captured = Arc::new(MemoryConsole::new());
/// let slot = ConsoleSlot::new(Arc::new(MemoryConsole::new()));
///
/// let previous = slot.replace(captured.clone());
/// slot.write(Channel::Info, "redirected")?;
/// slot.replace(previous);
///
/// assert_eq!(captured.texts(Channel::Info), ["redirected"]);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct ConsoleSlot {
    current: RwLock<Arc<dyn Console>>,
}

impl ConsoleSlot {
    /// Creates a slot holding `console`.
    #[must_use]
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self {
            current: RwLock::new(console),
        }
    }

    /// Returns the console currently installed.
    #[must_use]
    pub fn current(&self) -> Arc<dyn Console> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// Installs `console` and returns the one it replaced.
    pub fn replace(&self, console: Arc<dyn Console>) -> Arc<dyn Console> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, console)
    }

    /// Reports whether `console` is the one currently installed.
    #[must_use]
    pub fn is_current(&self, console: &Arc<dyn Console>) -> bool {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::ptr_eq(&*current, console)
    }

    /// Writes through the current console.
    ///
    /// The slot lock is released before the console runs, so a console may
    /// itself swap the slot without deadlocking.
    pub fn write(&self, channel: Channel, text: &str) -> io::Result<()> {
        self.current().write(channel, text)
    }
}

impl Default for ConsoleSlot {
    fn default() -> Self {
        Self::new(Arc::new(StdConsole::new()))
    }
}

impl fmt::Debug for ConsoleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSlot").finish_non_exhaustive()
    }
}

static GLOBAL_SLOT: LazyLock<Arc<ConsoleSlot>> = LazyLock::new(|| Arc::new(ConsoleSlot::default()));

/// Returns the process-wide console slot.
///
/// It starts out holding a [`StdConsole`]. The free functions [`log`],
/// [`debug`], [`info`], [`warn`] and [`error`] write through it.
#[must_use]
pub fn global_slot() -> Arc<ConsoleSlot> {
    Arc::clone(&GLOBAL_SLOT)
}

/// Writes to the generic channel of the process-wide console.
pub fn log(text: &str) -> io::Result<()> {
    GLOBAL_SLOT.write(Channel::Log, text)
}

/// Writes to the debug channel of the process-wide console.
pub fn debug(text: &str) -> io::Result<()> {
    GLOBAL_SLOT.write(Channel::Debug, text)
}

/// Writes to the info channel of the process-wide console.
pub fn info(text: &str) -> io::Result<()> {
    GLOBAL_SLOT.write(Channel::Info, text)
}

/// Writes to the warn channel of the process-wide console.
pub fn warn(text: &str) -> io::Result<()> {
    GLOBAL_SLOT.write(Channel::Warn, text)
}

/// Writes to the error channel of the process-wide console.
pub fn error(text: &str) -> io::Result<()> {
    GLOBAL_SLOT.write(Channel::Error, text)
}

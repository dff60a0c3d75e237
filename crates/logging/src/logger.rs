//! crates/logging/src/logger.rs
//! The shared dispatcher: level, mode, handler list and console control.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use logging_sink::{Console, ConsoleSlot, global_slot};

use crate::Meta;
use crate::client::Client;
use crate::config::LoggerConfig;
use crate::diagnostics;
use crate::error::{HandlerError, LoggingResult};
use crate::event::LogEvent;
use crate::handler::{LogHandler, console_handler};
use crate::hijack::ClientConsole;
use crate::level::Level;
use crate::mode::Mode;

/// Central logging dispatcher.
///
/// A `Logger` holds the minimum [`Level`] that passes filtering, the
/// rendering [`Mode`], and the ordered list of [`LogHandler`]s every event is
/// broadcast to. It is a cheap handle: clones share the same state, so a
/// logger can be handed to every [`Client`] and thread that needs it.
///
/// A new logger starts at [`Level::Error`] in [`Mode::Production`] with a
/// single handler, the [default console handler](Self::default_log_handler).
///
/// # Consoles
///
/// Each logger is bound to a [`ConsoleSlot`]. The console installed in that
/// slot at construction is remembered as the *original* console; the default
/// handler always writes there, which keeps it working while the slot is
/// [hijacked](Self::hijack_console).
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use logging::{Level, Logger, handler, meta};
///
/// let logger = Logger::detached();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// logger.set_log_handlers([handler(move |event| {
///     sink.lock().unwrap().push(event.clone());
///     Ok(())
/// })]);
///
/// let client = logger.client_with(meta! { "service" => "api" }, ["test"]);
/// client.error("boom")?;
/// client.debug("filtered out")?;
///
/// let seen = seen.lock().unwrap();
/// assert_eq!(seen.len(), 1);
/// assert_eq!(seen[0].tags(), ["log", "error", "test"]);
/// assert_eq!(seen[0].level(), Level::Error);
/// # Ok::<(), logging::LoggingError>(())
/// ```
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
}

struct Shared {
    level: RwLock<Level>,
    mode: RwLock<Mode>,
    handlers: RwLock<Arc<[LogHandler]>>,
    slot: Arc<ConsoleSlot>,
    original: Arc<dyn Console>,
}

impl Logger {
    /// Creates a logger bound to the process-wide console slot.
    #[must_use]
    pub fn new() -> Self {
        Self::with_slot(global_slot())
    }

    /// Creates a logger with its own console slot holding the standard
    /// console.
    ///
    /// Hijacking a detached logger never affects the process-wide console.
    #[must_use]
    pub fn detached() -> Self {
        Self::with_slot(Arc::new(ConsoleSlot::default()))
    }

    /// Creates a logger bound to `slot`.
    ///
    /// The console currently in `slot` becomes the logger's original
    /// console.
    #[must_use]
    pub fn with_slot(slot: Arc<ConsoleSlot>) -> Self {
        let original = slot.current();
        let default_handler = console_handler(Arc::clone(&original));
        Self {
            shared: Arc::new(Shared {
                level: RwLock::new(Level::default()),
                mode: RwLock::new(Mode::default()),
                handlers: RwLock::new(Arc::from([default_handler])),
                slot,
                original,
            }),
        }
    }

    /// Creates a process-wide logger configured from `config`.
    #[must_use]
    pub fn from_config(config: &LoggerConfig) -> Self {
        let logger = Self::new();
        logger.apply_config(config);
        logger
    }

    /// Applies the level and mode from `config`.
    pub fn apply_config(&self, config: &LoggerConfig) {
        self.set_level(config.level);
        self.set_mode(config.mode);
    }

    /// Snapshot of the current level and mode.
    #[must_use]
    pub fn config(&self) -> LoggerConfig {
        LoggerConfig {
            level: self.level(),
            mode: self.mode(),
        }
    }

    /// Minimum severity that passes filtering.
    #[must_use]
    pub fn level(&self) -> Level {
        *read(&self.shared.level)
    }

    /// Sets the minimum severity.
    pub fn set_level(&self, level: Level) {
        let previous = std::mem::replace(&mut *write(&self.shared.level), level);
        if previous != level {
            diagnostics::level_changed(previous, level);
        }
    }

    /// Rendering mode stamped on new events.
    #[must_use]
    pub fn mode(&self) -> Mode {
        *read(&self.shared.mode)
    }

    /// Sets the rendering mode.
    pub fn set_mode(&self, mode: Mode) {
        let previous = std::mem::replace(&mut *write(&self.shared.mode), mode);
        if previous != mode {
            diagnostics::mode_changed(previous, mode);
        }
    }

    /// Sets the rendering mode by name.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::InvalidMode`](crate::LoggingError::InvalidMode)
    /// when `name` is not `development` or `production`; the current mode is
    /// left unchanged.
    pub fn set_mode_name(&self, name: &str) -> LoggingResult<()> {
        self.set_mode(name.parse()?);
        Ok(())
    }

    /// Creates a client with empty metadata and tags.
    #[must_use]
    pub fn client(&self) -> Client {
        Client::new(self.clone(), Meta::new(), Vec::new())
    }

    /// Creates a client seeded with copies of `meta` and `tags`.
    #[must_use]
    pub fn client_with<I, T>(&self, meta: Meta, tags: I) -> Client
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Client::new(self.clone(), meta, tags.into_iter().map(Into::into).collect())
    }

    /// Replaces all handlers with the single [default
    /// handler](Self::default_log_handler).
    pub fn reset_log_handlers(&self) {
        self.resubscribe(vec![self.default_log_handler()]);
    }

    /// Replaces all handlers with `handlers`, preserving their order.
    pub fn set_log_handlers<I>(&self, handlers: I)
    where
        I: IntoIterator<Item = LogHandler>,
    {
        self.resubscribe(handlers.into_iter().collect());
    }

    /// Appends `handler` after the existing handlers.
    pub fn add_log_handler<F>(&self, handler: F)
    where
        F: Fn(&LogEvent) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.push_log_handler(Arc::new(handler));
    }

    /// Appends an already boxed handler after the existing handlers.
    pub fn push_log_handler(&self, handler: LogHandler) {
        let mut handlers = self.handlers().to_vec();
        handlers.push(handler);
        self.resubscribe(handlers);
    }

    /// Number of handlers events are currently broadcast to.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers().len()
    }

    /// Returns the default handler: it renders each event and writes it to
    /// the original console, debug events on the generic log channel and
    /// the other levels on their like-named channel.
    #[must_use]
    pub fn default_log_handler(&self) -> LogHandler {
        console_handler(Arc::clone(&self.shared.original))
    }

    /// The console that was installed in the slot when the logger was
    /// created.
    #[must_use]
    pub fn original_console(&self) -> Arc<dyn Console> {
        Arc::clone(&self.shared.original)
    }

    /// The console slot this logger hijacks and releases.
    #[must_use]
    pub fn console_slot(&self) -> &Arc<ConsoleSlot> {
        &self.shared.slot
    }

    /// Redirects the bound console into a fresh client of this logger.
    ///
    /// See [`hijack_console_with`](Self::hijack_console_with).
    pub fn hijack_console(&self) -> Arc<dyn Console> {
        self.hijack_console_with(Meta::new(), Vec::<String>::new())
    }

    /// Redirects the bound console into a client created with `meta` and
    /// `tags`.
    ///
    /// Afterwards, text written to the slot's log and debug channels is
    /// logged at debug level, and info, warn and error text at the matching
    /// level. Returns the console that was replaced. The default handler is
    /// unaffected since it writes to the original console.
    pub fn hijack_console_with<I, T>(&self, meta: Meta, tags: I) -> Arc<dyn Console>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let console = ClientConsole::new(self.client_with(meta, tags));
        let previous = self.shared.slot.replace(Arc::new(console));
        diagnostics::console_hijacked();
        previous
    }

    /// Puts the original console back into the bound slot.
    ///
    /// Releasing a console that was never hijacked leaves the original in
    /// place.
    pub fn release_console(&self) {
        self.shared
            .slot
            .replace(Arc::clone(&self.shared.original));
        diagnostics::console_released();
    }

    /// Broadcasts `event` to every handler in order.
    ///
    /// The dispatch list is snapshotted first, so handlers may reconfigure
    /// the logger; changes apply from the next event on.
    pub(crate) fn emit(&self, event: &LogEvent) -> Result<(), HandlerError> {
        let handlers = self.handlers();
        for (index, handler) in handlers.iter().enumerate() {
            if let Err(error) = handler(event) {
                diagnostics::handler_failed(index, &error);
                return Err(error);
            }
        }
        Ok(())
    }

    fn handlers(&self) -> Arc<[LogHandler]> {
        Arc::clone(&*read(&self.shared.handlers))
    }

    fn resubscribe(&self, handlers: Vec<LogHandler>) {
        let count = handlers.len();
        *write(&self.shared.handlers) = Arc::from(handlers);
        diagnostics::handlers_replaced(count);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("mode", &self.mode())
            .field("handlers", &self.handler_count())
            .finish_non_exhaustive()
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

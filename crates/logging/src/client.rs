//! crates/logging/src/client.rs
//! Per-context logging API.

mod guard;

use std::cell::RefCell;
use std::fmt;

use serde_json::Value;

use crate::Meta;
use crate::error::LoggingResult;
use crate::event::LogEvent;
use crate::level::Level;
use crate::logger::Logger;
use crate::message::{Message, STACK_KEY};

pub use guard::ContextGuard;

const LOG_TAG: &str = "log";

/// Outcome of a logging call: the emitted event, or `None` when the level
/// was filtered out.
pub type LogResult = LoggingResult<Option<LogEvent>>;

/// A bound logging context.
///
/// A client turns logging calls into [`LogEvent`]s and emits them on the
/// [`Logger`] it was created from. It carries its own metadata and tags,
/// which are merged into every event it emits.
///
/// Meta and tags are ordinary mutable state: setters replace them
/// wholesale, getters return copies, and [`add_meta`](Self::add_meta) /
/// [`add_tags`](Self::add_tags) merge into them. The wrapping combinators
/// ([`meta_wrapper`](Self::meta_wrapper) and friends) overlay extra context
/// for the duration of a call and restore the previous state on every exit
/// path, including unwinding.
///
/// A `Client` is `Send` but not `Sync`: the overlays are save-and-restore
/// operations on shared state, so one client must not be driven from several
/// threads at once. Give each independent flow its own client instead; they
/// are cheap and may all share one `Logger`.
pub struct Client {
    logger: Logger,
    meta: RefCell<Meta>,
    tags: RefCell<Vec<String>>,
}

impl Client {
    pub(crate) fn new(logger: Logger, meta: Meta, tags: Vec<String>) -> Self {
        Self {
            logger,
            meta: RefCell::new(meta),
            tags: RefCell::new(tags),
        }
    }

    /// The logger events are emitted on.
    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Returns a copy of the client's metadata.
    #[must_use]
    pub fn meta(&self) -> Meta {
        self.meta.borrow().clone()
    }

    /// Replaces the client's metadata. `None` resets it to an empty map.
    pub fn set_meta(&self, meta: impl Into<Option<Meta>>) {
        *self.meta.borrow_mut() = meta.into().unwrap_or_default();
    }

    /// Returns a copy of the client's tags.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }

    /// Replaces the client's tags. `None` resets them to an empty list.
    pub fn set_tags(&self, tags: impl Into<Option<Vec<String>>>) {
        *self.tags.borrow_mut() = tags.into().unwrap_or_default();
    }

    /// Merges `meta` into the client's metadata; incoming keys win.
    pub fn add_meta(&self, meta: Meta) {
        self.meta.borrow_mut().extend(meta);
    }

    /// Appends `tags` to the client's tags, keeping call order and
    /// duplicates.
    pub fn add_tags<I, T>(&self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags
            .borrow_mut()
            .extend(tags.into_iter().map(Into::into));
    }

    /// Logs `message` at `level` with no call-specific metadata.
    ///
    /// See [`log_with`](Self::log_with).
    pub fn log(&self, level: Level, message: impl Into<Message>) -> LogResult {
        self.log_with(level, message, Meta::new())
    }

    /// Logs `message` at `level`, merging `meta` into the event.
    ///
    /// Returns `Ok(None)` without building an event when the logger's level
    /// does not include `level`. Otherwise the event is built, broadcast to
    /// every handler in registration order, and returned.
    ///
    /// Error-like messages (see [`Message::is_error_like`]) contribute their
    /// description as the event message and their trace as a `stack` meta
    /// entry. Metadata merges client meta, then `meta`, then `stack`, later
    /// entries winning. Tags are `["log", level]` followed by the client's
    /// tags.
    ///
    /// # Errors
    ///
    /// The first failing handler's error is returned as
    /// [`LoggingError::Handler`](crate::LoggingError::Handler); handlers
    /// after it do not run.
    pub fn log_with(&self, level: Level, message: impl Into<Message>, meta: Meta) -> LogResult {
        if !self.logger.level().includes(level) {
            return Ok(None);
        }

        let (message, stack) = message.into().normalize();

        let mut merged = self.meta();
        merged.extend(meta);
        if let Some(stack) = stack {
            merged.insert(STACK_KEY.to_owned(), stack);
        }

        let tags = self.event_tags(level);
        let event = LogEvent::new(level, message, merged, tags, self.logger.mode());
        self.logger.emit(&event)?;
        Ok(Some(event))
    }

    /// Logs at [`Level::Debug`].
    pub fn debug(&self, message: impl Into<Message>) -> LogResult {
        self.log(Level::Debug, message)
    }

    /// Logs at [`Level::Debug`] with call metadata.
    pub fn debug_with(&self, message: impl Into<Message>, meta: Meta) -> LogResult {
        self.log_with(Level::Debug, message, meta)
    }

    /// Logs at [`Level::Info`].
    pub fn info(&self, message: impl Into<Message>) -> LogResult {
        self.log(Level::Info, message)
    }

    /// Logs at [`Level::Info`] with call metadata.
    pub fn info_with(&self, message: impl Into<Message>, meta: Meta) -> LogResult {
        self.log_with(Level::Info, message, meta)
    }

    /// Logs at [`Level::Warn`].
    pub fn warn(&self, message: impl Into<Message>) -> LogResult {
        self.log(Level::Warn, message)
    }

    /// Logs at [`Level::Warn`] with call metadata.
    pub fn warn_with(&self, message: impl Into<Message>, meta: Meta) -> LogResult {
        self.log_with(Level::Warn, message, meta)
    }

    /// Logs at [`Level::Error`].
    pub fn error(&self, message: impl Into<Message>) -> LogResult {
        self.log(Level::Error, message)
    }

    /// Logs at [`Level::Error`] with call metadata.
    pub fn error_with(&self, message: impl Into<Message>, meta: Meta) -> LogResult {
        self.log_with(Level::Error, message, meta)
    }

    /// Overlays `meta` until the returned guard is dropped.
    pub fn scoped_meta(&self, meta: Meta) -> ContextGuard<'_> {
        ContextGuard::overlay(self, Some(meta), None)
    }

    /// Appends `tags` until the returned guard is dropped.
    pub fn scoped_tags<I, T>(&self, tags: I) -> ContextGuard<'_>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        ContextGuard::overlay(self, None, Some(tags.into_iter().map(Into::into).collect()))
    }

    /// Overlays `meta` and appends `tags` until the returned guard is dropped.
    pub fn scoped_context<I, T>(&self, meta: Meta, tags: I) -> ContextGuard<'_>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        ContextGuard::overlay(
            self,
            Some(meta),
            Some(tags.into_iter().map(Into::into).collect()),
        )
    }

    /// Runs `f` with `meta` overlaid on the client's metadata.
    pub fn with_meta<R>(&self, meta: Meta, f: impl FnOnce() -> R) -> R {
        let _guard = self.scoped_meta(meta);
        f()
    }

    /// Runs `f` with `tags` appended to the client's tags.
    pub fn with_tags<I, T, R>(&self, tags: I, f: impl FnOnce() -> R) -> R
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let _guard = self.scoped_tags(tags);
        f()
    }

    /// Runs `f` with both `meta` and `tags` in effect.
    pub fn with_context<I, T, R>(&self, meta: Meta, tags: I, f: impl FnOnce() -> R) -> R
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let _guard = self.scoped_context(meta, tags);
        f()
    }

    /// Wraps `f` so every call runs with `meta` overlaid.
    ///
    /// The returned closure forwards its argument to `f` and returns `f`'s
    /// result. The client's previous metadata is restored when `f` returns
    /// or unwinds.
    ///
    /// ```
    /// use logging::{Level, Logger, meta};
    ///
    /// let logger = Logger::detached();
    /// logger.set_level(Level::Debug);
    /// let client = logger.client_with(meta! { "b" => 2 }, Vec::<String>::new());
    ///
    /// let mut handle = client.meta_wrapper(
    ///     |request: &str| {
    ///         assert_eq!(client.meta(), meta! { "a" => 1, "b" => 2 });
    ///         request.len()
    ///     },
    ///     meta! { "a" => 1 },
    /// );
    ///
    /// assert_eq!(handle("ping"), 4);
    /// assert_eq!(client.meta(), meta! { "b" => 2 });
    /// ```
    pub fn meta_wrapper<'a, F, A, R>(&'a self, mut f: F, meta: Meta) -> impl FnMut(A) -> R + 'a
    where
        F: FnMut(A) -> R + 'a,
    {
        move |argument| {
            let _guard = self.scoped_meta(meta.clone());
            f(argument)
        }
    }

    /// Wraps `f` so every call runs with `tags` appended.
    pub fn tags_wrapper<'a, F, A, R, I, T>(
        &'a self,
        mut f: F,
        tags: I,
    ) -> impl FnMut(A) -> R + 'a
    where
        F: FnMut(A) -> R + 'a,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        move |argument| {
            let _guard = self.scoped_tags(tags.iter().cloned());
            f(argument)
        }
    }

    /// Wraps `f` so every call runs with `meta` overlaid and `tags` appended.
    ///
    /// Tags are applied innermost and meta outermost; both are restored on
    /// exit, so the order does not change what `f` observes.
    pub fn wrapper<'a, F, A, R, I, T>(
        &'a self,
        f: F,
        meta: Meta,
        tags: I,
    ) -> impl FnMut(A) -> R + 'a
    where
        F: FnMut(A) -> R + 'a,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.meta_wrapper(self.tags_wrapper(f, tags), meta)
    }

    fn event_tags(&self, level: Level) -> Vec<String> {
        let own = self.tags.borrow();
        let mut tags = Vec::with_capacity(own.len() + 2);
        tags.push(LOG_TAG.to_owned());
        tags.push(level.as_str().to_owned());
        tags.extend(own.iter().cloned());
        tags
    }

    fn restore(&self, meta: Option<Meta>, tags: Option<Vec<String>>) {
        if let Some(meta) = meta {
            self.set_meta(meta);
        }
        if let Some(tags) = tags {
            self.set_tags(tags);
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("meta", &Value::Object(self.meta()))
            .field("tags", &self.tags())
            .finish_non_exhaustive()
    }
}

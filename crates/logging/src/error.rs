//! crates/logging/src/error.rs
//! Error types surfaced by the logging facade.

use std::error::Error as StdError;
use std::io;

/// Boxed error returned by log handlers.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors raised by the logging facade.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// A severity tag did not name one of the four supported levels.
    #[error("unsupported log level: {0:?}")]
    InvalidLevel(String),

    /// A mode name was neither `development` nor `production`.
    #[error("not a valid mode: {0:?}")]
    InvalidMode(String),

    /// A configuration directive could not be interpreted.
    #[error("invalid logging directive: {0:?}")]
    InvalidDirective(String),

    /// A registered handler failed while an event was being broadcast.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// Result alias for logging operations.
pub type LoggingResult<T> = Result<T, LoggingError>;

/// Failure reported by a log handler.
///
/// Handlers return whatever error they hit; the facade carries it back to
/// the caller of the logging method untouched, so [`Display`](std::fmt::Display)
/// and [`source`](StdError::source) both delegate to the wrapped error.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct HandlerError {
    inner: BoxError,
}

impl HandlerError {
    /// Wraps an arbitrary error.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            inner: error.into(),
        }
    }

    /// Creates an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(message.into())
    }

    /// Borrows the wrapped error.
    #[must_use]
    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }

    /// Attempts to downcast the wrapped error to a concrete type.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Consumes the error and returns the wrapped value.
    #[must_use]
    pub fn into_inner(self) -> BoxError {
        self.inner
    }
}

impl From<io::Error> for HandlerError {
    fn from(error: io::Error) -> Self {
        Self::new(error)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(error)
    }
}

//! crates/logging/src/handler.rs
//! Event handler type and the console-backed default handler.

use std::sync::Arc;

use logging_sink::Console;

use crate::error::HandlerError;
use crate::event::LogEvent;

/// A subscriber invoked once for every emitted event.
///
/// Handlers run synchronously on the thread that logged, in registration
/// order. Returning an error stops the broadcast; the error reaches the
/// caller of the logging method.
pub type LogHandler = Arc<dyn Fn(&LogEvent) -> Result<(), HandlerError> + Send + Sync>;

/// Adapts a closure into a [`LogHandler`].
///
/// ```
/// use logging::{Logger, handler};
///
/// let logger = Logger::detached();
/// logger.set_log_handlers([handler(|event| {
///     assert!(event.has_tag("log"));
///     Ok(())
/// })]);
/// assert_eq!(logger.handler_count(), 1);
/// ```
pub fn handler<F>(f: F) -> LogHandler
where
    F: Fn(&LogEvent) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Builds the handler that renders events onto `console`.
///
/// Debug events go to the generic log channel; the other levels go to the
/// like-named channel.
pub(crate) fn console_handler(console: Arc<dyn Console>) -> LogHandler {
    handler(move |event| {
        let rendered = event.render()?;
        console.write(event.level().channel(), &rendered)?;
        Ok(())
    })
}

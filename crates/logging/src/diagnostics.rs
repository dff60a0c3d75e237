//! crates/logging/src/diagnostics.rs
//! Tracing of the facade's own state changes.
//!
//! Every function here compiles to nothing unless the `tracing` feature is
//! enabled. Callers invoke them after releasing the logger's locks.

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::level::Level;
use crate::mode::Mode;

/// Target used for every diagnostic the facade emits about itself.
pub const DIAGNOSTICS_TARGET: &str = "logging::logger";

/// Trace a level change.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn level_changed(previous: Level, level: Level) {
    debug!(
        target: "logging::logger",
        previous = previous.as_str(),
        level = level.as_str(),
        "log level changed from {} to {}",
        previous,
        level
    );
}

/// Trace a level change - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) const fn level_changed(_previous: Level, _level: Level) {}

/// Trace a mode change.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn mode_changed(previous: Mode, mode: Mode) {
    debug!(
        target: "logging::logger",
        previous = previous.as_str(),
        mode = mode.as_str(),
        "log mode changed from {} to {}",
        previous,
        mode
    );
}

/// Trace a mode change - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) const fn mode_changed(_previous: Mode, _mode: Mode) {}

/// Trace a rebuild of the dispatch list.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn handlers_replaced(count: usize) {
    debug!(
        target: "logging::logger",
        handlers = count,
        "log handlers resubscribed ({} active)",
        count
    );
}

/// Trace a rebuild of the dispatch list - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) const fn handlers_replaced(_count: usize) {}

/// Trace a handler failure that aborted a broadcast.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn handler_failed(index: usize, error: &dyn std::error::Error) {
    trace!(
        target: "logging::logger",
        handler = index,
        "log handler {} failed: {}",
        index,
        error
    );
}

/// Trace a handler failure - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) const fn handler_failed(_index: usize, _error: &dyn std::error::Error) {}

/// Trace console hijacking.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn console_hijacked() {
    debug!(target: "logging::logger", "console hijacked");
}

/// Trace console hijacking - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) const fn console_hijacked() {}

/// Trace console release.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn console_released() {
    debug!(target: "logging::logger", "console released");
}

/// Trace console release - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) const fn console_released() {}

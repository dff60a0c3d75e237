//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the logging facade.
//!
//! [`FacadeLayer`] is a `tracing-subscriber` layer that turns tracing events
//! into facade events on a [`Logger`], so libraries instrumented with
//! `tracing` reach the same handlers as direct client calls.
//!
//! # Mapping
//!
//! - `TRACE` and `DEBUG` log at [`Level::Debug`]; `INFO`, `WARN` and `ERROR`
//!   log at the like-named level.
//! - The `message` field becomes the event message.
//! - Every other field becomes a meta entry, and the event target is stored
//!   under `target`.
//! - Events carry the extra tag `tracing`.
//! - Events the facade emits about itself (targets under `logging::`) are
//!   skipped.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{Logger, init_tracing};
//!
//! let logger = Logger::new();
//! init_tracing(logger).expect("no other subscriber installed");
//!
//! tracing::warn!(target: "app::db", retries = 3, "connection slow");
//! ```

use std::fmt;

use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::Meta;
use crate::level::Level;
use crate::logger::Logger;

/// Tag added to every event that arrives through the bridge.
pub const TRACING_TAG: &str = "tracing";

const TARGET_KEY: &str = "target";
const MESSAGE_FIELD: &str = "message";
const FACADE_TARGET_PREFIX: &str = "logging::";

/// A tracing layer that forwards events to a [`Logger`].
#[derive(Clone, Debug)]
pub struct FacadeLayer {
    logger: Logger,
}

impl FacadeLayer {
    /// Creates a layer forwarding to `logger`.
    #[must_use]
    pub const fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// The logger events are forwarded to.
    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Map a tracing level to a facade level.
    const fn map_level(level: &tracing::Level) -> Level {
        match *level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG | tracing::Level::TRACE => Level::Debug,
        }
    }

    fn is_facade_target(target: &str) -> bool {
        target.starts_with(FACADE_TARGET_PREFIX)
    }
}

impl<S> Layer<S> for FacadeLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        if Self::is_facade_target(target) {
            return;
        }

        let level = Self::map_level(metadata.level());
        if !self.logger.level().includes(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        visitor
            .meta
            .insert(TARGET_KEY.to_owned(), Value::from(target));

        let client = self.logger.client_with(Meta::new(), [TRACING_TAG]);
        // There is no caller to hand a handler failure back to.
        let _ = client.log_with(level, visitor.message, visitor.meta);
    }
}

/// Visitor collecting the message and the remaining fields of an event.
#[derive(Default)]
struct FieldVisitor {
    message: Value,
    meta: Meta,
}

impl FieldVisitor {
    fn record_value(&mut self, field: &Field, value: Value) {
        if field.name() == MESSAGE_FIELD {
            self.message = value;
        } else {
            self.meta.insert(field.name().to_owned(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, Value::String(format!("{value:?}")));
    }
}

/// Install a global subscriber that forwards tracing events to `logger`.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing(logger: Logger) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(FacadeLayer::new(logger))
        .try_init()
}

/// Install a global subscriber that applies `filter` before forwarding
/// events to `logger`.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{Logger, init_tracing_with_filter};
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(Logger::new(), EnvFilter::from_default_env())?;
/// ```
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing_with_filter<F>(logger: Logger, filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(filter)
        .with(FacadeLayer::new(logger))
        .try_init()
}

//! crates/logging/src/global.rs
//! Process-wide logger.

use std::sync::LazyLock;

use crate::Meta;
use crate::client::Client;
use crate::config::LoggerConfig;
use crate::logger::Logger;

static GLOBAL: LazyLock<Logger> = LazyLock::new(Logger::new);

/// Returns the process-wide logger, creating it on first use.
///
/// It is bound to [`logging_sink::global_slot`], so hijacking it redirects
/// the process-wide console.
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// Applies `config` to the process-wide logger.
pub fn init(config: &LoggerConfig) {
    global().apply_config(config);
}

/// Creates a client on the process-wide logger.
#[must_use]
pub fn client() -> Client {
    global().client()
}

/// Creates a client on the process-wide logger seeded with `meta` and
/// `tags`.
#[must_use]
pub fn client_with<I, T>(meta: Meta, tags: I) -> Client
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    global().client_with(meta, tags)
}

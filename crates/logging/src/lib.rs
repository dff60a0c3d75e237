#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is a structured logging facade. Application code logs through a
//! [`Client`], which carries contextual metadata and tags; every accepted
//! call becomes a [`LogEvent`] broadcast to the handlers registered on the
//! client's [`Logger`]. The logger also decides which severities pass and how
//! events render.
//!
//! # Design
//!
//! - [`Level`] is a closed set of four severities. A level *includes* itself
//!   and every more severe level, so a logger at `info` accepts info, warn
//!   and error events.
//! - [`Logger`] is a shared handle. Level, mode and the handler list sit
//!   behind locks; a broadcast works on a snapshot of the handler list taken
//!   when it starts.
//! - [`Client`] owns its meta and tags. Scoped overlays
//!   ([`Client::scoped_meta`], [`Client::meta_wrapper`], ...) restore the
//!   previous context when they end, including on panic.
//! - Console output goes through a [`ConsoleSlot`] from `logging-sink`.
//!   [`Logger::hijack_console`] swaps a client-backed console into the slot so
//!   console writes become log events; the default handler keeps writing to
//!   the console captured when the logger was built.
//!
//! # Invariants
//!
//! - Filtered calls build no event and reach no handler.
//! - Event tags start with `"log"` and the level name, followed by the
//!   client's tags.
//! - Handlers run in registration order, once per event.
//!
//! # Errors
//!
//! Unknown level or mode names yield [`LoggingError::InvalidLevel`] and
//! [`LoggingError::InvalidMode`]. A failing handler stops the broadcast and
//! its [`HandlerError`] is returned to the logging call as
//! [`LoggingError::Handler`].
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use logging::{Level, Logger, Mode, meta};
//!
//! let logger = Logger::detached();
//! logger.set_level(Level::Info);
//! logger.set_mode(Mode::Production);
//!
//! let lines = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&lines);
//! logger.set_log_handlers([logging::handler(move |event| {
//!     sink.lock().unwrap().push(event.render()?);
//!     Ok(())
//! })]);
//!
//! let client = logger.client_with(meta! { "request" => 7 }, ["http"]);
//! client.info("accepted")?;
//! client.debug("not shown")?;
//!
//! let lines = lines.lock().unwrap();
//! assert_eq!(
//!     lines[0],
//!     r#"{"level":"info","message":"accepted","meta":{"request":7},"tags":["log","info","http"],"mode":"production"}"#
//! );
//! # Ok::<(), logging::LoggingError>(())
//! ```
//!
//! # Features
//!
//! - `tracing`: emit the facade's own state changes as `tracing` events and
//!   enable [`FacadeLayer`], which routes `tracing` events into a logger.

mod client;
mod config;
mod diagnostics;
mod error;
mod event;
mod global;
mod handler;
mod hijack;
mod level;
mod logger;
mod macros;
mod message;
mod mode;

#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use client::{Client, ContextGuard, LogResult};
pub use config::{LEVEL_ENV, LoggerConfig, MODE_ENV};
pub use diagnostics::DIAGNOSTICS_TARGET;
pub use error::{BoxError, HandlerError, LoggingError, LoggingResult};
pub use event::LogEvent;
pub use global::{client, client_with, global, init};
pub use handler::{LogHandler, handler};
pub use level::Level;
pub use logger::Logger;
pub use message::{Message, STACK_KEY};
pub use mode::Mode;

#[cfg(feature = "tracing")]
pub use tracing_bridge::{FacadeLayer, TRACING_TAG, init_tracing, init_tracing_with_filter};

pub use logging_sink::{
    Channel, ChannelPrefix, Console, ConsoleSlot, MemoryConsole, StdConsole, WriterConsole,
};
pub use serde_json::{Map, Value};

/// Event metadata: a JSON object keyed by string.
pub type Meta = Map<String, Value>;

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` defines the console contract the `logging` facade writes
//! rendered events to: five named output channels (generic log, debug, info,
//! warn, error), each accepting a single line of text.
//!
//! # Design
//!
//! [`Console`] is an object-safe trait so consoles can be shared as
//! `Arc<dyn Console>`. Three implementations ship with the crate:
//!
//! - [`StdConsole`] writes to stdout (log, debug, info) and stderr (warn,
//!   error).
//! - [`WriterConsole`] funnels every channel into one [`std::io::Write`]
//!   target, optionally tagging each line with its channel.
//! - [`MemoryConsole`] records writes for later inspection.
//!
//! A [`ConsoleSlot`] holds the console currently in effect. Redirecting
//! output (for example, routing third-party console writes through a logger)
//! is an explicit swap of the slot's contents; nothing patches global
//! function tables. The process-wide slot is available through
//! [`global_slot`] and the free functions [`log`], [`debug`], [`info`],
//! [`warn`] and [`error`].
//!
//! # Invariants
//!
//! - Every write produces exactly one newline-terminated line on stream-backed
//!   consoles.
//! - A slot never holds its lock while a console runs.
//!
//! # Errors
//!
//! Writes surface [`std::io::Error`] values from the underlying stream
//! unchanged. Poisoned locks are recovered, since every guarded value stays
//! valid across a panic.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logging_sink::{Channel, Console, ConsoleSlot, MemoryConsole};
//!
//! let memory = Arc::new(MemoryConsole::new());
//! let slot = ConsoleSlot::new(memory.clone());
//!
//! slot.write(Channel::Error, "boom")?;
//! slot.current().info("fine")?;
//!
//! assert_eq!(memory.texts(Channel::Error), ["boom"]);
//! assert_eq!(memory.len(), 2);
//! # Ok::<(), std::io::Error>(())
//! ```

mod channel;
mod console;
mod memory;
mod slot;
mod writer;

pub use channel::Channel;
pub use console::{Console, StdConsole};
pub use memory::{ConsoleRecord, MemoryConsole};
pub use slot::{ConsoleSlot, debug, error, global_slot, info, log, warn};
pub use writer::{ChannelPrefix, WriterConsole};

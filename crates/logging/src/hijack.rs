//! crates/logging/src/hijack.rs
//! Console adapter that feeds console output back into a client.

use std::fmt;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use logging_sink::{Channel, Console};

use crate::client::Client;
use crate::level::Level;

/// Console installed by [`Logger::hijack_console`](crate::Logger::hijack_console).
///
/// Text written to the generic log and debug channels is logged at debug
/// level; info, warn and error keep their level. Writes are serialized
/// through a mutex since [`Client`] is not `Sync`; other threads wait their
/// turn, while a write from the thread already logging through this console
/// fails with [`io::ErrorKind::WouldBlock`].
pub(crate) struct ClientConsole {
    client: Mutex<Client>,
    owner: Mutex<Option<ThreadId>>,
}

impl ClientConsole {
    pub(crate) const fn new(client: Client) -> Self {
        Self {
            client: Mutex::new(client),
            owner: Mutex::new(None),
        }
    }

    fn owner(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.owner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    const fn level_for(channel: Channel) -> Level {
        match channel {
            Channel::Log | Channel::Debug => Level::Debug,
            Channel::Info => Level::Info,
            Channel::Warn => Level::Warn,
            Channel::Error => Level::Error,
        }
    }
}

impl Console for ClientConsole {
    fn write(&self, channel: Channel, text: &str) -> io::Result<()> {
        let current = thread::current().id();
        // A handler on this thread would otherwise wait on itself.
        if *self.owner() == Some(current) {
            return Err(io::Error::new(
                io::ErrorKind::WouldBlock,
                "hijacked console written to from within its own handler",
            ));
        }
        let client = self.client.lock().unwrap_or_else(PoisonError::into_inner);
        let _owner = OwnerGuard::enter(self, current);
        client
            .log(Self::level_for(channel), text)
            .map(|_| ())
            .map_err(io::Error::other)
    }
}

/// Marks the thread holding the client lock until dropped.
struct OwnerGuard<'a> {
    console: &'a ClientConsole,
}

impl<'a> OwnerGuard<'a> {
    fn enter(console: &'a ClientConsole, thread: ThreadId) -> Self {
        *console.owner() = Some(thread);
        Self { console }
    }
}

impl Drop for OwnerGuard<'_> {
    fn drop(&mut self) {
        *self.console.owner() = None;
    }
}

impl fmt::Debug for ClientConsole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConsole").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_map_to_levels() {
        assert_eq!(ClientConsole::level_for(Channel::Log), Level::Debug);
        assert_eq!(ClientConsole::level_for(Channel::Debug), Level::Debug);
        assert_eq!(ClientConsole::level_for(Channel::Info), Level::Info);
        assert_eq!(ClientConsole::level_for(Channel::Warn), Level::Warn);
        assert_eq!(ClientConsole::level_for(Channel::Error), Level::Error);
    }

    #[test]
    fn owner_is_cleared_after_each_write() {
        let console = ClientConsole::new(crate::Logger::detached().client());
        console.write(Channel::Info, "filtered").expect("write");
        assert_eq!(*console.owner(), None);
        console.write(Channel::Info, "again").expect("second write");
    }
}

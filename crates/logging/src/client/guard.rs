//! crates/logging/src/client/guard.rs
//! Scoped context overlays.

use std::ops::Deref;

use super::Client;
use crate::Meta;

/// RAII guard that temporarily overlays metadata and tags on a [`Client`].
///
/// Created by [`Client::scoped_meta`], [`Client::scoped_tags`] and
/// [`Client::scoped_context`]. While the guard is alive every event the
/// client emits carries the overlay. Dropping the guard (including during
/// unwinding) restores the metadata and tags that were in effect when it was
/// created. The guard derefs to the client, so logging through it reads
/// naturally.
#[must_use = "dropping the guard immediately restores the previous context"]
pub struct ContextGuard<'a> {
    client: &'a Client,
    previous_meta: Option<Meta>,
    previous_tags: Option<Vec<String>>,
}

impl<'a> ContextGuard<'a> {
    pub(super) fn overlay(
        client: &'a Client,
        meta: Option<Meta>,
        tags: Option<Vec<String>>,
    ) -> Self {
        let previous_meta = meta.map(|meta| {
            let previous = client.meta();
            client.add_meta(meta);
            previous
        });
        let previous_tags = tags.map(|tags| {
            let previous = client.tags();
            client.add_tags(tags);
            previous
        });
        Self {
            client,
            previous_meta,
            previous_tags,
        }
    }

    /// Metadata that will be restored on drop, if this guard overlays meta.
    #[must_use]
    pub const fn previous_meta(&self) -> Option<&Meta> {
        self.previous_meta.as_ref()
    }

    /// Tags that will be restored on drop, if this guard appends tags.
    #[must_use]
    pub fn previous_tags(&self) -> Option<&[String]> {
        self.previous_tags.as_deref()
    }

    /// Consumes the guard without restoring the previous context.
    ///
    /// The overlay becomes the client's new baseline.
    pub fn persist(mut self) -> &'a Client {
        self.previous_meta = None;
        self.previous_tags = None;
        self.client
    }
}

impl Deref for ContextGuard<'_> {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        self.client
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.client
            .restore(self.previous_meta.take(), self.previous_tags.take());
    }
}

#[cfg(test)]
mod tests {
    use crate::{Logger, meta};

    #[test]
    fn drop_restores_meta_and_tags() {
        let logger = Logger::detached();
        let client = logger.client_with(meta! { "base" => true }, ["base"]);
        {
            let guard = client.scoped_context(meta! { "extra" => 1 }, ["extra"]);
            assert_eq!(guard.meta(), meta! { "base" => true, "extra" => 1 });
            assert_eq!(guard.tags(), ["base", "extra"]);
        }
        assert_eq!(client.meta(), meta! { "base" => true });
        assert_eq!(client.tags(), ["base"]);
    }

    #[test]
    fn previous_context_is_reported() {
        let logger = Logger::detached();
        let client = logger.client_with(meta! { "a" => 1 }, ["t"]);

        let guard = client.scoped_meta(meta! { "b" => 2 });
        assert_eq!(guard.previous_meta(), Some(&meta! { "a" => 1 }));
        assert_eq!(guard.previous_tags(), None);
        drop(guard);

        let guard = client.scoped_tags(["u"]);
        assert_eq!(guard.previous_meta(), None);
        assert_eq!(guard.previous_tags(), Some(&["t".to_owned()][..]));
    }

    #[test]
    fn persist_keeps_the_overlay() {
        let logger = Logger::detached();
        let client = logger.client();

        let inner = client.scoped_tags(["kept"]).persist();
        assert_eq!(inner.tags(), ["kept"]);
        assert_eq!(client.tags(), ["kept"]);
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let logger = Logger::detached();
        let client = logger.client();
        {
            let _outer = client.scoped_meta(meta! { "depth" => 1 });
            {
                let _inner = client.scoped_meta(meta! { "depth" => 2 });
                assert_eq!(client.meta(), meta! { "depth" => 2 });
            }
            assert_eq!(client.meta(), meta! { "depth" => 1 });
        }
        assert!(client.meta().is_empty());
    }
}

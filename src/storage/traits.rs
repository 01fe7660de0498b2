use crate::domain::{CacheEntry, FeedItem};

/// Holds the most recent successful feed. Never fails from the caller's point of view:
/// anything that goes wrong underneath behaves like an empty cache.
#[cfg_attr(test, mockall::automock)]
pub trait FeedCache: Send + Sync {
    /// The current entry, or `None` if there is none or it has expired
    fn get(&self) -> Option<CacheEntry>;

    /// Replace the entry with `items`, stamped with the current time
    fn put(&self, items: Vec<FeedItem>);

    fn clear(&self);
}

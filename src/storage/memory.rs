use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::domain::{CacheEntry, FeedItem};
use crate::storage::clock::Clock;
use crate::storage::traits::FeedCache;

/// In-process cache. The entry is swapped as a whole, so readers see either the
/// old or the new feed.
pub struct MemoryFeedCache {
    entry: RwLock<Option<Arc<CacheEntry>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl MemoryFeedCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl,
            clock,
        }
    }
}

impl FeedCache for MemoryFeedCache {
    fn get(&self) -> Option<CacheEntry> {
        let current = {
            let guard = self.entry.read().unwrap_or_else(|e| e.into_inner());
            guard.clone()?
        };

        if !current.is_expired(self.clock.now(), self.ttl) {
            return Some(current.as_ref().clone());
        }

        tracing::debug!(fetched_at = %current.fetched_at, "cached feed expired");

        // Only discard the entry we judged stale; a concurrent put may have replaced it
        let mut guard = self.entry.write().unwrap_or_else(|e| e.into_inner());
        if guard.as_ref().is_some_and(|e| Arc::ptr_eq(e, &current)) {
            *guard = None;
        }
        None
    }

    fn put(&self, items: Vec<FeedItem>) {
        let entry = Arc::new(CacheEntry::new(items, self.clock.now()));
        let mut guard = self.entry.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(entry);
    }

    fn clear(&self) {
        let mut guard = self.entry.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeedItem, ItemKind};
    use crate::storage::clock::ManualClock;
    use chrono::Utc;

    fn items(n: usize) -> Vec<FeedItem> {
        (0..n)
            .map(|i| FeedItem::placeholder(format!("item-{}", i), ItemKind::Article))
            .collect()
    }

    fn setup() -> (Arc<ManualClock>, MemoryFeedCache) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = MemoryFeedCache::new(Duration::from_secs(3600), clock.clone());
        (clock, cache)
    }

    #[test]
    fn test_empty_cache() {
        let (_, cache) = setup();
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_put_then_get() {
        let (clock, cache) = setup();

        cache.put(items(3));
        let entry = cache.get().unwrap();

        assert_eq!(entry.items, items(3));
        assert_eq!(entry.fetched_at, clock.now());
    }

    #[test]
    fn test_expires_after_ttl() {
        let (clock, cache) = setup();
        cache.put(items(2));

        clock.advance(Duration::from_secs(3600));
        assert!(cache.get().is_some());

        clock.advance(Duration::from_secs(1));
        assert!(cache.get().is_none());

        // Discarded, not just hidden
        assert!(cache.entry.read().unwrap().is_none());
    }

    #[test]
    fn test_put_replaces_whole_entry() {
        let (clock, cache) = setup();
        cache.put(items(8));

        clock.advance(Duration::from_secs(60));
        cache.put(items(2));

        let entry = cache.get().unwrap();
        assert_eq!(entry.items.len(), 2);
        assert_eq!(entry.fetched_at, clock.now());
    }

    #[test]
    fn test_put_after_expiry_is_fresh() {
        let (clock, cache) = setup();
        cache.put(items(1));
        clock.advance(Duration::from_secs(7200));
        assert!(cache.get().is_none());

        cache.put(items(4));
        assert_eq!(cache.get().unwrap().items.len(), 4);
    }

    #[test]
    fn test_clear() {
        let (_, cache) = setup();
        cache.put(items(1));
        cache.clear();
        assert!(cache.get().is_none());
    }
}

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FeedItem;

/// The last successfully fetched feed, with the time it was fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub items: Vec<FeedItem>,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(items: Vec<FeedItem>, fetched_at: DateTime<Utc>) -> Self {
        Self { items, fetched_at }
    }

    /// Stale once strictly more than `ttl` has passed since the fetch.
    /// An entry stamped in the future (clock moved backwards) counts as fresh.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match now.signed_duration_since(self.fetched_at).to_std() {
            Ok(age) => age > ttl,
            Err(_) => false,
        }
    }
}

pub mod feed_item;
pub mod provider;
pub mod cache_entry;
pub mod summary;

pub use feed_item::{FeedItem, ItemKind};
pub use provider::ProviderKind;
pub use cache_entry::CacheEntry;
pub use summary::{AccuracyChart, ArticleSummary, ChartPoint, RelatedSource};

use std::sync::Arc;

use crate::config::DEFAULT_DISPLAY_LIMIT;
use crate::domain::{FeedItem, ItemKind};
use crate::errors::{NewsdeskError, NewsdeskResult};
use crate::render::{self, Notice, Panel, RenderSink};
use crate::sources::http::redact;
use crate::sources::normalizer::normalize_all;
use crate::sources::{FeedProvider, JsonClient};
use crate::storage::FeedCache;

pub struct FeedFetcher<C: FeedCache> {
    provider: Arc<dyn FeedProvider>,
    client: Arc<dyn JsonClient>,
    cache: C,
    display_limit: usize,
}

impl<C: FeedCache> FeedFetcher<C> {
    pub fn new(provider: Arc<dyn FeedProvider>, client: Arc<dyn JsonClient>, cache: C) -> Self {
        Self {
            provider,
            client,
            cache,
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }

    pub fn with_display_limit(mut self, display_limit: usize) -> Self {
        self.display_limit = display_limit.max(1);
        self
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Fetch the feed for display.
    ///
    /// Without a query the cache is tried first, and a fresh fetch stores the full
    /// result set. A query always goes to the network and is never cached. At most
    /// `display_limit` items are returned either way. One attempt, no retry.
    pub async fn fetch_feed(&self, query: Option<&str>) -> NewsdeskResult<Vec<FeedItem>> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let kind = self.provider.kind();

        if query.is_none() {
            if let Some(entry) = self.cache.get() {
                tracing::info!(provider = %kind, items = entry.items.len(), "using cached feed");
                return Ok(self.for_display(entry.items));
            }
        }

        let url = self.provider.endpoint(query)?;
        tracing::info!(provider = %kind, url = %redact(&url), "fetching feed");

        let payload = self.client.get_json(&url).await?;
        let records = self.provider.records(&payload)?;

        if records.is_empty() {
            return Err(NewsdeskError::NoResults(match (query, kind.item_kind()) {
                (Some(q), _) => format!("No results found for \"{}\".", q),
                (None, ItemKind::Video) => "No live news found.".to_string(),
                (None, ItemKind::Article) => "No news articles found.".to_string(),
            }));
        }

        let items = normalize_all(records, kind);
        tracing::debug!(provider = %kind, items = items.len(), "normalized feed");

        if query.is_none() {
            self.cache.put(items.clone());
        }

        Ok(self.for_display(items))
    }

    /// Fetch and hand the result to the sink. Errors become a notice; the displayed
    /// items are returned so the caller can act on a selection.
    pub async fn show_feed(&self, query: Option<&str>, sink: &dyn RenderSink) -> Vec<FeedItem> {
        match self.fetch_feed(query).await {
            Ok(items) => {
                sink.feed(&render::cards(&items));
                items
            }
            Err(e) => {
                tracing::warn!(provider = %self.provider.kind(), "feed unavailable: {}", e);
                sink.notice(&Notice::from_error(Panel::Feed, &e));
                Vec::new()
            }
        }
    }

    fn for_display(&self, mut items: Vec<FeedItem>) -> Vec<FeedItem> {
        items.truncate(self.display_limit);
        items
    }
}

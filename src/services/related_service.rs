use std::sync::Arc;

use crate::domain::RelatedSource;
use crate::errors::{NewsdeskError, NewsdeskResult};
use crate::render::{Notice, Panel, RenderSink};
use crate::sources::http::redact;
use crate::sources::{CustomSearchSource, JsonClient};

pub const NO_RELATED_SOURCES: &str = "No related sources found.";

/// Finds further coverage of a topic through web search
pub struct RelatedSources {
    source: CustomSearchSource,
    client: Arc<dyn JsonClient>,
}

impl RelatedSources {
    pub fn new(source: CustomSearchSource, client: Arc<dyn JsonClient>) -> Self {
        Self { source, client }
    }

    pub async fn find(&self, topic: &str) -> NewsdeskResult<Vec<RelatedSource>> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(NewsdeskError::InvalidInput("topic must not be empty".to_string()));
        }

        let url = self.source.endpoint(topic)?;
        tracing::info!(topic, url = %redact(&url), "searching related sources");

        let payload = self.client.get_json(&url).await?;
        let sources = CustomSearchSource::related_sources(payload)?;
        tracing::debug!(topic, found = sources.len(), "related sources");

        Ok(sources)
    }

    pub async fn show(&self, topic: &str, sink: &dyn RenderSink) {
        match self.find(topic).await {
            Ok(sources) if sources.is_empty() => {
                sink.notice(&Notice::info(Panel::Related, NO_RELATED_SOURCES))
            }
            Ok(sources) => sink.related(topic, &sources),
            Err(e) => {
                tracing::warn!(topic, "related sources unavailable: {}", e);
                sink.notice(&Notice::from_error(Panel::Related, &e));
            }
        }
    }
}

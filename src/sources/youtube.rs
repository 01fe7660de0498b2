use url::Url;

use crate::config::Config;
use crate::domain::ProviderKind;
use crate::errors::{NewsdeskError, NewsdeskResult};
use crate::sources::traits::FeedProvider;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const MAX_RESULTS: &str = "10";

/// Video IDs appended to this become playable embed URLs
pub const EMBED_URL_PREFIX: &str = "https://www.youtube.com/embed/";

/// YouTube Data API search. Without a query it lists live streams for the configured topic.
pub struct YouTubeSource {
    api_key: Option<String>,
    live_query: String,
}

impl YouTubeSource {
    pub fn new(api_key: Option<String>, live_query: &str) -> Self {
        Self {
            api_key,
            live_query: live_query.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.youtube_api_key.clone(), &config.youtube_live_query)
    }
}

impl FeedProvider for YouTubeSource {
    fn kind(&self) -> ProviderKind {
        ProviderKind::YouTube
    }

    fn endpoint(&self, query: Option<&str>) -> NewsdeskResult<Url> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| NewsdeskError::MissingEnvVar("YOUTUBE_API_KEY".to_string()))?;

        let mut params = vec![
            ("part", "snippet"),
            ("q", query.unwrap_or(self.live_query.as_str())),
            ("type", "video"),
        ];
        // Searches cover all videos; the default feed is live streams only
        if query.is_none() {
            params.push(("eventType", "live"));
        }
        params.push(("key", api_key));
        params.push(("maxResults", MAX_RESULTS));

        Ok(Url::parse_with_params(SEARCH_URL, &params)?)
    }

    fn records_field(&self) -> &'static str {
        "items"
    }
}

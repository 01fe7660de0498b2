use url::Url;

use crate::config::Config;
use crate::domain::ProviderKind;
use crate::errors::{NewsdeskError, NewsdeskResult};
use crate::sources::traits::FeedProvider;

const HEADLINES_URL: &str = "https://newsapi.org/v2/top-headlines";
const SEARCH_URL: &str = "https://newsapi.org/v2/everything";

/// newsapi.org: top headlines from fixed sources, or a full-text search
pub struct NewsApiSource {
    api_key: Option<String>,
    sources: String,
}

impl NewsApiSource {
    pub fn new(api_key: Option<String>, sources: &str) -> Self {
        Self {
            api_key,
            sources: sources.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.newsapi_key.clone(), &config.newsapi_sources)
    }
}

impl FeedProvider for NewsApiSource {
    fn kind(&self) -> ProviderKind {
        ProviderKind::NewsApi
    }

    fn endpoint(&self, query: Option<&str>) -> NewsdeskResult<Url> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| NewsdeskError::MissingEnvVar("NEWSAPI_KEY".to_string()))?;

        let url = match query {
            Some(q) => Url::parse_with_params(SEARCH_URL, &[("q", q), ("apiKey", api_key)])?,
            None => Url::parse_with_params(
                HEADLINES_URL,
                &[("sources", self.sources.as_str()), ("apiKey", api_key)],
            )?,
        };

        Ok(url)
    }

    fn records_field(&self) -> &'static str {
        "articles"
    }
}

use url::Url;

use crate::config::Config;
use crate::domain::ProviderKind;
use crate::errors::{NewsdeskError, NewsdeskResult};
use crate::sources::traits::FeedProvider;

const BASE_URL: &str = "https://newsdata.io/api/1/news";

/// newsdata.io latest-news endpoint, filtered by language and country
pub struct NewsDataSource {
    api_key: Option<String>,
    language: String,
    country: String,
}

impl NewsDataSource {
    pub fn new(api_key: Option<String>, language: &str, country: &str) -> Self {
        Self {
            api_key,
            language: language.to_string(),
            country: country.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.newsdata_api_key.clone(),
            &config.language,
            &config.country,
        )
    }
}

impl FeedProvider for NewsDataSource {
    fn kind(&self) -> ProviderKind {
        ProviderKind::NewsData
    }

    fn endpoint(&self, query: Option<&str>) -> NewsdeskResult<Url> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| NewsdeskError::MissingEnvVar("NEWSDATA_API_KEY".to_string()))?;

        let mut params = vec![
            ("apikey", api_key),
            ("language", self.language.as_str()),
            ("country", self.country.as_str()),
        ];
        if let Some(q) = query {
            params.push(("q", q));
        }

        Ok(Url::parse_with_params(BASE_URL, &params)?)
    }

    fn records_field(&self) -> &'static str {
        "results"
    }
}

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::domain::RelatedSource;
use crate::errors::{NewsdeskError, NewsdeskResult};

const SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Google leaves the field out entirely when nothing matched
    #[serde(default)]
    items: Vec<Value>,
}

/// Google Custom Search, used to find further coverage of a video's topic
pub struct CustomSearchSource {
    api_key: Option<String>,
    engine_id: Option<String>,
    date_restrict: String,
}

impl CustomSearchSource {
    pub fn new(api_key: Option<String>, engine_id: Option<String>, date_restrict: &str) -> Self {
        Self {
            api_key,
            engine_id,
            date_restrict: date_restrict.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.custom_search_api_key.clone(),
            config.custom_search_engine_id.clone(),
            &config.search_date_restrict,
        )
    }

    pub fn endpoint(&self, topic: &str) -> NewsdeskResult<Url> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| NewsdeskError::MissingEnvVar("CUSTOM_SEARCH_API_KEY".to_string()))?;
        let engine_id = self
            .engine_id
            .as_deref()
            .ok_or_else(|| NewsdeskError::MissingEnvVar("CUSTOM_SEARCH_ENGINE_ID".to_string()))?;

        Ok(Url::parse_with_params(
            SEARCH_URL,
            &[
                ("q", topic),
                ("key", api_key),
                ("cx", engine_id),
                ("dateRestrict", self.date_restrict.as_str()),
            ],
        )?)
    }

    /// Map search hits to related sources; hits without a link are dropped
    pub fn related_sources(payload: Value) -> NewsdeskResult<Vec<RelatedSource>> {
        let response: SearchResponse = serde_json::from_value(payload)
            .map_err(|e| NewsdeskError::Parse(format!("custom search response: {}", e)))?;

        let sources = response
            .items
            .iter()
            .filter_map(|item| {
                let link = text(item, "link")?;
                Some(RelatedSource {
                    title: text(item, "title").unwrap_or_else(|| link.clone()),
                    snippet: text(item, "snippet").unwrap_or_default(),
                    link,
                })
            })
            .collect();

        Ok(sources)
    }
}

fn text(item: &Value, field: &str) -> Option<String> {
    item.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

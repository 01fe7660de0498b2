use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::domain::ProviderKind;
use crate::errors::{NewsdeskError, NewsdeskResult};

pub const DEFAULT_SUMMARIZER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60;
pub const DEFAULT_DISPLAY_LIMIT: usize = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub newsdata_api_key: Option<String>,
    pub newsapi_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub custom_search_api_key: Option<String>,
    pub custom_search_engine_id: Option<String>,
    pub summarizer_url: String,
    pub cache_path: String,
    pub cache_ttl: Duration,
    pub display_limit: usize,
    pub language: String,
    pub country: String,
    pub newsapi_sources: String,
    pub youtube_live_query: String,
    pub search_date_restrict: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> NewsdeskResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        // Default cache path is relative to executable directory
        let cache_path = std::env::var("NEWSDESK_CACHE_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("newsdesk-cache.json").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./newsdesk-cache.json".to_string())
        });

        let display_limit: usize = parse_var("NEWSDESK_DISPLAY_LIMIT", DEFAULT_DISPLAY_LIMIT)?;
        if display_limit == 0 {
            return Err(NewsdeskError::Config(
                "NEWSDESK_DISPLAY_LIMIT must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            newsdata_api_key: optional_var("NEWSDATA_API_KEY"),
            newsapi_key: optional_var("NEWSAPI_KEY"),
            youtube_api_key: optional_var("YOUTUBE_API_KEY"),
            custom_search_api_key: optional_var("CUSTOM_SEARCH_API_KEY"),
            custom_search_engine_id: optional_var("CUSTOM_SEARCH_ENGINE_ID"),
            summarizer_url: std::env::var("NEWSDESK_SUMMARIZER_URL")
                .unwrap_or_else(|_| DEFAULT_SUMMARIZER_URL.to_string()),
            cache_path,
            cache_ttl: Duration::from_secs(parse_var(
                "NEWSDESK_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )?),
            display_limit,
            language: std::env::var("NEWSDESK_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
            country: std::env::var("NEWSDESK_COUNTRY").unwrap_or_else(|_| "in".to_string()),
            newsapi_sources: std::env::var("NEWSAPI_SOURCES")
                .unwrap_or_else(|_| "bbc-news".to_string()),
            youtube_live_query: std::env::var("YOUTUBE_LIVE_QUERY")
                .unwrap_or_else(|_| "India live news".to_string()),
            search_date_restrict: std::env::var("CUSTOM_SEARCH_DATE_RESTRICT")
                .unwrap_or_else(|_| "d10".to_string()),
            request_timeout: Duration::from_secs(parse_var(
                "NEWSDESK_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
        })
    }

    /// Each provider gets its own cache file next to `cache_path`,
    /// e.g. `newsdesk-cache.json` becomes `newsdesk-cache-youtube.json`
    pub fn cache_path_for(&self, provider: ProviderKind) -> PathBuf {
        let base = Path::new(&self.cache_path);
        let stem = base
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "newsdesk-cache".to_string());

        let name = match base.extension() {
            Some(ext) => format!("{}-{}.{}", stem, provider, ext.to_string_lossy()),
            None => format!("{}-{}", stem, provider),
        };
        base.with_file_name(name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            newsdata_api_key: None,
            newsapi_key: None,
            youtube_api_key: None,
            custom_search_api_key: None,
            custom_search_engine_id: None,
            summarizer_url: DEFAULT_SUMMARIZER_URL.to_string(),
            cache_path: "./newsdesk-cache.json".to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            display_limit: DEFAULT_DISPLAY_LIMIT,
            language: "en".to_string(),
            country: "in".to_string(),
            newsapi_sources: "bbc-news".to_string(),
            youtube_live_query: "India live news".to_string(),
            search_date_restrict: "d10".to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Empty values count as unset so a blank line in `.env` doesn't pass as a key
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(name: &str, default: T) -> NewsdeskResult<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| NewsdeskError::Config(format!("{} is not a valid number: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

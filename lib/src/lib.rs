//! Summarizer backend bindings for Rust
//! Provides functions to request an article summary and the accuracy data behind the chart

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_ERROR_MESSAGE: &str = "Failed to fetch summary.";

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Response did not contain a summary")]
    MissingSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedSummary {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Summary")]
    pub summary: String,
}

/// Both the short `{summary}` shape and the extended `{main_summary, ...}` shape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryResponse {
    pub summary: Option<String>,
    pub main_summary: Option<String>,
    #[serde(default)]
    pub related_summaries: Vec<RelatedSummary>,
    pub image_url: Option<String>,
}

impl SummaryResponse {
    /// The summary text; `main_summary` wins when the backend sends both
    pub fn text(&self) -> Option<&str> {
        [self.main_summary.as_deref(), self.summary.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracySample {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Accuracy")]
    pub accuracy: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub sample_data: Vec<AccuracySample>,
    #[serde(default)]
    pub average_accuracy: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    url: String,
    client: Client,
}

impl BackendClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.url
    }

    /// Ask the backend to summarize an article, optionally searching for related coverage by title
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse, BackendError> {
        let response = self
            .client
            .post(format!("{}/summarize", self.url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }

        let body: SummaryResponse = response.json().await?;
        match body.text() {
            Some(_) => Ok(body),
            None => Err(BackendError::MissingSummary),
        }
    }

    /// Fetch accuracy scores extracted from the most recent related summaries
    pub async fn graph_data(&self) -> Result<GraphData, BackendError> {
        let response = self
            .client
            .get(format!("{}/graph_data", self.url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }

        Ok(response.json().await?)
    }

    async fn status_error(status: StatusCode, response: reqwest::Response) -> BackendError {
        let text = response.text().await.unwrap_or_default();
        BackendError::Status {
            status: status.as_u16(),
            message: error_message(&text),
        }
    }
}

/// Extract the `{error}` field from a failure body, falling back to a generic message
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

use async_trait::async_trait;
use summary_api::{BackendClient, SummaryRequest};

use crate::domain::{AccuracyChart, ArticleSummary};
use crate::errors::NewsdeskResult;

/// The external summarization backend
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, url: &str, title: Option<&str>) -> NewsdeskResult<ArticleSummary>;

    /// Accuracy scores gathered while producing the latest summary
    async fn accuracy_chart(&self) -> NewsdeskResult<AccuracyChart>;
}

#[async_trait]
impl Summarizer for BackendClient {
    async fn summarize(&self, url: &str, title: Option<&str>) -> NewsdeskResult<ArticleSummary> {
        let request = SummaryRequest {
            url: url.to_string(),
            title: title.filter(|t| !t.is_empty()).map(str::to_string),
        };

        let response = BackendClient::summarize(self, &request).await?;
        Ok(ArticleSummary::from_response(url, response))
    }

    async fn accuracy_chart(&self) -> NewsdeskResult<AccuracyChart> {
        let data = self.graph_data().await?;
        Ok(AccuracyChart::from_graph_data(&data))
    }
}

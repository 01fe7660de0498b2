use serde::{Deserialize, Serialize};
use summary_api::{GraphData, RelatedSummary, SummaryResponse};
use url::Url;

/// A summary produced by the backend for one article
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleSummary {
    pub url: String,
    pub text: String,
    pub related: Vec<RelatedSummary>,
    pub image_url: Option<String>,
}

impl ArticleSummary {
    pub fn from_response(url: &str, response: SummaryResponse) -> Self {
        let text = response.text().unwrap_or_default().to_string();
        Self {
            url: url.to_string(),
            text,
            related: response.related_summaries,
            image_url: response.image_url.filter(|u| !u.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub host: String,
    pub accuracy: f64,
}

/// Accuracy scores keyed by hostname, plus the overall average reported by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyChart {
    pub points: Vec<ChartPoint>,
    pub average: f64,
}

impl AccuracyChart {
    /// Samples from the same host are averaged into one point; first-seen order is kept
    pub fn from_graph_data(data: &GraphData) -> Self {
        let mut sums: Vec<(String, f64, u32)> = Vec::new();

        for sample in &data.sample_data {
            let host = host_label(&sample.url);
            match sums.iter_mut().find(|(h, _, _)| *h == host) {
                Some((_, total, count)) => {
                    *total += sample.accuracy;
                    *count += 1;
                }
                None => sums.push((host, sample.accuracy, 1)),
            }
        }

        let points = sums
            .into_iter()
            .map(|(host, total, count)| ChartPoint {
                host,
                accuracy: total / f64::from(count),
            })
            .collect();

        Self {
            points,
            average: data.average_accuracy,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn host_label(raw: &str) -> String {
    Url::parse(raw)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| raw.to_string())
}

/// A search hit shown next to a video as further reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedSource {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

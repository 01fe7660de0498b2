use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;

use crate::render::{Notice, Panel, RenderSink};
use crate::services::summarizer::Summarizer;

/// Outcome of asking for a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The summary on screen is already for this URL
    AlreadyShown,
    /// A request for this URL is in flight; no second call is made
    AlreadyPending,
    /// A new backend call should be issued
    Start,
}

/// Which summary is shown, which one the user asked for last, and which are in flight.
///
/// Only the result for the most recently selected URL is ever rendered. Results that
/// arrive for anything else are dropped.
#[derive(Debug, Default)]
pub struct SummarySession {
    active_url: Option<String>,
    selected_url: Option<String>,
    pending: HashSet<String>,
}

impl SummarySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&mut self, url: &str) -> Admission {
        if self.active_url.as_deref() == Some(url) {
            return Admission::AlreadyShown;
        }

        self.active_url = None;
        self.selected_url = Some(url.to_string());

        if self.pending.insert(url.to_string()) {
            Admission::Start
        } else {
            Admission::AlreadyPending
        }
    }

    /// Record a completed request. Returns whether its result should be shown.
    pub fn finish(&mut self, url: &str, succeeded: bool) -> bool {
        self.pending.remove(url);

        let current = self.is_selected(url);
        if current && succeeded {
            self.active_url = Some(url.to_string());
        }
        current
    }

    pub fn is_selected(&self, url: &str) -> bool {
        self.selected_url.as_deref() == Some(url)
    }

    pub fn is_active(&self, url: &str) -> bool {
        self.active_url.as_deref() == Some(url)
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    pub fn active_url(&self) -> Option<&str> {
        self.active_url.as_deref()
    }
}

/// Runs summary requests in the background and renders whichever result is still wanted
#[derive(Clone)]
pub struct SummaryCoordinator {
    session: Arc<Mutex<SummarySession>>,
    summarizer: Arc<dyn Summarizer>,
    sink: Arc<dyn RenderSink>,
}

impl SummaryCoordinator {
    pub fn new(summarizer: Arc<dyn Summarizer>, sink: Arc<dyn RenderSink>) -> Self {
        Self {
            session: Arc::new(Mutex::new(SummarySession::new())),
            summarizer,
            sink,
        }
    }

    /// Ask for a summary of `url`. Returns the handle of the spawned request, or `None`
    /// when no new backend call was needed.
    pub fn request_summary(&self, url: &str, title: Option<&str>) -> Option<JoinHandle<()>> {
        let admission = self.session().admit(url);

        match admission {
            Admission::AlreadyShown => {
                tracing::debug!(url, "summary already shown");
                None
            }
            Admission::AlreadyPending => {
                tracing::debug!(url, "summary already requested");
                self.sink.loading(url);
                None
            }
            Admission::Start => {
                self.sink.loading(url);

                let this = self.clone();
                let url = url.to_string();
                let title = title.map(str::to_string);
                Some(tokio::spawn(async move {
                    this.run(&url, title.as_deref()).await;
                }))
            }
        }
    }

    pub fn active_url(&self) -> Option<String> {
        self.session().active_url().map(str::to_string)
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.session().is_pending(url)
    }

    async fn run(&self, url: &str, title: Option<&str>) {
        tracing::info!(url, "requesting summary");
        let result = self.summarizer.summarize(url, title).await;

        {
            let mut session = self.session();
            if !session.finish(url, result.is_ok()) {
                tracing::debug!(url, "discarding summary for deselected article");
                return;
            }

            // Rendered under the lock so a newer selection can't slip in between
            match &result {
                Ok(summary) => self.sink.summary(summary),
                Err(e) => {
                    tracing::warn!(url, "summary failed: {}", e);
                    self.sink.notice(&Notice::from_error(Panel::Summary, e));
                }
            }
        }

        if result.is_ok() {
            self.show_chart(url).await;
        }
    }

    async fn show_chart(&self, url: &str) {
        let result = self.summarizer.accuracy_chart().await;

        let session = self.session();
        if !session.is_active(url) {
            return;
        }

        match result {
            Ok(chart) if chart.is_empty() => tracing::debug!(url, "no accuracy data"),
            Ok(chart) => self.sink.chart(&chart),
            Err(e) => {
                tracing::warn!(url, "accuracy chart failed: {}", e);
                self.sink.notice(&Notice::from_error(Panel::Chart, &e));
            }
        }
    }

    fn session(&self) -> MutexGuard<'_, SummarySession> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

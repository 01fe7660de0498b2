//! Presentation boundary. The services hand view models to a [`RenderSink`] and
//! never format output themselves.

pub mod console;

pub use console::ConsoleSink;

use crate::domain::{AccuracyChart, ArticleSummary, FeedItem, ItemKind, RelatedSource};
use crate::errors::NewsdeskError;

/// What selecting a card does
#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    /// Request a summary of the article
    Summarize { url: String, title: String },
    /// Embed the video
    Play { embed_url: String, title: String },
    /// Nothing to open
    None,
}

/// Display-ready form of a [`FeedItem`]
#[derive(Debug, Clone, PartialEq)]
pub struct FeedCard {
    /// 1-based position in the displayed list
    pub position: usize,
    pub id: String,
    pub title: String,
    /// "source / date", or just the source when the date is unknown
    pub meta: String,
    pub image_url: String,
    pub action: CardAction,
}

impl FeedCard {
    pub fn from_item(position: usize, item: &FeedItem) -> Self {
        let meta = match item.published_at {
            Some(published) => format!("{} / {}", item.source_name, published.format("%Y-%m-%d")),
            None => item.source_name.clone(),
        };

        let action = if !item.has_target() {
            CardAction::None
        } else {
            match item.kind {
                ItemKind::Article => CardAction::Summarize {
                    url: item.target_url.clone(),
                    title: item.title.clone(),
                },
                ItemKind::Video => CardAction::Play {
                    embed_url: item.target_url.clone(),
                    title: item.title.clone(),
                },
            }
        };

        Self {
            position,
            id: item.id.clone(),
            title: item.title.clone(),
            meta,
            image_url: item.image_url.clone(),
            action,
        }
    }
}

/// Number the items from 1 in display order
pub fn cards(items: &[FeedItem]) -> Vec<FeedCard> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| FeedCard::from_item(i + 1, item))
        .collect()
}

/// Area of the page a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Feed,
    Summary,
    Chart,
    Related,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A display-only message; errors reach the user only in this form
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub panel: Panel,
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(panel: Panel, text: impl Into<String>) -> Self {
        Self {
            panel,
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn from_error(panel: Panel, err: &NewsdeskError) -> Self {
        let (level, text) = match err {
            NewsdeskError::NoResults(what) => (NoticeLevel::Info, what.clone()),
            NewsdeskError::Http { reason, .. } => (NoticeLevel::Error, format!("Error: {}", reason)),
            NewsdeskError::Network(_) => (
                NoticeLevel::Error,
                match panel {
                    Panel::Summary => "An error occurred while fetching the summary.".to_string(),
                    _ => "An error occurred while fetching news.".to_string(),
                },
            ),
            other => (NoticeLevel::Error, other.to_string()),
        };

        Self { panel, level, text }
    }
}

pub trait RenderSink: Send + Sync {
    fn feed(&self, cards: &[FeedCard]);

    /// A video chosen for playback
    fn now_playing(&self, card: &FeedCard);

    fn loading(&self, url: &str);

    fn summary(&self, summary: &ArticleSummary);

    fn chart(&self, chart: &AccuracyChart);

    fn related(&self, topic: &str, sources: &[RelatedSource]);

    fn notice(&self, notice: &Notice);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Event {
        Feed(Vec<FeedCard>),
        NowPlaying(String),
        Loading(String),
        Summary(String),
        Chart(AccuracyChart),
        Related(String, Vec<RelatedSource>),
        Notice(Notice),
    }

    /// Sink that records everything it is asked to show
    #[derive(Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingSink {
        pub fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        pub fn summaries(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Summary(url) => Some(url),
                    _ => None,
                })
                .collect()
        }

        pub fn notices(&self) -> Vec<Notice> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Notice(n) => Some(n),
                    _ => None,
                })
                .collect()
        }

        fn push(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl RenderSink for RecordingSink {
        fn feed(&self, cards: &[FeedCard]) {
            self.push(Event::Feed(cards.to_vec()));
        }

        fn now_playing(&self, card: &FeedCard) {
            self.push(Event::NowPlaying(card.id.clone()));
        }

        fn loading(&self, url: &str) {
            self.push(Event::Loading(url.to_string()));
        }

        fn summary(&self, summary: &ArticleSummary) {
            self.push(Event::Summary(summary.url.clone()));
        }

        fn chart(&self, chart: &AccuracyChart) {
            self.push(Event::Chart(chart.clone()));
        }

        fn related(&self, topic: &str, sources: &[RelatedSource]) {
            self.push(Event::Related(topic.to_string(), sources.to_vec()));
        }

        fn notice(&self, notice: &Notice) {
            self.push(Event::Notice(notice.clone()));
        }
    }
}

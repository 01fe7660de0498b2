use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled Article";
pub const UNKNOWN_SOURCE: &str = "Unknown Source";
pub const DEFAULT_IMAGE: &str = "/static/img/default-image.jpg";
pub const NO_TARGET: &str = "#";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Article,
    Video,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Article => "article",
            ItemKind::Video => "video",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One normalized article or video record, independent of the provider it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub source_name: String,
    pub published_at: Option<DateTime<Utc>>,
    pub image_url: String,
    pub target_url: String,
    pub kind: ItemKind,
}

impl FeedItem {
    /// An item with every field at its fallback value
    pub fn placeholder(id: String, kind: ItemKind) -> Self {
        Self {
            id,
            title: UNTITLED.to_string(),
            source_name: UNKNOWN_SOURCE.to_string(),
            published_at: None,
            image_url: DEFAULT_IMAGE.to_string(),
            target_url: NO_TARGET.to_string(),
            kind,
        }
    }

    /// Whether the item points somewhere a summary can be requested for
    pub fn has_target(&self) -> bool {
        self.target_url != NO_TARGET
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = title;
        self
    }

    pub fn with_source_name(mut self, source_name: String) -> Self {
        self.source_name = source_name;
        self
    }

    pub fn with_published_at(mut self, published_at: Option<DateTime<Utc>>) -> Self {
        self.published_at = published_at;
        self
    }

    pub fn with_image_url(mut self, image_url: String) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn with_target_url(mut self, target_url: String) -> Self {
        self.target_url = target_url;
        self
    }
}

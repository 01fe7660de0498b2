//! Maps provider records onto [`FeedItem`].
//!
//! Each provider has one [`FieldMap`]: for every canonical field, the JSON
//! pointers to try in order. The first non-empty string wins; when none
//! matches, the field keeps the fallback from [`FeedItem::placeholder`].
//! Normalization never fails.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::domain::{FeedItem, ProviderKind};
use crate::sources::youtube::EMBED_URL_PREFIX;

struct FieldMap {
    id: &'static [&'static str],
    title: &'static [&'static str],
    image: &'static [&'static str],
    source: &'static [&'static str],
    published: &'static [&'static str],
    target: &'static [&'static str],
    /// Prepended to the matched target value (video IDs become embed URLs)
    target_prefix: Option<&'static str>,
}

const NEWSDATA: FieldMap = FieldMap {
    id: &["/link", "/article_id"],
    title: &["/title"],
    image: &["/image_url"],
    source: &["/source_id", "/source_name"],
    published: &["/pubDate"],
    target: &["/link"],
    target_prefix: None,
};

const NEWSAPI: FieldMap = FieldMap {
    id: &["/url"],
    title: &["/title"],
    image: &["/urlToImage"],
    source: &["/source/name", "/source/id"],
    published: &["/publishedAt"],
    target: &["/url"],
    target_prefix: None,
};

const YOUTUBE: FieldMap = FieldMap {
    id: &["/id/videoId"],
    title: &["/snippet/title"],
    image: &[
        "/snippet/thumbnails/medium/url",
        "/snippet/thumbnails/high/url",
        "/snippet/thumbnails/default/url",
    ],
    source: &["/snippet/channelTitle"],
    published: &["/snippet/publishedAt", "/snippet/publishTime"],
    target: &["/id/videoId"],
    target_prefix: Some(EMBED_URL_PREFIX),
};

fn field_map(kind: ProviderKind) -> &'static FieldMap {
    match kind {
        ProviderKind::NewsData => &NEWSDATA,
        ProviderKind::NewsApi => &NEWSAPI,
        ProviderKind::YouTube => &YOUTUBE,
    }
}

/// Convert one raw provider record into a [`FeedItem`]
pub fn normalize(record: &Value, kind: ProviderKind) -> FeedItem {
    let map = field_map(kind);

    let title = first_str(record, map.title);
    let id = first_str(record, map.id).unwrap_or_else(|| {
        format!("{}:{}", kind, title.as_deref().unwrap_or_default())
    });

    let mut item = FeedItem::placeholder(id, kind.item_kind())
        .with_published_at(first_str(record, map.published).and_then(|d| parse_date(&d)));

    if let Some(title) = title {
        item = item.with_title(title);
    }
    if let Some(source) = first_str(record, map.source) {
        item = item.with_source_name(source);
    }
    if let Some(image) = first_str(record, map.image) {
        item = item.with_image_url(image);
    }
    if let Some(target) = first_str(record, map.target) {
        let target = match map.target_prefix {
            Some(prefix) => format!("{}{}", prefix, target),
            None => target,
        };
        item = item.with_target_url(target);
    }

    item
}

/// Normalize a whole batch, one item per record, keeping provider order
pub fn normalize_all(records: &[Value], kind: ProviderKind) -> Vec<FeedItem> {
    records.iter().map(|r| normalize(r, kind)).collect()
}

fn first_str(record: &Value, pointers: &[&str]) -> Option<String> {
    pointers
        .iter()
        .filter_map(|p| record.pointer(p))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse the date formats the providers emit; anything else is `None`
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // newsdata.io: "2024-01-15 10:30:00", UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feed_item::{DEFAULT_IMAGE, UNKNOWN_SOURCE, UNTITLED};
    use crate::domain::ItemKind;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_newsdata_record() {
        let record = json!({
            "article_id": "f1",
            "title": "Budget session opens",
            "link": "https://example.in/budget",
            "source_id": "example_in",
            "pubDate": "2024-01-15 10:30:00",
            "image_url": "https://example.in/budget.jpg"
        });

        let item = normalize(&record, ProviderKind::NewsData);

        assert_eq!(item.id, "https://example.in/budget");
        assert_eq!(item.title, "Budget session opens");
        assert_eq!(item.source_name, "example_in");
        assert_eq!(item.image_url, "https://example.in/budget.jpg");
        assert_eq!(item.target_url, "https://example.in/budget");
        assert_eq!(item.kind, ItemKind::Article);

        let published = item.published_at.unwrap();
        assert_eq!((published.year(), published.month(), published.day()), (2024, 1, 15));
        assert_eq!(published.hour(), 10);
    }

    #[test]
    fn test_newsapi_record() {
        let record = json!({
            "source": {"id": "bbc-news", "name": "BBC News"},
            "title": "Markets rally",
            "url": "https://bbc.co.uk/news/markets",
            "urlToImage": "https://bbc.co.uk/img.jpg",
            "publishedAt": "2024-03-01T08:15:00Z"
        });

        let item = normalize(&record, ProviderKind::NewsApi);

        assert_eq!(item.source_name, "BBC News");
        assert_eq!(item.target_url, "https://bbc.co.uk/news/markets");
        assert_eq!(item.image_url, "https://bbc.co.uk/img.jpg");
        assert!(item.published_at.is_some());
    }

    #[test]
    fn test_youtube_record_builds_embed_url() {
        let record = json!({
            "id": {"kind": "youtube#video", "videoId": "DUYM-JhQgS4"},
            "snippet": {
                "title": "Live: evening bulletin",
                "channelTitle": "News Channel",
                "publishedAt": "2024-05-05T18:00:00Z",
                "thumbnails": {"high": {"url": "https://i.ytimg.com/vi/DUYM-JhQgS4/hq.jpg"}}
            }
        });

        let item = normalize(&record, ProviderKind::YouTube);

        assert_eq!(item.id, "DUYM-JhQgS4");
        assert_eq!(item.kind, ItemKind::Video);
        assert_eq!(item.target_url, "https://www.youtube.com/embed/DUYM-JhQgS4");
        assert_eq!(item.image_url, "https://i.ytimg.com/vi/DUYM-JhQgS4/hq.jpg");
        assert_eq!(item.source_name, "News Channel");
    }

    #[test]
    fn test_missing_fields_fall_back() {
        for kind in [ProviderKind::NewsData, ProviderKind::NewsApi, ProviderKind::YouTube] {
            let item = normalize(&json!({}), kind);

            assert_eq!(item.title, UNTITLED);
            assert_eq!(item.source_name, UNKNOWN_SOURCE);
            assert_eq!(item.image_url, DEFAULT_IMAGE);
            assert_eq!(item.target_url, "#");
            assert!(item.published_at.is_none());
            assert!(!item.id.is_empty());
        }
    }

    #[test]
    fn test_null_and_blank_fields_fall_back() {
        let record = json!({
            "title": "   ",
            "link": null,
            "image_url": null,
            "source_id": 42,
            "pubDate": "yesterday-ish"
        });

        let item = normalize(&record, ProviderKind::NewsData);

        assert_eq!(item.title, UNTITLED);
        assert_eq!(item.target_url, "#");
        assert_eq!(item.image_url, DEFAULT_IMAGE);
        assert_eq!(item.source_name, UNKNOWN_SOURCE);
        assert!(item.published_at.is_none());
    }

    #[test]
    fn test_non_object_record_does_not_panic() {
        let item = normalize(&json!("just a string"), ProviderKind::NewsApi);
        assert_eq!(item.title, UNTITLED);
    }

    #[test]
    fn test_id_falls_back_to_article_id_then_title() {
        let with_article_id = normalize(&json!({"article_id": "abc"}), ProviderKind::NewsData);
        assert_eq!(with_article_id.id, "abc");

        let titled = normalize(&json!({"title": "Only a title"}), ProviderKind::NewsApi);
        assert_eq!(titled.id, "newsapi:Only a title");
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-01-15T10:30:00+05:30").is_some());
        assert!(parse_date("2024-01-15 10:30:00").is_some());
        assert!(parse_date("Mon, 15 Jan 2024 10:30:00 GMT").is_some());
        assert!(parse_date("2024-01-15").is_some());
        assert!(parse_date("").is_none());
        assert!(parse_date("15/01/2024").is_none());
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let records = vec![
            json!({"title": "first", "url": "https://a.com/1"}),
            json!({"title": "second", "url": "https://a.com/2"}),
            json!({"title": "third", "url": "https://a.com/3"}),
        ];

        let items = normalize_all(&records, ProviderKind::NewsApi);
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }
}

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::{AccuracyChart, ArticleSummary, RelatedSource};
use crate::render::{FeedCard, Notice, NoticeLevel, Panel, RenderSink};

const BAR_WIDTH: f64 = 20.0;

/// Plain-text sink for the terminal
pub struct ConsoleSink<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    /// Write a block in one go so concurrent renders don't interleave
    fn emit(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        // Nowhere to report a broken stdout to
        let _ = out.write_all(text.as_bytes()).and_then(|_| out.flush());
    }
}

impl<W: Write + Send> RenderSink for ConsoleSink<W> {
    fn feed(&self, cards: &[FeedCard]) {
        let mut text = String::new();
        for card in cards {
            text.push_str(&format!("  {}. {}\n", card.position, card.title));
            text.push_str(&format!("     {}\n", card.meta));
        }
        text.push('\n');
        self.emit(&text);
    }

    fn now_playing(&self, card: &FeedCard) {
        let url = match &card.action {
            crate::render::CardAction::Play { embed_url, .. } => embed_url.as_str(),
            _ => card.image_url.as_str(),
        };
        self.emit(&format!("Now playing: {}\n  {}\n\n", card.title, url));
    }

    fn loading(&self, _url: &str) {
        self.emit("Loading summary...\n");
    }

    fn summary(&self, summary: &ArticleSummary) {
        let mut text = format!("\nSummary\n{}\n", summary.text);

        if let Some(image) = &summary.image_url {
            text.push_str(&format!("Image: {}\n", image));
        }

        if !summary.related.is_empty() {
            text.push_str("\nRelated coverage:\n");
            for related in &summary.related {
                text.push_str(&format!("  - {}\n    {}\n", related.url, related.summary));
            }
        }
        text.push('\n');
        self.emit(&text);
    }

    fn chart(&self, chart: &AccuracyChart) {
        let width = chart.points.iter().map(|p| p.host.len()).max().unwrap_or(0);

        let mut text = String::from("Accuracy by source:\n");
        for point in &chart.points {
            let filled = ((point.accuracy.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH).round() as usize;
            text.push_str(&format!(
                "  {:<width$}  {:<bar$}  {:.0}%\n",
                point.host,
                "#".repeat(filled),
                point.accuracy,
                width = width,
                bar = BAR_WIDTH as usize,
            ));
        }
        text.push_str(&format!("  Average accuracy: {:.1}%\n\n", chart.average));
        self.emit(&text);
    }

    fn related(&self, topic: &str, sources: &[RelatedSource]) {
        let mut text = format!("Related sources for \"{}\":\n", topic);
        for source in sources {
            text.push_str(&format!("  {}\n    {}\n", source.title, source.link));
            if !source.snippet.is_empty() {
                text.push_str(&format!("    {}\n", source.snippet));
            }
        }
        text.push('\n');
        self.emit(&text);
    }

    fn notice(&self, notice: &Notice) {
        let prefix = match (notice.level, notice.panel) {
            (NoticeLevel::Info, _) => "",
            (NoticeLevel::Error, Panel::Feed) => "[feed] ",
            (NoticeLevel::Error, Panel::Summary) => "[summary] ",
            (NoticeLevel::Error, Panel::Chart) => "[chart] ",
            (NoticeLevel::Error, Panel::Related) => "[related] ",
        };
        self.emit(&format!("{}{}\n", prefix, notice.text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChartPoint;
    use crate::render::CardAction;
    use summary_api::RelatedSummary;

    fn output(render: impl FnOnce(&ConsoleSink<Vec<u8>>)) -> String {
        let sink = ConsoleSink::new(Vec::new());
        render(&sink);
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_feed_lists_numbered_cards() {
        let cards = vec![FeedCard {
            position: 1,
            id: "a".to_string(),
            title: "Budget passed".to_string(),
            meta: "A News / 2024-02-01".to_string(),
            image_url: "/static/img/default-image.jpg".to_string(),
            action: CardAction::None,
        }];

        let text = output(|s| s.feed(&cards));
        assert!(text.contains("  1. Budget passed\n"));
        assert!(text.contains("A News / 2024-02-01"));
    }

    #[test]
    fn test_summary_with_related() {
        let summary = ArticleSummary {
            url: "https://a.com/x".to_string(),
            text: "Short version.".to_string(),
            related: vec![RelatedSummary {
                url: "https://b.com/y".to_string(),
                summary: "Accuracy of news: 90%".to_string(),
            }],
            image_url: None,
        };

        let text = output(|s| s.summary(&summary));
        assert!(text.contains("Summary\nShort version.\n"));
        assert!(text.contains("Related coverage:"));
        assert!(text.contains("https://b.com/y"));
        assert!(!text.contains("Image:"));
    }

    #[test]
    fn test_chart_bars() {
        let chart = AccuracyChart {
            points: vec![
                ChartPoint { host: "bbc.com".to_string(), accuracy: 100.0 },
                ChartPoint { host: "a.in".to_string(), accuracy: 50.0 },
            ],
            average: 75.0,
        };

        let text = output(|s| s.chart(&chart));
        assert!(text.contains(&"#".repeat(20)));
        assert!(text.contains("a.in     ##########"));
        assert!(text.contains("Average accuracy: 75.0%"));
    }

    #[test]
    fn test_error_notice_prefixed_by_panel() {
        let notice = Notice {
            panel: Panel::Summary,
            level: NoticeLevel::Error,
            text: "Error: boom".to_string(),
        };

        assert_eq!(output(|s| s.notice(&notice)), "[summary] Error: boom\n");
        assert_eq!(
            output(|s| s.notice(&Notice::info(Panel::Related, "No related sources found."))),
            "No related sources found.\n"
        );
    }
}

pub mod summarizer;
pub mod feed_fetcher;
pub mod summary_coordinator;
pub mod related_service;

pub use summarizer::Summarizer;
pub use feed_fetcher::FeedFetcher;
pub use summary_coordinator::{Admission, SummaryCoordinator, SummarySession};
pub use related_service::RelatedSources;

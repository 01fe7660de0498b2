pub mod traits;
pub mod http;
pub mod normalizer;
pub mod newsdata;
pub mod newsapi;
pub mod youtube;
pub mod custom_search;
pub mod registry;

pub use traits::FeedProvider;
pub use http::{HttpJsonClient, JsonClient};
pub use normalizer::normalize;
pub use custom_search::CustomSearchSource;
pub use registry::SourceRegistry;

use std::sync::Arc;

use crate::config::Config;
use crate::domain::ProviderKind;
use crate::errors::{NewsdeskError, NewsdeskResult};
use crate::sources::traits::FeedProvider;
use crate::sources::{newsapi::NewsApiSource, newsdata::NewsDataSource, youtube::YouTubeSource};

pub struct SourceRegistry {
    sources: Vec<Arc<dyn FeedProvider>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Register every built-in provider with settings from the config
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(NewsDataSource::from_config(config)));
        registry.register(Arc::new(NewsApiSource::from_config(config)));
        registry.register(Arc::new(YouTubeSource::from_config(config)));

        registry
    }

    /// Later registrations of the same kind replace earlier ones
    pub fn register(&mut self, source: Arc<dyn FeedProvider>) {
        self.sources.retain(|s| s.kind() != source.kind());
        self.sources.push(source);
    }

    pub fn get(&self, kind: ProviderKind) -> NewsdeskResult<Arc<dyn FeedProvider>> {
        self.sources
            .iter()
            .find(|s| s.kind() == kind)
            .cloned()
            .ok_or_else(|| NewsdeskError::InvalidInput(format!("No provider registered for {}", kind)))
    }

    pub fn kinds(&self) -> Vec<ProviderKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_providers_registered() {
        let registry = SourceRegistry::from_config(&Config::default());

        assert_eq!(
            registry.kinds(),
            vec![ProviderKind::NewsData, ProviderKind::NewsApi, ProviderKind::YouTube]
        );
    }

    #[test]
    fn test_get_by_kind() {
        let registry = SourceRegistry::from_config(&Config::default());

        let source = registry.get(ProviderKind::YouTube).unwrap();
        assert_eq!(source.kind(), ProviderKind::YouTube);
        assert_eq!(source.records_field(), "items");
    }

    #[test]
    fn test_empty_registry() {
        let registry = SourceRegistry::new();
        assert!(matches!(
            registry.get(ProviderKind::NewsApi),
            Err(NewsdeskError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_register_replaces_same_kind() {
        let mut registry = SourceRegistry::from_config(&Config::default());
        registry.register(Arc::new(NewsApiSource::new(Some("other".to_string()), "reuters")));

        assert_eq!(registry.kinds().len(), 3);
        let url = registry.get(ProviderKind::NewsApi).unwrap().endpoint(None).unwrap();
        assert!(url.as_str().contains("sources=reuters"));
    }
}

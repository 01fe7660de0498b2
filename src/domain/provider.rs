use serde::{Deserialize, Serialize};

use super::ItemKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    NewsData,
    NewsApi,
    YouTube,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::NewsData => "newsdata",
            ProviderKind::NewsApi => "newsapi",
            ProviderKind::YouTube => "youtube",
        }
    }

    /// The kind of item every record from this provider becomes
    pub fn item_kind(&self) -> ItemKind {
        match self {
            ProviderKind::NewsData | ProviderKind::NewsApi => ItemKind::Article,
            ProviderKind::YouTube => ItemKind::Video,
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newsdata" | "newsdata.io" => Ok(ProviderKind::NewsData),
            "newsapi" | "newsapi.org" => Ok(ProviderKind::NewsApi),
            "youtube" | "yt" => Ok(ProviderKind::YouTube),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("newsdata.io".parse::<ProviderKind>().unwrap(), ProviderKind::NewsData);
        assert_eq!("NewsAPI".parse::<ProviderKind>().unwrap(), ProviderKind::NewsApi);
        assert_eq!("yt".parse::<ProviderKind>().unwrap(), ProviderKind::YouTube);
        assert!("rss".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_item_kind() {
        assert_eq!(ProviderKind::NewsApi.item_kind(), ItemKind::Article);
        assert_eq!(ProviderKind::YouTube.item_kind(), ItemKind::Video);
    }
}

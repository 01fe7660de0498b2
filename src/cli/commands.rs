use clap::{Parser, Subcommand};

use crate::domain::ProviderKind;

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "News and live-video feed aggregator with on-demand article summaries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the latest headlines or live videos from a provider
    Feed {
        /// Provider to fetch from (newsdata, newsapi, youtube)
        #[arg(short, long, default_value = "newsdata")]
        provider: ProviderKind,

        /// Search for this text instead of showing the default feed (never cached)
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Summarize an article through the summarizer backend
    Summarize {
        /// Article URL
        url: String,

        /// Article title, helps the backend find related coverage
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Search the web for coverage related to a topic
    Related {
        /// Topic to search for, usually a video title
        topic: String,
    },

    /// Show a feed and pick items interactively by number
    Browse {
        /// Provider to fetch from (newsdata, newsapi, youtube)
        #[arg(short, long, default_value = "newsdata")]
        provider: ProviderKind,
    },

    /// Remove cached feeds for every provider
    ClearCache,
}

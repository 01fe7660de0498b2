use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use summary_api::BackendClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use newsdesk::cli::{Cli, Commands};
use newsdesk::config::Config;
use newsdesk::domain::{ItemKind, ProviderKind};
use newsdesk::errors::{NewsdeskError, NewsdeskResult};
use newsdesk::render::{self, CardAction, ConsoleSink, Notice, Panel, RenderSink};
use newsdesk::services::related_service::NO_RELATED_SOURCES;
use newsdesk::services::{FeedFetcher, RelatedSources, SummaryCoordinator};
use newsdesk::sources::{CustomSearchSource, HttpJsonClient, SourceRegistry};
use newsdesk::storage::{FeedCache, FileFeedCache, SystemClock};

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout only carries what the user asked to see
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

async fn run() -> NewsdeskResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    let sink: Arc<dyn RenderSink> = Arc::new(ConsoleSink::stdout());

    match cli.command {
        Commands::Feed { provider, query } => {
            cmd_feed(&config, provider, query.as_deref(), sink.as_ref()).await
        }
        Commands::Summarize { url, title } => {
            cmd_summarize(&config, &url, title.as_deref(), sink).await
        }
        Commands::Related { topic } => cmd_related(&config, &topic, sink.as_ref()).await,
        Commands::Browse { provider } => cmd_browse(&config, provider, sink).await,
        Commands::ClearCache => cmd_clear_cache(&config),
    }
}

fn feed_fetcher(
    config: &Config,
    provider: ProviderKind,
    client: Arc<HttpJsonClient>,
) -> NewsdeskResult<FeedFetcher<FileFeedCache>> {
    let registry = SourceRegistry::from_config(config);
    let cache = FileFeedCache::new(
        config.cache_path_for(provider),
        config.cache_ttl,
        Arc::new(SystemClock),
    );

    Ok(FeedFetcher::new(registry.get(provider)?, client, cache)
        .with_display_limit(config.display_limit))
}

fn summary_coordinator(
    config: &Config,
    sink: Arc<dyn RenderSink>,
) -> NewsdeskResult<SummaryCoordinator> {
    let backend = BackendClient::new(&config.summarizer_url, config.request_timeout)?;
    Ok(SummaryCoordinator::new(Arc::new(backend), sink))
}

fn show_first_video(items: &[newsdesk::domain::FeedItem], sink: &dyn RenderSink) {
    if let Some(first) = items.iter().find(|i| i.kind == ItemKind::Video && i.has_target()) {
        sink.now_playing(&render::FeedCard::from_item(1, first));
    }
}

async fn cmd_feed(
    config: &Config,
    provider: ProviderKind,
    query: Option<&str>,
    sink: &dyn RenderSink,
) -> NewsdeskResult<()> {
    let client = Arc::new(HttpJsonClient::new(config.request_timeout)?);
    let fetcher = feed_fetcher(config, provider, client)?;

    // One-shot command: empty results are a notice, other failures set the exit code
    match fetcher.fetch_feed(query).await {
        Ok(items) => {
            sink.feed(&render::cards(&items));
            show_first_video(&items, sink);
            Ok(())
        }
        Err(e @ NewsdeskError::NoResults(_)) => {
            sink.notice(&Notice::from_error(Panel::Feed, &e));
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn cmd_summarize(
    config: &Config,
    url: &str,
    title: Option<&str>,
    sink: Arc<dyn RenderSink>,
) -> NewsdeskResult<()> {
    let url = url::Url::parse(url)?;
    let coordinator = summary_coordinator(config, sink)?;

    if let Some(task) = coordinator.request_summary(url.as_str(), title) {
        if let Err(e) = task.await {
            tracing::error!("summary task failed: {}", e);
        }
    }

    Ok(())
}

async fn cmd_related(config: &Config, topic: &str, sink: &dyn RenderSink) -> NewsdeskResult<()> {
    let client = Arc::new(HttpJsonClient::new(config.request_timeout)?);
    let related = RelatedSources::new(CustomSearchSource::from_config(config), client);

    let sources = related.find(topic).await?;
    if sources.is_empty() {
        sink.notice(&Notice::info(Panel::Related, NO_RELATED_SOURCES));
    } else {
        sink.related(topic, &sources);
    }

    Ok(())
}

async fn cmd_browse(
    config: &Config,
    provider: ProviderKind,
    sink: Arc<dyn RenderSink>,
) -> NewsdeskResult<()> {
    let client = Arc::new(HttpJsonClient::new(config.request_timeout)?);
    let fetcher = feed_fetcher(config, provider, client.clone())?;

    let items = fetcher.show_feed(None, sink.as_ref()).await;
    if items.is_empty() {
        return Ok(());
    }
    show_first_video(&items, sink.as_ref());

    let cards = render::cards(&items);
    let coordinator = summary_coordinator(config, sink.clone())?;
    let related = RelatedSources::new(CustomSearchSource::from_config(config), client);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = Vec::new();

    loop {
        print!("Enter number (or 'q' to quit): ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.eq_ignore_ascii_case("q") {
            break;
        }

        let card = match select(input, cards.len()) {
            Ok(index) => &cards[index - 1],
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        // Summaries run in the background so the next selection isn't blocked
        match &card.action {
            CardAction::Summarize { url, title } => {
                tasks.extend(coordinator.request_summary(url, Some(title)));
            }
            CardAction::Play { title, .. } => {
                sink.now_playing(card);
                related.show(title, sink.as_ref()).await;
            }
            CardAction::None => println!("Nothing to open for this item."),
        }
    }

    // Let outstanding summaries finish rendering before exit
    for task in tasks {
        if let Err(e) = task.await {
            tracing::error!("summary task failed: {}", e);
        }
    }

    Ok(())
}

fn select(input: &str, len: usize) -> NewsdeskResult<usize> {
    let index: usize = input
        .parse()
        .map_err(|_| NewsdeskError::InvalidInput("Invalid number".to_string()))?;

    if index == 0 || index > len {
        return Err(NewsdeskError::InvalidInput("Number out of range".to_string()));
    }

    Ok(index)
}

fn cmd_clear_cache(config: &Config) -> NewsdeskResult<()> {
    for provider in SourceRegistry::from_config(config).kinds() {
        let cache = FileFeedCache::new(
            config.cache_path_for(provider),
            config.cache_ttl,
            Arc::new(SystemClock),
        );
        cache.clear();
    }

    println!("Cache cleared.");
    Ok(())
}

use anyhow::Context;
use clap::Parser;
use na_core::Article;
use na_fetch::{FeedManager, NewsApiClient, Refresh};
use na_storage::{create_storage, StorageConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Read, search and bookmark news articles", long_about = None)]
pub struct Cli {
    /// Storage backend: json or memory
    #[arg(long, env = "NA_STORAGE", default_value = "json")]
    storage: String,
    /// Cache document location (defaults to the user cache directory)
    #[arg(long, env = "NA_CACHE_PATH")]
    cache_path: Option<PathBuf>,
    /// News API endpoint, including any query string and API key
    #[arg(long, env = "NEWS_API_URL")]
    endpoint: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch fresh articles and replace the cache
    Fetch,
    /// List cached articles, fetching first if the cache is empty
    List {
        /// Only show articles whose title contains this text
        #[arg(long, short)]
        query: Option<String>,
    },
    /// List bookmarked articles
    Bookmarks,
    /// Toggle the bookmark on the cached article with this exact title
    Bookmark {
        title: String,
    },
    /// Delete the cache document
    Clear,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn format_article(article: &Article) -> String {
    let marker = if article.is_bookmarked() { "🔖" } else { "  " };
    let title = article.title.as_deref().unwrap_or("Untitled");
    let author = article.author.as_deref().unwrap_or("Unknown Author");
    match article.published_at_utc() {
        Some(date) => format!("{} {} ({}, {})", marker, title, author, date.format("%Y-%m-%d")),
        None => format!("{} {} ({})", marker, title, author),
    }
}

fn print_articles(articles: &[Article], empty_message: &str) {
    if articles.is_empty() {
        println!("{}", empty_message);
        return;
    }
    for article in articles {
        println!("{}", format_article(article));
        if let Some(url) = &article.url {
            println!("     {}", url);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    let config = StorageConfig {
        path: cli.cache_path.clone(),
    };
    let storage = create_storage(&cli.storage, &config)
        .await
        .with_context(|| format!("Failed to open {} storage", cli.storage))?;
    let client = NewsApiClient::new(cli.endpoint.clone().unwrap_or_default())
        .context("Failed to build HTTP client")?;
    let feed = FeedManager::new(storage.clone(), client);

    match cli.command {
        Commands::Fetch => {
            let refresh = feed.refresh().await?;
            let empty_message = match &refresh {
                Refresh::Fetched(articles) => {
                    info!("✨ Cached {} articles", articles.len());
                    "No articles returned"
                }
                Refresh::Stale(_, e) => {
                    eprintln!("⚠️ Fetch failed: {}", e);
                    "No cached articles"
                }
            };
            print_articles(refresh.articles(), empty_message);
        }
        Commands::List { query } => {
            feed.load_or_fetch().await?;
            let articles = feed.search(query.as_deref().unwrap_or("")).await?;
            print_articles(&articles, "No articles found");
        }
        Commands::Bookmarks => {
            print_articles(&feed.bookmarks().await?, "No Bookmarked Articles");
        }
        Commands::Bookmark { title } => {
            let change = feed.toggle_bookmark(&title).await?;
            println!("{}", format_article(&change.article));
            println!("{} bookmarked articles", change.bookmarks.len());
        }
        Commands::Clear => {
            storage.clear().await?;
            println!("Cache cleared");
        }
    }

    Ok(())
}

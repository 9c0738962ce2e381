use na_core::{list, Article, ArticleStorage, Error, FetchError, Result};
use na_storage::{BookmarkChange, BookmarkToggle};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};
use crate::NewsApiClient;

/// Outcome of a refresh. A failed fetch falls back to the cached list.
#[derive(Debug)]
pub enum Refresh {
    Fetched(Vec<Article>),
    Stale(Vec<Article>, FetchError),
}

impl Refresh {
    pub fn articles(&self) -> &[Article] {
        match self {
            Refresh::Fetched(articles) | Refresh::Stale(articles, _) => articles,
        }
    }

    pub fn into_articles(self) -> Vec<Article> {
        match self {
            Refresh::Fetched(articles) | Refresh::Stale(articles, _) => articles,
        }
    }
}

/// Everything the article list and bookmark screens need, minus the screens.
pub struct FeedManager {
    storage: Arc<dyn ArticleStorage>,
    client: NewsApiClient,
    bookmarks: BookmarkToggle,
}

impl FeedManager {
    pub fn new(storage: Arc<dyn ArticleStorage>, client: NewsApiClient) -> Self {
        let bookmarks = BookmarkToggle::new(storage.clone());
        Self {
            storage,
            client,
            bookmarks,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BookmarkChange> {
        self.bookmarks.subscribe()
    }

    /// Cached articles, or a fresh fetch when the cache is empty.
    pub async fn load_or_fetch(&self) -> Result<Vec<Article>> {
        let cached = self.storage.load().await?;
        if !cached.is_empty() {
            info!("📦 Using {} cached articles", cached.len());
            return Ok(cached);
        }
        Ok(self.refresh().await?.into_articles())
    }

    /// Fetches and replaces the cache. Storage errors still propagate.
    pub async fn refresh(&self) -> Result<Refresh> {
        match self.client.fetch_articles().await {
            Ok(articles) => {
                self.storage.save(&articles).await?;
                Ok(Refresh::Fetched(articles))
            }
            Err(e) => {
                let cached = self.storage.load().await?;
                warn!("Keeping {} cached articles after failed fetch", cached.len());
                Ok(Refresh::Stale(cached, e))
            }
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Article>> {
        let articles = self.storage.load().await?;
        Ok(list::filter_by_title(&articles, query))
    }

    pub async fn bookmarks(&self) -> Result<Vec<Article>> {
        self.storage.bookmarked_articles().await
    }

    pub async fn toggle(&self, article: &Article) -> Result<BookmarkChange> {
        self.bookmarks.toggle(article).await
    }

    /// Toggles the stored article with exactly this title.
    pub async fn toggle_bookmark(&self, title: &str) -> Result<BookmarkChange> {
        let article = self
            .storage
            .load()
            .await?
            .into_iter()
            .find(|a| a.title.as_deref() == Some(title))
            .ok_or_else(|| Error::NotFound(title.to_string()))?;
        self.toggle(&article).await
    }
}

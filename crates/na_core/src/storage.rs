use async_trait::async_trait;
use crate::list;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Replace the whole stored list
    async fn save(&self, articles: &[Article]) -> Result<()>;

    /// Read the stored list; nothing stored yet reads as empty
    async fn load(&self) -> Result<Vec<Article>>;

    /// Drop everything; clearing an empty store is not an error
    async fn clear(&self) -> Result<()>;

    /// Toggle the bookmark of the first stored article with the same title,
    /// appending a bookmarked copy if none matches. Returns the stored entry.
    async fn upsert_bookmark(&self, article: &Article) -> Result<Article>;

    /// Replace the stored article with the same id, or append it.
    /// Note this matches on id while `upsert_bookmark` matches on title.
    async fn upsert(&self, article: &Article) -> Result<()>;

    /// Bookmarked articles in stored order
    async fn bookmarked_articles(&self) -> Result<Vec<Article>> {
        Ok(list::bookmarked(self.load().await?))
    }
}

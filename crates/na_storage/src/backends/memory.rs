use async_trait::async_trait;
use na_core::{list, Article, ArticleStorage, Result};
use tokio::sync::RwLock;
use crate::{StorageBackend, StorageConfig};

/// Same semantics as the JSON cache, without the file.
///
/// The list is held as the serialized document and decoded on every read, so
/// article ids are regenerated on load exactly as they are for the file.
#[derive(Default)]
pub struct InMemoryStorage {
    document: RwLock<Option<Vec<u8>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn decode(document: &Option<Vec<u8>>) -> Result<Vec<Article>> {
    match document {
        Some(bytes) => Ok(serde_json::from_slice(bytes)?),
        None => Ok(Vec::new()),
    }
}

fn encode(articles: &[Article]) -> Result<Option<Vec<u8>>> {
    Ok(Some(serde_json::to_vec(articles)?))
}

#[async_trait]
impl StorageBackend for InMemoryStorage {
    fn get_error_message() -> &'static str {
        "Memory storage should be available"
    }

    async fn new(_config: &StorageConfig) -> Result<Self> {
        Ok(Self::default())
    }
}

#[async_trait]
impl ArticleStorage for InMemoryStorage {
    async fn save(&self, articles: &[Article]) -> Result<()> {
        let encoded = encode(articles)?;
        *self.document.write().await = encoded;
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Article>> {
        decode(&*self.document.read().await)
    }

    async fn clear(&self) -> Result<()> {
        *self.document.write().await = None;
        Ok(())
    }

    async fn upsert_bookmark(&self, article: &Article) -> Result<Article> {
        let mut document = self.document.write().await;
        let mut articles = decode(&document)?;
        let stored = list::toggle_bookmark_by_title(&mut articles, article);
        *document = encode(&articles)?;
        Ok(stored)
    }

    async fn upsert(&self, article: &Article) -> Result<()> {
        let mut document = self.document.write().await;
        let mut articles = decode(&document)?;
        list::replace_or_push_by_id(&mut articles, article);
        *document = encode(&articles)?;
        Ok(())
    }
}

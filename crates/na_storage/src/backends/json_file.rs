use async_trait::async_trait;
use na_core::{list, Article, ArticleStorage, Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use crate::{StorageBackend, StorageConfig};

const CACHE_DIR: &str = "newsapp";
const CACHE_FILE: &str = "cached_articles.json";

/// Article list kept as a single JSON document on disk.
///
/// Every save rewrites the whole document. Writes go to a sibling temporary
/// file that is renamed over the target, so a failed save leaves the previous
/// document in place. Load-modify-save sequences hold `lock` for their whole
/// duration.
pub struct JsonFileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new_with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `<platform cache dir>/newsapp/cached_articles.json`
    pub fn default_path() -> Result<PathBuf> {
        dirs::cache_dir()
            .map(|dir| dir.join(CACHE_DIR).join(CACHE_FILE))
            .ok_or_else(|| Error::Storage("Could not determine the user cache directory".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read(&self) -> Result<Vec<Article>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache document at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                error!("Failed to read {}: {}", self.path.display(), e);
                return Err(e.into());
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(articles) => Ok(articles),
            Err(e) => {
                warn!("⚠️ Discarding unreadable cache {}: {}", self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    async fn write(&self, articles: &[Article]) -> Result<()> {
        let data = serde_json::to_vec(articles).map_err(|e| {
            error!("Failed to serialize {} articles: {}", articles.len(), e);
            Error::Serialization(e)
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        let written = match fs::write(&temp, &data).await {
            Ok(()) => fs::rename(&temp, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            error!("Failed to write {}: {}", self.path.display(), e);
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }

        debug!("💾 Saved {} articles to {}", articles.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for JsonFileStorage {
    fn get_error_message() -> &'static str {
        "Cache directory should be writable"
    }

    async fn new(config: &StorageConfig) -> Result<Self> {
        let path = match &config.path {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        info!("📁 Article cache at {}", path.display());
        Ok(Self::new_with_path(path))
    }
}

#[async_trait]
impl ArticleStorage for JsonFileStorage {
    async fn save(&self, articles: &[Article]) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write(articles).await
    }

    async fn load(&self) -> Result<Vec<Article>> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("🧹 Cleared {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn upsert_bookmark(&self, article: &Article) -> Result<Article> {
        let _guard = self.lock.lock().await;
        let mut articles = self.read().await?;
        let stored = list::toggle_bookmark_by_title(&mut articles, article);
        self.write(&articles).await?;
        Ok(stored)
    }

    async fn upsert(&self, article: &Article) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut articles = self.read().await?;
        list::replace_or_push_by_id(&mut articles, article);
        self.write(&articles).await
    }
}

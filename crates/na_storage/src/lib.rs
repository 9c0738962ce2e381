use async_trait::async_trait;
use na_core::{ArticleStorage, Error, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

pub mod backends;
pub mod bookmarks;

pub use backends::*;
pub use bookmarks::{BookmarkChange, BookmarkToggle};

#[async_trait]
pub trait StorageBackend: Send + Sync {
    fn get_error_message() -> &'static str;
    async fn new(config: &StorageConfig) -> Result<Self> where Self: Sized;
}

#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// Location of the cache document; backends without a file ignore it
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

async fn open<T: StorageBackend + ArticleStorage + 'static>(config: &StorageConfig) -> Result<Arc<dyn ArticleStorage>> {
    let storage_type = std::any::type_name::<T>().split("::").last().unwrap_or("unknown");
    match T::new(config).await {
        Ok(storage) => {
            info!("🏦 Storage backend initialized (using {})", storage_type);
            Ok(Arc::new(storage))
        }
        Err(e) => {
            error!("{}: {}", T::get_error_message(), e);
            Err(e)
        }
    }
}

/// Builds the backend named by `kind` (`json` or `memory`).
pub async fn create_storage(kind: &str, config: &StorageConfig) -> Result<Arc<dyn ArticleStorage>> {
    match kind {
        "json" => open::<JsonFileStorage>(config).await,
        "memory" => open::<InMemoryStorage>(config).await,
        other => Err(Error::Storage(format!("Unknown storage backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, BookmarkChange, BookmarkToggle, StorageConfig};
}

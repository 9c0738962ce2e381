use na_core::{Article, ArticleStorage, Result};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};

const CHANNEL_CAPACITY: usize = 16;

/// Sent to every subscriber after a bookmark flips.
#[derive(Debug, Clone)]
pub struct BookmarkChange {
    /// The stored entry after the toggle
    pub article: Article,
    /// All bookmarked articles after the toggle, in stored order
    pub bookmarks: Vec<Article>,
}

/// Turns a bookmark gesture into a store update plus a change notification.
///
/// Toggles made through one `BookmarkToggle` (and its clones) hold a lock
/// from the store update until the change is sent, so subscribers see changes
/// in store order and the last change received carries the current bookmarks. Calls to
/// `upsert_bookmark` that bypass the toggle are not covered.
#[derive(Clone)]
pub struct BookmarkToggle {
    storage: Arc<dyn ArticleStorage>,
    sender: broadcast::Sender<BookmarkChange>,
    serial: Arc<Mutex<()>>,
}

impl BookmarkToggle {
    pub fn new(storage: Arc<dyn ArticleStorage>) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            storage,
            sender,
            serial: Arc::new(Mutex::new(())),
        }
    }

    /// Receives every change made after this call. Drop the receiver to stop.
    pub fn subscribe(&self) -> broadcast::Receiver<BookmarkChange> {
        self.sender.subscribe()
    }

    pub async fn toggle(&self, article: &Article) -> Result<BookmarkChange> {
        let _serial = self.serial.lock().await;
        let article = self.storage.upsert_bookmark(article).await?;
        let bookmarks = self.storage.bookmarked_articles().await?;
        info!(
            "🔖 {} {}",
            if article.is_bookmarked() { "Bookmarked" } else { "Removed bookmark" },
            article.title.as_deref().unwrap_or("untitled")
        );

        let change = BookmarkChange { article, bookmarks };
        match self.sender.send(change.clone()) {
            Ok(receivers) => debug!("Bookmark change sent to {} subscribers", receivers),
            Err(_) => debug!("No bookmark subscribers"),
        }
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStorage;

    #[tokio::test]
    async fn test_toggle_notifies_subscribers() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.save(&[Article::with_title("A"), Article::with_title("B")]).await.unwrap();
        let toggle = BookmarkToggle::new(storage.clone());
        let mut first = toggle.subscribe();
        let mut second = toggle.subscribe();

        toggle.toggle(&Article::with_title("B")).await.unwrap();

        for rx in [&mut first, &mut second] {
            let change = rx.recv().await.unwrap();
            assert!(change.article.is_bookmarked());
            assert_eq!(change.bookmarks.len(), 1);
            assert_eq!(change.bookmarks[0].title.as_deref(), Some("B"));
        }
    }

    #[tokio::test]
    async fn test_toggle_without_subscribers() {
        let storage = Arc::new(InMemoryStorage::new());
        let toggle = BookmarkToggle::new(storage.clone());

        let change = toggle.toggle(&Article::with_title("A")).await.unwrap();
        assert!(change.article.is_bookmarked());

        let change = toggle.toggle(&Article::with_title("A")).await.unwrap();
        assert!(!change.article.is_bookmarked());
        assert!(change.bookmarks.is_empty());
        assert_eq!(storage.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_arrive_in_order() {
        let storage = Arc::new(InMemoryStorage::new());
        let toggle = BookmarkToggle::new(storage.clone());
        let mut rx = toggle.subscribe();

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let toggle = toggle.clone();
                tokio::spawn(async move { toggle.toggle(&Article::with_title(format!("article-{}", i))).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let mut counts = Vec::new();
        let mut last = None;
        while let Ok(change) = rx.try_recv() {
            counts.push(change.bookmarks.len());
            last = Some(change);
        }
        assert_eq!(counts, (1..=8).collect::<Vec<_>>());

        let stored = storage.bookmarked_articles().await.unwrap();
        let last = last.unwrap();
        assert_eq!(last.bookmarks.len(), stored.len());
        assert!(last.bookmarks.iter().zip(&stored).all(|(a, b)| a.same_content(b)));
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_only_later_changes() {
        let storage = Arc::new(InMemoryStorage::new());
        let toggle = BookmarkToggle::new(storage);

        toggle.toggle(&Article::with_title("A")).await.unwrap();
        let mut rx = toggle.subscribe();
        toggle.toggle(&Article::with_title("B")).await.unwrap();

        let change = rx.recv().await.unwrap();
        assert_eq!(change.article.title.as_deref(), Some("B"));
        assert_eq!(change.bookmarks.len(), 2);
        assert!(rx.try_recv().is_err());
    }
}

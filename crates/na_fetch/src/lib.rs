pub mod client;
pub mod feed;

pub use client::NewsApiClient;
pub use feed::{FeedManager, Refresh};

pub mod prelude {
    pub use super::{FeedManager, NewsApiClient, Refresh};
    pub use na_core::{Article, Error, FetchError, Result};
}

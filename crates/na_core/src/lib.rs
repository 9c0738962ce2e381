pub mod error;
pub mod list;
pub mod storage;
pub mod types;

pub use error::{Error, FetchError, Result};
pub use storage::ArticleStorage;
pub use types::{Article, NewsListResponse};

pub mod prelude {
    pub use super::{Article, ArticleStorage, Error, FetchError, Result};
}

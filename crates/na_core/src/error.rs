use thiserror::Error;

/// Failures of a single news API fetch. None of them are retried.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Empty response body")]
    NoData,

    #[error("Failed to decode response: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, Error>;

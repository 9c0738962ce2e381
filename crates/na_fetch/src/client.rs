use na_core::{Article, FetchError, NewsListResponse};
use tracing::{debug, error, info};
use url::Url;

const USER_AGENT: &str = concat!("newsapp/", env!("CARGO_PKG_VERSION"));

/// Client for a news API endpoint answering `{ status, totalResults, articles }`.
///
/// One GET per call. No timeout, retry or cancellation.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    endpoint: String,
    http: reqwest::Client,
}

impl NewsApiClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    pub async fn fetch_articles(&self) -> Result<Vec<Article>, FetchError> {
        match self.request().await {
            Ok(articles) => {
                info!("📰 Fetched {} articles", articles.len());
                Ok(articles)
            }
            Err(e) => {
                error!("❌ Failed to fetch {}: {}", self.endpoint, e);
                Err(e)
            }
        }
    }

    async fn request(&self) -> Result<Vec<Article>, FetchError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| FetchError::InvalidUrl(format!("{} ({})", self.endpoint, e)))?;

        debug!("GET {}", url);
        let response = self.http.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(FetchError::NoData);
        }

        let decoded: NewsListResponse = serde_json::from_slice(&body).map_err(FetchError::Decoding)?;
        Ok(decoded.into_articles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_articles() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/top-headlines")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "status": "ok",
                    "totalResults": 2,
                    "articles": [
                        {"source": {"id": null, "name": "Wire"}, "author": "A. Writer", "title": "First",
                         "url": "https://news.example/1", "urlToImage": "https://news.example/1.jpg",
                         "publishedAt": "2025-08-20T06:30:00Z", "content": "Lead paragraph [+300 chars]"},
                        {"title": "Second"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = NewsApiClient::new(format!("{}/v2/top-headlines", server.url())).unwrap();
        let articles = client.fetch_articles().await.unwrap();

        mock.assert_async().await;
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].author.as_deref(), Some("A. Writer"));
        assert_eq!(articles[0].image_url.as_deref(), Some("https://news.example/1.jpg"));
        assert!(!articles[0].is_bookmarked());
        assert_eq!(articles[1].title.as_deref(), Some("Second"));
    }

    #[tokio::test]
    async fn test_missing_articles_field() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(r#"{"status":"ok","totalResults":0}"#)
            .create_async()
            .await;

        let client = NewsApiClient::new(server.url()).unwrap();
        assert!(client.fetch_articles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = NewsApiClient::new("not a url").unwrap();
        let result = client.fetch_articles().await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/").with_status(200).with_body("").create_async().await;

        let client = NewsApiClient::new(server.url()).unwrap();
        assert!(matches!(client.fetch_articles().await, Err(FetchError::NoData)));
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<html>rate limited</html>")
            .create_async()
            .await;

        let client = NewsApiClient::new(server.url()).unwrap();
        assert!(matches!(client.fetch_articles().await, Err(FetchError::Decoding(_))));
    }

    #[tokio::test]
    async fn test_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(401)
            .with_body(r#"{"status":"error","code":"apiKeyMissing"}"#)
            .create_async()
            .await;

        let client = NewsApiClient::new(server.url()).unwrap();
        assert!(matches!(client.fetch_articles().await, Err(FetchError::Transport(_))));
    }
}

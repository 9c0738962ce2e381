use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A single news item.
///
/// `id` is generated per process and never leaves it, so two decodes of the
/// same document yield distinct articles. Equality and hashing use `id` only;
/// use [`Article::same_content`] to compare what was actually persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(skip, default = "generate_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "urlToImage", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// Stored on the wire in the `content` field as `"1"`/`"0"`.
    #[serde(
        rename = "content",
        default,
        skip_serializing_if = "Option::is_none",
        with = "bookmark_flag"
    )]
    pub bookmarked: Option<bool>,
}

impl Default for Article {
    fn default() -> Self {
        Self {
            id: generate_id(),
            author: None,
            title: None,
            description: None,
            url: None,
            image_url: None,
            published_at: None,
            bookmarked: None,
        }
    }
}

impl Article {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked == Some(true)
    }

    /// Compares every persisted field, ignoring the process-local `id`.
    pub fn same_content(&self, other: &Article) -> bool {
        self.author == other.author
            && self.title == other.title
            && self.description == other.description
            && self.url == other.url
            && self.image_url == other.image_url
            && self.published_at == other.published_at
            && self.bookmarked == other.bookmarked
    }

    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Article {}

impl Hash for Article {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Envelope returned by the news API. Only `articles` is consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsListResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Option<Vec<Article>>,
}

impl NewsListResponse {
    pub fn into_articles(self) -> Vec<Article> {
        self.articles.unwrap_or_default()
    }
}

/// The API fills `content` with article text; only `"1"` and `"0"` carry a
/// flag, everything else reads as unset.
mod bookmark_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(flag: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match flag {
            Some(true) => serializer.serialize_str("1"),
            Some(false) => serializer.serialize_str("0"),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("1") => Some(true),
            Some("0") => Some(false),
            _ => None,
        })
    }
}

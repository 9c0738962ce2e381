//! In-memory edits applied to a loaded article list before it is saved back.

use crate::types::Article;

/// Flips the bookmark of the first entry whose title equals `article.title`,
/// or appends a bookmarked copy of `article` when no title matches.
///
/// Matching is by title, not id: two distinct articles sharing a title share
/// one bookmark entry. Returns the entry as it now stands in `articles`.
pub fn toggle_bookmark_by_title(articles: &mut Vec<Article>, article: &Article) -> Article {
    if let Some(existing) = articles.iter_mut().find(|a| a.title == article.title) {
        existing.bookmarked = Some(!existing.is_bookmarked());
        return existing.clone();
    }

    let mut added = article.clone();
    added.bookmarked = Some(true);
    articles.push(added.clone());
    added
}

/// Replaces the first entry with the same id, or appends.
pub fn replace_or_push_by_id(articles: &mut Vec<Article>, article: &Article) {
    match articles.iter_mut().find(|a| *a == article) {
        Some(existing) => *existing = article.clone(),
        None => articles.push(article.clone()),
    }
}

pub fn bookmarked(articles: Vec<Article>) -> Vec<Article> {
    articles.into_iter().filter(Article::is_bookmarked).collect()
}

/// Case-insensitive title search on the query as typed. An empty query keeps
/// everything.
pub fn filter_by_title(articles: &[Article], query: &str) -> Vec<Article> {
    if query.is_empty() {
        return articles.to_vec();
    }
    let query = query.to_lowercase();

    articles
        .iter()
        .filter(|a| {
            a.title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&query))
        })
        .cloned()
        .collect()
}

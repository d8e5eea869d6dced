//! Bookmarks and reading history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::article::Article;

/// A bookmark on a saved article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// Database ID.
    pub id: i64,

    /// The bookmarked article.
    pub article_id: i64,

    /// When the bookmark was created.
    pub created_at: DateTime<Utc>,
}

/// A bookmark joined with its article, for list display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkEntry {
    /// Database ID of the bookmark.
    pub id: i64,

    /// The bookmarked article.
    pub article: Article,

    /// When the bookmark was created.
    pub created_at: DateTime<Utc>,
}

/// One reading-history record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Database ID.
    pub id: i64,

    /// The viewed article.
    pub article_id: i64,

    /// Title snapshot for list display.
    pub title: String,

    /// When the article was viewed.
    pub viewed_at: DateTime<Utc>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,

    /// Total number of items across all pages.
    pub total: u64,

    /// Page size requested.
    pub limit: u32,

    /// Offset of the first item on this page.
    pub offset: u32,
}

impl<T> Page<T> {
    /// Whether any items exist beyond this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        u64::from(self.offset) + (self.items.len() as u64) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_has_more() {
        let page = Page {
            items: vec![1, 2, 3],
            total: 10,
            limit: 3,
            offset: 0,
        };
        assert!(page.has_more());

        let last = Page {
            items: vec![10],
            total: 10,
            limit: 3,
            offset: 9,
        };
        assert!(!last.has_more());
    }
}

//! Article repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Article, Bookmark, BookmarkEntry, NewArticle};

/// Repository for saved articles and their bookmarks.
///
/// Bookmarks live here rather than in their own port because they are pure
/// article annotations — every operation is keyed by article ID and the
/// listing joins back to the article row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Insert a new article and return it with its assigned ID.
    async fn insert(&self, article: NewArticle) -> Result<Article, RepositoryError>;

    /// Fetch an article by ID.
    async fn get(&self, id: i64) -> Result<Option<Article>, RepositoryError>;

    /// List all saved articles, newest first.
    async fn list(&self) -> Result<Vec<Article>, RepositoryError>;

    /// Delete an article (and, via cascade, its bookmark and history rows).
    ///
    /// Returns `NotFound` if no such article exists.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// Bookmark an article.
    ///
    /// Returns `AlreadyExists` if the article is already bookmarked and
    /// `NotFound` if the article does not exist.
    async fn add_bookmark(&self, article_id: i64) -> Result<Bookmark, RepositoryError>;

    /// Remove the bookmark on an article.
    ///
    /// Returns `NotFound` if the article is not bookmarked.
    async fn remove_bookmark(&self, article_id: i64) -> Result<(), RepositoryError>;

    /// List bookmarks with their articles, newest first.
    async fn list_bookmarks(&self) -> Result<Vec<BookmarkEntry>, RepositoryError>;
}

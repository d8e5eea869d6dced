//! Library service - orchestrates article, bookmark, and history operations.

use std::sync::Arc;

use crate::domain::{Article, Bookmark, BookmarkEntry, HistoryEntry, NewArticle, Page};
use crate::events::AppEvent;
use crate::ports::{
    AppEventEmitter, ArticleRepository, CoreError, ReadingHistoryRepository, RepositoryError,
};

/// Default page size for history listings.
pub const DEFAULT_HISTORY_PAGE_SIZE: u32 = 20;

/// Service for the saved-article library.
pub struct LibraryService {
    articles: Arc<dyn ArticleRepository>,
    history: Arc<dyn ReadingHistoryRepository>,
    emitter: Arc<dyn AppEventEmitter>,
}

impl LibraryService {
    /// Create a new library service.
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        history: Arc<dyn ReadingHistoryRepository>,
        emitter: Arc<dyn AppEventEmitter>,
    ) -> Self {
        Self {
            articles,
            history,
            emitter,
        }
    }

    // ── Articles ───────────────────────────────────────────────────

    /// Save a new article to the library.
    pub async fn save_article(&self, article: NewArticle) -> Result<Article, CoreError> {
        if article.title.trim().is_empty() {
            return Err(CoreError::Validation(
                "Article title cannot be empty".to_string(),
            ));
        }
        if article.content.trim().is_empty() {
            return Err(CoreError::Validation(
                "Article content cannot be empty".to_string(),
            ));
        }

        let saved = self.articles.insert(article).await?;
        tracing::info!(article_id = saved.id, title = %saved.title, "Article saved");
        self.emitter.emit(AppEvent::ArticleSaved {
            article_id: saved.id,
            title: saved.title.clone(),
        });
        Ok(saved)
    }

    /// Fetch an article by ID.
    pub async fn article(&self, id: i64) -> Result<Article, CoreError> {
        self.articles
            .get(id)
            .await?
            .ok_or_else(|| CoreError::Repository(RepositoryError::NotFound(format!("article {id}"))))
    }

    /// List all saved articles, newest first.
    pub async fn articles(&self) -> Result<Vec<Article>, CoreError> {
        self.articles.list().await.map_err(CoreError::from)
    }

    /// Delete an article and everything hanging off it.
    pub async fn delete_article(&self, id: i64) -> Result<(), CoreError> {
        self.articles.delete(id).await?;
        tracing::info!(article_id = id, "Article deleted");
        self.emitter.emit(AppEvent::ArticleRemoved { article_id: id });
        Ok(())
    }

    /// Plain-text rendition of an article body, for excerpts and speech.
    pub async fn reading_text(&self, id: i64) -> Result<String, CoreError> {
        Ok(self.article(id).await?.plain_text())
    }

    // ── Bookmarks ──────────────────────────────────────────────────

    /// Bookmark an article.
    pub async fn bookmark(&self, article_id: i64) -> Result<Bookmark, CoreError> {
        let bookmark = self.articles.add_bookmark(article_id).await?;
        self.emitter.emit(AppEvent::BookmarkAdded { article_id });
        Ok(bookmark)
    }

    /// Remove the bookmark on an article.
    pub async fn unbookmark(&self, article_id: i64) -> Result<(), CoreError> {
        self.articles.remove_bookmark(article_id).await?;
        self.emitter.emit(AppEvent::BookmarkRemoved { article_id });
        Ok(())
    }

    /// List bookmarks with their articles, newest first.
    pub async fn bookmarks(&self) -> Result<Vec<BookmarkEntry>, CoreError> {
        self.articles.list_bookmarks().await.map_err(CoreError::from)
    }

    // ── Reading history ────────────────────────────────────────────

    /// Record that an article was viewed.
    pub async fn record_view(&self, article_id: i64) -> Result<HistoryEntry, CoreError> {
        self.history.record(article_id).await.map_err(CoreError::from)
    }

    /// List reading history, newest first.
    ///
    /// A `limit` of 0 falls back to [`DEFAULT_HISTORY_PAGE_SIZE`].
    pub async fn history(&self, limit: u32, offset: u32) -> Result<Page<HistoryEntry>, CoreError> {
        let limit = if limit == 0 {
            DEFAULT_HISTORY_PAGE_SIZE
        } else {
            limit
        };
        self.history.list(limit, offset).await.map_err(CoreError::from)
    }

    /// Delete all reading history.
    pub async fn clear_history(&self) -> Result<(), CoreError> {
        self.history.clear().await.map_err(CoreError::from)
    }
}

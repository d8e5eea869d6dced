//! `SQLite` implementation of the `ReadingHistoryRepository` trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use lectern_core::domain::{HistoryEntry, Page};
use lectern_core::ports::{ReadingHistoryRepository, RepositoryError};

use super::row_mappers::{get_column, parse_datetime};

/// `SQLite` implementation of the `ReadingHistoryRepository` trait.
pub struct SqliteHistoryRepository {
    pool: SqlitePool,
}

impl SqliteHistoryRepository {
    /// Create a new `SQLite` history repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingHistoryRepository for SqliteHistoryRepository {
    async fn record(&self, article_id: i64) -> Result<HistoryEntry, RepositoryError> {
        // Snapshot the title at view time so the entry stays meaningful
        // if the article is renamed later.
        let row = sqlx::query("SELECT title FROM articles WHERE id = ?")
            .bind(article_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?
            .ok_or_else(|| RepositoryError::NotFound(format!("article {article_id}")))?;
        let title: String = row
            .try_get("title")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        let viewed_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO reading_history (article_id, title, viewed_at) VALUES (?, ?, ?)",
        )
        .bind(article_id)
        .bind(&title)
        .bind(viewed_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(HistoryEntry {
            id: result.last_insert_rowid(),
            article_id,
            title,
            viewed_at,
        })
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Page<HistoryEntry>, RepositoryError> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reading_history")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        let rows = sqlx::query(
            "SELECT id, article_id, title, viewed_at FROM reading_history
             ORDER BY viewed_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        let items = rows
            .iter()
            .map(|row| {
                let viewed_at: String = get_column(row, "viewed_at")?;
                Ok(HistoryEntry {
                    id: get_column(row, "id")?,
                    article_id: get_column(row, "article_id")?,
                    title: get_column(row, "title")?,
                    viewed_at: parse_datetime(&viewed_at)?,
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(Page {
            items,
            total: u64::try_from(total.0).unwrap_or(0),
            limit,
            offset,
        })
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM reading_history")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::SqliteArticleRepository;
    use crate::setup::setup_test_database;
    use lectern_core::domain::NewArticle;
    use lectern_core::ports::ArticleRepository;

    async fn repos() -> (SqliteArticleRepository, SqliteHistoryRepository) {
        let pool = setup_test_database().await.unwrap();
        (
            SqliteArticleRepository::new(pool.clone()),
            SqliteHistoryRepository::new(pool),
        )
    }

    async fn seed(articles: &SqliteArticleRepository, title: &str) -> i64 {
        articles
            .insert(NewArticle {
                title: title.to_string(),
                content: "<p>Body.</p>".to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn record_snapshots_the_title() {
        let (articles, history) = repos().await;
        let id = seed(&articles, "A Title").await;

        let entry = history.record(id).await.unwrap();
        assert_eq!(entry.article_id, id);
        assert_eq!(entry.title, "A Title");
    }

    #[tokio::test]
    async fn record_for_missing_article_is_not_found() {
        let (_articles, history) = repos().await;
        assert!(matches!(
            history.record(404).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_paginates_newest_first_with_total() {
        let (articles, history) = repos().await;
        let id = seed(&articles, "Read often").await;
        for _ in 0..5 {
            history.record(id).await.unwrap();
        }

        let first = history.list(2, 0).await.unwrap();
        assert_eq!(first.total, 5);
        assert_eq!(first.items.len(), 2);
        assert!(first.has_more());
        // Newest first: ids descend across the page boundary.
        let second = history.list(2, 2).await.unwrap();
        assert!(first.items[1].id > second.items[0].id);

        let last = history.list(2, 4).await.unwrap();
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_more());
    }

    #[tokio::test]
    async fn clear_empties_the_log() {
        let (articles, history) = repos().await;
        let id = seed(&articles, "Ephemeral").await;
        history.record(id).await.unwrap();

        history.clear().await.unwrap();

        let page = history.list(10, 0).await.unwrap();
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }
}

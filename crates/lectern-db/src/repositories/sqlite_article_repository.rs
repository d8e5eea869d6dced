//! `SQLite` implementation of the `ArticleRepository` trait.
//!
//! Covers articles and their bookmarks. Deleting an article also removes
//! its bookmark and history rows in one transaction, so the repository
//! does not depend on the connection's foreign-key pragma.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use lectern_core::domain::{Article, Bookmark, BookmarkEntry, NewArticle};
use lectern_core::ports::{ArticleRepository, RepositoryError};

use super::row_mappers::{ARTICLE_SELECT_COLUMNS, get_column, parse_datetime, row_to_article};

/// `SQLite` implementation of the `ArticleRepository` trait.
pub struct SqliteArticleRepository {
    pool: SqlitePool,
}

impl SqliteArticleRepository {
    /// Create a new `SQLite` article repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn article_exists(&self, id: i64) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT 1 FROM articles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl ArticleRepository for SqliteArticleRepository {
    async fn insert(&self, article: NewArticle) -> Result<Article, RepositoryError> {
        let added_at = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"INSERT INTO articles (
                title, url, author_name, author_image_url, author_profile_url,
                content, publish_date, added_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&article.title)
        .bind(&article.url)
        .bind(&article.author_name)
        .bind(&article.author_image_url)
        .bind(&article.author_profile_url)
        .bind(&article.content)
        .bind(article.publish_date.map(|d| d.to_rfc3339()))
        .bind(&added_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get(id)
            .await?
            .ok_or_else(|| RepositoryError::Storage(format!("article {id} vanished after insert")))
    }

    async fn get(&self, id: i64) -> Result<Option<Article>, RepositoryError> {
        let query = format!("SELECT {ARTICLE_SELECT_COLUMNS} FROM articles WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        row.as_ref().map(row_to_article).transpose()
    }

    async fn list(&self) -> Result<Vec<Article>, RepositoryError> {
        let query =
            format!("SELECT {ARTICLE_SELECT_COLUMNS} FROM articles ORDER BY added_at DESC, id DESC");

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_article).collect()
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        sqlx::query("DELETE FROM bookmarks WHERE article_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        sqlx::query("DELETE FROM reading_history WHERE article_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("article {id}")));
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn add_bookmark(&self, article_id: i64) -> Result<Bookmark, RepositoryError> {
        if !self.article_exists(article_id).await? {
            return Err(RepositoryError::NotFound(format!("article {article_id}")));
        }

        let existing = sqlx::query("SELECT 1 FROM bookmarks WHERE article_id = ?")
            .bind(article_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        if existing.is_some() {
            return Err(RepositoryError::AlreadyExists(format!(
                "bookmark for article {article_id}"
            )));
        }

        let created_at = Utc::now();
        let result = sqlx::query("INSERT INTO bookmarks (article_id, created_at) VALUES (?, ?)")
            .bind(article_id)
            .bind(created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(Bookmark {
            id: result.last_insert_rowid(),
            article_id,
            created_at,
        })
    }

    async fn remove_bookmark(&self, article_id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE article_id = ?")
            .bind(article_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "bookmark for article {article_id}"
            )));
        }
        Ok(())
    }

    async fn list_bookmarks(&self) -> Result<Vec<BookmarkEntry>, RepositoryError> {
        let query = format!(
            "SELECT b.id AS bookmark_id, b.created_at AS bookmark_created_at, {}
             FROM bookmarks b
             JOIN articles a ON a.id = b.article_id
             ORDER BY b.created_at DESC, b.id DESC",
            ARTICLE_SELECT_COLUMNS
                .split(", ")
                .map(|c| format!("a.{c}"))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let created_at: String = get_column(row, "bookmark_created_at")?;
                Ok(BookmarkEntry {
                    id: row
                        .try_get("bookmark_id")
                        .map_err(|e| RepositoryError::Storage(e.to_string()))?,
                    article: row_to_article(row)?,
                    created_at: parse_datetime(&created_at)?,
                })
            })
            .collect()
    }
}

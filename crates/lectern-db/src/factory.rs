//! Composition utilities for wiring `SQLite`-backed repositories.
//!
//! Focused purely on construction; no domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;

use lectern_core::ports::Repos;

use crate::repositories::{
    SqliteArticleRepository, SqliteHistoryRepository, SqliteSettingsRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
pub struct RepoFactory;

impl RepoFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    /// Returns the `Repos` container from `lectern-core` holding
    /// trait-object-wrapped repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteArticleRepository::new(pool.clone())),
            Arc::new(SqliteHistoryRepository::new(pool.clone())),
            Arc::new(SqliteSettingsRepository::new(pool)),
        )
    }

    /// Create an article repository from a pool.
    pub fn article_repository(pool: SqlitePool) -> Arc<SqliteArticleRepository> {
        Arc::new(SqliteArticleRepository::new(pool))
    }

    /// Create a history repository from a pool.
    pub fn history_repository(pool: SqlitePool) -> Arc<SqliteHistoryRepository> {
        Arc::new(SqliteHistoryRepository::new(pool))
    }

    /// Create a settings repository from a pool.
    pub fn settings_repository(pool: SqlitePool) -> Arc<SqliteSettingsRepository> {
        Arc::new(SqliteSettingsRepository::new(pool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;
    use lectern_core::domain::NewArticle;

    #[tokio::test]
    async fn built_repos_share_one_database() {
        let pool = setup_test_database().await.unwrap();
        let repos = RepoFactory::build_repos(pool);

        let saved = repos
            .articles
            .insert(NewArticle {
                title: "Shared".to_string(),
                content: "<p>Body.</p>".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let entry = repos.history.record(saved.id).await.unwrap();
        assert_eq!(entry.title, "Shared");
    }
}

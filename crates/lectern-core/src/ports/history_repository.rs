//! Reading history repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{HistoryEntry, Page};

/// Repository for the reading-history log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadingHistoryRepository: Send + Sync {
    /// Record that an article was viewed now.
    ///
    /// Returns `NotFound` if the article does not exist.
    async fn record(&self, article_id: i64) -> Result<HistoryEntry, RepositoryError>;

    /// List history entries newest first, with a total count for pagination.
    async fn list(&self, limit: u32, offset: u32) -> Result<Page<HistoryEntry>, RepositoryError>;

    /// Delete all history entries.
    async fn clear(&self) -> Result<(), RepositoryError>;
}

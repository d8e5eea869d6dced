//! `SQLite` implementation of the `SpeechSettingsRepository` trait.
//!
//! Stores the preference group as a JSON blob in a key-value table for
//! flexibility. No schema versioning exists for the blob, so loading
//! parses defensively: an unreadable value is reported as "nothing saved"
//! rather than an error — preferences are never load-bearing.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use lectern_core::ports::{RepositoryError, SpeechSettingsRepository};
use lectern_core::settings::SpeechSettings;

const SETTINGS_KEY: &str = "speech_settings";

/// `SQLite` implementation of the `SpeechSettingsRepository` trait.
pub struct SqliteSettingsRepository {
    pool: SqlitePool,
}

impl SqliteSettingsRepository {
    /// Create a new `SQLite` settings repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpeechSettingsRepository for SqliteSettingsRepository {
    async fn load(&self) -> Result<Option<SpeechSettings>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM settings_kv WHERE key = ?")
            .bind(SETTINGS_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let json: String = row
            .try_get("value")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        match serde_json::from_str(&json) {
            Ok(settings) => Ok(Some(settings)),
            Err(e) => {
                tracing::warn!(%e, "Stored speech settings unreadable; treating as unset");
                Ok(None)
            }
        }
    }

    async fn save(&self, settings: &SpeechSettings) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(settings)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let updated_at = chrono::Utc::now().to_rfc3339();

        sqlx::query("INSERT OR REPLACE INTO settings_kv (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(SETTINGS_KEY)
            .bind(&json)
            .bind(&updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    async fn repo() -> SqliteSettingsRepository {
        SqliteSettingsRepository::new(setup_test_database().await.unwrap())
    }

    #[tokio::test]
    async fn load_is_none_before_first_save() {
        let repo = repo().await;
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let repo = repo().await;

        let settings = SpeechSettings {
            voice: Some("af_sarah".to_string()),
            rate: Some(1.5),
            pitch: Some(0.9),
        };
        repo.save(&settings).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn save_overwrites_the_group() {
        let repo = repo().await;

        repo.save(&SpeechSettings {
            rate: Some(2.0),
            ..Default::default()
        })
        .await
        .unwrap();
        repo.save(&SpeechSettings {
            rate: Some(0.75),
            ..Default::default()
        })
        .await
        .unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.rate, Some(0.75));
    }

    #[tokio::test]
    async fn garbage_blob_degrades_to_unset() {
        let repo = repo().await;

        sqlx::query("INSERT INTO settings_kv (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(SETTINGS_KEY)
            .bind("{not json")
            .bind("2026-01-01T00:00:00Z")
            .execute(&repo.pool)
            .await
            .unwrap();

        assert!(repo.load().await.unwrap().is_none());
    }
}

//! Speech settings service - orchestrates preference operations.

use crate::ports::{CoreError, SpeechSettingsRepository};
use crate::settings::{SpeechSettings, SpeechSettingsUpdate, validate_settings};
use std::sync::Arc;

/// Service for speech preference operations.
pub struct SpeechSettingsService {
    repo: Arc<dyn SpeechSettingsRepository>,
}

impl SpeechSettingsService {
    /// Create a new settings service.
    pub fn new(repo: Arc<dyn SpeechSettingsRepository>) -> Self {
        Self { repo }
    }

    /// Get current settings, falling back to defaults when nothing is saved.
    pub async fn get(&self) -> Result<SpeechSettings, CoreError> {
        Ok(self
            .repo
            .load()
            .await
            .map_err(CoreError::from)?
            .unwrap_or_else(SpeechSettings::with_defaults))
    }

    /// Get the raw saved settings, `None` when nothing has been saved.
    pub async fn load_saved(&self) -> Result<Option<SpeechSettings>, CoreError> {
        self.repo.load().await.map_err(CoreError::from)
    }

    /// Update settings with partial changes.
    ///
    /// Fields absent from the update keep their stored value, so changing a
    /// single control never clobbers the rest of the group.
    pub async fn update(&self, update: SpeechSettingsUpdate) -> Result<SpeechSettings, CoreError> {
        let mut current = self.get().await?;
        current.merge(&update);
        validate_settings(&current)?;
        self.repo.save(&current).await.map_err(CoreError::from)?;
        Ok(current)
    }

    /// Save complete settings (validates first).
    pub async fn save(&self, settings: &SpeechSettings) -> Result<(), CoreError> {
        validate_settings(settings)?;
        self.repo.save(settings).await.map_err(CoreError::from)
    }
}

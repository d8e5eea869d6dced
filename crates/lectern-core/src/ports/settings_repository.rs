//! Speech settings repository trait definition.
//!
//! This port defines the interface for speech preference persistence.
//! Implementations handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::settings::SpeechSettings;

/// Repository for speech preference persistence.
///
/// Stores the preference group as a whole; the implementation handles
/// serialization.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - Works with the domain `SpeechSettings` type directly
/// - Unparseable stored data is reported as `Ok(None)`, not an error — the
///   caller applies defaults (stored preferences are never load-bearing)
#[async_trait]
pub trait SpeechSettingsRepository: Send + Sync {
    /// Load saved speech preferences.
    ///
    /// Returns `None` when nothing has been saved yet or the stored blob
    /// cannot be parsed.
    async fn load(&self) -> Result<Option<SpeechSettings>, RepositoryError>;

    /// Save speech preferences.
    async fn save(&self, settings: &SpeechSettings) -> Result<(), RepositoryError>;
}

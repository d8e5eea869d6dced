//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - No audio/engine implementation details
//! - Traits are minimal and CRUD-focused for repositories

pub mod article_repository;
pub mod event_emitter;
pub mod history_repository;
pub mod settings_repository;
pub mod speech;

use std::sync::Arc;
use thiserror::Error;

// Re-export port traits for convenience
pub use article_repository::ArticleRepository;
pub use event_emitter::{AppEventEmitter, NoopEmitter};
pub use history_repository::ReadingHistoryRepository;
pub use settings_repository::SpeechSettingsRepository;
pub use speech::{SpeechPort, SpeechPortError, SpeechStatusDto, VoiceDto};

/// Container for all repository trait objects.
///
/// Provides a consistent way to wire repositories across adapters without
/// coupling them to concrete implementations. It lives in `lectern-core` so
/// services can accept it without depending on `lectern-db`.
#[derive(Clone)]
pub struct Repos {
    /// Article repository (articles + bookmarks).
    pub articles: Arc<dyn ArticleRepository>,
    /// Reading history repository.
    pub history: Arc<dyn ReadingHistoryRepository>,
    /// Speech settings repository.
    pub settings: Arc<dyn SpeechSettingsRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        history: Arc<dyn ReadingHistoryRepository>,
        settings: Arc<dyn SpeechSettingsRepository>,
    ) -> Self {
        Self {
            articles,
            history,
            settings,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// Abstracts away storage implementation details (e.g. sqlx errors) and
/// provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g. foreign key, unique constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain. Adapters
/// map this to their own error types (CLI exit codes, HTTP status codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

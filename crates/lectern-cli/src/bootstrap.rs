//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Database pool and repositories (via lectern-db)
//! - Library and settings services (via lectern-core)
//! - Speech stack: rodio sink, Kokoro engine, speech service (via
//!   lectern-voice), built lazily so non-speech commands never touch the
//!   audio device or model files.
//!
//! Command handlers receive the composed `CliContext` and delegate to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use lectern_core::paths::database_path;
use lectern_core::ports::{AppEventEmitter, Repos};
use lectern_core::services::{LibraryService, SpeechSettingsService};
use lectern_db::{RepoFactory, setup_database};
use lectern_voice::{RodioSink, SpeechService};

use crate::emitter::ConsoleEmitter;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path to the SQLite database file.
    pub db_path: PathBuf,
}

impl CliConfig {
    /// Create config with default paths.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            db_path: database_path()?,
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// All repositories behind their port traits.
    pub repos: Repos,
    /// The saved-article library facade.
    pub library: LibraryService,
    /// Event emitter shared by all services.
    pub emitter: Arc<dyn AppEventEmitter>,
}

impl CliContext {
    /// Access the library service.
    pub fn library(&self) -> &LibraryService {
        &self.library
    }

    /// Build a settings service over the shared repository.
    pub fn settings(&self) -> SpeechSettingsService {
        SpeechSettingsService::new(Arc::clone(&self.repos.settings))
    }

    /// Build the speech stack.
    ///
    /// The audio device is acquired lazily inside the sink on first
    /// playback; the Kokoro engine is loaded here when its model bundle is
    /// present. Without the bundle the service still works — the voice
    /// catalog is just empty and playback degrades to a no-op.
    pub async fn speech(&self) -> Result<Arc<SpeechService>> {
        let sink = Arc::new(RodioSink::new());
        let service = Arc::new(
            SpeechService::new(
                sink,
                Arc::clone(&self.repos.settings),
                Arc::clone(&self.emitter),
            )
            .await,
        );

        if lectern_voice::models::is_tts_downloaded()? {
            let model_dir = lectern_voice::models::tts_bundle_dir()?;
            let engine = lectern_voice::KokoroEngine::load(&model_dir)?;
            service.install_engine(Box::new(engine)).await;
        }

        Ok(service)
    }
}

/// Bootstrap the CLI application.
///
/// Creates the database pool with full schema setup, builds the
/// repositories, and assembles the services around them.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let pool = setup_database(&config.db_path).await?;
    let repos = RepoFactory::build_repos(pool);

    let emitter: Arc<dyn AppEventEmitter> = Arc::new(ConsoleEmitter::new());

    let library = LibraryService::new(
        Arc::clone(&repos.articles),
        Arc::clone(&repos.history),
        Arc::clone(&emitter),
    );

    Ok(CliContext {
        repos,
        library,
        emitter,
    })
}

/// Bootstrap with explicit repositories (for testing).
pub fn bootstrap_with(repos: Repos, emitter: Arc<dyn AppEventEmitter>) -> CliContext {
    let library = LibraryService::new(
        Arc::clone(&repos.articles),
        Arc::clone(&repos.history),
        Arc::clone(&emitter),
    );
    CliContext {
        repos,
        library,
        emitter,
    }
}

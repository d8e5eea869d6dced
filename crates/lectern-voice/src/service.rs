//! `SpeechService` — the adapter that implements `SpeechPort`.
//!
//! This module is the single place where `lectern-voice` native types are
//! converted to the transport-agnostic DTOs defined in `lectern-core`.
//! Nothing outside this file should need `Voice`, `VoiceCatalog`, or
//! engine types.
//!
//! # Locking discipline
//!
//! The engine sits behind a `tokio::sync::RwLock` and the read guard is
//! held across synthesis awaits (synthesis never takes the lock itself).
//! Catalog and selection use std locks accessed only in sync context —
//! never across an `.await` point.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use lectern_core::events::AppEvent;
use lectern_core::ports::{
    AppEventEmitter, SpeechPort, SpeechPortError, SpeechSettingsRepository, SpeechStatusDto,
    VoiceDto,
};
use lectern_core::services::SpeechSettingsService;
use lectern_core::settings::{DEFAULT_PITCH, DEFAULT_RATE, SpeechSettingsUpdate};
use lectern_core::CoreError;

use crate::catalog::{VoiceCatalog, VoiceRestoration};
use crate::controller::{PlaybackController, UtteranceOptions, phase_label};
use crate::engine::{TtsEngine, Voice};
use crate::error::SpeechError;
use crate::playback::AudioSink;

/// In-memory snapshot of the user's speech controls.
///
/// Mirrors what is persisted; reads never touch storage.
struct Selection {
    voice: Option<String>,
    rate: f32,
    pitch: f32,
}

/// Implements [`SpeechPort`] over an engine, a catalog, and the playback
/// controller.
pub struct SpeechService {
    engine: RwLock<Option<Box<dyn TtsEngine>>>,
    catalog: std::sync::RwLock<VoiceCatalog>,
    controller: PlaybackController,
    settings: SpeechSettingsService,
    selection: std::sync::RwLock<Selection>,
    emitter: Arc<dyn AppEventEmitter>,
}

impl SpeechService {
    /// Create a service with no engine loaded.
    ///
    /// Saved rate/pitch preferences are restored immediately; the saved
    /// voice is restored once an engine provides a catalog. Storage
    /// failures degrade to defaults with a logged warning.
    pub async fn new(
        sink: Arc<dyn AudioSink>,
        settings_repo: Arc<dyn SpeechSettingsRepository>,
        emitter: Arc<dyn AppEventEmitter>,
    ) -> Self {
        let settings = SpeechSettingsService::new(settings_repo);

        let (rate, pitch) = match settings.get().await {
            Ok(saved) => (saved.effective_rate(), saved.effective_pitch()),
            Err(e) => {
                tracing::warn!(%e, "Failed to load speech preferences; using defaults");
                (DEFAULT_RATE, DEFAULT_PITCH)
            }
        };

        Self {
            engine: RwLock::new(None),
            catalog: std::sync::RwLock::new(VoiceCatalog::empty()),
            controller: PlaybackController::new(sink, Arc::clone(&emitter)),
            settings,
            selection: std::sync::RwLock::new(Selection {
                voice: None,
                rate,
                pitch,
            }),
            emitter,
        }
    }

    /// Install a loaded engine and refresh the voice catalog from it.
    ///
    /// This is the "platform signals readiness" moment: the catalog goes
    /// from (possibly) empty to populated, and the saved voice preference
    /// is resolved against it.
    pub async fn install_engine(&self, engine: Box<dyn TtsEngine>) {
        let voices = engine.voices();
        *self.engine.write().await = Some(engine);
        self.catalog.write().unwrap().refresh_from(voices);
        self.restore_voice().await;
    }

    /// Whether an engine has been installed.
    pub async fn engine_loaded(&self) -> bool {
        self.engine.read().await.is_some()
    }

    /// Re-resolve the saved voice preference against the live catalog.
    ///
    /// A saved voice that no longer exists falls back to the first
    /// available voice with a user-visible notice; an empty catalog leaves
    /// no voice selected. Never an error — a stale preference must not
    /// block playback.
    async fn restore_voice(&self) {
        let saved = match self.settings.get().await {
            Ok(s) => s.voice,
            Err(e) => {
                tracing::warn!(%e, "Failed to load saved voice; treating as unset");
                None
            }
        };

        let restoration = {
            let catalog = self.catalog.read().unwrap();
            catalog.restore(saved.as_deref())
        };

        match restoration {
            VoiceRestoration::Selected(id) => {
                tracing::debug!(voice = %id, "Voice selected");
                self.selection.write().unwrap().voice = Some(id);
            }
            VoiceRestoration::Fallback {
                requested,
                selected,
            } => {
                tracing::warn!(%requested, %selected, "Saved voice unavailable; falling back");
                self.emitter.emit(AppEvent::Notice {
                    message: format!(
                        "Saved voice \"{requested}\" is not available. Using \"{selected}\"."
                    ),
                });
                self.selection.write().unwrap().voice = Some(selected);
            }
            VoiceRestoration::NoVoices => {
                tracing::warn!("Voice catalog is empty; no voice selected");
                self.selection.write().unwrap().voice = None;
            }
        }
    }

    /// Snapshot the current utterance options, or `None` when no voice is
    /// selected.
    fn utterance_options(&self) -> Option<UtteranceOptions> {
        let selection = self.selection.read().unwrap();
        selection.voice.clone().map(|voice| UtteranceOptions {
            voice,
            rate: selection.rate,
            pitch: selection.pitch,
        })
    }

    fn voice_dtos(&self) -> Vec<VoiceDto> {
        self.catalog
            .read()
            .unwrap()
            .voices()
            .iter()
            .map(to_dto)
            .collect()
    }
}

#[async_trait]
impl SpeechPort for SpeechService {
    async fn status(&self) -> Result<SpeechStatusDto, SpeechPortError> {
        let selection = {
            let s = self.selection.read().unwrap();
            (s.voice.clone(), s.rate, s.pitch)
        };

        Ok(SpeechStatusDto {
            engine_loaded: self.engine_loaded().await,
            is_playing: self.controller.is_playing(),
            state: phase_label(self.controller.phase()).to_string(),
            selected_voice: selection.0,
            rate: selection.1,
            pitch: selection.2,
        })
    }

    async fn voices(&self) -> Result<Vec<VoiceDto>, SpeechPortError> {
        Ok(self.voice_dtos())
    }

    async fn grouped_voices(
        &self,
    ) -> Result<BTreeMap<String, Vec<VoiceDto>>, SpeechPortError> {
        let grouped = self.catalog.read().unwrap().grouped();
        Ok(grouped
            .into_iter()
            .map(|(lang, voices)| (lang, voices.iter().map(to_dto).collect()))
            .collect())
    }

    async fn play(&self, text: &str) -> Result<(), SpeechPortError> {
        // No selected voice (empty catalog): play requests are no-ops.
        let Some(opts) = self.utterance_options() else {
            tracing::debug!("Play requested with no voice selected; ignoring");
            return Ok(());
        };

        let guard = self.engine.read().await;
        let Some(engine) = guard.as_deref() else {
            return Err(SpeechPortError::EngineNotLoaded);
        };

        match self.controller.play(engine, text, &opts).await {
            Ok(()) => Ok(()),
            // Synthesis failures were already surfaced as a SpeechError
            // event and the controller is back at idle; they do not
            // propagate out of the port.
            Err(SpeechError::SynthesisError(e)) => {
                tracing::warn!(error = %e, "Synthesis failed; playback aborted");
                Ok(())
            }
            Err(e) => Err(to_port_err(e)),
        }
    }

    async fn stop(&self) -> Result<(), SpeechPortError> {
        self.controller.stop();
        Ok(())
    }

    async fn toggle(&self, text: &str) -> Result<(), SpeechPortError> {
        // Decide from the live state, not a caller-side snapshot.
        if self.controller.is_playing() {
            self.controller.stop();
            Ok(())
        } else {
            self.play(text).await
        }
    }

    async fn set_voice(&self, voice_id: &str) -> Result<(), SpeechPortError> {
        if !self.catalog.read().unwrap().contains(voice_id) {
            return Err(SpeechPortError::NotFound(format!("voice {voice_id}")));
        }

        self.settings
            .update(SpeechSettingsUpdate {
                voice: Some(Some(voice_id.to_string())),
                ..Default::default()
            })
            .await
            .map_err(core_to_port_err)?;

        self.selection.write().unwrap().voice = Some(voice_id.to_string());
        Ok(())
    }

    async fn set_rate(&self, rate: f32) -> Result<(), SpeechPortError> {
        self.settings
            .update(SpeechSettingsUpdate {
                rate: Some(Some(rate)),
                ..Default::default()
            })
            .await
            .map_err(core_to_port_err)?;

        // Takes effect from the next play request; audio already in
        // flight keeps the rate it was synthesized with.
        self.selection.write().unwrap().rate = rate;
        Ok(())
    }

    async fn set_pitch(&self, pitch: f32) -> Result<(), SpeechPortError> {
        self.settings
            .update(SpeechSettingsUpdate {
                pitch: Some(Some(pitch)),
                ..Default::default()
            })
            .await
            .map_err(core_to_port_err)?;

        self.selection.write().unwrap().pitch = pitch;
        Ok(())
    }
}

fn to_dto(voice: &Voice) -> VoiceDto {
    VoiceDto {
        id: voice.id.clone(),
        name: voice.name.clone(),
        language: voice.language.clone(),
    }
}

/// Convert a `SpeechError` into its closest `SpeechPortError` equivalent.
///
/// This conversion lives here, in `lectern-voice`, so that `lectern-core`
/// never needs to import engine types. The dependency arrow stays one-way.
fn to_port_err(e: SpeechError) -> SpeechPortError {
    match e {
        SpeechError::EngineNotLoaded => SpeechPortError::EngineNotLoaded,
        SpeechError::ModelNotFound(p) => SpeechPortError::NotFound(p.display().to_string()),
        SpeechError::UnknownVoice(v) => SpeechPortError::NotFound(format!("voice {v}")),
        SpeechError::LoadError(s) => SpeechPortError::LoadError(s),
        SpeechError::DownloadError { name, source } => {
            SpeechPortError::DownloadError(format!("{name}: {source}"))
        }
        other => SpeechPortError::Internal(other.to_string()),
    }
}

fn core_to_port_err(e: CoreError) -> SpeechPortError {
    match e {
        CoreError::Settings(err) => SpeechPortError::InvalidSetting(err.to_string()),
        other => SpeechPortError::Internal(other.to_string()),
    }
}

//! Speech port — trait abstraction for read-aloud operations.
//!
//! # Design Rules
//!
//! - DTOs here are transport-agnostic wire shapes (no `lectern-voice` types).
//! - Conversion from `lectern-voice` native types happens inside
//!   `lectern-voice`, never here. This keeps `lectern-core` free of any
//!   dependency on the engine stack.
//! - `SpeechPort` is the only surface an adapter needs in order to drive
//!   read-aloud playback and its configuration.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── DTOs ─────────────────────────────────────────────────────────────────────

/// Information about a single speech voice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDto {
    /// Voice identifier used in API calls.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// BCP-47-style language tag (e.g. `"en-US"`).
    pub language: String,
}

/// Current state of the read-aloud controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechStatusDto {
    /// Whether a speech engine is loaded.
    pub engine_loaded: bool,
    /// Whether playback is active right now.
    pub is_playing: bool,
    /// State machine label (`"idle"` | `"playing"`).
    pub state: String,
    /// Currently selected voice ID, if any.
    pub selected_voice: Option<String>,
    /// Current speech rate multiplier.
    pub rate: f32,
    /// Current speech pitch multiplier.
    pub pitch: f32,
}

// ── Error ─────────────────────────────────────────────────────────────────────

/// Errors returned by `SpeechPort` operations.
#[derive(Debug, Error)]
pub enum SpeechPortError {
    /// No speech engine has been loaded yet.
    #[error("Speech engine not loaded — download the voice model first")]
    EngineNotLoaded,

    /// A requested resource (voice, model) was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The engine failed to load (model file corrupt, incompatible format).
    #[error("Load error: {0}")]
    LoadError(String),

    /// The voice model download failed (network, disk, archive extraction).
    #[error("Download error: {0}")]
    DownloadError(String),

    /// A preference value was rejected.
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// Unexpected internal error.
    #[error("Internal speech error: {0}")]
    Internal(String),
}

// ── Port trait ────────────────────────────────────────────────────────────────

/// Port trait for read-aloud operations.
///
/// Implemented by `SpeechService` in `lectern-voice`; consumed by adapters.
///
/// Playback follows the one-active-session rule: a `play` while audio is
/// already playing stops the old session first. `toggle` inspects the live
/// state at the moment of the call.
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Return the current controller status.
    async fn status(&self) -> Result<SpeechStatusDto, SpeechPortError>;

    /// List available voices in catalog order.
    async fn voices(&self) -> Result<Vec<VoiceDto>, SpeechPortError>;

    /// List available voices grouped by language tag.
    async fn grouped_voices(&self)
    -> Result<BTreeMap<String, Vec<VoiceDto>>, SpeechPortError>;

    /// Start reading the given text aloud, superseding any active playback.
    ///
    /// A no-op when no voice is selected (empty catalog).
    async fn play(&self, text: &str) -> Result<(), SpeechPortError>;

    /// Stop any active playback. A no-op when idle.
    async fn stop(&self) -> Result<(), SpeechPortError>;

    /// Stop if playing, otherwise start reading the given text.
    async fn toggle(&self, text: &str) -> Result<(), SpeechPortError>;

    /// Select a voice by ID and persist the choice.
    async fn set_voice(&self, voice_id: &str) -> Result<(), SpeechPortError>;

    /// Set the speech rate and persist it. Does not affect audio in flight.
    async fn set_rate(&self, rate: f32) -> Result<(), SpeechPortError>;

    /// Set the speech pitch and persist it. Does not affect audio in flight.
    async fn set_pitch(&self, pitch: f32) -> Result<(), SpeechPortError>;
}

//! Speech engine boundary — the engine-agnostic [`TtsEngine`] trait.
//!
//! The playback controller and service operate on `dyn TtsEngine` so that
//! the concrete backend (sherpa-onnx Kokoro, mocks in tests) can be swapped
//! without touching playback logic. Synthesis is parameterized per call with
//! the utterance's voice and rate; pitch is not an engine concern — it is
//! applied at the output stage.

#[cfg(feature = "sherpa")]
pub mod kokoro;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SpeechError;

/// Audio produced by one synthesis request.
#[derive(Debug, Clone)]
pub struct TtsAudio {
    /// PCM f32 samples, mono.
    pub samples: Vec<f32>,

    /// Sample rate of the audio (e.g. 24 000 Hz for Kokoro).
    pub sample_rate: u32,

    /// Duration of the audio.
    pub duration: Duration,
}

/// A synthetic speaker profile exposed by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    /// Voice identifier (used in API calls, e.g. `"af_sarah"`).
    pub id: String,

    /// Human-readable display name.
    pub name: String,

    /// BCP-47-style language tag (e.g. `"en-US"`).
    pub language: String,
}

/// Backend-agnostic text-to-speech engine.
///
/// Implementations must be `Send + Sync` so the service can hold them across
/// `.await` points behind a `tokio::sync::RwLock`.
#[async_trait]
pub trait TtsEngine: Send + Sync {
    /// Synthesize `text` with the given voice at the given rate multiplier.
    ///
    /// Empty input yields an empty buffer, not an error.
    async fn synthesize(&self, text: &str, voice: &str, rate: f32)
    -> Result<TtsAudio, SpeechError>;

    /// Nominal output sample rate of this engine.
    fn sample_rate(&self) -> u32;

    /// List the voices this engine exposes, in catalog order.
    fn voices(&self) -> Vec<Voice>;
}

/// Shorthand constructor for catalog entries.
#[must_use]
pub fn voice(id: &str, name: &str, language: &str) -> Voice {
    Voice {
        id: id.to_string(),
        name: name.to_string(),
        language: language.to_string(),
    }
}

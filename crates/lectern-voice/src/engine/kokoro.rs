//! Sherpa-ONNX Kokoro TTS backend — implements [`TtsEngine`] via `sherpa-rs`.
//!
//! Wraps `sherpa_rs::tts::KokoroTts` behind the engine-agnostic trait. The
//! sherpa-rs `create` method requires `&mut self` while our trait uses
//! `&self`, so the inner engine sits in an `Arc<Mutex<…>>`. Inference is
//! CPU-bound and dispatched via `tokio::task::spawn_blocking` so Tokio
//! worker threads are never stalled.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sherpa_rs::tts::{KokoroTts, KokoroTtsConfig};

use crate::engine::{TtsAudio, TtsEngine, Voice, voice};
use crate::error::SpeechError;

/// Kokoro output sample rate (24 kHz).
pub const KOKORO_SAMPLE_RATE: u32 = 24_000;

/// Rate multipliers the engine accepts; values outside are clamped.
const ENGINE_RATE_RANGE: (f32, f32) = (0.5, 3.0);

/// Sherpa-ONNX Kokoro TTS engine.
pub struct KokoroEngine {
    /// The loaded sherpa-onnx TTS engine.
    ///
    /// Wrapped in `Arc<Mutex<…>>` so it can be moved into
    /// `tokio::task::spawn_blocking` closures while the outer `&self` stays
    /// alive. `KokoroTts` is `Send + Sync` per sherpa-rs's own impls.
    inner: Arc<Mutex<KokoroTts>>,
}

impl KokoroEngine {
    /// Load the Kokoro model from a bundle directory.
    ///
    /// The directory must contain `model.onnx`, `voices.bin`, `tokens.txt`,
    /// and the `espeak-ng-data/` lexicon directory, as extracted from the
    /// sherpa-onnx release archive.
    pub fn load(model_dir: &Path) -> Result<Self, SpeechError> {
        if !model_dir.exists() {
            return Err(SpeechError::ModelNotFound(model_dir.to_path_buf()));
        }

        let model_path = model_dir.join("model.onnx");
        let voices_path = model_dir.join("voices.bin");
        let tokens_path = model_dir.join("tokens.txt");
        let data_dir = model_dir.join("espeak-ng-data");

        for path in [&model_path, &voices_path, &tokens_path] {
            if !path.exists() {
                return Err(SpeechError::ModelNotFound(path.clone()));
            }
        }

        tracing::info!(dir = %model_dir.display(), "Loading Kokoro TTS model");

        let config = KokoroTtsConfig {
            model: path_to_string(&model_path)?,
            voices: path_to_string(&voices_path)?,
            tokens: path_to_string(&tokens_path)?,
            data_dir: path_to_string(&data_dir)?,
            ..Default::default()
        };

        let inner = KokoroTts::new(config);

        tracing::info!("Kokoro TTS model loaded");

        Ok(Self {
            inner: Arc::new(Mutex::new(inner)),
        })
    }
}

#[async_trait::async_trait]
impl TtsEngine for KokoroEngine {
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        rate: f32,
    ) -> Result<TtsAudio, SpeechError> {
        if text.trim().is_empty() {
            return Ok(TtsAudio {
                samples: Vec::new(),
                sample_rate: KOKORO_SAMPLE_RATE,
                duration: Duration::ZERO,
            });
        }

        let sid = speaker_id(voice).ok_or_else(|| SpeechError::UnknownVoice(voice.to_string()))?;
        let speed = rate.clamp(ENGINE_RATE_RANGE.0, ENGINE_RATE_RANGE.1);

        tracing::debug!(text_len = text.len(), voice, sid, speed, "Synthesizing speech");

        let engine = Arc::clone(&self.inner);
        let text = text.to_string();

        let audio = tokio::task::spawn_blocking(move || {
            engine
                .lock()
                .map_err(|e| SpeechError::SynthesisError(format!("TTS engine lock poisoned: {e}")))
                .and_then(|mut guard| {
                    guard
                        .create(&text, sid, speed)
                        .map_err(|e| SpeechError::SynthesisError(format!("{e}")))
                })
        })
        .await
        .map_err(|e| SpeechError::SynthesisError(format!("spawn_blocking join error: {e}")))??;

        let sample_rate = audio.sample_rate;
        let samples = audio.samples;

        #[allow(clippy::cast_precision_loss)]
        let duration = if sample_rate > 0 {
            Duration::from_secs_f64(samples.len() as f64 / f64::from(sample_rate))
        } else {
            Duration::ZERO
        };

        tracing::debug!(
            samples = samples.len(),
            sample_rate,
            duration_ms = duration.as_millis(),
            "Speech synthesized"
        );

        Ok(TtsAudio {
            samples,
            sample_rate,
            duration,
        })
    }

    fn sample_rate(&self) -> u32 {
        KOKORO_SAMPLE_RATE
    }

    fn voices(&self) -> Vec<Voice> {
        kokoro_voices()
    }
}

// ── Voice catalogue ────────────────────────────────────────────────
//
// The Kokoro v0.19 English bundle ships 11 voice styles. Speaker IDs are
// indices into the packed `voices.bin` style matrix, as declared in the
// ONNX model's `speaker2id` metadata.

/// Map a voice ID (e.g. `"af_sarah"`) to its sherpa-onnx speaker ID.
fn speaker_id(voice_id: &str) -> Option<i32> {
    match voice_id {
        "af" => Some(0),
        "af_bella" => Some(1),
        "af_nicole" => Some(2),
        "af_sarah" => Some(3),
        "af_sky" => Some(4),
        "am_adam" => Some(5),
        "am_michael" => Some(6),
        "bf_emma" => Some(7),
        "bf_isabella" => Some(8),
        "bm_george" => Some(9),
        "bm_lewis" => Some(10),
        _ => None,
    }
}

/// List the Kokoro v0.19 English voices with metadata.
///
/// Free function so it can be consulted without a loaded engine (e.g. to
/// show the catalog before the model bundle has been downloaded).
#[must_use]
pub fn kokoro_voices() -> Vec<Voice> {
    vec![
        // American English
        voice("af", "Default", "en-US"),
        voice("af_bella", "Bella", "en-US"),
        voice("af_nicole", "Nicole", "en-US"),
        voice("af_sarah", "Sarah", "en-US"),
        voice("af_sky", "Sky", "en-US"),
        voice("am_adam", "Adam", "en-US"),
        voice("am_michael", "Michael", "en-US"),
        // British English
        voice("bf_emma", "Emma", "en-GB"),
        voice("bf_isabella", "Isabella", "en-GB"),
        voice("bm_george", "George", "en-GB"),
        voice("bm_lewis", "Lewis", "en-GB"),
    ]
}

/// Convert a path to a string, rejecting invalid UTF-8.
fn path_to_string(path: &Path) -> Result<String, SpeechError> {
    path.to_str()
        .map(ToString::to_string)
        .ok_or_else(|| SpeechError::LoadError(format!("Invalid path: {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_voices_resolve_to_speaker_ids() {
        assert_eq!(speaker_id("af_sarah"), Some(3));
        assert_eq!(speaker_id("bm_lewis"), Some(10));
        assert_eq!(speaker_id("nope"), None);
    }

    #[test]
    fn catalog_ids_all_have_speaker_ids() {
        for v in kokoro_voices() {
            assert!(speaker_id(&v.id).is_some(), "missing speaker id for {}", v.id);
        }
    }

    #[test]
    fn load_rejects_missing_directory() {
        let dir = std::env::temp_dir().join("lectern-no-such-model");
        let err = KokoroEngine::load(&dir).unwrap_err();
        assert!(matches!(err, SpeechError::ModelNotFound(_)));
    }
}

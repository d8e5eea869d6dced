//! Speech preference types and validation.
//!
//! These are pure domain types with no infrastructure dependencies. The
//! persisted shape is a single named group — voice, rate, pitch — stored as
//! one JSON blob by the settings repository.

use serde::{Deserialize, Serialize};

/// Default speech rate multiplier.
pub const DEFAULT_RATE: f32 = 1.0;

/// Default speech pitch multiplier.
pub const DEFAULT_PITCH: f32 = 1.0;

/// Inclusive bounds for the speech rate multiplier.
pub const RATE_RANGE: (f32, f32) = (0.5, 3.0);

/// Inclusive bounds for the speech pitch multiplier.
pub const PITCH_RANGE: (f32, f32) = (0.5, 2.0);

/// Persisted speech preferences.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SpeechSettings {
    /// Identifier of the preferred voice (e.g. `"af_sarah"`).
    pub voice: Option<String>,

    /// Speech rate multiplier (1.0 = normal).
    pub rate: Option<f32>,

    /// Speech pitch multiplier (1.0 = normal).
    pub pitch: Option<f32>,
}

impl SpeechSettings {
    /// Create settings with sensible defaults.
    ///
    /// No voice is preselected — voice restoration happens against the live
    /// catalog, which may be empty until an engine is loaded.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            voice: None,
            rate: Some(DEFAULT_RATE),
            pitch: Some(DEFAULT_PITCH),
        }
    }

    /// Get the effective rate (with default fallback).
    #[must_use]
    pub fn effective_rate(&self) -> f32 {
        self.rate.unwrap_or(DEFAULT_RATE)
    }

    /// Get the effective pitch (with default fallback).
    #[must_use]
    pub fn effective_pitch(&self) -> f32 {
        self.pitch.unwrap_or(DEFAULT_PITCH)
    }

    /// Merge a partial update into this settings group, only touching fields
    /// that are `Some`. Untouched fields keep their stored value.
    pub fn merge(&mut self, other: &SpeechSettingsUpdate) {
        if let Some(ref voice) = other.voice {
            self.voice.clone_from(voice);
        }
        if let Some(ref rate) = other.rate {
            self.rate = *rate;
        }
        if let Some(ref pitch) = other.pitch {
            self.pitch = *pitch;
        }
    }
}

/// Partial speech settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = set field to None/null
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechSettingsUpdate {
    pub voice: Option<Option<String>>,
    pub rate: Option<Option<f32>>,
    pub pitch: Option<Option<f32>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Speech rate must be between {} and {}, got {0}", RATE_RANGE.0, RATE_RANGE.1)]
    InvalidRate(f32),

    #[error("Speech pitch must be between {} and {}, got {0}", PITCH_RANGE.0, PITCH_RANGE.1)]
    InvalidPitch(f32),

    #[error("Voice identifier cannot be empty")]
    EmptyVoice,
}

/// Validate settings values.
pub fn validate_settings(settings: &SpeechSettings) -> Result<(), SettingsError> {
    if let Some(rate) = settings.rate {
        if !(RATE_RANGE.0..=RATE_RANGE.1).contains(&rate) {
            return Err(SettingsError::InvalidRate(rate));
        }
    }

    if let Some(pitch) = settings.pitch {
        if !(PITCH_RANGE.0..=PITCH_RANGE.1).contains(&pitch) {
            return Err(SettingsError::InvalidPitch(pitch));
        }
    }

    if settings.voice.as_ref().is_some_and(|v| v.trim().is_empty()) {
        return Err(SettingsError::EmptyVoice);
    }

    Ok(())
}

//! Speech pipeline error types.

use std::path::PathBuf;

/// Errors that can occur in the read-aloud pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// No TTS engine has been loaded.
    #[error("TTS engine not loaded — download the voice model first")]
    EngineNotLoaded,

    /// Model files not found at the expected path.
    #[error("Voice model not found at {0}")]
    ModelNotFound(PathBuf),

    /// Failed to load the TTS model.
    #[error("Failed to load TTS model: {0}")]
    LoadError(String),

    /// The requested voice does not exist in the catalog.
    #[error("Unknown voice: {0}")]
    UnknownVoice(String),

    /// Failed to synthesize speech.
    #[error("Speech synthesis failed: {0}")]
    SynthesisError(String),

    /// Failed to open the audio output stream.
    #[error("Failed to open audio output stream: {0}")]
    OutputStreamError(String),

    /// The dedicated audio thread is no longer running.
    #[error("Audio thread terminated unexpectedly")]
    AudioThreadDied,

    /// Failed to download the voice model bundle.
    #[error("Failed to download voice model '{name}': {source}")]
    DownloadError { name: String, source: anyhow::Error },

    /// IO error (model files, data directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

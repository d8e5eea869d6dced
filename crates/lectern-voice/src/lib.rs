#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

// reqwest is exercised by the model download path, which only exists with
// the sherpa backend enabled.
#[cfg(not(feature = "sherpa"))]
use reqwest as _;

// Silence unused dev-dependency warnings for shared test tooling
#[cfg(test)]
use tokio_test as _;

pub mod audio_thread;
pub mod catalog;
pub mod controller;
pub mod engine;
pub mod error;
pub mod models;
pub mod playback;
pub mod service;
pub mod text;

// Re-export key types for convenience
pub use audio_thread::RodioSink;
pub use catalog::{VoiceCatalog, VoiceRestoration};
pub use controller::{Phase, PlaybackController, UtteranceOptions};
pub use engine::{TtsAudio, TtsEngine, Voice};
pub use error::SpeechError;
pub use playback::{AudioSink, PlaybackDoneCallback};
pub use service::SpeechService;

#[cfg(feature = "sherpa")]
pub use engine::kokoro::{KOKORO_SAMPLE_RATE, KokoroEngine, kokoro_voices};

//! Integration tests for `SpeechService` against the `SpeechPort` contract.
//!
//! Exercises preference restoration, the no-voice degradation path, and
//! persistence round-trips using an in-memory settings repository and a
//! mock engine/sink.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lectern_core::events::AppEvent;
use lectern_core::ports::{AppEventEmitter, RepositoryError, SpeechPort, SpeechSettingsRepository};
use lectern_core::settings::SpeechSettings;
use lectern_voice::{
    AudioSink, PlaybackDoneCallback, SpeechError, SpeechService, TtsAudio, TtsEngine, Voice,
};

// ── Mocks ──────────────────────────────────────────────────────────

#[derive(Default)]
struct MemorySettingsRepo {
    settings: Mutex<Option<SpeechSettings>>,
}

#[async_trait]
impl SpeechSettingsRepository for MemorySettingsRepo {
    async fn load(&self) -> Result<Option<SpeechSettings>, RepositoryError> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save(&self, settings: &SpeechSettings) -> Result<(), RepositoryError> {
        *self.settings.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}

#[derive(Default)]
struct CountingSink {
    starts: Mutex<u32>,
}

impl CountingSink {
    fn start_count(&self) -> u32 {
        *self.starts.lock().unwrap()
    }
}

impl AudioSink for CountingSink {
    fn start(&self) -> Result<(), SpeechError> {
        *self.starts.lock().unwrap() += 1;
        Ok(())
    }

    fn append(&self, _samples: Vec<f32>, _sample_rate: u32) -> Result<(), SpeechError> {
        Ok(())
    }

    fn finish(&self, _on_done: PlaybackDoneCallback) {}

    fn stop(&self) {}

    fn is_playing(&self) -> bool {
        false
    }
}

struct FixedVoicesEngine {
    voices: Vec<Voice>,
}

impl FixedVoicesEngine {
    fn new(ids: &[&str]) -> Self {
        Self {
            voices: ids
                .iter()
                .map(|id| Voice {
                    id: (*id).to_string(),
                    name: (*id).to_string(),
                    language: "en-US".to_string(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl TtsEngine for FixedVoicesEngine {
    async fn synthesize(
        &self,
        text: &str,
        _voice: &str,
        _rate: f32,
    ) -> Result<TtsAudio, SpeechError> {
        Ok(TtsAudio {
            samples: vec![0.0; text.len().max(1)],
            sample_rate: 24_000,
            duration: Duration::from_millis(10),
        })
    }

    fn sample_rate(&self) -> u32 {
        24_000
    }

    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }
}

#[derive(Clone, Default)]
struct RecordingEmitter {
    events: Arc<Mutex<Vec<AppEvent>>>,
}

impl RecordingEmitter {
    fn events(&self) -> Vec<AppEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AppEventEmitter for RecordingEmitter {
    fn emit(&self, event: AppEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(self.clone())
    }
}

// ── Helpers ────────────────────────────────────────────────────────

async fn service_with(
    repo: Arc<MemorySettingsRepo>,
) -> (Arc<CountingSink>, RecordingEmitter, SpeechService) {
    let sink = Arc::new(CountingSink::default());
    let emitter = RecordingEmitter::default();
    let service = SpeechService::new(
        Arc::clone(&sink) as Arc<dyn AudioSink>,
        repo,
        Arc::new(emitter.clone()),
    )
    .await;
    (sink, emitter, service)
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn play_without_a_voice_is_a_noop() {
    let (sink, _emitter, service) = service_with(Arc::default()).await;

    // No engine installed, so the catalog is empty and no voice is
    // selected. Play must neither start a session nor error.
    service.play("Hello world").await.unwrap();

    let status = service.status().await.unwrap();
    assert!(!status.is_playing);
    assert_eq!(status.selected_voice, None);
    assert_eq!(sink.start_count(), 0);
}

#[tokio::test]
async fn stop_when_idle_does_not_error() {
    let (_sink, _emitter, service) = service_with(Arc::default()).await;
    service.stop().await.unwrap();
}

#[tokio::test]
async fn installing_an_engine_selects_the_first_voice_by_default() {
    let (_sink, _emitter, service) = service_with(Arc::default()).await;

    service
        .install_engine(Box::new(FixedVoicesEngine::new(&["Alex", "Victoria"])))
        .await;

    let status = service.status().await.unwrap();
    assert!(status.engine_loaded);
    assert_eq!(status.selected_voice.as_deref(), Some("Alex"));
}

#[tokio::test]
async fn missing_saved_voice_falls_back_with_a_notice() {
    let repo = Arc::new(MemorySettingsRepo::default());
    repo.save(&SpeechSettings {
        voice: Some("Samantha".to_string()),
        rate: Some(1.0),
        pitch: Some(1.0),
    })
    .await
    .unwrap();

    let (_sink, emitter, service) = service_with(repo).await;
    service
        .install_engine(Box::new(FixedVoicesEngine::new(&["Alex", "Victoria"])))
        .await;

    let status = service.status().await.unwrap();
    assert_eq!(status.selected_voice.as_deref(), Some("Alex"));

    let notices: Vec<_> = emitter
        .events()
        .into_iter()
        .filter(|e| matches!(e, AppEvent::Notice { .. }))
        .collect();
    assert_eq!(notices.len(), 1, "expected exactly one fallback notice");
    if let AppEvent::Notice { message } = &notices[0] {
        assert!(message.contains("Samantha"), "got {message}");
        assert!(message.contains("Alex"), "got {message}");
    }
}

#[tokio::test]
async fn saved_voice_is_kept_when_still_available() {
    let repo = Arc::new(MemorySettingsRepo::default());
    repo.save(&SpeechSettings {
        voice: Some("Victoria".to_string()),
        rate: Some(1.0),
        pitch: Some(1.0),
    })
    .await
    .unwrap();

    let (_sink, emitter, service) = service_with(repo).await;
    service
        .install_engine(Box::new(FixedVoicesEngine::new(&["Alex", "Victoria"])))
        .await;

    let status = service.status().await.unwrap();
    assert_eq!(status.selected_voice.as_deref(), Some("Victoria"));
    assert!(
        !emitter
            .events()
            .iter()
            .any(|e| matches!(e, AppEvent::Notice { .. })),
        "no notice expected when the saved voice exists"
    );
}

#[tokio::test]
async fn rate_and_pitch_round_trip_through_storage() {
    let repo = Arc::new(MemorySettingsRepo::default());

    {
        let (_sink, _emitter, service) = service_with(Arc::clone(&repo)).await;
        service.set_rate(1.5).await.unwrap();
        service.set_pitch(0.8).await.unwrap();
    }

    // A fresh service over the same repository recovers the values exactly.
    let (_sink, _emitter, service) = service_with(repo).await;
    let status = service.status().await.unwrap();
    assert!((status.rate - 1.5).abs() < f32::EPSILON);
    assert!((status.pitch - 0.8).abs() < f32::EPSILON);
}

#[tokio::test]
async fn out_of_range_rate_is_rejected_and_not_persisted() {
    let repo = Arc::new(MemorySettingsRepo::default());
    let (_sink, _emitter, service) = service_with(Arc::clone(&repo)).await;

    let err = service.set_rate(9.0).await.unwrap_err();
    assert!(matches!(
        err,
        lectern_core::ports::SpeechPortError::InvalidSetting(_)
    ));
    assert!(repo.load().await.unwrap().is_none());
}

#[tokio::test]
async fn set_voice_rejects_ids_outside_the_catalog() {
    let (_sink, _emitter, service) = service_with(Arc::default()).await;
    service
        .install_engine(Box::new(FixedVoicesEngine::new(&["Alex"])))
        .await;

    let err = service.set_voice("Samantha").await.unwrap_err();
    assert!(matches!(
        err,
        lectern_core::ports::SpeechPortError::NotFound(_)
    ));
}

#[tokio::test]
async fn set_voice_persists_the_choice() {
    let repo = Arc::new(MemorySettingsRepo::default());
    let (_sink, _emitter, service) = service_with(Arc::clone(&repo)).await;
    service
        .install_engine(Box::new(FixedVoicesEngine::new(&["Alex", "Victoria"])))
        .await;

    service.set_voice("Victoria").await.unwrap();

    let saved = repo.load().await.unwrap().unwrap();
    assert_eq!(saved.voice.as_deref(), Some("Victoria"));
}

#[tokio::test]
async fn grouped_voices_partition_by_language() {
    let (_sink, _emitter, service) = service_with(Arc::default()).await;

    let mut voices = FixedVoicesEngine::new(&["Alex", "Victoria"]);
    voices.voices[1].language = "en-GB".to_string();
    service.install_engine(Box::new(voices)).await;

    let grouped = service.grouped_voices().await.unwrap();
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped["en-US"][0].id, "Alex");
    assert_eq!(grouped["en-GB"][0].id, "Victoria");
}

#[tokio::test]
async fn toggle_starts_and_stops_playback() {
    let (sink, _emitter, service) = service_with(Arc::default()).await;
    service
        .install_engine(Box::new(FixedVoicesEngine::new(&["Alex"])))
        .await;

    service.toggle("Read this aloud.").await.unwrap();
    assert!(service.status().await.unwrap().is_playing);
    assert_eq!(sink.start_count(), 1);

    service.toggle("Read this aloud.").await.unwrap();
    assert!(!service.status().await.unwrap().is_playing);
}

//! Integration tests for the playback controller state machine.
//!
//! These drive play/stop/toggle through mock engines and sinks. No audio
//! hardware, model files, or network access is required — synthesis delay
//! and failure are scripted per call.
//!
//! # What is tested
//!
//! - Initial idle state, stop-when-idle as a no-op
//! - Idle → Playing on play, Playing → Idle on stop and on completion
//! - Toggle issuing the inverse transition of the live state
//! - At most one active session: a newer play supersedes the old one
//! - Late synthesis results of a superseded session are discarded
//! - Synthesis failure returns the controller to idle with an error event

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lectern_core::events::AppEvent;
use lectern_core::ports::AppEventEmitter;
use lectern_voice::{
    AudioSink, Phase, PlaybackController, PlaybackDoneCallback, SpeechError, TtsAudio, TtsEngine,
    UtteranceOptions, Voice,
};

// ── Mock sink ──────────────────────────────────────────────────────

/// Records every sink operation; completion is fired manually by tests.
#[derive(Default)]
struct MockSink {
    /// Number of `start` calls; doubles as the session generation counter.
    starts: AtomicUsize,
    stops: AtomicUsize,
    /// `(generation, first sample)` per appended buffer.
    appends: Mutex<Vec<(usize, f32)>>,
    /// Armed completion callback, cleared by `start`/`stop`.
    pending: Mutex<Option<PlaybackDoneCallback>>,
}

impl MockSink {
    fn appended(&self) -> Vec<(usize, f32)> {
        self.appends.lock().unwrap().clone()
    }

    /// Simulate the audio queue draining naturally.
    fn fire_completion(&self) {
        let cb = self.pending.lock().unwrap().take();
        if let Some(cb) = cb {
            cb();
        }
    }
}

impl AudioSink for MockSink {
    fn start(&self) -> Result<(), SpeechError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        *self.pending.lock().unwrap() = None;
        Ok(())
    }

    fn append(&self, samples: Vec<f32>, _sample_rate: u32) -> Result<(), SpeechError> {
        let generation = self.starts.load(Ordering::SeqCst);
        self.appends
            .lock()
            .unwrap()
            .push((generation, samples.first().copied().unwrap_or(0.0)));
        Ok(())
    }

    fn finish(&self, on_done: PlaybackDoneCallback) {
        *self.pending.lock().unwrap() = Some(on_done);
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        *self.pending.lock().unwrap() = None;
    }

    fn is_playing(&self) -> bool {
        self.pending.lock().unwrap().is_some()
    }
}

// ── Mock engine ────────────────────────────────────────────────────

/// Synthesizes a one-sample marker buffer per call.
///
/// Text starting with `"slow"` sleeps before returning, text containing
/// `"fail"` errors. The marker sample is the first byte of the text, so
/// tests can tell whose buffer landed in the sink.
struct MockEngine;

#[async_trait]
impl TtsEngine for MockEngine {
    async fn synthesize(
        &self,
        text: &str,
        _voice: &str,
        _rate: f32,
    ) -> Result<TtsAudio, SpeechError> {
        if text.starts_with("slow") {
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        if text.contains("fail") {
            return Err(SpeechError::SynthesisError("scripted failure".to_string()));
        }
        Ok(TtsAudio {
            samples: vec![f32::from(text.as_bytes()[0])],
            sample_rate: 24_000,
            duration: Duration::from_millis(10),
        })
    }

    fn sample_rate(&self) -> u32 {
        24_000
    }

    fn voices(&self) -> Vec<Voice> {
        vec![Voice {
            id: "mock".to_string(),
            name: "Mock".to_string(),
            language: "en-US".to_string(),
        }]
    }
}

// ── Event recorder ─────────────────────────────────────────────────

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

fn opts() -> UtteranceOptions {
    UtteranceOptions {
        voice: "mock".to_string(),
        rate: 1.0,
        pitch: 1.0,
    }
}

fn setup() -> (Arc<MockSink>, RecordingEmitter, PlaybackController) {
    let sink = Arc::new(MockSink::default());
    let emitter = RecordingEmitter::default();
    let controller = PlaybackController::new(
        Arc::clone(&sink) as Arc<dyn AudioSink>,
        Arc::new(emitter.clone()),
    );
    (sink, emitter, controller)
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn initial_state_is_idle() {
    let (_sink, _emitter, controller) = setup();
    assert_eq!(controller.phase(), Phase::Idle);
    assert!(!controller.is_playing());
}

#[tokio::test]
async fn stop_when_idle_is_a_noop() {
    let (sink, emitter, controller) = setup();
    controller.stop();
    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(sink.stops.load(Ordering::SeqCst), 0);
    assert!(emitter.events().is_empty());
}

#[tokio::test]
async fn play_transitions_to_playing() {
    let (sink, emitter, controller) = setup();

    controller.play(&MockEngine, "Hello world.", &opts()).await.unwrap();

    assert_eq!(controller.phase(), Phase::Playing);
    assert_eq!(sink.starts.load(Ordering::SeqCst), 1);
    assert_eq!(sink.appended().len(), 1);
    assert!(emitter.events().contains(&AppEvent::SpeechStarted));
}

#[tokio::test]
async fn explicit_stop_returns_to_idle() {
    let (sink, emitter, controller) = setup();

    controller.play(&MockEngine, "Hello world.", &opts()).await.unwrap();
    controller.stop();

    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(sink.stops.load(Ordering::SeqCst), 1);
    assert!(emitter.events().contains(&AppEvent::SpeechFinished));
}

#[tokio::test]
async fn natural_completion_returns_to_idle_without_further_calls() {
    let (sink, emitter, controller) = setup();

    controller.play(&MockEngine, "Hello world.", &opts()).await.unwrap();
    assert!(controller.is_playing());

    sink.fire_completion();

    assert!(!controller.is_playing());
    assert!(emitter.events().contains(&AppEvent::SpeechFinished));
}

#[tokio::test]
async fn toggle_issues_the_inverse_transition() {
    let (_sink, _emitter, controller) = setup();

    controller.toggle(&MockEngine, "Hello.", &opts()).await.unwrap();
    assert_eq!(controller.phase(), Phase::Playing);

    controller.toggle(&MockEngine, "Hello.", &opts()).await.unwrap();
    assert_eq!(controller.phase(), Phase::Idle);
}

#[tokio::test]
async fn empty_text_does_not_start_a_session() {
    let (sink, _emitter, controller) = setup();

    controller.play(&MockEngine, "   ", &opts()).await.unwrap();

    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(sink.starts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn newer_play_supersedes_one_still_synthesizing() {
    let (sink, _emitter, controller) = setup();
    let controller = Arc::new(controller);

    // "slow A" stalls in synthesis long enough for "B" to take over.
    let first = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.play(&MockEngine, "slow A", &opts()).await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;

    controller.play(&MockEngine, "B", &opts()).await.unwrap();
    first.await.unwrap().unwrap();

    // Two sessions were started, but only B's buffer reached the sink;
    // A's late result was discarded on arrival.
    assert_eq!(sink.starts.load(Ordering::SeqCst), 2);
    let appends = sink.appended();
    assert_eq!(appends, vec![(2, f32::from(b'B'))]);
    assert_eq!(controller.phase(), Phase::Playing);
}

#[tokio::test]
async fn late_result_does_not_resurrect_a_stopped_session() {
    let (sink, _emitter, controller) = setup();
    let controller = Arc::new(controller);

    let pending = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.play(&MockEngine, "slow text", &opts()).await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;

    // Stop arrives while synthesis is still in flight.
    controller.stop();
    assert_eq!(controller.phase(), Phase::Idle);

    pending.await.unwrap().unwrap();

    // Synthesis resolved after the stop; the state must still be idle and
    // nothing may have reached the sink.
    assert_eq!(controller.phase(), Phase::Idle);
    assert!(sink.appended().is_empty());
}

#[tokio::test]
async fn synthesis_failure_surfaces_an_error_and_returns_to_idle() {
    let (_sink, emitter, controller) = setup();

    let err = controller
        .play(&MockEngine, "this will fail", &opts())
        .await
        .unwrap_err();
    assert!(matches!(err, SpeechError::SynthesisError(_)));

    assert_eq!(controller.phase(), Phase::Idle);
    assert!(
        emitter
            .events()
            .iter()
            .any(|e| matches!(e, AppEvent::SpeechError { .. })),
        "expected a SpeechError event, got {:?}",
        emitter.events()
    );
}

#[tokio::test]
async fn stale_completion_watcher_changes_nothing() {
    let (sink, _emitter, controller) = setup();

    controller.play(&MockEngine, "First.", &opts()).await.unwrap();
    controller.play(&MockEngine, "Second.", &opts()).await.unwrap();

    // Completion of the live (second) session.
    sink.fire_completion();
    assert_eq!(controller.phase(), Phase::Idle);

    // A watcher surviving from the superseded session fires into the void.
    sink.fire_completion();
    assert_eq!(controller.phase(), Phase::Idle);
}

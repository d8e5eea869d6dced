//! Playback controller — the play/stop state machine for read-aloud.
//!
//! At most one playback session is active at any time. Every play request
//! receives a monotonically increasing sequence number; synthesis results
//! are applied only while that request is still the latest, so a stop or a
//! newer play issued mid-synthesis can never be resurrected by a
//! late-arriving buffer. There is no cancellation primitive for in-flight
//! synthesis — superseded results are simply discarded on arrival.
//!
//! # Locking discipline
//!
//! `state` is a std `Mutex` and is never held across an `.await` point.
//! Sink operations that must stay ordered with a state transition (start,
//! append, stop) run under the lock; they are sub-millisecond channel
//! round-trips to the audio thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use lectern_core::events::AppEvent;
use lectern_core::ports::AppEventEmitter;

use crate::engine::TtsEngine;
use crate::error::SpeechError;
use crate::playback::AudioSink;
use crate::text;

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
}

/// Wire label for a phase (`"idle"` | `"playing"`).
#[must_use]
pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Playing => "playing",
    }
}

/// Per-utterance synthesis parameters, snapshotted at play time.
///
/// Changing rate or pitch while audio is in flight affects the next play
/// request, never the current one.
#[derive(Debug, Clone)]
pub struct UtteranceOptions {
    /// Voice identifier.
    pub voice: String,

    /// Speech rate multiplier (passed to the engine).
    pub rate: f32,

    /// Pitch multiplier (applied at the output stage).
    pub pitch: f32,
}

struct SessionState {
    phase: Phase,
    /// Sequence number of the session the current phase belongs to.
    session: u64,
}

/// The read-aloud playback controller.
pub struct PlaybackController {
    sink: Arc<dyn AudioSink>,
    emitter: Arc<dyn AppEventEmitter>,
    state: Arc<Mutex<SessionState>>,
    next_seq: AtomicU64,
}

impl PlaybackController {
    /// Create an idle controller over the given output sink.
    pub fn new(sink: Arc<dyn AudioSink>, emitter: Arc<dyn AppEventEmitter>) -> Self {
        Self {
            sink,
            emitter,
            state: Arc::new(Mutex::new(SessionState {
                phase: Phase::Idle,
                session: 0,
            })),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.lock().unwrap().phase
    }

    /// Whether a playback session is active.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase() == Phase::Playing
    }

    /// Start reading `text` aloud, superseding any active session.
    ///
    /// Synthesizes the text chunk by chunk, appending each buffer to a
    /// fresh output sink. Returns once all chunks have been queued;
    /// completion of the audible playback is reported via the event
    /// emitter. Empty text is a no-op.
    pub async fn play(
        &self,
        engine: &dyn TtsEngine,
        text: &str,
        opts: &UtteranceOptions,
    ) -> Result<(), SpeechError> {
        let chunks = text::split_into_chunks(text);
        if chunks.is_empty() {
            tracing::debug!("Nothing to read");
            return Ok(());
        }

        let seq = self.begin_session()?;
        tracing::debug!(session = seq, chunks = chunks.len(), voice = %opts.voice, "Playback session started");

        for chunk in &chunks {
            // No lock is held across this await.
            let result = engine.synthesize(chunk, &opts.voice, opts.rate).await;

            let audio = match result {
                Ok(audio) => audio,
                Err(e) => {
                    self.fail_session(seq, &e);
                    return Err(e);
                }
            };
            if audio.samples.is_empty() {
                continue;
            }

            let rate = pitched_rate(audio.sample_rate, opts.pitch);
            match self.append_if_current(seq, audio.samples, rate) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(session = seq, "Discarding synthesis for superseded session");
                    return Ok(());
                }
                Err(e) => {
                    self.fail_session(seq, &e);
                    return Err(e);
                }
            }
        }

        self.arm_completion(seq);
        Ok(())
    }

    /// Stop any active playback. A no-op when idle.
    pub fn stop(&self) {
        {
            let mut guard = self.state.lock().unwrap();
            if guard.phase == Phase::Idle {
                return;
            }
            guard.phase = Phase::Idle;
            self.sink.stop();
        }

        self.emitter.emit(AppEvent::SpeechStateChanged {
            state: phase_label(Phase::Idle).to_string(),
        });
        self.emitter.emit(AppEvent::SpeechFinished);
    }

    /// Stop if playing, otherwise start reading `text`.
    ///
    /// The decision is taken from the state at the moment of the call, so a
    /// completion callback racing a user click resolves to whichever came
    /// first.
    pub async fn toggle(
        &self,
        engine: &dyn TtsEngine,
        text: &str,
        opts: &UtteranceOptions,
    ) -> Result<(), SpeechError> {
        if self.is_playing() {
            self.stop();
            Ok(())
        } else {
            self.play(engine, text, opts).await
        }
    }

    // ── Session bookkeeping ────────────────────────────────────────

    /// Allocate the next session, stop any prior one, and acquire a fresh
    /// sink. The sink swap happens under the state lock so two concurrent
    /// plays cannot interleave their start/stop pairs.
    fn begin_session(&self) -> Result<u64, SpeechError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut guard = self.state.lock().unwrap();
            self.sink.start()?;
            guard.phase = Phase::Playing;
            guard.session = seq;
        }

        self.emitter.emit(AppEvent::SpeechStateChanged {
            state: phase_label(Phase::Playing).to_string(),
        });
        self.emitter.emit(AppEvent::SpeechStarted);
        Ok(seq)
    }

    /// Append a buffer to the sink iff `seq` is still the live session.
    ///
    /// Returns `Ok(false)` when the session was superseded or stopped while
    /// synthesis was in flight — the buffer is dropped on the floor.
    fn append_if_current(
        &self,
        seq: u64,
        samples: Vec<f32>,
        sample_rate: u32,
    ) -> Result<bool, SpeechError> {
        let guard = self.state.lock().unwrap();
        if guard.phase != Phase::Playing || guard.session != seq {
            return Ok(false);
        }
        self.sink.append(samples, sample_rate)?;
        Ok(true)
    }

    /// Arm the natural-completion notification for session `seq`.
    ///
    /// The callback transitions to idle only if `seq` is still live, so a
    /// watcher surviving from a superseded session changes nothing.
    fn arm_completion(&self, seq: u64) {
        let state = Arc::clone(&self.state);
        let emitter = Arc::clone(&self.emitter);

        self.sink.finish(Box::new(move || {
            {
                let mut guard = state.lock().unwrap();
                if guard.phase != Phase::Playing || guard.session != seq {
                    return;
                }
                guard.phase = Phase::Idle;
            }
            emitter.emit(AppEvent::SpeechStateChanged {
                state: phase_label(Phase::Idle).to_string(),
            });
            emitter.emit(AppEvent::SpeechFinished);
        }));
    }

    /// Tear down session `seq` after a synthesis or output failure.
    ///
    /// If a newer session has already taken over, the failure belongs to a
    /// stale request and only gets logged.
    fn fail_session(&self, seq: u64, error: &SpeechError) {
        let was_current = {
            let mut guard = self.state.lock().unwrap();
            let current = guard.phase == Phase::Playing && guard.session == seq;
            if current {
                guard.phase = Phase::Idle;
                self.sink.stop();
            }
            current
        };

        if was_current {
            tracing::warn!(session = seq, %error, "Playback session failed");
            self.emitter.emit(AppEvent::SpeechStateChanged {
                state: phase_label(Phase::Idle).to_string(),
            });
            self.emitter.emit(AppEvent::SpeechError {
                message: error.to_string(),
            });
        } else {
            tracing::debug!(session = seq, %error, "Ignoring failure of superseded session");
        }
    }
}

/// Scale the declared sample rate by the pitch multiplier.
///
/// Resampling on playback shifts pitch and tempo together; the synthesized
/// buffer itself is untouched.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn pitched_rate(sample_rate: u32, pitch: f32) -> u32 {
    let scaled = (sample_rate as f32 * pitch).round() as u32;
    scaled.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_one_is_identity() {
        assert_eq!(pitched_rate(24_000, 1.0), 24_000);
    }

    #[test]
    fn pitch_scales_the_declared_rate() {
        assert_eq!(pitched_rate(24_000, 2.0), 48_000);
        assert_eq!(pitched_rate(24_000, 0.5), 12_000);
    }

    #[test]
    fn phase_labels_match_wire_values() {
        assert_eq!(phase_label(Phase::Idle), "idle");
        assert_eq!(phase_label(Phase::Playing), "playing");
    }
}

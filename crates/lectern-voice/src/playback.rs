//! Audio output — the [`AudioSink`] boundary and its rodio implementation.
//!
//! [`AudioOutput`] owns the rodio output stream and the current sink. It is
//! `!Send` on some platforms and therefore lives on the dedicated audio
//! thread (see [`crate::audio_thread`]); the rest of the crate talks to it
//! through the thread's handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::error::SpeechError;

/// Callback invoked exactly once when playback finishes naturally (all
/// queued audio drained without an intervening stop).
pub type PlaybackDoneCallback = Box<dyn FnOnce() + Send + 'static>;

/// The audio output boundary the playback controller drives.
///
/// One sink is active at a time: `start` releases any prior sink and
/// acquires a fresh one, `append` queues synthesized buffers onto it, and
/// `finish` arms a completion notification for the current session. All
/// methods take `&self` so implementations can be shared behind an `Arc`.
pub trait AudioSink: Send + Sync {
    /// Acquire a fresh output sink, stopping any prior playback.
    fn start(&self) -> Result<(), SpeechError>;

    /// Queue audio samples onto the current sink.
    fn append(&self, samples: Vec<f32>, sample_rate: u32) -> Result<(), SpeechError>;

    /// Arm `on_done` to fire when the current sink drains naturally.
    ///
    /// A sink stopped via [`stop`](Self::stop) never fires the callback.
    fn finish(&self, on_done: PlaybackDoneCallback);

    /// Stop any active playback immediately. A no-op when nothing plays.
    fn stop(&self);

    /// Whether audio is audibly playing right now.
    fn is_playing(&self) -> bool;
}

/// Rodio-backed audio output. Thread-confined; see module docs.
pub struct AudioOutput {
    /// rodio output stream (must be kept alive).
    _stream: OutputStream,

    /// Handle used to create sinks.
    stream_handle: OutputStreamHandle,

    /// Current playback sink (if any).
    sink: Option<Arc<Sink>>,

    /// Whether playback is in progress. Shared with completion watchers so
    /// a stop can suppress their callback.
    is_playing: Arc<AtomicBool>,
}

impl AudioOutput {
    /// Open the default output device.
    pub fn new() -> Result<Self, SpeechError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SpeechError::OutputStreamError(e.to_string()))?;

        tracing::info!("Audio output initialized on default output device");

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
            is_playing: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Create a fresh sink for a new playback session, stopping any prior one.
    pub fn start(&mut self) -> Result<(), SpeechError> {
        self.stop();

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SpeechError::OutputStreamError(e.to_string()))?;
        self.sink = Some(Arc::new(sink));
        self.is_playing.store(true, Ordering::SeqCst);

        tracing::debug!("Playback sink created");
        Ok(())
    }

    /// Queue audio samples onto the current sink.
    ///
    /// Requires a prior [`start`](Self::start); appending without one is a
    /// session-ordering bug upstream.
    pub fn append(&mut self, samples: Vec<f32>, sample_rate: u32) -> Result<(), SpeechError> {
        let Some(sink) = &self.sink else {
            return Err(SpeechError::OutputStreamError(
                "append without an active sink".to_string(),
            ));
        };

        let source = rodio::buffer::SamplesBuffer::new(1, sample_rate, samples);
        sink.append(source);
        Ok(())
    }

    /// Spawn a watcher thread that blocks until the sink drains or playback
    /// is stopped externally. Fires `on_done` only on natural completion.
    pub fn finish(&self, on_done: PlaybackDoneCallback) {
        let Some(sink) = self.sink.clone() else {
            return;
        };
        let is_playing = Arc::clone(&self.is_playing);

        if sink.empty() {
            // Audio already drained before the watcher was armed. Still a
            // natural completion — fire now unless a stop got there first.
            if is_playing.swap(false, Ordering::SeqCst) {
                on_done();
            }
            return;
        }

        // `Sink` is Send in rodio 0.20+, so it can move into the watcher
        // thread. `sleep_until_end()` returns when the queue drains or when
        // `stop()` drops the queued sources.
        std::thread::spawn(move || {
            sink.sleep_until_end();

            // If stop() was called, is_playing is already false — the
            // completion callback must not fire.
            if !is_playing.swap(false, Ordering::SeqCst) {
                return;
            }

            tracing::debug!("Playback finished naturally");
            on_done();
        });
    }

    /// Stop any active playback immediately.
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.is_playing.store(false, Ordering::SeqCst);
        tracing::debug!("Playback stopped");
    }

    /// Check whether audio is currently playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| !sink.empty())
    }
}

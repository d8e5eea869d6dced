//! Dedicated audio thread — isolates the `!Send` rodio output from the
//! async runtime.
//!
//! `rodio::OutputStream` is `!Send` on some platforms. Rather than using
//! `unsafe impl Send/Sync`, the output is confined to a single OS thread
//! and every operation is routed through a command channel. [`RodioSink`]
//! is the `Send + Sync` proxy the controller holds; it spawns the thread
//! lazily on first use so constructing a sink never touches the audio
//! device, and releases it on drop.

use std::sync::mpsc;
use std::thread;

use crate::error::SpeechError;
use crate::playback::{AudioOutput, AudioSink, PlaybackDoneCallback};

// ── Commands ───────────────────────────────────────────────────────

/// A command sent from the controller to the audio thread.
enum AudioCommand {
    /// Acquire a fresh playback sink, stopping any prior one.
    Start {
        reply: mpsc::Sender<Result<(), SpeechError>>,
    },

    /// Append audio samples to the current sink.
    Append {
        samples: Vec<f32>,
        sample_rate: u32,
        reply: mpsc::Sender<Result<(), SpeechError>>,
    },

    /// Arm a completion watcher for the current sink.
    Finish { on_done: PlaybackDoneCallback },

    /// Stop any active playback immediately (fire-and-forget).
    Stop,

    /// Query whether audio is currently playing.
    IsPlaying { reply: mpsc::Sender<bool> },

    /// Shut down the audio thread, releasing the output device.
    Shutdown,
}

// ── Handle ─────────────────────────────────────────────────────────

/// Handle to the running audio thread.
struct AudioThreadHandle {
    cmd_tx: mpsc::Sender<AudioCommand>,
    thread: Option<thread::JoinHandle<()>>,
}

impl AudioThreadHandle {
    /// Spawn the audio thread and wait for it to open the output device.
    fn spawn() -> Result<Self, SpeechError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<AudioCommand>();
        let (init_tx, init_rx) = mpsc::channel::<Result<(), SpeechError>>();

        let thread = thread::Builder::new()
            .name("lectern-audio".into())
            .spawn(move || run(cmd_rx, &init_tx))
            .map_err(|e| {
                SpeechError::OutputStreamError(format!("failed to spawn audio thread: {e}"))
            })?;

        init_rx.recv().map_err(|_| SpeechError::AudioThreadDied)??;

        Ok(Self {
            cmd_tx,
            thread: Some(thread),
        })
    }

    /// Send a command that expects a reply, blocking until it arrives.
    fn send_and_recv<T>(
        &self,
        build: impl FnOnce(mpsc::Sender<Result<T, SpeechError>>) -> AudioCommand,
    ) -> Result<T, SpeechError> {
        let (tx, rx) = mpsc::channel();
        self.cmd_tx
            .send(build(tx))
            .map_err(|_| SpeechError::AudioThreadDied)?;
        rx.recv().map_err(|_| SpeechError::AudioThreadDied)?
    }
}

impl Drop for AudioThreadHandle {
    fn drop(&mut self) {
        // Best-effort shutdown — the thread may already be dead.
        let _ = self.cmd_tx.send(AudioCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// The body of the dedicated audio thread. Owns the [`AudioOutput`] for its
/// entire lifetime — it never crosses a thread boundary.
fn run(cmd_rx: mpsc::Receiver<AudioCommand>, init_tx: &mpsc::Sender<Result<(), SpeechError>>) {
    let mut output = match AudioOutput::new() {
        Ok(o) => o,
        Err(e) => {
            let _ = init_tx.send(Err(e));
            return;
        }
    };

    if init_tx.send(Ok(())).is_err() {
        // Caller dropped — nothing to do.
        return;
    }

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            AudioCommand::Start { reply } => {
                let _ = reply.send(output.start());
            }
            AudioCommand::Append {
                samples,
                sample_rate,
                reply,
            } => {
                let _ = reply.send(output.append(samples, sample_rate));
            }
            AudioCommand::Finish { on_done } => {
                output.finish(on_done);
            }
            AudioCommand::Stop => {
                output.stop();
            }
            AudioCommand::IsPlaying { reply } => {
                let _ = reply.send(output.is_playing());
            }
            AudioCommand::Shutdown => break,
        }
    }

    tracing::debug!("Audio thread shutting down");
}

// ── Sink proxy ─────────────────────────────────────────────────────

/// `Send + Sync` [`AudioSink`] backed by the dedicated audio thread.
///
/// The thread (and with it the output device) is acquired on the first
/// `start` and held until the sink is dropped. Query and stop operations
/// before first use are cheap no-ops.
#[derive(Default)]
pub struct RodioSink {
    inner: std::sync::Mutex<Option<AudioThreadHandle>>,
}

impl RodioSink {
    /// Create a sink without touching the audio device.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the live handle, spawning the thread if needed.
    fn with_thread<T>(
        &self,
        f: impl FnOnce(&AudioThreadHandle) -> Result<T, SpeechError>,
    ) -> Result<T, SpeechError> {
        let mut guard = self.inner.lock().unwrap();
        if guard.is_none() {
            *guard = Some(AudioThreadHandle::spawn()?);
        }
        f(guard.as_ref().expect("just initialized"))
    }
}

impl AudioSink for RodioSink {
    fn start(&self) -> Result<(), SpeechError> {
        self.with_thread(|t| t.send_and_recv(|reply| AudioCommand::Start { reply }))
    }

    fn append(&self, samples: Vec<f32>, sample_rate: u32) -> Result<(), SpeechError> {
        self.with_thread(|t| {
            t.send_and_recv(|reply| AudioCommand::Append {
                samples,
                sample_rate,
                reply,
            })
        })
    }

    fn finish(&self, on_done: PlaybackDoneCallback) {
        let guard = self.inner.lock().unwrap();
        if let Some(t) = guard.as_ref() {
            let _ = t.cmd_tx.send(AudioCommand::Finish { on_done });
        }
    }

    fn stop(&self) {
        let guard = self.inner.lock().unwrap();
        if let Some(t) = guard.as_ref() {
            let _ = t.cmd_tx.send(AudioCommand::Stop);
        }
    }

    fn is_playing(&self) -> bool {
        let guard = self.inner.lock().unwrap();
        guard
            .as_ref()
            .and_then(|t| {
                let (tx, rx) = mpsc::channel();
                t.cmd_tx.send(AudioCommand::IsPlaying { reply: tx }).ok()?;
                rx.recv().ok()
            })
            .unwrap_or(false)
    }
}

//! Console event emitter — surfaces backend events on stderr.
//!
//! The CLI has no event bus; notices and speech errors go straight to the
//! terminal so they interleave sensibly with command output. Everything
//! else is only interesting at debug level.

use lectern_core::events::AppEvent;
use lectern_core::ports::AppEventEmitter;

/// Prints user-facing events to stderr; logs the rest.
#[derive(Debug, Clone, Default)]
pub struct ConsoleEmitter;

impl ConsoleEmitter {
    /// Create a new console emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl AppEventEmitter for ConsoleEmitter {
    fn emit(&self, event: AppEvent) {
        match event {
            AppEvent::Notice { message } => eprintln!("note: {message}"),
            AppEvent::SpeechError { message } => eprintln!("speech error: {message}"),
            other => tracing::debug!(?other, "event"),
        }
    }

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(self.clone())
    }
}

//! Speak command handler.
//!
//! Reads an article (or ad-hoc text) aloud and blocks until playback
//! finishes or Ctrl-C stops it. Voice/rate/pitch flags persist as the new
//! preference before playback starts, matching the behavior of changing a
//! control in a settings panel.

use std::time::Duration;

use lectern_core::ports::SpeechPort;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// How often to poll playback state while waiting for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Execute the speak command.
pub async fn execute(
    ctx: &CliContext,
    id: Option<i64>,
    text: Option<String>,
    voice: Option<String>,
    rate: Option<f32>,
    pitch: Option<f32>,
) -> Result<(), CliError> {
    let speech = ctx.speech().await?;

    if let Some(voice) = voice {
        speech.set_voice(&voice).await?;
    }
    if let Some(rate) = rate {
        speech.set_rate(rate).await?;
    }
    if let Some(pitch) = pitch {
        speech.set_pitch(pitch).await?;
    }

    let text = match (id, text) {
        (Some(id), _) => {
            let body = ctx.library().reading_text(id).await?;
            // Reading aloud counts as a view.
            ctx.library().record_view(id).await?;
            body
        }
        (None, Some(text)) => text,
        (None, None) => {
            return Err(CliError::Arguments(
                "give an article ID or --text to read".to_string(),
            ));
        }
    };

    let status = speech.status().await?;
    if !status.engine_loaded {
        println!("The TTS model bundle is not downloaded.");
        println!("Run 'lectern download-voices' first.");
        return Ok(());
    }
    if status.selected_voice.is_none() {
        println!("No voice available; nothing to play.");
        return Ok(());
    }

    speech.play(&text).await?;

    // Play returns once synthesis is queued; wait for the audio to drain.
    let playback = async {
        while speech.status().await.map(|s| s.is_playing).unwrap_or(false) {
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    };

    tokio::select! {
        () = playback => {
            println!("Done.");
        }
        _ = tokio::signal::ctrl_c() => {
            speech.stop().await?;
            println!("Stopped.");
        }
    }

    Ok(())
}

//! Settings command handlers.

use lectern_core::ports::SpeechPort;
use lectern_core::settings::{PITCH_RANGE, RATE_RANGE};

use crate::bootstrap::CliContext;
use crate::commands::SettingsCommand;
use crate::error::CliError;

/// Execute a settings subcommand.
pub async fn execute(ctx: &CliContext, command: SettingsCommand) -> Result<(), CliError> {
    match command {
        SettingsCommand::Show => show(ctx).await,
        SettingsCommand::Set { voice, rate, pitch } => set(ctx, voice, rate, pitch).await,
    }
}

async fn show(ctx: &CliContext) -> Result<(), CliError> {
    let speech = ctx.speech().await?;
    let status = speech.status().await?;

    println!("Voice:  {}", status.selected_voice.as_deref().unwrap_or("(none)"));
    println!("Rate:   {} (range {}–{})", status.rate, RATE_RANGE.0, RATE_RANGE.1);
    println!("Pitch:  {} (range {}–{})", status.pitch, PITCH_RANGE.0, PITCH_RANGE.1);
    println!(
        "Engine: {}",
        if status.engine_loaded {
            "loaded"
        } else {
            "not loaded (run 'lectern download-voices')"
        }
    );
    Ok(())
}

async fn set(
    ctx: &CliContext,
    voice: Option<String>,
    rate: Option<f32>,
    pitch: Option<f32>,
) -> Result<(), CliError> {
    if voice.is_none() && rate.is_none() && pitch.is_none() {
        return Err(CliError::Arguments(
            "nothing to change — pass --voice, --rate, or --pitch".to_string(),
        ));
    }

    let speech = ctx.speech().await?;

    // Each setter persists its field without touching the others.
    if let Some(voice) = voice {
        speech.set_voice(&voice).await?;
        println!("Voice set to {voice}.");
    }
    if let Some(rate) = rate {
        speech.set_rate(rate).await?;
        println!("Rate set to {rate}.");
    }
    if let Some(pitch) = pitch {
        speech.set_pitch(pitch).await?;
        println!("Pitch set to {pitch}.");
    }

    Ok(())
}

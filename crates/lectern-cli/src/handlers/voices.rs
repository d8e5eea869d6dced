//! Voices command handler.
//!
//! Lists available voices grouped by language. With no engine loaded the
//! catalog is empty and the handler points at the model download instead.

use lectern_core::ports::SpeechPort;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the voices command.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let speech = ctx.speech().await?;
    let grouped = speech.grouped_voices().await?;

    if grouped.is_empty() {
        println!("No voices available — the TTS model bundle is not downloaded.");
        println!("Run 'lectern download-voices' first.");
        return Ok(());
    }

    let status = speech.status().await?;
    let selected = status.selected_voice.as_deref().unwrap_or("");

    for (language, voices) in grouped {
        println!("{language}:");
        for voice in voices {
            let marker = if voice.id == selected { "*" } else { " " };
            println!("  {marker} {:<14} {}", voice.id, voice.name);
        }
        println!();
    }
    println!("* currently selected. Change with 'lectern settings set --voice <id>'.");

    Ok(())
}

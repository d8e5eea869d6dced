//! Download-voices command handler.
//!
//! Fetches and extracts the Kokoro TTS model bundle so the speech engine
//! can be loaded.

use indicatif::{ProgressBar, ProgressStyle};
use lectern_voice::models;

use crate::error::CliError;

/// Execute the download-voices command.
pub async fn execute() -> Result<(), CliError> {
    let bundle = models::tts_bundle();

    if models::is_tts_downloaded().map_err(|e| CliError::Speech(e.to_string()))? {
        println!("{} is already downloaded.", bundle.name);
        return Ok(());
    }

    println!(
        "Downloading {} ({}, {} voices)...",
        bundle.name, bundle.size_display, bundle.voice_count
    );

    let bar = ProgressBar::new(bundle.size_bytes);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {bytes}/{total_bytes} ({eta})")
            .map_err(|e| CliError::Core(e.to_string()))?,
    );

    let path = models::download_tts_bundle(|done, total| {
        bar.set_length(total);
        bar.set_position(done);
    })
    .await
    .map_err(|e| CliError::Speech(e.to_string()))?;

    bar.finish();
    println!("Voice model ready at {}.", path.display());
    println!("Try it with 'lectern voices' and 'lectern speak'.");
    Ok(())
}

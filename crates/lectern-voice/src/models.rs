//! Voice model catalog — the curated Kokoro TTS bundle.
//!
//! Models are ONNX archives (`.tar.bz2`) from the
//! [`k2-fsa/sherpa-onnx`](https://github.com/k2-fsa/sherpa-onnx/releases)
//! releases. The archive extracts to a directory containing the files
//! expected by `sherpa-rs`. Download state is probed by the presence of
//! the extracted directory, so the bundle directory must never be created
//! ahead of a successful extraction.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::SpeechError;

const SHERPA_TTS_BASE: &str = "https://github.com/k2-fsa/sherpa-onnx/releases/download/tts-models";

/// Information about a downloadable TTS model bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsModelBundle {
    /// Bundle identifier.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// URL of the `.tar.bz2` archive.
    pub archive_url: String,

    /// Directory name inside the archive (also the on-disk folder name).
    pub dir_name: String,

    /// Approximate download size in bytes.
    pub size_bytes: u64,

    /// Approximate size as a human-readable string.
    pub size_display: String,

    /// Number of voices in the bundle.
    pub voice_count: u32,
}

/// The curated TTS bundle.
#[must_use]
pub fn tts_bundle() -> TtsModelBundle {
    TtsModelBundle {
        id: "kokoro-en-v0_19".to_string(),
        name: "Kokoro v0.19 (English)".to_string(),
        archive_url: format!("{SHERPA_TTS_BASE}/kokoro-en-v0_19.tar.bz2"),
        dir_name: "kokoro-en-v0_19".to_string(),
        size_bytes: 319_815_680, // ~305 MB
        size_display: "305 MB".to_string(),
        voice_count: 11,
    }
}

/// On-disk directory of the extracted TTS bundle.
pub fn tts_bundle_dir() -> Result<PathBuf, SpeechError> {
    let bundle = tts_bundle();
    lectern_core::paths::tts_model_dir(&bundle.dir_name)
        .map_err(|e| SpeechError::LoadError(e.to_string()))
}

/// Whether the TTS bundle has been downloaded and extracted.
pub fn is_tts_downloaded() -> Result<bool, SpeechError> {
    // The path is a directory; a complete extraction contains model.onnx.
    Ok(tts_bundle_dir()?.join("model.onnx").exists())
}

/// Download the TTS bundle archive and extract it into the models
/// directory. Returns the extracted bundle path.
///
/// The archive is fetched into memory, then extracted on a blocking
/// thread. An already-extracted bundle is returned as-is without network
/// traffic. Progress is reported via `on_progress(bytes, total)`.
#[cfg(feature = "sherpa")]
pub async fn download_tts_bundle(on_progress: impl Fn(u64, u64)) -> Result<PathBuf, SpeechError> {
    let bundle = tts_bundle();
    let extract_path = tts_bundle_dir()?;

    if extract_path.join("model.onnx").exists() {
        tracing::debug!(path = %extract_path.display(), "TTS bundle already extracted");
        return Ok(extract_path);
    }

    let models_dir =
        lectern_core::paths::models_dir().map_err(|e| SpeechError::LoadError(e.to_string()))?;

    tracing::info!(url = %bundle.archive_url, dest = %extract_path.display(), "Downloading TTS bundle");

    let client = reqwest::Client::new();
    let response = client
        .get(&bundle.archive_url)
        .send()
        .await
        .map_err(|e| SpeechError::DownloadError {
            name: bundle.id.clone(),
            source: e.into(),
        })?;

    if !response.status().is_success() {
        return Err(SpeechError::DownloadError {
            name: bundle.id.clone(),
            source: anyhow::anyhow!("HTTP {}", response.status()),
        });
    }

    let total_size = response.content_length().unwrap_or(bundle.size_bytes);
    let archive_bytes = response
        .bytes()
        .await
        .map_err(|e| SpeechError::DownloadError {
            name: bundle.id.clone(),
            source: e.into(),
        })?;

    on_progress(
        archive_bytes.len() as u64,
        total_size.max(archive_bytes.len() as u64),
    );

    tracing::info!(
        size_mb = archive_bytes.len() / 1_048_576,
        "Archive downloaded, extracting"
    );

    // Extract on a blocking thread to keep the async runtime responsive.
    let bytes_vec = archive_bytes.to_vec();
    let dest_owned = models_dir;
    tokio::task::spawn_blocking(move || {
        let cursor = std::io::Cursor::new(bytes_vec);
        let decompressor = bzip2::read::BzDecoder::new(cursor);
        let mut archive = tar::Archive::new(decompressor);
        archive
            .unpack(&dest_owned)
            .map_err(|e| SpeechError::DownloadError {
                name: "archive".to_string(),
                source: anyhow::anyhow!("Failed to extract archive: {e}"),
            })
    })
    .await
    .map_err(|e| SpeechError::DownloadError {
        name: bundle.id,
        source: anyhow::anyhow!("extract task failed: {e}"),
    })??;

    tracing::info!(path = %extract_path.display(), "TTS bundle ready");
    Ok(extract_path)
}

//! Voice model directory resolution.

use std::fs;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;

/// Get the directory that holds downloaded voice model bundles.
///
/// Created if it doesn't exist.
pub fn models_dir() -> Result<PathBuf, PathError> {
    let dir = data_root()?.join("models");

    fs::create_dir_all(&dir).map_err(|e| PathError::CreateFailed {
        path: dir.clone(),
        reason: e.to_string(),
    })?;

    Ok(dir)
}

/// Get the expected on-disk directory of a TTS model bundle by name.
///
/// The bundle directory is *not* created here — its existence is how
/// download-state probing works.
pub fn tts_model_dir(bundle_name: &str) -> Result<PathBuf, PathError> {
    Ok(models_dir()?.join(bundle_name))
}

//! Platform-specific data root resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable that overrides the data root.
const DATA_DIR_ENV: &str = "LECTERN_DATA_DIR";

/// Get the root directory for application data (database, voice models).
///
/// Resolution order:
/// 1. `LECTERN_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g. `~/.local/share/lectern`)
///
/// The directory is created if it doesn't exist.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = if let Ok(path) = env::var(DATA_DIR_ENV) {
        PathBuf::from(path)
    } else {
        dirs::data_local_dir()
            .ok_or(PathError::NoDataDir)?
            .join("lectern")
    };

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

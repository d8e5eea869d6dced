//! CLI-specific error types and mappings.
//!
//! Maps core and speech errors to exit codes and user-facing messages.

use lectern_core::ports::{CoreError, RepositoryError, SpeechPortError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error (settings, paths).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Speech engine or playback error.
    #[error("Speech error: {0}")]
    Speech(String),

    /// Something the user asked for does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl CliError {
    /// Map the error to an exit code.
    ///
    /// Exit codes follow Unix conventions: 0 success, 1 general error,
    /// 2 invalid arguments, 64–78 per sysexits.h categories.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) | Self::NotFound(_) | Self::Speech(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(RepositoryError::NotFound(what)) => Self::NotFound(what),
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::Internal(msg) => Self::Core(msg),
        }
    }
}

impl From<SpeechPortError> for CliError {
    fn from(err: SpeechPortError) -> Self {
        match err {
            SpeechPortError::NotFound(what) => Self::NotFound(what),
            SpeechPortError::InvalidSetting(msg) => Self::Arguments(msg),
            other => Self::Speech(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::Core(format!("{err:#}"))
    }
}

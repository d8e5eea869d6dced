//! Path resolution for application data.
//!
//! Canonical locations for the database and voice model files, with an
//! environment-variable override for tests and portable installs.

mod database;
mod error;
mod models;
mod platform;

pub use database::database_path;
pub use error::PathError;
pub use models::{models_dir, tts_model_dir};
pub use platform::data_root;

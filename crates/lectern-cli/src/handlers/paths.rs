//! Paths command handler.

use lectern_core::paths::{data_root, database_path, models_dir};

use crate::error::CliError;

/// Print the resolved locations of all lectern data.
pub fn execute() -> Result<(), CliError> {
    let root = data_root().map_err(|e| CliError::Config(e.to_string()))?;
    let db = database_path().map_err(|e| CliError::Config(e.to_string()))?;
    let models = models_dir().map_err(|e| CliError::Config(e.to_string()))?;

    println!("Data root:    {}", root.display());
    println!("Database:     {}", db.display());
    println!("Voice models: {}", models.display());
    println!();
    println!("Override the data root with the LECTERN_DATA_DIR environment variable.");
    Ok(())
}

#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use dotenvy as _;
use tracing_subscriber as _;

// Silence unused dev-dependency warnings for shared test tooling
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

pub mod bootstrap;
pub mod commands;
pub mod emitter;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{BookmarkCommand, Commands, SettingsCommand};
pub use emitter::ConsoleEmitter;
pub use error::CliError;
pub use parser::Cli;

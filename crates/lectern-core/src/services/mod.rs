//! Domain services - orchestrate operations over the ports.

pub mod library_service;
pub mod settings_service;

pub use library_service::LibraryService;
pub use settings_service::SpeechSettingsService;

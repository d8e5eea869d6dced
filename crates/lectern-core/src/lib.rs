#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{Article, Bookmark, BookmarkEntry, HistoryEntry, NewArticle, Page};
pub use events::AppEvent;
pub use ports::{
    AppEventEmitter, ArticleRepository, CoreError, NoopEmitter, ReadingHistoryRepository, Repos,
    RepositoryError, SpeechPort, SpeechPortError, SpeechSettingsRepository, SpeechStatusDto,
    VoiceDto,
};
pub use services::{LibraryService, SpeechSettingsService};
pub use settings::{
    DEFAULT_PITCH, DEFAULT_RATE, PITCH_RANGE, RATE_RANGE, SettingsError, SpeechSettings,
    SpeechSettingsUpdate, validate_settings,
};

// Re-export path utilities
pub use paths::{PathError, data_root, database_path, models_dir, tts_model_dir};

//! Repository implementations over `SQLite`.

pub mod row_mappers;
pub mod sqlite_article_repository;
pub mod sqlite_history_repository;
pub mod sqlite_settings_repository;

pub use sqlite_article_repository::SqliteArticleRepository;
pub use sqlite_history_repository::SqliteHistoryRepository;
pub use sqlite_settings_repository::SqliteSettingsRepository;

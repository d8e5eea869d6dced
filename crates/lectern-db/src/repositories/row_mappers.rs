//! Row mapping helpers for `SQLite` queries.

use chrono::{DateTime, Utc};
use lectern_core::domain::Article;
use lectern_core::ports::RepositoryError;
use sqlx::Row;

/// Shared SELECT column list for article queries.
pub const ARTICLE_SELECT_COLUMNS: &str = "id, title, url, author_name, author_image_url, author_profile_url, content, publish_date, added_at";

/// Parse an RFC 3339 timestamp column value.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Serialization(format!("bad timestamp {value:?}: {e}")))
}

/// Parse an optional RFC 3339 timestamp column value.
pub fn parse_optional_datetime(
    value: Option<String>,
) -> Result<Option<DateTime<Utc>>, RepositoryError> {
    value.as_deref().map(parse_datetime).transpose()
}

/// Read a named column, mapping driver errors to [`RepositoryError`].
pub fn get_column<'r, T>(row: &'r sqlx::sqlite::SqliteRow, name: &str) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::Storage(e.to_string()))
}

/// Parse a database row into an [`Article`].
pub fn row_to_article(row: &sqlx::sqlite::SqliteRow) -> Result<Article, RepositoryError> {
    let publish_date: Option<String> = get_column(row, "publish_date")?;
    let added_at: String = get_column(row, "added_at")?;

    Ok(Article {
        id: get_column(row, "id")?,
        title: get_column(row, "title")?,
        url: get_column(row, "url")?,
        author_name: get_column(row, "author_name")?,
        author_image_url: get_column(row, "author_image_url")?,
        author_profile_url: get_column(row, "author_profile_url")?,
        content: get_column(row, "content")?,
        publish_date: parse_optional_datetime(publish_date)?,
        added_at: parse_datetime(&added_at)?,
    })
}

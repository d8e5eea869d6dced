//! Saved article domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::html;

/// Average reading speed used for read-time estimates.
const WORDS_PER_MINUTE: usize = 200;

/// A saved article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Database ID.
    pub id: i64,

    /// Article title.
    pub title: String,

    /// Original URL the article was captured from.
    pub url: Option<String>,

    /// Author display name.
    pub author_name: Option<String>,

    /// Author avatar URL.
    pub author_image_url: Option<String>,

    /// Author profile URL.
    pub author_profile_url: Option<String>,

    /// Captured article body (HTML or plain text).
    pub content: String,

    /// Original publication date, if known.
    pub publish_date: Option<DateTime<Utc>>,

    /// When the article was saved.
    pub added_at: DateTime<Utc>,
}

/// Payload for saving a new article.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub url: Option<String>,
    pub author_name: Option<String>,
    pub author_image_url: Option<String>,
    pub author_profile_url: Option<String>,
    pub content: String,
    pub publish_date: Option<DateTime<Utc>>,
}

impl Article {
    /// Plain-text rendition of the article body.
    #[must_use]
    pub fn plain_text(&self) -> String {
        html::plain_text(&self.content)
    }

    /// Card excerpt: the first sentence of the first paragraph.
    ///
    /// Falls back to a fixed message when the body has no usable text.
    #[must_use]
    pub fn excerpt(&self) -> String {
        html::first_paragraph_text(&self.content)
            .map_or_else(|| "No content available.".to_string(), |p| {
                html::first_sentence(&p)
            })
    }

    /// Estimated read time in whole minutes (minimum 1).
    #[must_use]
    pub fn read_time_minutes(&self) -> u32 {
        let words = self.plain_text().split_whitespace().count();
        let minutes = words.div_ceil(WORDS_PER_MINUTE);
        u32::try_from(minutes.max(1)).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(content: &str) -> Article {
        Article {
            id: 1,
            title: "Test".to_string(),
            url: None,
            author_name: None,
            author_image_url: None,
            author_profile_url: None,
            content: content.to_string(),
            publish_date: None,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn excerpt_is_first_sentence_of_first_paragraph() {
        let a = article("<h1>Head</h1><p>First sentence. Second sentence.</p>");
        assert_eq!(a.excerpt(), "First sentence.");
    }

    #[test]
    fn excerpt_falls_back_when_empty() {
        let a = article("<div></div>");
        assert_eq!(a.excerpt(), "No content available.");
    }

    #[test]
    fn read_time_has_a_floor_of_one_minute() {
        let a = article("<p>Five words are not many.</p>");
        assert_eq!(a.read_time_minutes(), 1);
    }

    #[test]
    fn read_time_scales_with_length() {
        let body = format!("<p>{}</p>", "word ".repeat(450));
        let a = article(&body);
        assert_eq!(a.read_time_minutes(), 3);
    }
}

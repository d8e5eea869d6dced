//! Canonical event union for all cross-adapter events.
//!
//! Single source of truth for events consumed by adapters (CLI today,
//! SSE/GUI listeners tomorrow) and produced by backend services.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag and camelCase fields:
//!
//! ```json
//! { "type": "speech_finished" }
//! { "type": "notice", "message": "Saved voice \"Samantha\" not found. Using default." }
//! ```

use serde::{Deserialize, Serialize};

/// Application event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum AppEvent {
    /// Speech playback state changed (`"idle"` | `"playing"`).
    SpeechStateChanged { state: String },

    /// Speech playback started.
    SpeechStarted,

    /// Speech playback finished (stop or natural completion).
    SpeechFinished,

    /// Speech synthesis or playback failed. Non-fatal; surfaced to the user.
    SpeechError { message: String },

    /// Non-fatal warning worth showing to the user (e.g. voice fallback).
    Notice { message: String },

    /// An article was saved to the library.
    ArticleSaved { article_id: i64, title: String },

    /// An article was removed from the library.
    ArticleRemoved { article_id: i64 },

    /// An article was bookmarked.
    BookmarkAdded { article_id: i64 },

    /// A bookmark was removed.
    BookmarkRemoved { article_id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = AppEvent::SpeechStateChanged {
            state: "playing".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"speech_state_changed","state":"playing"}"#);
    }

    #[test]
    fn field_names_are_camel_case() {
        let event = AppEvent::ArticleSaved {
            article_id: 7,
            title: "Title".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""articleId":7"#), "got {json}");
    }
}

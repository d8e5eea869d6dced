//! Main commands enum and primary subcommands.

use clap::Subcommand;

/// Available commands for the lectern reading tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Show resolved paths for all lectern directories
    Paths,

    /// Save an article to the library
    Add {
        /// Article title
        title: String,
        /// Path to an HTML or text file (reads stdin when omitted)
        file: Option<String>,
        /// Original URL the article was captured from
        #[arg(long)]
        url: Option<String>,
        /// Author display name
        #[arg(long)]
        author: Option<String>,
    },

    /// List all saved articles
    List,

    /// Print an article as plain text (records a reading-history view)
    Show {
        /// ID of the article to show
        id: i64,
        /// Don't record this view in the reading history
        #[arg(long)]
        no_track: bool,
    },

    /// Remove an article from the library
    Remove {
        /// ID of the article to remove
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Manage bookmarks
    Bookmark {
        #[command(subcommand)]
        command: BookmarkCommand,
    },

    /// Show the reading history
    History {
        /// Page size
        #[arg(short, long, default_value = "20")]
        limit: u32,
        /// Offset of the first entry
        #[arg(short, long, default_value = "0")]
        offset: u32,
        /// Delete the entire history instead of listing it
        #[arg(long)]
        clear: bool,
    },

    /// List available speech voices grouped by language
    Voices,

    /// Read an article (or ad-hoc text) aloud
    Speak {
        /// ID of the article to read
        id: Option<i64>,
        /// Read this text instead of an article
        #[arg(long, conflicts_with = "id")]
        text: Option<String>,
        /// Voice to use (persisted as the new preference)
        #[arg(long)]
        voice: Option<String>,
        /// Speech rate multiplier (persisted as the new preference)
        #[arg(long)]
        rate: Option<f32>,
        /// Speech pitch multiplier (persisted as the new preference)
        #[arg(long)]
        pitch: Option<f32>,
    },

    /// Show or change speech settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Download the Kokoro TTS voice model bundle
    DownloadVoices,
}

/// Bookmark operations.
#[derive(Subcommand)]
pub enum BookmarkCommand {
    /// Bookmark an article
    Add {
        /// ID of the article to bookmark
        id: i64,
    },
    /// Remove the bookmark on an article
    Remove {
        /// ID of the article to unbookmark
        id: i64,
    },
    /// List bookmarks with excerpts and read-time estimates
    List,
}

/// Speech settings operations.
#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Show the current speech settings
    Show,
    /// Change one or more speech settings
    Set {
        /// Preferred voice ID (see `lectern voices`)
        #[arg(long)]
        voice: Option<String>,
        /// Speech rate multiplier (0.5–3.0)
        #[arg(long)]
        rate: Option<f32>,
        /// Speech pitch multiplier (0.5–2.0)
        #[arg(long)]
        pitch: Option<f32>,
    },
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::parser::Cli;

    use super::*;

    #[test]
    fn speak_text_conflicts_with_article_id() {
        let result = Cli::try_parse_from(["lectern", "speak", "3", "--text", "hello"]);
        assert!(result.is_err());
    }

    #[test]
    fn bookmark_subcommands_parse() {
        let cli = Cli::parse_from(["lectern", "bookmark", "add", "7"]);
        let Some(Commands::Bookmark {
            command: BookmarkCommand::Add { id },
        }) = cli.command
        else {
            panic!("expected bookmark add");
        };
        assert_eq!(id, 7);
    }

    #[test]
    fn settings_set_accepts_partial_flags() {
        let cli = Cli::parse_from(["lectern", "settings", "set", "--rate", "1.5"]);
        let Some(Commands::Settings {
            command: SettingsCommand::Set { voice, rate, pitch },
        }) = cli.command
        else {
            panic!("expected settings set");
        };
        assert_eq!(voice, None);
        assert_eq!(rate, Some(1.5));
        assert_eq!(pitch, None);
    }
}

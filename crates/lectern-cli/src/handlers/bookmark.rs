//! Bookmark command handlers.

use crate::bootstrap::CliContext;
use crate::commands::BookmarkCommand;
use crate::error::CliError;
use crate::presentation::{format_date, print_separator, truncate_string};

/// Execute a bookmark subcommand.
pub async fn execute(ctx: &CliContext, command: BookmarkCommand) -> Result<(), CliError> {
    match command {
        BookmarkCommand::Add { id } => {
            ctx.library().bookmark(id).await?;
            println!("Article {id} bookmarked.");
        }
        BookmarkCommand::Remove { id } => {
            ctx.library().unbookmark(id).await?;
            println!("Bookmark on article {id} removed.");
        }
        BookmarkCommand::List => list(ctx).await?,
    }
    Ok(())
}

/// List bookmarks newest-first with card-style excerpts.
async fn list(ctx: &CliContext) -> Result<(), CliError> {
    let entries = ctx.library().bookmarks().await?;

    if entries.is_empty() {
        println!("No bookmarks yet.");
        println!("Use 'lectern bookmark add <id>' to bookmark an article.");
        return Ok(());
    }

    println!("{} bookmark(s):\n", entries.len());

    for entry in entries {
        let article = &entry.article;
        println!(
            "[{}] {} · {} min read · bookmarked {}",
            article.id,
            truncate_string(&article.title, 60),
            article.read_time_minutes(),
            format_date(entry.created_at),
        );
        println!("    {}", truncate_string(&article.excerpt(), 100));
        print_separator(80);
    }

    Ok(())
}

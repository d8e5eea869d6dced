//! Show command handler.
//!
//! Prints an article as plain text and records a reading-history view.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::format_date;

/// Execute the show command.
pub async fn execute(ctx: &CliContext, id: i64, no_track: bool) -> Result<(), CliError> {
    let article = ctx.library().article(id).await?;

    println!("{}", article.title);
    if let Some(author) = &article.author_name {
        println!("by {author}");
    }
    if let Some(url) = &article.url {
        println!("{url}");
    }
    println!(
        "Added {} · {} min read",
        format_date(article.added_at),
        article.read_time_minutes()
    );
    println!();
    println!("{}", article.plain_text());

    if !no_track {
        ctx.library().record_view(id).await?;
    }
    Ok(())
}

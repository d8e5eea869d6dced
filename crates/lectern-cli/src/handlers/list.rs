//! List command handler.
//!
//! Displays all saved articles in a formatted table.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_date, print_separator, truncate_string};

/// Execute the list command.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let articles = ctx.library().articles().await?;

    if articles.is_empty() {
        println!("No articles in the library.");
        println!("Use 'lectern add <title> [file]' to save your first article.");
        return Ok(());
    }

    println!("Found {} article(s) in the library:\n", articles.len());

    println!(
        "{:<4} {:<40} {:<20} {:<6} {:<17} URL",
        "ID", "Title", "Author", "Read", "Added"
    );
    print_separator(110);

    for article in articles {
        let author = article.author_name.as_deref().unwrap_or("--");
        let url = article.url.as_deref().unwrap_or("--");

        println!(
            "{:<4} {:<40} {:<20} {:<6} {:<17} {}",
            article.id,
            truncate_string(&article.title, 39),
            truncate_string(author, 19),
            format!("{}m", article.read_time_minutes()),
            format_date(article.added_at),
            truncate_string(url, 40),
        );
    }

    Ok(())
}

//! Remove command handler.
//!
//! Deletes an article from the library together with its bookmark and
//! history rows. Deletion at the service layer is immediate; the
//! confirmation prompt here is purely presentation.

use std::io::Write;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::truncate_string;

/// Execute the remove command.
pub async fn execute(ctx: &CliContext, id: i64, force: bool) -> Result<(), CliError> {
    let article = ctx.library().article(id).await?;

    if !force {
        print!(
            "Remove '{}' (ID {}) and its bookmarks and history? [y/N] ",
            truncate_string(&article.title, 50),
            article.id
        );
        std::io::stdout().flush()?;

        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            println!("Remove operation cancelled.");
            return Ok(());
        }
    }

    ctx.library().delete_article(id).await?;
    println!("Article '{}' (ID {}) removed.", article.title, id);
    Ok(())
}

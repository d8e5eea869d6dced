//! Add command handler.
//!
//! Saves an article from a file or stdin. Content may be HTML or plain
//! text; excerpts and speech input are derived from it on demand.

use std::io::Read;

use lectern_core::domain::NewArticle;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the add command.
pub async fn execute(
    ctx: &CliContext,
    title: &str,
    file: Option<&str>,
    url: Option<String>,
    author: Option<String>,
) -> Result<(), CliError> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let saved = ctx
        .library()
        .save_article(NewArticle {
            title: title.to_string(),
            url,
            author_name: author,
            content,
            ..Default::default()
        })
        .await?;

    println!("Saved article '{}' with ID {}.", saved.title, saved.id);
    println!("Estimated read time: {} min.", saved.read_time_minutes());
    Ok(())
}

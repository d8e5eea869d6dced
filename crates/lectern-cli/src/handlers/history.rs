//! History command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_date, print_separator, truncate_string};

/// Execute the history command.
pub async fn execute(ctx: &CliContext, limit: u32, offset: u32, clear: bool) -> Result<(), CliError> {
    if clear {
        ctx.library().clear_history().await?;
        println!("Reading history cleared.");
        return Ok(());
    }

    let page = ctx.library().history(limit, offset).await?;

    if page.total == 0 {
        println!("No reading history yet.");
        return Ok(());
    }

    let last = u64::from(offset) + page.items.len() as u64;
    println!(
        "Reading history ({}–{} of {}):\n",
        offset + 1,
        last,
        page.total
    );

    println!("{:<4} {:<50} {:<17}", "ID", "Title", "Viewed");
    print_separator(75);
    for entry in &page.items {
        println!(
            "{:<4} {:<50} {:<17}",
            entry.article_id,
            truncate_string(&entry.title, 49),
            format_date(entry.viewed_at),
        );
    }

    if page.has_more() {
        println!();
        println!(
            "More entries available — use '--offset {}' for the next page.",
            last
        );
    }

    Ok(())
}

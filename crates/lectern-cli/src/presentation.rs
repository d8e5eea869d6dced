//! Shared output formatting helpers.

use chrono::{DateTime, Utc};

/// Truncate a string to `max_len`, ending in `...` when cut.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let visible: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{visible}...")
}

/// Print a horizontal rule of the given width.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format a timestamp for table display.
#[must_use]
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

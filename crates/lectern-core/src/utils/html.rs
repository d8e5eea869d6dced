//! Plain-text extraction from stored article HTML.
//!
//! Articles are saved with their original markup; excerpts, read-time
//! estimates, and speech input all need the text content only. This is a
//! small tag stripper, not an HTML parser — it handles the markup that
//! article capture actually produces (paragraphs, headings, inline styling,
//! entities) and drops `<script>`/`<style>` contents entirely.

/// Convert article HTML to plain text.
///
/// Tags are removed, block-level boundaries (`</p>`, `</div>`, headings,
/// `<br>`, `<li>`) become single spaces, common entities are decoded, and
/// whitespace is collapsed. Plain-text input passes through unchanged apart
/// from whitespace normalisation.
#[must_use]
pub fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut chars = html.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '<' {
            push_entity_aware(&mut out, html, i, c, &mut chars);
            continue;
        }

        // Inside a tag — find the closing '>'.
        let rest = &html[i..];
        let Some(end) = rest.find('>') else {
            // Unterminated tag: keep the remainder as literal text.
            out.push_str(rest);
            break;
        };

        let tag = &rest[1..end];
        let name = tag_name(tag);

        // Drop the contents of script/style blocks entirely.
        if matches!(name.as_str(), "script" | "style") {
            let close = format!("</{name}");
            if let Some(pos) = html[i + end..].to_ascii_lowercase().find(&close) {
                let skip_to = i + end + pos;
                while let Some(&(j, _)) = chars.peek() {
                    if j >= skip_to {
                        break;
                    }
                    chars.next();
                }
                continue;
            }
        }

        if is_block_boundary(&name) && !out.ends_with(' ') && !out.is_empty() {
            out.push(' ');
        }

        // Advance past the tag body.
        while let Some(&(j, _)) = chars.peek() {
            if j > i + end {
                break;
            }
            chars.next();
        }
    }

    collapse_whitespace(&out)
}

/// Extract the text of the first paragraph from article HTML.
///
/// Returns `None` when the document has no `<p>` element or the first
/// paragraph is empty. Plain-text input yields its first non-empty line.
#[must_use]
pub fn first_paragraph_text(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    if let Some(open) = lower.find("<p") {
        let body_start = html[open..].find('>').map(|o| open + o + 1)?;
        let body_end = lower[body_start..]
            .find("</p>")
            .map_or(html.len(), |o| body_start + o);
        let text = plain_text(&html[body_start..body_end]);
        return if text.is_empty() { None } else { Some(text) };
    }

    html.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(ToString::to_string)
}

/// Extract the first sentence from plain text.
///
/// A sentence ends at `.`, `!`, or `?`; text with no terminator is returned
/// whole.
#[must_use]
pub fn first_sentence(text: &str) -> String {
    let trimmed = text.trim();
    for (i, c) in trimmed.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            return trimmed[..i + c.len_utf8()].to_string();
        }
    }
    trimmed.to_string()
}

// ── Internal helpers ───────────────────────────────────────────────

/// Push a character, decoding an entity if one starts here.
fn push_entity_aware(
    out: &mut String,
    html: &str,
    i: usize,
    c: char,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) {
    if c != '&' {
        out.push(c);
        return;
    }

    let rest = &html[i..];
    for (entity, replacement) in [
        ("&amp;", "&"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&apos;", "'"),
        ("&nbsp;", " "),
    ] {
        if rest.starts_with(entity) {
            out.push_str(replacement);
            // Consume the remainder of the entity.
            for _ in 0..entity.len() - 1 {
                chars.next();
            }
            return;
        }
    }
    out.push(c);
}

/// Lowercased element name of a tag body (`"/p"` → `"p"`, `"br/"` → `"br"`).
fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Whether closing/opening this element should separate surrounding text.
fn is_block_boundary(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "br"
            | "li"
            | "ul"
            | "ol"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "blockquote"
            | "figure"
            | "figcaption"
            | "section"
            | "article"
            | "tr"
    )
}

/// Collapse runs of whitespace into single spaces and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;

    for c in text.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(c);
            last_was_space = false;
        }
    }

    out.trim_end().to_string()
}

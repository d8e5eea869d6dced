//! Text preparation for synthesis — chunking article text.
//!
//! Kokoro works best with sentence-length input. Long article bodies are
//! split at sentence boundaries and merged into chunks of at most
//! [`MAX_CHUNK_CHARS`] characters, so each synthesis call stays within the
//! model's comfort zone and audio can start playing before the whole
//! article has been synthesized. All chunks of one play request are
//! appended to the same playback session.

/// Maximum character length per synthesis chunk (about 2–3 sentences).
pub const MAX_CHUNK_CHARS: usize = 400;

/// Split plain text into synthesis-sized chunks.
///
/// Splits at sentence boundaries (`.` `!` `?` followed by whitespace), then
/// packs sentences into chunks up to the limit. A single sentence longer
/// than the limit is split at clause boundaries, and as a last resort at
/// word boundaries.
#[must_use]
pub fn split_into_chunks(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if text.len() <= MAX_CHUNK_CHARS {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in sentences(text) {
        if sentence.len() > MAX_CHUNK_CHARS {
            flush(&mut chunks, &mut current);
            chunks.extend(split_long_sentence(&sentence));
            continue;
        }

        if !current.is_empty() && current.len() + 1 + sentence.len() > MAX_CHUNK_CHARS {
            flush(&mut chunks, &mut current);
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&sentence);
    }

    flush(&mut chunks, &mut current);
    chunks
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        chunks.push(std::mem::take(current));
    }
}

/// Split text into sentences at terminator-plus-whitespace boundaries.
fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_was_terminator = false;

    for (i, c) in text.char_indices() {
        if prev_was_terminator && c.is_whitespace() {
            let s = text[start..i].trim();
            if !s.is_empty() {
                out.push(s.to_string());
            }
            start = i;
        }
        prev_was_terminator = matches!(c, '.' | '!' | '?');
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail.to_string());
    }
    out
}

/// Split an oversized sentence at clause boundaries (`,` `;` `:` dashes).
fn split_long_sentence(sentence: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for part in sentence.split_inclusive(&[',', ';', ':', '—', '–'][..]) {
        if !current.is_empty() && current.len() + part.len() > MAX_CHUNK_CHARS {
            let taken = std::mem::take(&mut current);
            chunks.push(taken.trim().to_string());
        }
        current.push_str(part);
    }
    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    // Clause splitting can still leave oversized pieces; fall back to words.
    chunks
        .into_iter()
        .flat_map(|c| {
            if c.len() > MAX_CHUNK_CHARS {
                word_split(&c)
            } else {
                vec![c]
            }
        })
        .collect()
}

/// Last-resort split at word boundaries.
fn word_split(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > MAX_CHUNK_CHARS {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_into_chunks("Hello world."), vec!["Hello world."]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_into_chunks("   ").is_empty());
    }

    #[test]
    fn long_text_splits_at_sentence_boundaries() {
        let sentences: Vec<String> = (1..=20)
            .map(|i| format!("Sentence number {i} carries enough words to add real length to the text."))
            .collect();
        let text = sentences.join(" ");
        assert!(text.len() > MAX_CHUNK_CHARS);

        let chunks = split_into_chunks(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= MAX_CHUNK_CHARS, "chunk too long: {} chars", chunk.len());
            assert!(chunk.ends_with('.'), "chunk split mid-sentence: {chunk:?}");
        }
    }

    #[test]
    fn oversized_sentence_splits_at_clauses() {
        let clauses: Vec<String> = (1..=12)
            .map(|i| format!("clause {i} with a generous handful of filler words in it"))
            .collect();
        let sentence = format!("{}.", clauses.join(", "));
        assert!(sentence.len() > MAX_CHUNK_CHARS);

        let chunks = split_into_chunks(&sentence);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= MAX_CHUNK_CHARS);
        }
    }

    #[test]
    fn unbroken_run_of_words_still_splits() {
        let text = "word ".repeat(300);
        let chunks = split_into_chunks(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= MAX_CHUNK_CHARS);
        }
    }

    #[test]
    fn abbreviation_heavy_text_does_not_lose_content() {
        let text = format!("{} The end.", "Dr. Smith went to Washington. ".repeat(30));
        let chunks = split_into_chunks(&text);
        let rejoined = chunks.join(" ");
        assert!(rejoined.contains("The end."));
    }
}

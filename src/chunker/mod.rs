//! Splits outbound text into transport-sized segments.

/// Split `text` into chunks of at most `limit` characters.
///
/// When a chunk boundary falls mid-text, prefer cutting at a newline that
/// sits at or past the `limit / 2` offset so breaks land between lines
/// rather than mid-sentence. Leading whitespace introduced at each split
/// point is stripped from the remainder.
pub fn chunk(text: &str, limit: usize) -> Vec<String> {
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }
    // A zero limit would never make progress.
    let limit = limit.max(1);

    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if remaining.chars().count() <= limit {
            chunks.push(remaining.to_string());
            break;
        }

        let window_end = byte_offset_of_char(remaining, limit);
        let window = &remaining[..window_end];
        let half = byte_offset_of_char(window, limit / 2);

        let cut = match window[half..].rfind('\n') {
            Some(pos) => half + pos,
            None => window_end,
        };

        chunks.push(remaining[..cut].to_string());
        remaining = remaining[cut..].trim_start();
    }

    chunks
}

/// Byte offset of the `n`-th character, or the full length if shorter.
fn byte_offset_of_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

//! Plain-text helpers shared by SEO derivation and prompting.

/// Whether a line opens with a bullet marker (`*`, `-` or `+` then whitespace).
///
/// Returns the remainder of the line after the marker.
pub fn bullet_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let mut chars = trimmed.chars();
    let marker = chars.next()?;
    if !matches!(marker, '*' | '-' | '+') {
        return None;
    }
    let rest = chars.as_str();
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Strip markdown-lite markup and collapse whitespace.
///
/// Removes `**` emphasis markers and leading bullet markers. Everything else
/// is kept as written.
pub fn strip_markup(text: &str) -> String {
    let joined = text
        .lines()
        .map(|line| bullet_item(line).unwrap_or(line).replace("**", ""))
        .collect::<Vec<_>>()
        .join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters, cutting at a word boundary.
///
/// Falls back to a hard cut when the first word alone exceeds the limit, so
/// a non-empty input always yields a non-empty output.
pub fn truncate_at_word_boundary(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let head = &text[..cut];

    // The character right after the cut decides whether `head` ends on a word.
    let ends_on_boundary = text[cut..].starts_with(char::is_whitespace);
    let trimmed = if ends_on_boundary {
        head
    } else {
        match head.rfind(char::is_whitespace) {
            Some(idx) if idx > 0 => &head[..idx],
            _ => head,
        }
    };

    trimmed
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '-'))
        .to_string()
}

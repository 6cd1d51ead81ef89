//! Conversation title derivation.

/// Title given to a conversation before its first human turn.
pub const PLACEHOLDER_TITLE: &str = "New conversation";

/// Maximum number of characters kept from the opening message.
pub const TITLE_MAX_CHARS: usize = 40;

/// Appended when the opening message was cut.
pub const CONTINUATION_MARKER: &str = "...";

/// Derive a title from the opening human message.
///
/// The text is trimmed; if it is longer than [`TITLE_MAX_CHARS`] characters
/// (Unicode scalar values, not bytes), the first [`TITLE_MAX_CHARS`] are kept
/// and [`CONTINUATION_MARKER`] is appended. Blank text falls back to the
/// placeholder.
pub fn derive_title(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER_TITLE.to_string();
    }
    if trimmed.chars().count() <= TITLE_MAX_CHARS {
        return trimmed.to_string();
    }

    let prefix: String = trimmed.chars().take(TITLE_MAX_CHARS).collect();
    format!("{prefix}{CONTINUATION_MARKER}")
}

/// Resolve a caller-supplied title, falling back to the placeholder.
pub fn initial_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => PLACEHOLDER_TITLE.to_string(),
    }
}

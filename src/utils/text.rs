/// First `max_chars` characters of `text` followed by "...".
///
/// The marker is always appended, matching the results panel listing.
/// Counts characters rather than bytes so multi-byte ingredient names never
/// split mid-character.
pub fn preview(text: &str, max_chars: usize) -> String {
    let kept: String = text.chars().take(max_chars).collect();
    format!("{kept}...")
}

/// Format a similarity score for display
pub fn format_score(score: f64) -> String {
    format!("{score:.3}")
}

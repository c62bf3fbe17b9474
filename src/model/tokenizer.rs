use crate::model::stop_words::is_stop_word;
use regex::Regex;
use std::sync::OnceLock;

/// Words of two or more word characters
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// Split a normalized ingredient string into vocabulary tokens.
///
/// Fit and transform both go through here, so a query can only ever hit
/// tokens the model could have learned.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    token_regex()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
}

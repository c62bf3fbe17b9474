/// Container prefix left behind by R-style `c("a", "b")` list exports.
const LIST_PREFIX: &str = "c(";

/// Normalize a raw ingredient list into a canonical token string.
///
/// The text is lowercased, stripped of quotes and list notation, split on
/// commas, trimmed, and rejoined with single spaces. Missing input yields an
/// empty string. Corpus rows and user queries both go through this so they
/// share vocabulary conventions.
pub fn normalize(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let mut cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | ')'))
        .collect();

    // Removing one prefix can expose another ("cc((" -> "c(")
    while cleaned.contains(LIST_PREFIX) {
        cleaned = cleaned.replace(LIST_PREFIX, "");
    }

    cleaned
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

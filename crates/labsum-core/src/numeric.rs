//! Decimal normalization and number scanning.

use std::sync::LazyLock;

use regex::Regex;

static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)*").expect("Invalid number regex"));

/// Normalizes a captured number: commas become dots and trailing separators
/// are dropped. Returns `None` when no digit is present.
pub fn normalize_decimal(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches(['.', ',']);
    if !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(trimmed.replace(',', "."))
}

/// Normalizes a number captured together with an optional `<` marker.
pub fn normalize_bounded(less_than: bool, raw: &str) -> Option<String> {
    let value = normalize_decimal(raw)?;
    Some(if less_than { format!("<{value}") } else { value })
}

/// First number embedded in `text`, decimal-normalized and parsed.
pub fn first_number(text: &str) -> Option<f64> {
    let found = NUMBER_REGEX.find(text)?;
    normalize_decimal(found.as_str())?.parse().ok()
}

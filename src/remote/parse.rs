use std::sync::LazyLock;

use regex::Regex;

static STANDALONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,3})\b").expect("valid score pattern"));

/// Extracts a `0..=100` score from a free-form model response.
///
/// The whole trimmed response is tried as an integer first, then each standalone
/// 1-3 digit number in order. Zero is a valid score.
pub fn parse_score(content: &str) -> Option<u8> {
    let trimmed = content.trim();

    if let Ok(value) = trimmed.parse::<i64>() {
        if (0..=100).contains(&value) {
            return u8::try_from(value).ok();
        }
    }

    STANDALONE_NUMBER
        .captures_iter(trimmed)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u16>().ok())
        .find(|value| *value <= 100)
        .and_then(|value| u8::try_from(value).ok())
}

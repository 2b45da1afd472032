//! Text canonicalization and offer text synthesis.

/// Offer records and their text renderings.
pub mod offer;


pub use offer::{OfferInput, OfferRecord};

/// Canonicalizes raw text: non-breaking spaces become spaces, whitespace runs collapse to
/// one space, and the result is trimmed.
///
/// The ASCII information separators U+001C..=U+001F also count as whitespace.
///
/// Pure and idempotent.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split(is_separator) {
        if word.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{00A0}' | '\u{1C}'..='\u{1F}')
}

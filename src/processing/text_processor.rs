//! Text normalization
//!
//! Every extractor downstream works on the canonical form produced here:
//! lowercase, noise characters replaced by spaces, whitespace collapsed.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not a letter, digit, whitespace or one of `. , - @ + #`.
static NOISE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{N}\s.,@+#\-]").expect("Invalid noise regex")
});

static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Normalize raw text into the canonical form used for pattern matching.
///
/// Empty input yields an empty string. The function is pure and idempotent.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let denoised = NOISE_REGEX.replace_all(&lowered, " ");
    normalize_whitespace(&denoised)
}

/// Collapse whitespace runs to a single space and trim both ends
fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Number of whitespace separated tokens in already normalized text
pub fn word_count(normalized: &str) -> usize {
    normalized.split_whitespace().count()
}

//! Splits free-text ingredient fields into comparable tokens.
//!
//! A token is one comma separated piece, trimmed and lowercased. Nothing else
//! is interpreted: quantities and units are never read from the text.

const DELIMITER: char = ',';

/// Normalize a single ingredient name (trim whitespace, lowercase).
pub fn normalize_token(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Tokens of `text` in input order, empty pieces dropped.
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(DELIMITER)
        .map(normalize_token)
        .filter(|token| !token.is_empty())
}

pub fn normalize(text: &str) -> Vec<String> {
    tokens(text).collect()
}

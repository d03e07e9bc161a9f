//! Request validation for the character service API
//!
//! Character ids arrive as path segments; payloads for explicit refreshes
//! arrive as arbitrary JSON bodies.

/// First code point accepted as a character id (CJK Unified Ideographs)
pub const FIRST_HANZI: char = '\u{4e00}';

/// Last code point accepted as a character id
pub const LAST_HANZI: char = '\u{9fa5}';

/// Validates a character id taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_character(id: &str) -> Option<String> {
    let mut chars = id.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Some("Character cannot be empty".to_string()),
        (Some(_), Some(_)) => Some(format!("Expected a single character, got '{}'", id)),
        (Some(c), None) if !(FIRST_HANZI..=LAST_HANZI).contains(&c) => Some(format!(
            "'{}' is not a CJK unified ideograph (U+4E00..U+9FA5)",
            c
        )),
        _ => None,
    }
}

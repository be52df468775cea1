//! Identifier normalization for documents keyed by free text.

/// Longest identifier the backend accepts.
pub const MAX_IDENTIFIER_LEN: usize = 36;

/// Normalize a free-text identifier.
///
/// Lower-cases the input, drops every character outside `[a-z0-9.-]` and
/// keeps at most [`MAX_IDENTIFIER_LEN`] characters. Missing input yields an
/// empty string. Existing records are keyed by this exact form, so the
/// character class and truncation must not change.
///
/// ```
/// use core_content::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier(Some("John_DOE!! 123")), "johndoe123");
/// assert_eq!(sanitize_identifier(None), "");
/// ```
pub fn sanitize_identifier(input: Option<&str>) -> String {
    let Some(input) = input else {
        return String::new();
    };

    input
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '.' | '-'))
        .take(MAX_IDENTIFIER_LEN)
        .collect()
}

//! Name normalization for case- and accent-insensitive matching.
//!
//! Ingredient and category names are compared through [`normalize_name`]
//! everywhere: selection tokens, category filters, search patterns and the
//! persisted `name_key` column that backs the uniqueness constraints.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a display name into its comparison key.
///
/// Trims surrounding whitespace, decomposes to NFD, drops combining marks
/// and lowercases. `"  Limón "` becomes `"limon"`.
pub fn normalize_name(input: &str) -> String {
    input
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Build a `LIKE` pattern for substring search over `name_key` columns.
///
/// Returns `None` for blank input so callers can skip the filter entirely.
/// `%`, `_` and `\` in the term are escaped; queries must use `ESCAPE '\'`.
pub fn search_pattern(term: &str) -> Option<String> {
    let normalized = normalize_name(term);
    if normalized.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(normalized.len() + 2);
    escaped.push('%');
    for c in normalized.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize_name("Limón"), "limon");
        assert_eq!(normalize_name("AJÍ AMARILLO"), "aji amarillo");
        assert_eq!(normalize_name("Ñoquis"), "noquis");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(normalize_name("  Sal \t"), "sal");
    }

    #[test]
    fn precomposed_and_decomposed_forms_agree() {
        // "é" as one code point vs "e" + combining acute accent.
        assert_eq!(normalize_name("caf\u{e9}"), normalize_name("cafe\u{301}"));
    }

    #[test]
    fn blank_normalizes_to_empty() {
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn search_pattern_wraps_normalized_term() {
        assert_eq!(search_pattern("Limón").as_deref(), Some("%limon%"));
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern("50%_off").as_deref(), Some("%50\\%\\_off%"));
    }

    #[test]
    fn search_pattern_blank_is_none() {
        assert!(search_pattern("  ").is_none());
    }
}

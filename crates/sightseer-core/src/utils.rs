//! Utility functions for text cleaning and truncation.

use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// Marker appended to text cut by [`truncate_display`].
pub const ELLIPSIS: &str = "...";

/// Drops ill-formed UTF-8 sequences, keeping every well-formed character.
///
/// Valid input is returned borrowed and unchanged, so cleaning is idempotent.
///
/// # Examples
///
/// ```
/// use sightseer_core::utils::clean_utf8;
/// assert_eq!(clean_utf8(b"Caf\xC3\xA9"), "Café");
/// assert_eq!(clean_utf8(b"Ca\xFFf\xC3"), "Caf");
/// ```
#[must_use]
pub fn clean_utf8(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(valid) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(valid);
    }

    let mut cleaned = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        cleaned.push_str(chunk.valid());
    }
    Cow::Owned(cleaned)
}

/// Cuts `text` to at most `max_chars` grapheme clusters.
///
/// When the text is longer, the tail is replaced with [`ELLIPSIS`] so the
/// result is exactly `max_chars` graphemes long. Grapheme-based counting keeps
/// emoji and combined characters intact.
///
/// # Examples
///
/// ```
/// use sightseer_core::utils::truncate_display;
/// assert_eq!(truncate_display("Красная площадь", 50), "Красная площадь");
/// assert_eq!(truncate_display("abcdefghij", 8), "abcde...");
/// ```
#[must_use]
pub fn truncate_display(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.graphemes(true).nth(max_chars).is_none() {
        return Cow::Borrowed(text);
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let end = text
        .grapheme_indices(true)
        .nth(keep)
        .map_or(text.len(), |(pos, _)| pos);
    Cow::Owned(format!("{}{ELLIPSIS}", &text[..end]))
}

/// Safely truncates a string to a maximum character length (not bytes).
///
/// # Examples
///
/// ```
/// use sightseer_core::utils::truncate_str;
/// assert_eq!(truncate_str("Привет, мир!", 6), "Привет");
/// ```
pub fn truncate_str(s: impl AsRef<str>, max_chars: usize) -> String {
    let s = s.as_ref();
    s.char_indices()
        .nth(max_chars)
        .map_or_else(|| s.to_string(), |(pos, _)| s[..pos].to_string())
}

/// True when the text has nothing but whitespace in it.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clean_utf8_valid_is_borrowed() {
        let input = "Эрмитаж 🏛️";
        assert!(matches!(clean_utf8(input.as_bytes()), Cow::Borrowed(s) if s == input));
    }

    #[test]
    fn test_clean_utf8_drops_invalid_sequences() {
        // Lone continuation byte, truncated 3-byte sequence, overlong encoding
        let input = b"A\x80B\xE2\x82C\xC0\xAFD";
        assert_eq!(clean_utf8(input), "ABCD");
    }

    #[test]
    fn test_clean_utf8_keeps_multibyte_neighbours() {
        let mut input = "Москва".as_bytes().to_vec();
        input.insert(4, 0xFF);
        assert_eq!(clean_utf8(&input), "Москва");
    }

    #[test]
    fn test_truncate_display_short_text_untouched() {
        assert_eq!(truncate_display("short", 50), "short");
        assert_eq!(truncate_display("", 50), "");
    }

    #[test]
    fn test_truncate_display_exact_length_untouched() {
        let text = "x".repeat(50);
        assert_eq!(truncate_display(&text, 50), text);
    }

    #[test]
    fn test_truncate_display_cuts_to_limit() {
        let text = "y".repeat(51);
        let cut = truncate_display(&text, 50);
        assert_eq!(cut.graphemes(true).count(), 50);
        assert!(cut.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_truncate_display_respects_graphemes() {
        let text = "👨‍👩‍👧".repeat(10);
        let cut = truncate_display(&text, 6);
        assert_eq!(cut, format!("{}{ELLIPSIS}", "👨‍👩‍👧".repeat(3)));
    }

    #[test]
    fn test_truncate_str_unicode() {
        let s = "Привет, мир!";
        assert_eq!(truncate_str(s, 6), "Привет");
        assert_eq!(truncate_str(s, 50), "Привет, мир!");
    }

    proptest! {
        /// Cleaning text that is already well-formed returns it unchanged.
        #[test]
        fn clean_is_identity_on_valid_text(s in "\\PC*") {
            prop_assert_eq!(clean_utf8(s.as_bytes()), s.as_str());
        }

        /// Cleaning arbitrary bytes yields text that cleans to itself.
        #[test]
        fn clean_is_idempotent(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let once = clean_utf8(&bytes).into_owned();
            prop_assert_eq!(clean_utf8(once.as_bytes()), once.as_str());
        }

        /// Truncation never exceeds the requested width.
        #[test]
        fn truncate_stays_within_limit(s in "\\PC*", max in 4usize..80) {
            let cut = truncate_display(&s, max);
            prop_assert!(cut.graphemes(true).count() <= max);
        }
    }
}

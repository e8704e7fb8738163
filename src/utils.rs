//! Utility functions for common operations.

/// Maximum number of words accepted in a section's initial feedback.
pub const WORD_LIMIT: usize = 250;

/// Suggested length shown next to the word counter.
pub const RECOMMENDED_WORDS: usize = 200;

/// Count whitespace-delimited words.
///
/// Leading and trailing whitespace is ignored and runs of whitespace count as
/// a single separator, so empty or blank input yields 0.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Whether the text exceeds [`WORD_LIMIT`].
pub fn is_over_limit(text: &str) -> bool {
    word_count(text) > WORD_LIMIT
}

/// Truncate to at most `max_chars` characters, appending "..." when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        return text.to_string();
    }
    let take_chars = max_chars.saturating_sub(3);
    let truncated: String = text.chars().take(take_chars).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_empty() {
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_word_count_whitespace_only() {
        assert_eq!(word_count("   \t\n  "), 0);
    }

    #[test]
    fn test_word_count_irregular_spacing() {
        assert_eq!(word_count("  a   b  c "), 3);
    }

    #[test]
    fn test_word_count_single_word() {
        assert_eq!(word_count("one"), 1);
    }

    #[test]
    fn test_word_count_newlines_and_tabs() {
        assert_eq!(word_count("first\nsecond\tthird\r\nfourth"), 4);
    }

    #[test]
    fn test_is_over_limit_boundary() {
        let at_limit = vec!["word"; WORD_LIMIT].join(" ");
        assert!(!is_over_limit(&at_limit));

        let over_limit = vec!["word"; WORD_LIMIT + 1].join(" ");
        assert!(is_over_limit(&over_limit));
    }

    #[test]
    fn test_truncate_chars_short_text_unchanged() {
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn test_truncate_chars_long_text() {
        assert_eq!(truncate_chars("abcdefghij", 8), "abcde...");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("ééééééé", 5), "éé...");
    }
}

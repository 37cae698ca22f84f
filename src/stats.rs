//! Live document statistics.
//!
//! Word, character and line counts shown in the status bar. All three are
//! pure functions of the buffer text and are recomputed on every render.

/// Statistics derived from the current document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    /// Whitespace-delimited token count of the trimmed text
    pub words: usize,
    /// Raw character count
    pub characters: usize,
    /// Line count (line breaks + 1)
    pub lines: usize,
}

/// Compute statistics for a document text.
///
/// An empty document has one line (a single empty one), matching what the
/// editor pane displays.
///
/// # Example
///
/// ```
/// use markpane::stats::document_stats;
///
/// let stats = document_stats("Hello world");
/// assert_eq!(stats.words, 2);
/// assert_eq!(stats.lines, 1);
/// ```
pub fn document_stats(text: &str) -> DocumentStats {
    DocumentStats {
        words: text.split_whitespace().count(),
        characters: text.chars().count(),
        lines: text.matches('\n').count() + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_text() {
        let stats = document_stats("");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 0);
        assert_eq!(stats.lines, 1);
    }

    #[test]
    fn test_two_line_text() {
        let stats = document_stats("a b\nc");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.characters, 5);
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn test_surrounding_whitespace_ignored_for_words() {
        let stats = document_stats("  hello   world  ");
        assert_eq!(stats.words, 2);
        assert_eq!(stats.characters, 17);
    }

    #[test]
    fn test_trailing_newline_counts_as_line() {
        let stats = document_stats("hello\n");
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn test_multibyte_characters_counted_once() {
        let stats = document_stats("café");
        assert_eq!(stats.characters, 4);
        assert_eq!(stats.words, 1);
    }

    #[test]
    fn test_recomputation_is_deterministic() {
        let text = "# Title\n\nSome *body* text.";
        assert_eq!(document_stats(text), document_stats(text));
    }

    proptest! {
        #[test]
        fn prop_lines_is_breaks_plus_one(text in ".*") {
            let stats = document_stats(&text);
            prop_assert_eq!(stats.lines, text.matches('\n').count() + 1);
        }

        #[test]
        fn prop_words_never_exceed_characters(text in ".*") {
            let stats = document_stats(&text);
            prop_assert!(stats.words <= stats.characters.max(1));
        }
    }
}

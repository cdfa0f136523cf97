//! Line-list conventions shared across the engine.
//!
//! Content travels through the engine as a list of ending-free lines. The
//! presence of a final newline is encoded as a trailing empty element, so
//! joining with `\n` round-trips the text byte for byte.

/// Split text into ending-free lines under the trailing-element convention.
///
/// Empty text produces an empty list; text ending in `\n` produces a list
/// ending in an empty element. Carriage returns are left inside the line
/// content untouched, matching how line-based diff tools treat them.
pub fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_newline_becomes_empty_element() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
    }

    #[test]
    fn no_trailing_newline_no_empty_element() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn empty_text_is_empty_list() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn lone_newline_is_one_empty_line_plus_marker() {
        assert_eq!(split_lines("\n"), vec!["", ""]);
    }

    #[test]
    fn join_round_trips_exactly() {
        for text in ["a\nb\n", "a\nb", "", "\n", "x\r\ny\r\n"] {
            assert_eq!(split_lines(text).join("\n"), text);
        }
    }
}

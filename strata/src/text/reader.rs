//! Splitting a character stream into physical lines.
//!
//! The writer must reproduce the original mix of line-ending styles
//! token by token, so the reader records which terminator sequence
//! ended each line rather than discarding it.

use crate::text::line_ending::LineEnding;
use crate::text::token::RawLine;

/// Splits `text` into physical lines, recording per-line terminators.
///
/// A final line without a terminator is emitted with
/// [`LineEnding::None`]. Empty input yields no lines.
#[must_use]
pub(crate) fn split_lines(text: &str) -> Vec<RawLine> {
    let mut lines = Vec::new();
    let mut content = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                lines.push(RawLine::new(std::mem::take(&mut content), LineEnding::Unix));
            }
            '\r' => {
                let ending = if chars.peek() == Some(&'\n') {
                    chars.next();
                    LineEnding::Windows
                } else {
                    LineEnding::Mac
                };
                lines.push(RawLine::new(std::mem::take(&mut content), ending));
            }
            other => content.push(other),
        }
    }

    if !content.is_empty() {
        lines.push(RawLine::new(content, LineEnding::None));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_single_unterminated_line() {
        let lines = split_lines("abc");
        assert_eq!(lines, vec![RawLine::new("abc", LineEnding::None)]);
    }

    #[test]
    fn test_unix_lines() {
        let lines = split_lines("a\nb\n");
        assert_eq!(
            lines,
            vec![
                RawLine::new("a", LineEnding::Unix),
                RawLine::new("b", LineEnding::Unix),
            ]
        );
    }

    #[test]
    fn test_mixed_endings() {
        let lines = split_lines("a\r\nb\rc\nd");
        assert_eq!(
            lines,
            vec![
                RawLine::new("a", LineEnding::Windows),
                RawLine::new("b", LineEnding::Mac),
                RawLine::new("c", LineEnding::Unix),
                RawLine::new("d", LineEnding::None),
            ]
        );
    }

    #[test]
    fn test_consecutive_blank_lines() {
        let lines = split_lines("\n\r\n\r");
        assert_eq!(
            lines,
            vec![
                RawLine::new("", LineEnding::Unix),
                RawLine::new("", LineEnding::Windows),
                RawLine::new("", LineEnding::Mac),
            ]
        );
    }

    #[test]
    fn test_cr_at_end_is_mac() {
        let lines = split_lines("a\r");
        assert_eq!(lines, vec![RawLine::new("a", LineEnding::Mac)]);
    }
}

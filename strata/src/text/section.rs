//! A named (or anonymous) ordered group of tokens.
//!
//! Sections own their tokens exclusively. The classification of raw
//! lines into tokens lives here, so the document reader only has to
//! recognize header lines and hand everything else to the current
//! section.

use crate::text::line_ending::LineEnding;
use crate::text::token::{Instruction, InstructionOp, RawLine, Token};

/// An ordered group of tokens under one `[Name]` header.
///
/// `name == None` denotes the implicit section before the first
/// header. `header_lead_trim`/`header_trail_trim` capture incidental
/// whitespace around the header line so round-tripping is exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The section name, without brackets. `None` for the implicit
    /// pre-header section.
    pub name: Option<String>,
    /// The tokens of this section, in file order.
    pub tokens: Vec<Token>,
    /// The terminator of the header line.
    pub line_ending: LineEnding,
    /// Whitespace that preceded `[` on the header line.
    pub header_lead_trim: Option<String>,
    /// Whitespace that followed `]` on the header line.
    pub header_trail_trim: Option<String>,
}

impl Section {
    /// Creates an empty anonymous section.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            name: None,
            tokens: Vec::new(),
            line_ending: LineEnding::Unspecified,
            header_lead_trim: None,
            header_trail_trim: None,
        }
    }

    /// Creates an empty named section.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            tokens: Vec::new(),
            line_ending: LineEnding::Unspecified,
            header_lead_trim: None,
            header_trail_trim: None,
        }
    }

    /// Classifies one physical line and appends it to this section.
    ///
    /// Consecutive whitespace lines fold into a single whitespace
    /// token, and likewise for comments; everything else produces one
    /// token per line. Header lines are the document reader's concern
    /// and must not reach this method.
    pub fn push_line(&mut self, line: RawLine) {
        let trimmed = line.content.trim();

        if trimmed.is_empty() {
            if let Some(Token::Whitespace { lines }) = self.tokens.last_mut() {
                lines.push(line);
            } else {
                self.tokens.push(Token::Whitespace { lines: vec![line] });
            }
            return;
        }

        if trimmed.starts_with(';') {
            // The raw line is stored so the original formatting
            // survives a round trip.
            if let Some(Token::Comment { lines }) = self.tokens.last_mut() {
                lines.push(line);
            } else {
                self.tokens.push(Token::Comment { lines: vec![line] });
            }
            return;
        }

        if let Some(rest) = line.content.strip_prefix('!') {
            if !rest.trim().is_empty() {
                self.tokens.push(Token::Instruction(Instruction::new(
                    InstructionOp::RemoveAll,
                    rest,
                    None,
                    line.ending,
                )));
                return;
            }
        }

        if let Some(eq) = line.content.find('=') {
            let key_part = &line.content[..eq];
            let value = line.content[eq + 1..].to_string();
            let (op, key) = match key_part.chars().next() {
                Some('+') => (InstructionOp::Add, &key_part[1..]),
                Some('.') => (InstructionOp::AddForce, &key_part[1..]),
                Some('-') => (InstructionOp::Remove, &key_part[1..]),
                _ => (InstructionOp::Set, key_part),
            };
            self.tokens.push(Token::Instruction(Instruction::new(
                op,
                key,
                Some(value),
                line.ending,
            )));
            return;
        }

        self.tokens.push(Token::Text {
            content: line.content,
            line_ending: line.ending,
        });
    }

    /// Appends an instruction token, for programmatic edits.
    pub fn add_instruction(&mut self, instruction: Instruction) {
        self.tokens.push(Token::Instruction(instruction));
    }

    /// Serializes the header (if named) and every token into `out`.
    pub fn write_to(&self, out: &mut String, default_newline: &str) {
        if let Some(name) = &self.name {
            if let Some(lead) = &self.header_lead_trim {
                out.push_str(lead);
            }
            out.push('[');
            out.push_str(name);
            out.push(']');
            if let Some(trail) = &self.header_trail_trim {
                out.push_str(trail);
            }
            out.push_str(self.line_ending.render(default_newline));
        }
        for token in &self.tokens {
            token.write_to(out, default_newline);
        }
    }

    /// Folds consecutive same-kind whitespace or comment tokens into
    /// the earlier token, scanning back-to-front. Non-adjacent or
    /// differing-kind tokens are untouched.
    pub fn merge_consecutive_tokens(&mut self) {
        let mut index = self.tokens.len();
        while index >= 2 {
            index -= 1;
            let mergeable = matches!(
                (&self.tokens[index - 1], &self.tokens[index]),
                (Token::Whitespace { .. }, Token::Whitespace { .. })
                    | (Token::Comment { .. }, Token::Comment { .. })
            );
            if !mergeable {
                continue;
            }
            let later = self.tokens.remove(index);
            let (Token::Whitespace { lines: later_lines } | Token::Comment { lines: later_lines }) =
                later
            else {
                unreachable!("mergeable tokens are whitespace or comment runs");
            };
            match &mut self.tokens[index - 1] {
                Token::Whitespace { lines } | Token::Comment { lines } => {
                    lines.extend(later_lines);
                }
                _ => unreachable!("mergeable tokens are whitespace or comment runs"),
            }
        }
    }

    /// Replaces every whitespace token's lines with a single synthetic
    /// blank line carrying `newline`, collapsing any number of blank
    /// physical lines to exactly one.
    ///
    /// Apply after [`Section::merge_consecutive_tokens`]; otherwise
    /// adjacent whitespace tokens each keep one blank line.
    pub fn condense_whitespace(&mut self, newline: LineEnding) {
        for token in &mut self.tokens {
            if let Token::Whitespace { lines } = token {
                *lines = vec![RawLine::new("", newline)];
            }
        }
    }

    /// Forces `ending` onto the header line and every token.
    pub fn set_line_ending(&mut self, ending: LineEnding) {
        self.line_ending = ending;
        for token in &mut self.tokens {
            token.set_line_ending(ending);
        }
    }

    /// The first non-unspecified line ending in this section, checking
    /// the header before the tokens.
    #[must_use]
    pub fn first_line_ending(&self) -> LineEnding {
        if self.line_ending != LineEnding::Unspecified {
            return self.line_ending;
        }
        for token in &self.tokens {
            let ending = token.first_line_ending();
            if ending != LineEnding::Unspecified {
                return ending;
            }
        }
        LineEnding::Unspecified
    }

    /// Appends every instruction in this section whose key equals
    /// `key`, in file order.
    pub fn find_key_instructions<'a>(&'a self, key: &str, out: &mut Vec<&'a Instruction>) {
        for token in &self.tokens {
            if let Some(instruction) = token.as_instruction() {
                if instruction.key == key {
                    out.push(instruction);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(section: &Section) -> String {
        let mut out = String::new();
        section.write_to(&mut out, "\n");
        out
    }

    fn push(section: &mut Section, content: &str, ending: LineEnding) {
        section.push_line(RawLine::new(content, ending));
    }

    #[test]
    fn test_whitespace_lines_fold() {
        let mut section = Section::anonymous();
        push(&mut section, "", LineEnding::Unix);
        push(&mut section, "   ", LineEnding::Windows);
        assert_eq!(section.tokens.len(), 1);
        assert!(section.tokens[0].is_whitespace());
        assert_eq!(render(&section), "\n   \r\n");
    }

    #[test]
    fn test_comment_lines_fold_and_keep_raw() {
        let mut section = Section::anonymous();
        push(&mut section, "; first", LineEnding::Unix);
        push(&mut section, "  ;second", LineEnding::Unix);
        assert_eq!(section.tokens.len(), 1);
        assert!(section.tokens[0].is_comment());
        assert_eq!(render(&section), "; first\n  ;second\n");
    }

    #[test]
    fn test_whitespace_then_comment_do_not_fold() {
        let mut section = Section::anonymous();
        push(&mut section, "", LineEnding::Unix);
        push(&mut section, "; c", LineEnding::Unix);
        push(&mut section, "", LineEnding::Unix);
        assert_eq!(section.tokens.len(), 3);
    }

    #[test]
    fn test_remove_all_keeps_equals_in_key() {
        let mut section = Section::anonymous();
        push(&mut section, "!Key=stuff", LineEnding::Unix);
        let Token::Instruction(instruction) = &section.tokens[0] else {
            panic!("expected instruction");
        };
        assert_eq!(instruction.op, InstructionOp::RemoveAll);
        assert_eq!(instruction.key, "Key=stuff");
        assert_eq!(instruction.value, None);
        assert_eq!(render(&section), "!Key=stuff\n");
    }

    #[test]
    fn test_bang_with_blank_remainder_is_text() {
        let mut section = Section::anonymous();
        push(&mut section, "!  ", LineEnding::Unix);
        assert!(matches!(section.tokens[0], Token::Text { .. }));
        assert_eq!(render(&section), "!  \n");
    }

    #[test]
    fn test_prefix_dispatch() {
        let mut section = Section::anonymous();
        push(&mut section, "A=1", LineEnding::Unix);
        push(&mut section, "+B=2", LineEnding::Unix);
        push(&mut section, ".C=3", LineEnding::Unix);
        push(&mut section, "-D=4", LineEnding::Unix);
        let ops: Vec<InstructionOp> = section
            .tokens
            .iter()
            .filter_map(Token::as_instruction)
            .map(|i| i.op)
            .collect();
        assert_eq!(
            ops,
            vec![
                InstructionOp::Set,
                InstructionOp::Add,
                InstructionOp::AddForce,
                InstructionOp::Remove,
            ]
        );
    }

    #[test]
    fn test_value_keeps_further_equals() {
        let mut section = Section::anonymous();
        push(&mut section, "Key=a=b=c", LineEnding::Unix);
        let instruction = section.tokens[0].as_instruction().unwrap();
        assert_eq!(instruction.key, "Key");
        assert_eq!(instruction.value.as_deref(), Some("a=b=c"));
    }

    #[test]
    fn test_empty_key_after_strip_is_legal() {
        let mut section = Section::anonymous();
        push(&mut section, "+=v", LineEnding::Unix);
        let instruction = section.tokens[0].as_instruction().unwrap();
        assert_eq!(instruction.op, InstructionOp::Add);
        assert_eq!(instruction.key, "");
        assert_eq!(render(&section), "+=v\n");
    }

    #[test]
    fn test_unparseable_line_is_verbatim_text() {
        let mut section = Section::anonymous();
        push(&mut section, "  not a setting  ", LineEnding::Windows);
        assert!(matches!(section.tokens[0], Token::Text { .. }));
        assert_eq!(render(&section), "  not a setting  \r\n");
    }

    #[test]
    fn test_merge_consecutive_tokens() {
        let mut section = Section::anonymous();
        // Build adjacency artificially; push_line folds on its own.
        section.tokens = vec![
            Token::Whitespace {
                lines: vec![RawLine::new("", LineEnding::Unix)],
            },
            Token::Whitespace {
                lines: vec![RawLine::new(" ", LineEnding::Unix)],
            },
            Token::Comment {
                lines: vec![RawLine::new(";a", LineEnding::Unix)],
            },
            Token::Comment {
                lines: vec![RawLine::new(";b", LineEnding::Unix)],
            },
            Token::Whitespace {
                lines: vec![RawLine::new("", LineEnding::Unix)],
            },
        ];
        section.merge_consecutive_tokens();
        assert_eq!(section.tokens.len(), 3);
        assert_eq!(render(&section), "\n \n;a\n;b\n\n");
    }

    #[test]
    fn test_merge_consecutive_is_idempotent() {
        let mut section = Section::anonymous();
        section.tokens = vec![
            Token::Whitespace {
                lines: vec![RawLine::new("", LineEnding::Unix)],
            },
            Token::Whitespace {
                lines: vec![RawLine::new("", LineEnding::Unix)],
            },
        ];
        section.merge_consecutive_tokens();
        let once = section.clone();
        section.merge_consecutive_tokens();
        assert_eq!(section, once);
    }

    #[test]
    fn test_condense_whitespace() {
        let mut section = Section::anonymous();
        push(&mut section, "", LineEnding::Unix);
        push(&mut section, "  ", LineEnding::Windows);
        push(&mut section, "", LineEnding::Unix);
        section.merge_consecutive_tokens();
        section.condense_whitespace(LineEnding::Unix);
        assert_eq!(render(&section), "\n");
    }

    #[test]
    fn test_set_line_ending_covers_header_and_tokens() {
        let mut section = Section::named("Core");
        section.line_ending = LineEnding::Unix;
        push(&mut section, "A=1", LineEnding::Windows);
        section.set_line_ending(LineEnding::Mac);
        assert_eq!(render(&section), "[Core]\rA=1\r");
    }

    #[test]
    fn test_clone_is_deep_and_renders_identically() {
        let mut section = Section::named("Core");
        section.line_ending = LineEnding::Unix;
        push(&mut section, "; c", LineEnding::Unix);
        push(&mut section, "A=1", LineEnding::Unix);
        let mut clone = section.clone();
        assert_eq!(render(&clone), render(&section));
        // Mutating the clone must not affect the original.
        clone.tokens.clear();
        assert_eq!(section.tokens.len(), 2);
    }

    #[test]
    fn test_find_key_instructions() {
        let mut section = Section::named("Core");
        push(&mut section, "A=1", LineEnding::Unix);
        push(&mut section, "+A=2", LineEnding::Unix);
        push(&mut section, "B=3", LineEnding::Unix);
        let mut out = Vec::new();
        section.find_key_instructions("A", &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].value.as_deref(), Some("2"));
    }
}

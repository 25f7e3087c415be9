//! Lexical tokens of the configuration text format.
//!
//! A document is a sequence of sections, and a section a sequence of
//! tokens. Tokens never overlap source lines; writing a document's
//! tokens back out reproduces the exact original text when nothing was
//! mutated in between.

use crate::text::line_ending::LineEnding;

/// One physical line of a multi-line token, with the sequence that
/// terminated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// The raw line content, untrimmed.
    pub content: String,
    /// The terminator recorded for this line.
    pub ending: LineEnding,
}

impl RawLine {
    /// Creates a raw line.
    #[must_use]
    pub fn new(content: impl Into<String>, ending: LineEnding) -> Self {
        Self {
            content: content.into(),
            ending,
        }
    }
}

/// The edit operation an instruction performs, with its fixed
/// one-character line prefix.
///
/// # Examples
///
/// ```
/// use strata::text::InstructionOp;
///
/// assert_eq!(InstructionOp::Set.prefix(), "");
/// assert_eq!(InstructionOp::Add.prefix(), "+");
/// assert_eq!(InstructionOp::RemoveAll.prefix(), "!");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionOp {
    /// `Key=Value` — replace the whole value list with this value.
    Set,
    /// `+Key=Value` — append unless an equal value already exists.
    Add,
    /// `.Key=Value` — append unconditionally, duplicates allowed.
    AddForce,
    /// `-Key=Value` — remove the first equal value, if any.
    Remove,
    /// `!Key` — clear the value list.
    RemoveAll,
}

impl InstructionOp {
    /// The serialization prefix for this operation.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Set => "",
            Self::Add => "+",
            Self::AddForce => ".",
            Self::Remove => "-",
            Self::RemoveAll => "!",
        }
    }

    /// Whether this operation carries a value on its line.
    #[must_use]
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::RemoveAll)
    }
}

/// A single declarative edit parsed from one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub op: InstructionOp,
    /// The property key. May legally be empty.
    pub key: String,
    /// The value, verbatim from after the first `=`. `None` for
    /// [`InstructionOp::RemoveAll`].
    pub value: Option<String>,
    /// The terminator of the source line.
    pub line_ending: LineEnding,
}

impl Instruction {
    /// Creates an instruction.
    #[must_use]
    pub fn new(
        op: InstructionOp,
        key: impl Into<String>,
        value: Option<String>,
        line_ending: LineEnding,
    ) -> Self {
        Self {
            op,
            key: key.into(),
            value,
            line_ending,
        }
    }
}

/// One lexical unit of a document.
///
/// The set of kinds is closed and dispatch is always exhaustive, so
/// this is a sum type rather than an open hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Consecutive blank or whitespace-only physical lines.
    Whitespace {
        /// The raw lines, in order.
        lines: Vec<RawLine>,
    },
    /// Consecutive lines whose trimmed content starts with `;`.
    Comment {
        /// The raw lines, untrimmed, in order.
        lines: Vec<RawLine>,
    },
    /// A line that is none of the other kinds, preserved verbatim.
    Text {
        /// The raw line content.
        content: String,
        /// The terminator of the line.
        line_ending: LineEnding,
    },
    /// A single declarative edit.
    Instruction(Instruction),
}

impl Token {
    /// Whether this is a whitespace run.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace { .. })
    }

    /// Whether this is a comment run.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment { .. })
    }

    /// Returns the instruction payload, if this token is one.
    #[must_use]
    pub fn as_instruction(&self) -> Option<&Instruction> {
        match self {
            Self::Instruction(instruction) => Some(instruction),
            _ => None,
        }
    }

    /// Serializes this token into `out`, substituting `default_newline`
    /// for unspecified endings.
    pub fn write_to(&self, out: &mut String, default_newline: &str) {
        match self {
            Self::Whitespace { lines } | Self::Comment { lines } => {
                for line in lines {
                    out.push_str(&line.content);
                    out.push_str(line.ending.render(default_newline));
                }
            }
            Self::Text {
                content,
                line_ending,
            } => {
                out.push_str(content);
                out.push_str(line_ending.render(default_newline));
            }
            Self::Instruction(instruction) => {
                out.push_str(instruction.op.prefix());
                out.push_str(&instruction.key);
                if instruction.op.takes_value() {
                    out.push('=');
                    if let Some(value) = &instruction.value {
                        out.push_str(value);
                    }
                }
                out.push_str(instruction.line_ending.render(default_newline));
            }
        }
    }

    /// Forces `ending` onto every line of this token.
    pub fn set_line_ending(&mut self, ending: LineEnding) {
        match self {
            Self::Whitespace { lines } | Self::Comment { lines } => {
                for line in lines {
                    line.ending = ending;
                }
            }
            Self::Text { line_ending, .. } => *line_ending = ending,
            Self::Instruction(instruction) => instruction.line_ending = ending,
        }
    }

    /// The first non-unspecified line ending in this token, if any.
    #[must_use]
    pub fn first_line_ending(&self) -> LineEnding {
        match self {
            Self::Whitespace { lines } | Self::Comment { lines } => lines
                .iter()
                .map(|line| line.ending)
                .find(|ending| *ending != LineEnding::Unspecified)
                .unwrap_or(LineEnding::Unspecified),
            Self::Text { line_ending, .. } => *line_ending,
            Self::Instruction(instruction) => instruction.line_ending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(token: &Token) -> String {
        let mut out = String::new();
        token.write_to(&mut out, "\n");
        out
    }

    #[test]
    fn test_op_prefixes() {
        assert_eq!(InstructionOp::Set.prefix(), "");
        assert_eq!(InstructionOp::Add.prefix(), "+");
        assert_eq!(InstructionOp::AddForce.prefix(), ".");
        assert_eq!(InstructionOp::Remove.prefix(), "-");
        assert_eq!(InstructionOp::RemoveAll.prefix(), "!");
    }

    #[test]
    fn test_write_whitespace_preserves_mixed_endings() {
        let token = Token::Whitespace {
            lines: vec![
                RawLine::new("", LineEnding::Windows),
                RawLine::new("   ", LineEnding::Unix),
                RawLine::new("\t", LineEnding::None),
            ],
        };
        assert_eq!(render(&token), "\r\n   \n\t");
    }

    #[test]
    fn test_write_comment_keeps_raw_indent() {
        let token = Token::Comment {
            lines: vec![RawLine::new("  ; note", LineEnding::Unix)],
        };
        assert_eq!(render(&token), "  ; note\n");
    }

    #[test]
    fn test_write_instruction_forms() {
        let set = Token::Instruction(Instruction::new(
            InstructionOp::Set,
            "Key",
            Some("a=b".to_string()),
            LineEnding::Unix,
        ));
        assert_eq!(render(&set), "Key=a=b\n");

        let add = Token::Instruction(Instruction::new(
            InstructionOp::Add,
            "Key",
            Some("v".to_string()),
            LineEnding::Mac,
        ));
        assert_eq!(render(&add), "+Key=v\r");

        let remove_all = Token::Instruction(Instruction::new(
            InstructionOp::RemoveAll,
            "Key",
            None,
            LineEnding::None,
        ));
        assert_eq!(render(&remove_all), "!Key");
    }

    #[test]
    fn test_write_empty_key_and_value() {
        let token = Token::Instruction(Instruction::new(
            InstructionOp::Set,
            "",
            Some(String::new()),
            LineEnding::Unix,
        ));
        assert_eq!(render(&token), "=\n");
    }

    #[test]
    fn test_set_line_ending_covers_all_lines() {
        let mut token = Token::Whitespace {
            lines: vec![
                RawLine::new("", LineEnding::Unix),
                RawLine::new("", LineEnding::Windows),
            ],
        };
        token.set_line_ending(LineEnding::Mac);
        assert_eq!(render(&token), "\r\r");
    }

    #[test]
    fn test_first_line_ending_skips_unspecified() {
        let token = Token::Whitespace {
            lines: vec![
                RawLine::new("", LineEnding::Unspecified),
                RawLine::new("", LineEnding::Windows),
            ],
        };
        assert_eq!(token.first_line_ending(), LineEnding::Windows);
    }
}

//! Line-ending representation for lossless round-tripping.
//!
//! Every physical line in a document records which line-break sequence
//! terminated it so the writer can reproduce the original mix of
//! styles byte for byte.

/// The default newline used wherever an ending is [`LineEnding::Unspecified`].
pub const DEFAULT_LINE_ENDING: &str = "\n";

/// One of the four line-break styles, plus a sentinel that defers to
/// the active writer's default newline.
///
/// # Examples
///
/// ```
/// use strata::text::LineEnding;
///
/// assert_eq!(LineEnding::Windows.render("\n"), "\r\n");
/// assert_eq!(LineEnding::Unspecified.render("\n"), "\n");
/// assert_eq!(LineEnding::None.render("\n"), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// No style recorded; renders the writer's default newline.
    #[default]
    Unspecified,
    /// The line has no terminator (final unterminated line).
    None,
    /// `\n`
    Unix,
    /// `\r\n`
    Windows,
    /// `\r`
    Mac,
}

impl LineEnding {
    /// Renders this ending, substituting `default` for [`LineEnding::Unspecified`].
    #[must_use]
    pub fn render<'a>(self, default: &'a str) -> &'a str {
        match self {
            Self::Unspecified => default,
            Self::None => "",
            Self::Unix => "\n",
            Self::Windows => "\r\n",
            Self::Mac => "\r",
        }
    }

    /// Classifies a literal newline sequence.
    ///
    /// Unrecognized or empty sequences map to `Unspecified` so a
    /// caller-supplied newline string always yields something the
    /// writer can render.
    #[must_use]
    pub fn from_sequence(sequence: &str) -> Self {
        match sequence {
            "\n" => Self::Unix,
            "\r\n" => Self::Windows,
            "\r" => Self::Mac,
            _ => Self::Unspecified,
        }
    }
}

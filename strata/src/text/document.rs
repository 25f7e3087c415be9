//! The in-memory model of one configuration file.
//!
//! A document is an ordered list of sections. Reading is lossless:
//! writing an unmodified document reproduces the original text byte
//! for byte, including comments, blank lines, incidental whitespace
//! around section headers, and per-line line-ending styles.

use std::io::Read;

use crate::error::{Error, Result};
use crate::hierarchy::FileReference;
use crate::text::line_ending::{LineEnding, DEFAULT_LINE_ENDING};
use crate::text::reader::split_lines;
use crate::text::section::Section;
use crate::text::token::{Instruction, RawLine};

/// One configuration file, parsed into sections and tokens.
///
/// A document's identity for caching purposes is its [`FileReference`],
/// not its content.
///
/// # Examples
///
/// ```
/// use strata::text::Document;
///
/// let text = "[Core]\r\n+Paths=Engine\r\n; comment\r\n";
/// let doc = Document::parse(text);
/// assert_eq!(doc.write_string("\n"), text);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// A human-readable name, usually the source path.
    pub display_name: Option<String>,
    /// Which layer this document represents, if any.
    pub reference: Option<FileReference>,
    /// The sections, in file order. The anonymous pre-header section,
    /// when present, is first.
    pub sections: Vec<Section>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text`, appending to this document's sections.
    ///
    /// Every line is representable: anything that is not a header,
    /// comment, blank line or instruction becomes verbatim text, so
    /// parsing never fails.
    pub fn read_str(&mut self, text: &str) {
        // The current section is owned here and handed to the
        // document whenever a header closes it.
        let mut current: Option<Section> = None;

        for line in split_lines(text) {
            if let Some(section) = try_parse_header(&line) {
                if let Some(finished) = current.take() {
                    self.sections.push(finished);
                }
                current = Some(section);
                continue;
            }
            current
                .get_or_insert_with(Section::anonymous)
                .push_line(line);
        }

        if let Some(finished) = current {
            self.sections.push(finished);
        }
    }

    /// Parses `text` into a new document.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut document = Self::new();
        document.read_str(text);
        document
    }

    /// Reads and parses an entire stream.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content is not valid
    /// UTF-8.
    pub fn read(&mut self, mut stream: impl Read) -> Result<()> {
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes)?;
        let text = String::from_utf8(bytes).map_err(|_| Error::InvalidEncoding {
            context: self
                .display_name
                .clone()
                .unwrap_or_else(|| "<stream>".to_string()),
        })?;
        self.read_str(&text);
        Ok(())
    }

    /// Serializes every section into `out`, substituting
    /// `default_newline` for unspecified endings.
    pub fn write_to(&self, out: &mut String, default_newline: &str) {
        for section in &self.sections {
            section.write_to(out, default_newline);
        }
    }

    /// Renders the document to a string with the given default newline.
    #[must_use]
    pub fn write_string(&self, default_newline: &str) -> String {
        let mut out = String::new();
        self.write_to(&mut out, default_newline);
        out
    }

    /// Renders the document with the crate default newline.
    #[must_use]
    pub fn render(&self) -> String {
        self.write_string(DEFAULT_LINE_ENDING)
    }

    /// Returns the section with the given name, if present.
    ///
    /// `None` looks up the anonymous pre-header section.
    #[must_use]
    pub fn section(&self, name: Option<&str>) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section_name_matches(section, name))
    }

    /// Returns the section with the given name, creating it at the end
    /// of the document if absent.
    pub fn section_mut(&mut self, name: Option<&str>) -> &mut Section {
        if let Some(index) = self
            .sections
            .iter()
            .position(|section| section_name_matches(section, name))
        {
            return &mut self.sections[index];
        }
        let section = match name {
            Some(n) => {
                let mut s = Section::named(n);
                s.line_ending = LineEnding::Unspecified;
                s
            }
            None => Section::anonymous(),
        };
        self.sections.push(section);
        let index = self.sections.len() - 1;
        &mut self.sections[index]
    }

    /// Folds sections sharing the same name into the position of the
    /// first occurrence, appending the later sections' tokens. The
    /// relative order of remaining distinct-named sections is
    /// preserved.
    pub fn merge_duplicate_sections(&mut self) {
        let mut index = 0;
        while index < self.sections.len() {
            let mut later = index + 1;
            while later < self.sections.len() {
                if self.sections[later].name == self.sections[index].name {
                    let folded = self.sections.remove(later);
                    self.sections[index].tokens.extend(folded.tokens);
                } else {
                    later += 1;
                }
            }
            index += 1;
        }
    }

    /// Folds consecutive same-kind tokens in every section.
    pub fn merge_consecutive_tokens(&mut self) {
        for section in &mut self.sections {
            section.merge_consecutive_tokens();
        }
    }

    /// Condenses whitespace runs in every section to one blank line.
    pub fn condense_whitespace(&mut self, newline: LineEnding) {
        for section in &mut self.sections {
            section.condense_whitespace(newline);
        }
    }

    /// Forces one line-ending style onto the whole document.
    pub fn set_line_ending(&mut self, ending: LineEnding) {
        for section in &mut self.sections {
            section.set_line_ending(ending);
        }
    }

    /// The first non-unspecified line ending found at document scope,
    /// or [`LineEnding::Unspecified`] if none exists.
    #[must_use]
    pub fn auto_detect_line_ending(&self) -> LineEnding {
        for section in &self.sections {
            let ending = section.first_line_ending();
            if ending != LineEnding::Unspecified {
                return ending;
            }
        }
        LineEnding::Unspecified
    }

    /// Appends every instruction within every section matching
    /// `section_name` whose key equals `key`, in file order.
    ///
    /// An empty or absent section name matches only the anonymous
    /// pre-header section.
    pub fn find_property_instructions<'a>(
        &'a self,
        section_name: Option<&str>,
        key: &str,
        out: &mut Vec<&'a Instruction>,
    ) {
        for section in &self.sections {
            if section_name_matches(section, section_name) {
                section.find_key_instructions(key, out);
            }
        }
    }
}

/// Matches a section against a lookup name. An empty or absent lookup
/// name matches only the anonymous section.
fn section_name_matches(section: &Section, name: Option<&str>) -> bool {
    match name {
        None | Some("") => section.name.is_none(),
        Some(n) => section.name.as_deref() == Some(n),
    }
}

/// Recognizes a `[Name]` header line, capturing the whitespace trimmed
/// from either side of the header.
fn try_parse_header(line: &RawLine) -> Option<Section> {
    let trimmed = line.content.trim();
    if trimmed.len() < 2 || !trimmed.starts_with('[') || !trimmed.ends_with(']') {
        return None;
    }
    let lead_len = line.content.len() - line.content.trim_start().len();
    let lead = &line.content[..lead_len];
    let trail = &line.content[lead_len + trimmed.len()..];
    Some(Section {
        name: Some(trimmed[1..trimmed.len() - 1].to_string()),
        tokens: Vec::new(),
        line_ending: line.ending,
        header_lead_trim: (!lead.is_empty()).then(|| lead.to_string()),
        header_trail_trim: (!trail.is_empty()).then(|| trail.to_string()),
    })
}

//! Lossless text model for the configuration format.
//!
//! This module provides the tokenizer and document model:
//!
//! - [`LineEnding`]: the four line-break styles plus an unspecified
//!   sentinel that defers to the writer default
//! - [`Token`] and [`Instruction`]: the tagged-union lexical units
//! - [`Section`] and [`Document`]: the ordered, editable structure
//! - [`pad_double_newline`]: the companion-writer trailing-newline pad
//!
//! Reading a file and writing it back without mutation reproduces the
//! input byte for byte.

pub mod document;
pub mod line_ending;
mod reader;
pub mod section;
pub mod token;
pub mod writer;

pub use document::Document;
pub use line_ending::{LineEnding, DEFAULT_LINE_ENDING};
pub use section::Section;
pub use token::{Instruction, InstructionOp, RawLine, Token};
pub use writer::pad_double_newline;

//! Error types for the strata library.
//!
//! This module provides the error hierarchy for all operations in the
//! strata library, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a strata error.
///
/// # Examples
///
/// ```
/// use strata::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the strata library.
///
/// Malformed configuration lines are never errors (the opaque-text
/// fallback represents every line), and missing files are never errors
/// (load-or-create degrades to an empty document). The variants below
/// cover the remaining failure classes.
#[derive(Debug, Error)]
pub enum Error {
    /// A validation error occurred at construction time.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An instruction reached evaluation in a state that indicates a
    /// programming or data-corruption defect, not an expected absence.
    #[error("invalid instruction for key '{key}': {reason}")]
    InvalidInstruction {
        /// The key the instruction targets.
        key: String,
        /// Why the instruction could not be evaluated.
        reason: String,
    },

    /// File content was not valid UTF-8.
    #[error("invalid text encoding in {context}")]
    InvalidEncoding {
        /// What was being decoded (usually a display path).
        context: String,
    },

    /// An operation that requires a file reference was given a
    /// document without one.
    #[error("document has no file reference")]
    MissingReference,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check whether this is the construction-time validation class.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check whether this wraps an I/O "not found" condition.
    ///
    /// Load paths treat not-found as an expected absence; anything
    /// else is surfaced to the caller.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

//! The instruction-evaluation algebra.
//!
//! Instructions arrive in ascending priority order — layer by layer,
//! then top to bottom within a layer — and mutate a running ordered
//! value list. Duplicates are permitted in the list; only `Add`
//! de-duplicates against current contents.

use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::text::{Document, Instruction, InstructionOp};

/// Evaluates ordered instruction sequences into final value lists.
///
/// An evaluator is stateless and side-effect-free per call. A
/// process-wide default instance exists as a convenience seam for
/// callers that do not want to construct their own; see
/// [`default_evaluator`].
///
/// # Examples
///
/// ```
/// use strata::evaluate::Evaluator;
/// use strata::text::{Instruction, InstructionOp, LineEnding};
///
/// let add = |v: &str| Instruction::new(
///     InstructionOp::Add, "Key", Some(v.to_string()), LineEnding::Unix,
/// );
/// let a = add("A");
/// let b = add("B");
/// let values = Evaluator::new()
///     .evaluate(&[Some(&a), None, Some(&b)])
///     .unwrap();
/// assert_eq!(values, vec!["A".to_string(), "B".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Creates an evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Applies `instructions` in order and returns the final ordered
    /// value list.
    ///
    /// Absent entries are skipped without effect; upstream sparse
    /// lookups may produce them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInstruction`] if an instruction whose
    /// operation requires a value carries none. This is the
    /// data-corruption class, not an expected absence.
    pub fn evaluate(&self, instructions: &[Option<&Instruction>]) -> Result<Vec<String>> {
        let mut values: Vec<String> = Vec::new();

        for instruction in instructions.iter().flatten() {
            match instruction.op {
                InstructionOp::Set => {
                    let value = required_value(instruction)?;
                    values.clear();
                    values.push(value);
                }
                InstructionOp::Add => {
                    let value = required_value(instruction)?;
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
                InstructionOp::AddForce => {
                    values.push(required_value(instruction)?);
                }
                InstructionOp::Remove => {
                    let value = required_value(instruction)?;
                    if let Some(position) = values.iter().position(|v| *v == value) {
                        values.remove(position);
                    }
                }
                InstructionOp::RemoveAll => values.clear(),
            }
        }

        Ok(values)
    }

    /// Evaluates a property across documents given in ascending
    /// priority order (earlier documents are lower priority).
    ///
    /// Matches are collected per document via
    /// [`Document::find_property_instructions`], preserving both
    /// inter-document and intra-document order, then evaluated as one
    /// sequence. An absent section name looks up only properties
    /// declared in the anonymous leading section.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::InvalidInstruction`] from evaluation.
    pub fn evaluate_property(
        &self,
        documents: &[&Document],
        section: Option<&str>,
        key: &str,
    ) -> Result<Vec<String>> {
        let mut matches = Vec::new();
        for document in documents {
            document.find_property_instructions(section, key, &mut matches);
        }
        let instructions: Vec<Option<&Instruction>> = matches.into_iter().map(Some).collect();
        self.evaluate(&instructions)
    }
}

fn required_value(instruction: &Instruction) -> Result<String> {
    instruction
        .value
        .clone()
        .ok_or_else(|| Error::InvalidInstruction {
            key: instruction.key.clone(),
            reason: format!("operation {:?} requires a value", instruction.op),
        })
}

static DEFAULT_EVALUATOR: Mutex<Option<Arc<Evaluator>>> = Mutex::new(None);

/// Returns the process-wide default evaluator, constructing it lazily.
///
/// This is a convenience seam, not a required collaborator; evaluators
/// are cheap to construct and hold no state between calls.
#[must_use]
pub fn default_evaluator() -> Arc<Evaluator> {
    let mut guard = DEFAULT_EVALUATOR
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    guard
        .get_or_insert_with(|| Arc::new(Evaluator::new()))
        .clone()
}

/// Replaces the process-wide default evaluator.
pub fn set_default_evaluator(evaluator: Arc<Evaluator>) {
    let mut guard = DEFAULT_EVALUATOR
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *guard = Some(evaluator);
}

/// Resets the process-wide default evaluator; the next call to
/// [`default_evaluator`] constructs a fresh one.
pub fn reset_default_evaluator() {
    let mut guard = DEFAULT_EVALUATOR
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *guard = None;
}

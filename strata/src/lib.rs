#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # strata
//!
//! A library for layered, lossless INI-style configuration hierarchies.
//!
//! Engine defaults, project settings and platform overrides live in
//! separate files; strata enumerates them in priority order, parses
//! each one without losing a byte of its original formatting, and
//! evaluates prefixed instructions (`=`, `+`, `.`, `-`, `!`) into the
//! final value list for any property.
//!
//! ## Core Types
//!
//! - [`Document`] and [`Section`]: lossless parsed configuration text
//! - [`FileReference`], [`Domain`], [`HierarchyLevel`]: layer identity
//!   and priority
//! - [`Evaluator`]: the instruction-evaluation algebra
//! - [`PlatformRegistry`]: the platform-inheritance forest
//! - [`FileProvider`] and [`ConfigTree`]: loading, caching, saving
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use strata::Document;
//!
//! // Parse, preserving every byte of formatting.
//! let text = "; tuning\r\n[Core]\r\n+Paths=Engine\r\n";
//! let document = Document::parse(text);
//! assert_eq!(document.render(), text);
//!
//! // Evaluate the instructions for one property.
//! let values = strata::Evaluator::new()
//!     .evaluate_property(&[&document], Some("Core"), "Paths")
//!     .unwrap();
//! assert_eq!(values, vec!["Engine".to_string()]);
//! ```

pub mod branch;
pub mod cache;
pub mod error;
pub mod evaluate;
pub mod hierarchy;
pub mod logging;
pub mod platform;
pub mod provider;
pub mod text;
pub mod tree;

// Re-export key types at crate root for convenience
pub use branch::{config_branch, config_branch_in, visit_config_branch};
pub use cache::{CacheEntry, CacheState, VirtualConfigCache};
pub use error::{Error, Result};
pub use evaluate::{default_evaluator, Evaluator};
pub use hierarchy::{Domain, FileReference, HierarchyLevel, HierarchyLevelRange};
pub use logging::{init_logger, LogLevel, Logger};
pub use platform::{Platform, PlatformInfo, PlatformRegistry};
pub use provider::{DiskStorage, FileProvider, MemoryStorage, PathLayout, Storage};
pub use text::{Document, Instruction, InstructionOp, LineEnding, Section, Token};
pub use tree::ConfigTree;

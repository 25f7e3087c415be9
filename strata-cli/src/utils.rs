//! Utility functions for CLI operations.
//!
//! This module provides the shared global options and the construction
//! of a [`ConfigTree`] over the local filesystem from those options.

use crate::error::CliError;
use std::path::PathBuf;
use strata::{ConfigTree, DiskStorage, FileProvider, PathLayout};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// The engine root directory.
    pub engine_root: Option<PathBuf>,

    /// The project root directory.
    pub project_root: Option<PathBuf>,
}

impl GlobalOptions {
    /// Builds the path layout described by the options.
    ///
    /// At least one root must be given; a tree with no roots could
    /// never resolve a file.
    pub fn layout(&self) -> Result<PathLayout, CliError> {
        if self.engine_root.is_none() && self.project_root.is_none() {
            return Err(CliError::InvalidArguments(
                "at least one of --engine-root or --project-root is required".to_string(),
            ));
        }
        let mut layout = PathLayout::new();
        if let Some(root) = &self.engine_root {
            layout = layout.with_engine_root(root);
        }
        if let Some(root) = &self.project_root {
            layout = layout.with_project_root(root);
        }
        Ok(layout)
    }

    /// Opens a config tree over the local filesystem, discovering
    /// platforms under the engine root when one is set.
    pub fn open_tree(&self) -> Result<ConfigTree<DiskStorage>, CliError> {
        let provider = FileProvider::new(DiskStorage, self.layout()?);
        let mut tree = ConfigTree::new(provider);
        tree.discover_platforms().map_err(CliError::from)?;
        Ok(tree)
    }
}

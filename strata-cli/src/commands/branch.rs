//! Branch command implementation.
//!
//! This module implements the `branch` command, which lists the layer
//! files consulted for a configuration category, lowest priority
//! first, together with their resolved paths.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use strata::FileReference;

/// List the layer files for a configuration category.
#[derive(Args)]
pub struct BranchCommand {
    /// Configuration category (e.g. Engine, Game)
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// Include the platform's inherited layers
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Only list layers whose file exists on disk
    #[arg(long)]
    pub existing_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "lines", ignore_case = true)]
    pub format: OutputFormat,
}

/// Output format for branch listings.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One layer per line: reference, then path if resolvable
    Lines,
    /// JSON array of layer objects
    Json,
}

/// One branch entry as emitted in JSON output.
#[derive(Serialize)]
struct BranchEntry {
    reference: FileReference,
    path: Option<PathBuf>,
    exists: bool,
}

impl BranchCommand {
    /// Execute the branch command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut tree = global.open_tree()?;
        let branch = tree
            .branch(&self.type_name, self.platform.as_deref())
            .map_err(CliError::from)?;

        let mut entries = Vec::with_capacity(branch.len());
        for reference in branch {
            let path = tree.provider().layout().resolve(&reference);
            let exists = path.as_deref().is_some_and(std::path::Path::exists);
            if self.existing_only && !exists {
                continue;
            }
            entries.push(BranchEntry {
                reference,
                path,
                exists,
            });
        }

        match self.format {
            OutputFormat::Lines => {
                for entry in &entries {
                    match &entry.path {
                        Some(path) => println!("{}\t{}", entry.reference, path.display()),
                        None => println!("{}", entry.reference),
                    }
                }
            }
            OutputFormat::Json => {
                let rendered = serde_json::to_string_pretty(&entries)
                    .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
                println!("{rendered}");
            }
        }
        Ok(())
    }
}

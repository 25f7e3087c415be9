//! Get command implementation.
//!
//! This module implements the `get` command, which evaluates one
//! property across every layer of the hierarchy and prints the final
//! value list.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, ValueEnum};

/// Evaluate a property across the hierarchy.
#[derive(Args)]
pub struct GetCommand {
    /// Configuration category (e.g. Engine, Game)
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// Property key to evaluate
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Section containing the property; omit for the leading
    /// anonymous section
    #[arg(long, value_name = "SECTION")]
    pub section: Option<String>,

    /// Evaluate for this platform, including its inherited layers
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "lines", ignore_case = true)]
    pub format: OutputFormat,

    /// Succeed (with empty output) when the property has no values
    #[arg(long)]
    pub allow_empty: bool,
}

/// Output format for evaluated values.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One value per line
    Lines,
    /// JSON array
    Json,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut tree = global.open_tree()?;
        let values = tree
            .evaluate(
                &self.type_name,
                self.platform.as_deref(),
                self.section.as_deref(),
                &self.key,
            )
            .map_err(CliError::from)?;

        if values.is_empty() && !self.allow_empty {
            return Err(CliError::SemanticFailure(format!(
                "property '{}' has no values",
                self.key
            )));
        }

        match self.format {
            OutputFormat::Lines => {
                for value in &values {
                    println!("{value}");
                }
            }
            OutputFormat::Json => {
                let rendered = serde_json::to_string(&values)
                    .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
                println!("{rendered}");
            }
        }
        Ok(())
    }
}

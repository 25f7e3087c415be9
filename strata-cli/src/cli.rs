//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive
//! macros, including global options and subcommands.

use crate::commands::{BranchCommand, GetCommand, RenderCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting layered configuration hierarchies.
#[derive(Parser)]
#[command(name = "strata")]
#[command(version, about = "Inspect layered configuration hierarchies", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// The engine root directory
    #[arg(long, value_name = "PATH", global = true, env = "STRATA_ENGINE_ROOT")]
    pub engine_root: Option<PathBuf>,

    /// The project root directory
    #[arg(long, value_name = "PATH", global = true, env = "STRATA_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Evaluate a property across the hierarchy
    Get(GetCommand),

    /// List the layer files for a configuration category
    Branch(BranchCommand),

    /// Print one layer file exactly as stored
    Render(RenderCommand),
}

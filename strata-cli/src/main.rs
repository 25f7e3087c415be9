//! Main entry point for the strata CLI.
//!
//! This is the command-line interface for the strata configuration
//! hierarchy library. It provides commands for inspecting hierarchies:
//! - `get`: Evaluate a property across the hierarchy
//! - `branch`: List the layer files for a configuration category
//! - `render`: Print one layer file exactly as stored

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = strata::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        engine_root: cli.engine_root,
        project_root: cli.project_root,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::Branch(cmd) => cmd.execute(&global),
        cli::Command::Render(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

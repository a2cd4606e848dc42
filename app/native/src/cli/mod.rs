//! CLI module for Wallweave.
//!
//! The CLI never decodes or encodes image files. It plans composites for a
//! given source size and manages the configuration file.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::WallweaveError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), WallweaveError> {
    let cli = Cli::parse();
    cli.execute()
}

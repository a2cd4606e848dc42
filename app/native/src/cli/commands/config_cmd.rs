//! Config CLI commands.
//!
//! Commands for managing the Wallweave configuration file.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;

use crate::cli::output;
use crate::config::template::{generate_config_template, write_template};
use crate::config::{self, PathStatus};
use crate::error::WallweaveError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Initialize a new configuration file with all options documented.
    ///
    /// Creates a new configuration file at the default location with all
    /// available options commented out.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  wallweave config init              # Create config at default location
  wallweave config init --force      # Overwrite existing config
  wallweave config init --path ~/my-config.jsonc  # Create at custom path
  wallweave config init --stdout     # Print template to stdout"#
    )]
    Init {
        /// Overwrite existing configuration file if it exists.
        #[arg(long, short)]
        force: bool,

        /// Custom path for the configuration file.
        /// If not specified, uses the first search path.
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the configuration template to stdout instead of writing to a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Show the configuration file search paths.
    ///
    /// Indicates which one is currently in use (if any).
    Path,

    /// Show the effective configuration, defaults included.
    Show {
        /// Output plain JSON without highlighting.
        #[arg(long, short)]
        json: bool,
    },
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cmd: &ConfigCommands, config_path: Option<&Path>) -> Result<(), WallweaveError> {
    match cmd {
        ConfigCommands::Init { force, path, stdout } => {
            if *stdout {
                println!("{}", generate_config_template());
                Ok(())
            } else {
                init_config(*force, path.clone()).map(|path| {
                    println!("Configuration file created at: {}", path.display());
                    println!("\nAll options are commented out by default.");
                    println!("Edit the file and uncomment the options you want to configure.");
                })
            }
        }
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
        ConfigCommands::Show { json } => show_config(config_path, *json),
    }
}

/// Writes the template to `custom_path` or the preferred search path.
fn init_config(force: bool, custom_path: Option<PathBuf>) -> Result<PathBuf, WallweaveError> {
    let path = custom_path.unwrap_or_else(config::default_config_path);
    write_template(&path, force)?;
    Ok(path)
}

fn show_config_path() {
    println!("Search order:\n");

    let statuses = config::search_status();
    for (i, (path, status)) in statuses.iter().enumerate() {
        let marker = match status {
            PathStatus::Active => "  <- in use".green().to_string(),
            PathStatus::Shadowed => "  (ignored)".dimmed().to_string(),
            PathStatus::Missing => String::new(),
        };
        println!("  {:>2}  {}{marker}", i + 1, path.display());
    }

    if !statuses.iter().any(|(_, status)| *status == PathStatus::Active) {
        println!("\nNone of these exist; defaults apply. Create one with 'wallweave config init'.");
    }
}

fn show_config(config_path: Option<&Path>, json: bool) -> Result<(), WallweaveError> {
    let (config, path) = config::resolve(config_path)?;
    let value = serde_json::to_value(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match path {
        Some(path) => println!("{} {}\n", "Loaded from".dimmed(), path.display()),
        None => println!("{}\n", "No configuration file found, showing defaults.".dimmed()),
    }
    output::print_highlighted_json(&value);
    Ok(())
}

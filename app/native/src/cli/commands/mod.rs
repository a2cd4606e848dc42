//! CLI command definitions using Clap.
//!
//! - `plan` - Inspect what the compositor would do for a source size
//! - `config_cmd` - Configuration file management
//! - `types` - Shared types used across commands

use std::io;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::error::WallweaveError;
use crate::schema;

pub mod config_cmd;
pub mod plan;
pub mod types;

pub use config_cmd::ConfigCommands;
pub use plan::PlanArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wallweave CLI - inspect and configure the wallpaper extension compositor.
#[derive(Parser, Debug)]
#[command(name = "wallweave")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Show how an image of a given size would be extended.
    ///
    /// Prints the canvas geometry, the fill strategy, the panel widths and
    /// the columns kept sharp, without touching any image.
    #[command(after_long_help = r#"Examples:
  wallweave plan --source 1000x500 --aspect 3
  wallweave plan --source 1920x1080 --screen 3440x1440 --fill mirror
  wallweave plan --source 100x500 --aspect 3 --json"#)]
    Plan(PlanArgs),

    /// Configuration file management commands.
    ///
    /// Initialize, locate, and inspect the configuration file.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output Wallweave configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// configuration file. Can be redirected to a file for use with editors
    /// that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    ///
    /// Usage:
    ///   eval "$(wallweave completions --shell zsh)"
    ///   wallweave completions --shell fish > ~/.config/fish/completions/wallweave.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> { self.config.as_deref() }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), WallweaveError> {
        match &self.command {
            Commands::Plan(args) => plan::execute(args, self.config_path()),
            Commands::Config(cmd) => config_cmd::execute(cmd, self.config_path()),

            Commands::Schema => {
                println!("{}", schema::generate_schema_json());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "wallweave", &mut io::stdout());
    }
}

//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// harbour-xcode - Synthesize Xcode targets for a packaged build unit
#[derive(Parser)]
#[command(name = "harbour-xcode")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the project and support files for a unit
    Generate(GenerateArgs),

    /// Show the compiler flags derived for each file group
    Flags(FlagsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Path to Unit.toml (searched upward from the current directory by default)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Directory receiving the project and support files
    /// (defaults to `.harbour/xcode` next to the manifest)
    #[arg(long)]
    pub sandbox: Option<PathBuf>,

    /// Name of the generated project
    #[arg(long)]
    pub project_name: Option<String>,

    /// Suppress compiler warnings for every source
    #[arg(long)]
    pub inhibit_all_warnings: bool,

    /// Print the project as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Path to Unit.toml (searched upward from the current directory by default)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Only show the group with this name
    #[arg(long)]
    pub group: Option<String>,

    /// Print the flags as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

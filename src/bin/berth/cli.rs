//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Berth - module descriptor synchronization for IDEA workspaces
#[derive(Parser)]
#[command(name = "berth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synchronize module descriptors with the project model
    Sync(SyncArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct SyncArgs {
    /// Path to the project model file
    #[arg(long, default_value = "berth.toml")]
    pub model: PathBuf,

    /// Sync only the named module
    #[arg(long)]
    pub module: Option<String>,

    /// Reference sibling modules as jars instead of module entries
    #[arg(long)]
    pub no_link_modules: bool,

    /// Name dependency libraries group:artifact:type:version
    #[arg(long)]
    pub use_full_names: bool,

    /// Attach javadoc and sources companions to dependency libraries
    #[arg(long)]
    pub use_classifiers: bool,

    /// Classifier of source companion jars
    #[arg(long)]
    pub source_classifier: Option<String>,

    /// Classifier of javadoc companion jars
    #[arg(long)]
    pub javadoc_classifier: Option<String>,

    /// Extra paths to exclude, comma or whitespace separated
    #[arg(long)]
    pub exclude: Option<String>,

    /// Discard existing descriptors instead of merging into them
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

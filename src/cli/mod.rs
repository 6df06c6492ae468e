//! CLI adapter for blogdex
//!
//! Thin command-line front end over [`crate::core`]: every command
//! maps onto one `OwnerIndex` operation. Entities are read from JSON
//! files holding an array of content objects.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// blogdex - Full-text search for blog content
///
/// Maintain per-blog BM25 indexes of entries and pages, and search them
/// with keywords, phrases, boolean operators or a `field:value` prefix.
#[derive(Parser, Debug)]
#[command(name = "blogdex")]
#[command(version)]
#[command(about = "Full-text search for blog content", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index (or re-index) entities from a JSON file
    Index(commands::IndexArgs),

    /// Remove one entity from an owner's index
    Unindex(commands::UnindexArgs),

    /// Clear an owner's index and index entities from a JSON file
    Rebuild(commands::IndexArgs),

    /// Remove every document from an owner's index
    Clear(commands::ClearArgs),

    /// Search an owner's index
    Search(commands::SearchArgs),

    /// Show index statistics for an owner
    Stats(commands::StatsArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  blogdex completions bash > ~/.local/share/bash-completion/completions/blogdex
    ///   zsh:   blogdex completions zsh > ~/.zfunc/_blogdex
    ///   fish:  blogdex completions fish > ~/.config/fish/completions/blogdex.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::manager::IndexManager;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need an index)
    let command = match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        command => command,
    };

    let xdg = XdgDirs::new();
    xdg.log_paths();

    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    let manager = Arc::new(IndexManager::new(config));

    match command {
        Commands::Index(args) => commands::index::execute(args, &manager, cli.format).await,
        Commands::Rebuild(args) => {
            commands::index::execute_rebuild(args, &manager, cli.format).await
        }
        Commands::Unindex(args) => {
            commands::owner::execute_unindex(args, &manager, cli.format).await
        }
        Commands::Clear(args) => commands::owner::execute_clear(args, &manager, cli.format).await,
        Commands::Stats(args) => commands::owner::execute_stats(args, &manager, cli.format).await,
        Commands::Search(args) => commands::search::execute(args, &manager, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &manager, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}

//! Owner commands - unindex, clear, stats

use crate::cli::output::{colors, format_bytes, format_relative_time, print_done, print_json};
use crate::cli::OutputFormat;
use crate::core::manager::IndexManager;
use crate::core::types::IndexState;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for unindex
#[derive(Args, Debug)]
pub struct UnindexArgs {
    /// Owner (blog) id
    #[arg(long, short = 'o')]
    pub owner: String,

    /// Entity id to remove
    pub id: String,
}

/// Arguments for clear
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Owner (blog) id
    #[arg(long, short = 'o')]
    pub owner: String,
}

/// Arguments for stats
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Owner (blog) id
    #[arg(long, short = 'o')]
    pub owner: String,
}

#[derive(Debug, Serialize)]
struct UnindexResponse<'a> {
    owner: &'a str,
    id: &'a str,
    unindexed: bool,
}

#[derive(Debug, Serialize)]
struct ClearResponse<'a> {
    owner: &'a str,
    cleared: bool,
}

/// Execute unindex command
pub async fn execute_unindex(
    args: UnindexArgs,
    manager: &Arc<IndexManager>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let owner = manager.owner(&args.owner)?;
    owner.unindex_one(&args.id)?;

    print_done(
        &format!("Removed '{}' from '{}'", args.id, args.owner),
        &UnindexResponse {
            owner: &args.owner,
            id: &args.id,
            unindexed: true,
        },
        format,
    )?;
    Ok(())
}

/// Execute clear command
pub async fn execute_clear(
    args: ClearArgs,
    manager: &Arc<IndexManager>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let owner = manager.owner(&args.owner)?;
    owner.clear()?;

    print_done(
        &format!("Cleared index for '{}'", args.owner),
        &ClearResponse {
            owner: &args.owner,
            cleared: true,
        },
        format,
    )?;
    Ok(())
}

/// Execute stats command
pub async fn execute_stats(
    args: StatsArgs,
    manager: &Arc<IndexManager>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let owner = manager.owner(&args.owner)?;
    let stats = owner.stats()?;

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label(&format!("Owner: {}", stats.owner)));
            if stats.state == IndexState::Absent {
                println!(
                    "  No index yet. Run '{}' to create one.",
                    colors::label(&format!("blogdex index -o {} -f <entities.json>", stats.owner))
                );
                return Ok(());
            }
            println!(
                "  Documents:    {}",
                colors::number(&stats.documents.to_string())
            );
            println!(
                "  Segments:     {}",
                colors::number(&stats.segments.to_string())
            );
            println!(
                "  Size:         {}",
                colors::number(&format_bytes(stats.size_bytes))
            );
            println!("  Analyzer:     {}", stats.analyzer);
            match &stats.last_commit_at {
                Some(at) => println!(
                    "  Last commit:  {} {}",
                    at.to_rfc3339(),
                    colors::dim(&format!("({})", format_relative_time(at)))
                ),
                None => println!("  Last commit:  {}", colors::dim("never")),
            }
        }
        OutputFormat::Json => print_json(&stats)?,
    }

    Ok(())
}

//! Index and rebuild commands - load entities from JSON and index them

use crate::cli::output::{colors, format_millis, print_json, print_warning};
use crate::cli::OutputFormat;
use crate::core::manager::IndexManager;
use crate::core::types::{BatchReport, Content, EntityStatus, IndexOutcome};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the index and rebuild commands
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Owner (blog) id
    #[arg(long, short = 'o')]
    pub owner: String,

    /// JSON file with an array of entities (or a single entity)
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Batch indexing response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub owner: String,
    pub file: String,
    pub rebuilt: bool,
    pub indexed: usize,
    pub unpublished: usize,
    pub skipped: usize,
    pub duration_ms: u128,
    pub statuses: Vec<EntityStatus>,
}

/// Read entities from a JSON file
pub fn load_entities(path: &Path) -> Result<Vec<Content>, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        format!(
            "Cannot read entities file '{}': {}. Make sure the path exists and is accessible.",
            path.display(),
            e
        )
    })?;

    if let Ok(entities) = serde_json::from_str::<Vec<Content>>(&contents) {
        return Ok(entities);
    }

    let single: Content = serde_json::from_str(&contents).map_err(|e| {
        format!(
            "'{}' is not a JSON array of entities or a single entity: {}",
            path.display(),
            e
        )
    })?;
    Ok(vec![single])
}

/// Execute the index command
pub async fn execute(
    args: IndexArgs,
    manager: &Arc<IndexManager>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    run_batch(args, manager, format, false)
}

/// Execute the rebuild command
pub async fn execute_rebuild(
    args: IndexArgs,
    manager: &Arc<IndexManager>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    run_batch(args, manager, format, true)
}

fn run_batch(
    args: IndexArgs,
    manager: &Arc<IndexManager>,
    format: OutputFormat,
    rebuild: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let entities = load_entities(&args.file)?;
    let owner = manager.owner(&args.owner)?;

    let analyzer = owner.analyzer();
    if analyzer.fell_back && format == OutputFormat::Human {
        print_warning(&format!(
            "analyzer '{}' not recognized, using '{}'",
            analyzer.requested, analyzer.name
        ));
    }

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "{} {} entities into '{}'...",
            if rebuild { "Rebuilding with" } else { "Indexing" },
            colors::number(&entities.len().to_string()),
            colors::owner(&args.owner)
        );
    }

    let start = Instant::now();
    let report: BatchReport = if rebuild {
        owner.rebuild_all(&entities)?
    } else {
        owner.index_many(&entities)?
    };

    let response = IndexResponse {
        owner: args.owner,
        file: args.file.to_string_lossy().into_owned(),
        rebuilt: rebuild,
        indexed: report.indexed(),
        unpublished: report.unpublished(),
        skipped: report.skipped(),
        duration_ms: start.elapsed().as_millis(),
        statuses: report.statuses,
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {} entities for '{}' ({} unpublished, {} skipped) in {}",
                colors::success(if rebuild { "Rebuilt" } else { "Indexed" }),
                colors::number(&response.indexed.to_string()),
                colors::owner(&response.owner),
                colors::number(&response.unpublished.to_string()),
                colors::number(&response.skipped.to_string()),
                colors::number(&format_millis(response.duration_ms))
            );
            for status in &response.statuses {
                if let IndexOutcome::Skipped { reason } = &status.outcome {
                    print_warning(&format!(
                        "skipped {}: {}",
                        status.id.as_deref().unwrap_or("<no id>"),
                        reason
                    ));
                }
            }
        }
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}

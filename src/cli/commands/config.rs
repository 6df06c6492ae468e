//! Show-config command - print the effective configuration

use crate::cli::output::print_json;
use crate::cli::OutputFormat;
use crate::core::analysis::AnalyzerResolver;
use crate::core::manager::IndexManager;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Arguments for the show-config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub index_root: String,
    pub writer_heap_bytes: usize,
    pub analyzer: String,
    pub available_analyzers: Vec<&'static str>,
    pub max_hits: usize,
    pub max_query_length: usize,
    pub owners: BTreeMap<String, OwnerResponse>,
}

/// Effective settings for a configured owner
#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    pub index_dir: String,
    pub analyzer: String,
    pub resolved_analyzer: &'static str,
}

/// Execute the show-config command
pub async fn execute(
    _args: ConfigArgs,
    manager: &Arc<IndexManager>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = manager.config();

    let owners = config
        .owners
        .keys()
        .map(|id| {
            let analyzer = config.owner_analyzer(id).to_string();
            let resolved_analyzer = AnalyzerResolver::resolve(&analyzer).name;
            (
                id.clone(),
                OwnerResponse {
                    index_dir: config.owner_index_dir(id).to_string_lossy().into_owned(),
                    analyzer,
                    resolved_analyzer,
                },
            )
        })
        .collect();

    let response = ConfigResponse {
        index_root: config.storage.index_root.to_string_lossy().into_owned(),
        writer_heap_bytes: config.storage.writer_heap_bytes,
        analyzer: config.analysis.analyzer.clone(),
        available_analyzers: AnalyzerResolver::strategy_names(),
        max_hits: config.search.max_hits,
        max_query_length: config.search.max_query_length,
        owners,
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  storage:");
            println!("    index_root: {}", response.index_root);
            println!("    writer_heap_bytes: {}", response.writer_heap_bytes);
            println!("  analysis:");
            println!("    analyzer: {}", response.analyzer);
            println!(
                "    available: {}",
                response.available_analyzers.join(", ")
            );
            println!("  search:");
            println!("    max_hits: {}", response.max_hits);
            println!("    max_query_length: {}", response.max_query_length);
            if !response.owners.is_empty() {
                println!("  owners:");
                for (id, owner) in &response.owners {
                    println!("    {id}:");
                    println!("      index_dir: {}", owner.index_dir);
                    println!(
                        "      analyzer: {} (resolves to {})",
                        owner.analyzer, owner.resolved_analyzer
                    );
                }
            }
        }
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}

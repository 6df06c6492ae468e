//! Search command - search an owner's index

use crate::cli::output::{colors, print_json, print_warning};
use crate::cli::OutputFormat;
use crate::core::manager::IndexManager;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (supports AND, OR, NOT, "phrases" and one field:value prefix)
    pub query: String,

    /// Owner (blog) id
    #[arg(long, short = 'o')]
    pub owner: String,

    /// Maximum number of results to print
    #[arg(long, short = 'k', default_value = "10")]
    pub limit: usize,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub id: String,
    pub title: String,
    pub permalink: String,
    pub score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponseOutput {
    pub query: String,
    pub owner: String,
    pub total_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub results: Vec<SearchResultItem>,
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    manager: &Arc<IndexManager>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let owner = manager.owner(&args.owner)?;
    let results = owner.search(&args.query)?;
    let limit = args.limit.max(1);

    let output = SearchResponseOutput {
        query: results.query.clone(),
        owner: args.owner.clone(),
        total_results: results.len(),
        message: results.message.clone(),
        results: results
            .hits
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, hit)| SearchResultItem {
                rank: i + 1,
                id: hit.id,
                title: hit.title,
                permalink: hit.permalink,
                score: hit.score,
                published_at: hit.published_at,
                summary: hit.summary,
            })
            .collect(),
    };

    match format {
        OutputFormat::Human => {
            if let Some(message) = &output.message {
                print_warning(message);
            }

            if output.results.is_empty() {
                println!(
                    "No results found for '{}' in '{}'",
                    colors::label(&args.query),
                    colors::owner(&output.owner)
                );
                return Ok(());
            }

            println!(
                "Found {} result(s) in '{}':\n",
                colors::number(&output.total_results.to_string()),
                colors::owner(&output.owner)
            );
            for result in &output.results {
                println!(
                    "[{}] {} {} {}",
                    colors::rank(&result.rank.to_string()),
                    colors::label(&result.title),
                    colors::entity_id(&format!("#{}", result.id)),
                    colors::dim(&format!("(score: {:.2})", result.score))
                );
                if !result.permalink.is_empty() {
                    println!("    {}", colors::permalink(&result.permalink));
                }
                if !result.summary.is_empty() {
                    let summary: String = result.summary.chars().take(160).collect();
                    println!("    {}", colors::dim(&summary));
                }
                println!();
            }
        }
        OutputFormat::Json => print_json(&output)?,
    }

    Ok(())
}

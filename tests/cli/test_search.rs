//! Tests for the search CLI command
//!
//! Tests the search command handler:
//! - Queries with hits (human and JSON output)
//! - Queries without hits
//! - Queries that only parse after escaping
//! - Error cases (overlong query, invalid owner)

use crate::cli::test_helpers::{create_cli_test_manager, setup_indexed_owner};
use blogdex::cli::commands::search::{execute, SearchArgs};
use blogdex::cli::OutputFormat;

fn args(query: &str, owner: &str) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        owner: owner.to_string(),
        limit: 10,
    }
}

/// Test search with results (human format)
#[tokio::test]
async fn test_search_with_results_human() {
    let (manager, _temp) = create_cli_test_manager();
    setup_indexed_owner(&manager, "blog");

    let result = execute(args("tantivy", "blog"), &manager, OutputFormat::Human).await;
    assert!(result.is_ok(), "Search should succeed: {:?}", result.err());
}

/// Test search with results (JSON format)
#[tokio::test]
async fn test_search_with_results_json() {
    let (manager, _temp) = create_cli_test_manager();
    setup_indexed_owner(&manager, "blog");

    let result = execute(args("bread", "blog"), &manager, OutputFormat::Json).await;
    assert!(result.is_ok(), "Search should succeed: {:?}", result.err());
}

/// Test search with no matches
#[tokio::test]
async fn test_search_no_results() {
    let (manager, _temp) = create_cli_test_manager();
    setup_indexed_owner(&manager, "blog");

    let result = execute(args("kubernetes", "blog"), &manager, OutputFormat::Human).await;
    assert!(result.is_ok());
}

/// Test search on an owner that was never indexed
#[tokio::test]
async fn test_search_never_indexed_owner() {
    let (manager, _temp) = create_cli_test_manager();

    let result = execute(args("anything", "fresh"), &manager, OutputFormat::Json).await;
    assert!(result.is_ok());
}

/// Test that unparseable queries print an advisory rather than fail
#[tokio::test]
async fn test_search_unparseable_query() {
    let (manager, _temp) = create_cli_test_manager();
    setup_indexed_owner(&manager, "blog");

    for query in ["foo AND (bar", "tantivy AND (rust"] {
        let result = execute(args(query, "blog"), &manager, OutputFormat::Human).await;
        assert!(result.is_ok(), "'{query}' should not fail: {:?}", result.err());
    }
}

/// Test a limit of zero still prints the top hit
#[tokio::test]
async fn test_search_zero_limit() {
    let (manager, _temp) = create_cli_test_manager();
    setup_indexed_owner(&manager, "blog");

    let mut search = args("bread", "blog");
    search.limit = 0;
    let result = execute(search, &manager, OutputFormat::Json).await;
    assert!(result.is_ok());
}

/// Test error for an overlong query
#[tokio::test]
async fn test_search_overlong_query() {
    let (manager, _temp) = create_cli_test_manager();
    let query = "word ".repeat(500);

    let result = execute(args(&query, "blog"), &manager, OutputFormat::Human).await;
    assert!(result.is_err());
}

/// Test error for an invalid owner id
#[tokio::test]
async fn test_search_invalid_owner() {
    let (manager, _temp) = create_cli_test_manager();

    let result = execute(args("tantivy", "a/b"), &manager, OutputFormat::Human).await;
    assert!(result.is_err());
}

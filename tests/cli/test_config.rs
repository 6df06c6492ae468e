//! Tests for the show-config CLI command

use crate::cli::test_helpers::create_cli_test_manager;
use blogdex::cli::commands::config::{execute, ConfigArgs};
use blogdex::cli::OutputFormat;
use blogdex::core::config::OwnerConfig;
use blogdex::{Config, IndexManager};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_show_config_human() {
    let (manager, _temp) = create_cli_test_manager();

    let result = execute(ConfigArgs {}, &manager, OutputFormat::Human).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_show_config_json() {
    let (manager, _temp) = create_cli_test_manager();

    let result = execute(ConfigArgs {}, &manager, OutputFormat::Json).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_show_config_with_owner_overrides() {
    let temp = TempDir::new().unwrap();
    let mut config = Config::with_index_root(temp.path());
    config.owners.insert(
        "french".to_string(),
        OwnerConfig {
            index_dir: Some(temp.path().join("fr")),
            analyzer: Some("org.apache.lucene.analysis.fr.FrenchAnalyzer".to_string()),
        },
    );
    let manager = Arc::new(IndexManager::new(config));

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = execute(ConfigArgs {}, &manager, format).await;
        assert!(result.is_ok());
    }
}

//! CLI test helpers
//!
//! Provides utilities for testing CLI commands including:
//! - Arc<IndexManager> wrappers matching CLI execute() signatures
//! - Entity files on disk for the index commands

use crate::common::{sample_blog, write_entities_file};
use blogdex::{Config, IndexManager};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a test manager wrapped in Arc (matching CLI execute() signatures)
pub fn create_cli_test_manager() -> (Arc<IndexManager>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::with_index_root(temp_dir.path().join("indexes"));
    config.storage.writer_heap_bytes = 15_000_000;

    (Arc::new(IndexManager::new(config)), temp_dir)
}

/// Write the sample blog as an entities file inside `dir`
pub fn sample_blog_file(dir: &TempDir) -> PathBuf {
    write_entities_file(dir.path(), "entities.json", &sample_blog())
}

/// Index the sample blog for an owner directly through the manager
pub fn setup_indexed_owner(manager: &Arc<IndexManager>, owner: &str) {
    manager
        .owner(owner)
        .expect("Failed to open owner")
        .index_many(&sample_blog())
        .expect("Failed to index sample blog");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cli_test_manager() {
        let (manager, temp) = create_cli_test_manager();
        assert_eq!(
            manager.config().storage.index_root,
            temp.path().join("indexes")
        );
        assert!(manager.loaded_owners().is_empty());
    }

    #[test]
    fn test_sample_blog_file_written() {
        let (_manager, temp) = create_cli_test_manager();
        let path = sample_blog_file(&temp);
        assert!(path.exists());
    }

    #[test]
    fn test_setup_indexed_owner() {
        let (manager, _temp) = create_cli_test_manager();
        setup_indexed_owner(&manager, "blog");

        let stats = manager.owner("blog").unwrap().stats().unwrap();
        assert_eq!(stats.documents, 3);
    }
}

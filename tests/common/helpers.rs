// Test helper functions

use blogdex::{Config, IndexManager, OwnerIndex};
use std::sync::Arc;
use tempfile::TempDir;

use super::fixtures::sample_blog;

/// Create a manager rooted in a temporary directory
///
/// The TempDir must be kept alive for the duration of the test.
#[allow(dead_code)] // Used in integration tests
pub fn create_test_manager() -> (IndexManager, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::with_index_root(temp_dir.path());
    config.storage.writer_heap_bytes = 15_000_000;
    (IndexManager::new(config), temp_dir)
}

/// Open an owner and index the sample blog into it
#[allow(dead_code)] // Used in integration tests
pub fn indexed_owner(manager: &IndexManager, owner: &str) -> Arc<OwnerIndex> {
    let index = manager.owner(owner).expect("Failed to open owner");
    let report = index
        .index_many(&sample_blog())
        .expect("Failed to index sample blog");
    assert!(report.is_clean(), "Sample blog should index cleanly");
    index
}

/// Ids returned by a search, in rank order
#[allow(dead_code)] // Used in integration tests
pub fn search_ids(index: &OwnerIndex, query: &str) -> Vec<String> {
    index
        .search(query)
        .expect("Search should not fail")
        .hits
        .into_iter()
        .map(|h| h.id)
        .collect()
}

// Common test utilities and fixtures

pub mod helpers;

// Re-export commonly used items
// Note: not every test binary uses every helper
#[allow(unused_imports)]
pub use fixtures::{sample_blog, write_entities_file};
#[allow(unused_imports)]
pub use helpers::{create_test_manager, indexed_owner, search_ids};

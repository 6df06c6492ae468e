//! blogdex - Full-text search for blog content
//!
//! Per-owner BM25 indexes over blog entries and static pages, built
//! on Tantivy. Collaborators push content changes in and run free-text
//! queries; every mutation commits atomically under a per-owner lock.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - analysis (analyzer registry)
//!   - mapping (content to document)
//!   - storage (owner index lifecycle, schema)
//!   - search (query parsing and execution)
//!   - manager (owner registry, mutation coordination)
//!
//! - **cli**: `blogdex` command-line adapter (depends on core)
//!
//! # Example
//!
//! ```no_run
//! use blogdex::{Config, Content, IndexManager};
//!
//! let manager = IndexManager::new(Config::load()?);
//! let blog = manager.owner("my-blog")?;
//!
//! blog.index_one(&Content::entry("42", "Hello").with_body("First post"))?;
//! let results = blog.search("first")?;
//! assert_eq!(results.ids(), vec!["42"]);
//! # Ok::<(), blogdex::BlogdexError>(())
//! ```

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{BlogdexError, Result};
pub use core::manager::{IndexManager, OwnerIndex};
pub use core::types::*;

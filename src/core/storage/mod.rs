//! Storage layer for per-owner Tantivy indexes.
//!
//! Each owner (a blog) gets an isolated index directory. The index is
//! created lazily by the first write or clear, so an owner that was
//! never indexed has no index at all and searches return nothing.
//!
//! # Owner Storage Structure
//!
//! ```text
//! {index_root}/
//! ├── {owner-id-1}/
//! │   ├── owner.json          # Owner metadata (schema version, analyzer)
//! │   └── tantivy/            # Tantivy index
//! │       ├── .managed.json
//! │       ├── meta.json
//! │       └── [segment files]
//! ```

pub mod schema;
mod store;

pub use store::{IndexMetadata, IndexStore, ReadSession, WriteSession};

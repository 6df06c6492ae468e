//! Core domain logic (transport-agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Content entities, hits and mutation outcomes
//! - **xdg**: XDG directory handling
//! - **analysis**: Analyzer identifier resolution
//! - **mapping**: Content to document mapping
//! - **storage**: Per-owner Tantivy index management
//! - **search**: Query execution with parse-failure recovery
//! - **manager**: Owner registry and mutation coordination

pub mod analysis;
pub mod config;
pub mod error;
pub mod manager;
pub mod mapping;
pub mod search;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{BlogdexError, Result};
pub use manager::{IndexManager, OwnerIndex};

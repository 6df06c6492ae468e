//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for one
//! group of commands.

pub mod completions;
pub mod config;
pub mod index;
pub mod owner;
pub mod search;

// Re-export argument types for use in mod.rs
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use index::IndexArgs;
pub use owner::{ClearArgs, StatsArgs, UnindexArgs};
pub use search::SearchArgs;

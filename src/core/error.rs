//! Error types and error handling for the blogdex search index.
//!
//! This module defines the error types used throughout the
//! crate. The mutation path returns them per call (and per entity
//! inside a batch report); the query path absorbs parse failures
//! into an advisory message and only surfaces fatal errors.

use thiserror::Error;

/// Result type alias for blogdex operations
pub type Result<T> = std::result::Result<T, BlogdexError>;

/// Main error type for the blogdex index
#[derive(Error, Debug)]
pub enum BlogdexError {
    #[error("Mapping failed: {0}")]
    Mapping(String),

    #[error("Index not found for owner: {0}")]
    IndexMissing(String),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Invalid owner: {0}")]
    InvalidOwner(String),

    #[error("Failed to parse query: {0}")]
    QueryParse(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl BlogdexError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, BlogdexError::IndexMissing(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            BlogdexError::Mapping(_)
                | BlogdexError::InvalidOwner(_)
                | BlogdexError::InvalidQuery(_)
                | BlogdexError::QueryParse(_)
                | BlogdexError::ConfigError(_)
        )
    }

    /// Check if this error came from the index store (disk or tantivy)
    pub fn is_store_fault(&self) -> bool {
        matches!(
            self,
            BlogdexError::Storage(_) | BlogdexError::Io(_) | BlogdexError::InvalidIndex(_)
        )
    }
}

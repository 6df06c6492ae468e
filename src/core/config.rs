//! Configuration management for blogdex.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{BlogdexError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Smallest writer heap tantivy accepts for a single indexing thread
pub const MIN_WRITER_HEAP_BYTES: usize = 15_000_000;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub search: SearchConfig,

    /// Per-owner overrides, keyed by owner id
    #[serde(default)]
    pub owners: BTreeMap<String, OwnerConfig>,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory holding one index directory per owner
    #[serde(default = "default_index_root")]
    pub index_root: PathBuf,

    /// Heap budget for each index writer
    #[serde(default = "default_writer_heap_bytes")]
    pub writer_heap_bytes: usize,
}

/// Analysis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Analyzer identifier used when an owner does not name one
    #[serde(default = "default_analyzer")]
    pub analyzer: String,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Maximum hits per query
    #[serde(default = "default_max_hits")]
    pub max_hits: usize,

    /// Maximum query string length in characters
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

/// Owner-level overrides
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OwnerConfig {
    /// Index directory for this owner (default: `{index_root}/{owner}`)
    #[serde(default)]
    pub index_dir: Option<PathBuf>,

    /// Analyzer identifier for this owner
    #[serde(default)]
    pub analyzer: Option<String>,
}

// Default value functions
fn default_index_root() -> PathBuf {
    PathBuf::from("./data/indexes")
}

fn default_writer_heap_bytes() -> usize {
    50_000_000
}

fn default_analyzer() -> String {
    crate::core::analysis::DEFAULT_ANALYZER.to_string()
}

fn default_max_hits() -> usize {
    1000
}

fn default_max_query_length() -> usize {
    1000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_root: default_index_root(),
            writer_heap_bytes: default_writer_heap_bytes(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            analyzer: default_analyzer(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_hits: default_max_hits(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| BlogdexError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Configuration rooted at an explicit index directory
    pub fn with_index_root(index_root: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.storage.index_root = index_root.into();
        config
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. BLOGDEX_CONFIG env var
    /// 2. XDG config file (~/.config/blogdex/config.toml)
    /// 3. ./blogdex.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("BLOGDEX_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("blogdex.toml").exists() {
                Self::from_file("blogdex.toml")?
            } else {
                Self::default()
            }
        };

        // Use the XDG data directory unless a root was chosen explicitly
        if config.storage.index_root == default_index_root() {
            config.storage.index_root = xdg.indexes_dir();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Storage configuration
        if let Ok(data_dir) = env::var("BLOGDEX_DATA_DIR") {
            self.storage.index_root = PathBuf::from(data_dir).join("indexes");
        }
        if let Ok(heap) = env::var("BLOGDEX_WRITER_HEAP_BYTES") {
            if let Ok(bytes) = heap.parse() {
                self.storage.writer_heap_bytes = bytes;
            }
        }

        // Analysis configuration
        if let Ok(analyzer) = env::var("BLOGDEX_ANALYZER") {
            self.analysis.analyzer = analyzer;
        }

        // Search configuration
        if let Ok(max_hits) = env::var("BLOGDEX_MAX_HITS") {
            if let Ok(n) = max_hits.parse() {
                self.search.max_hits = n;
            }
        }
        if let Ok(max_query_len) = env::var("BLOGDEX_MAX_QUERY_LENGTH") {
            if let Ok(len) = max_query_len.parse() {
                self.search.max_query_length = len;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.storage.writer_heap_bytes < MIN_WRITER_HEAP_BYTES {
            return Err(BlogdexError::ConfigError(format!(
                "Writer heap must be at least {MIN_WRITER_HEAP_BYTES} bytes"
            )));
        }

        if self.search.max_hits == 0 {
            return Err(BlogdexError::ConfigError(
                "Max hits must be non-zero".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(BlogdexError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        for owner in self.owners.keys() {
            validate_owner_id(owner).map_err(|e| BlogdexError::ConfigError(e.message()))?;
        }

        Ok(())
    }

    /// Index directory for an owner
    pub fn owner_index_dir(&self, owner: &str) -> PathBuf {
        self.owners
            .get(owner)
            .and_then(|o| o.index_dir.clone())
            .unwrap_or_else(|| self.storage.index_root.join(owner))
    }

    /// Analyzer identifier for an owner
    pub fn owner_analyzer(&self, owner: &str) -> &str {
        self.owners
            .get(owner)
            .and_then(|o| o.analyzer.as_deref())
            .unwrap_or(&self.analysis.analyzer)
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Index root: {:?}", self.storage.index_root);
        tracing::info!("  Writer heap: {} bytes", self.storage.writer_heap_bytes);
        tracing::info!("  Analyzer: {}", self.analysis.analyzer);
        tracing::info!("  Max hits: {}", self.search.max_hits);
        tracing::info!("  Max query length: {}", self.search.max_query_length);
        tracing::info!("  Owner overrides: {}", self.owners.len());
    }
}

/// Check that an owner id is usable as a directory name
pub fn validate_owner_id(owner: &str) -> Result<()> {
    if owner.trim().is_empty() {
        return Err(BlogdexError::InvalidOwner(
            "Owner id cannot be empty".to_string(),
        ));
    }

    if owner.contains(['/', '\\']) || owner == "." || owner == ".." {
        return Err(BlogdexError::InvalidOwner(format!(
            "Owner id '{owner}' must not contain path separators"
        )));
    }

    Ok(())
}

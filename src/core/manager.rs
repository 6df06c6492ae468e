//! Owner index registry and mutation coordination.
//!
//! [`IndexManager`] hands out one [`OwnerIndex`] per owner id. Every
//! mutation on an owner runs under that owner's lock and ends in a
//! single commit, so a reader sees the state before or after it and
//! never anything in between. Searches do not take the lock.

use crate::core::analysis::{AnalyzerResolver, ResolvedAnalyzer};
use crate::core::config::{validate_owner_id, Config};
use crate::core::error::{BlogdexError, Result};
use crate::core::mapping::DocumentMapper;
use crate::core::search::QueryExecutor;
use crate::core::storage::{IndexStore, WriteSession};
use crate::core::types::{
    BatchReport, Content, IndexOutcome, IndexState, IndexStats, SearchResultSet,
};
use dashmap::DashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

/// Registry of owner indexes
pub struct IndexManager {
    config: Config,
    owners: DashMap<String, Arc<OwnerIndex>>,
}

impl IndexManager {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            owners: DashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the index for an owner, opening it on first use.
    ///
    /// Repeated calls return the same instance, so all callers share
    /// one mutation lock per owner.
    pub fn owner(&self, owner_id: &str) -> Result<Arc<OwnerIndex>> {
        validate_owner_id(owner_id)?;

        if let Some(index) = self.owners.get(owner_id) {
            return Ok(Arc::clone(&index));
        }

        let opened = Arc::new(OwnerIndex::open(owner_id, &self.config)?);
        let entry = self
            .owners
            .entry(owner_id.to_string())
            .or_insert(opened);
        Ok(Arc::clone(entry.value()))
    }

    /// Ids of owners opened so far
    pub fn loaded_owners(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.owners.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }
}

/// One owner's index with its mutation lock
pub struct OwnerIndex {
    store: IndexStore,
    executor: QueryExecutor,
    lock: Mutex<()>,
}

impl OwnerIndex {
    /// Open an owner's index location using the owner's configuration
    pub fn open(owner_id: &str, config: &Config) -> Result<Self> {
        validate_owner_id(owner_id)?;

        let analyzer = AnalyzerResolver::resolve(config.owner_analyzer(owner_id));
        if analyzer.fell_back {
            tracing::warn!(
                "Owner '{}' uses the {} analyzer in place of '{}'",
                owner_id,
                analyzer.name,
                analyzer.requested
            );
        }

        let store = IndexStore::open(
            owner_id,
            config.owner_index_dir(owner_id),
            analyzer,
            config.storage.writer_heap_bytes,
        )?;

        Ok(Self {
            store,
            executor: QueryExecutor::new(config.search.max_hits, config.search.max_query_length),
            lock: Mutex::new(()),
        })
    }

    pub fn owner_id(&self) -> &str {
        self.store.owner()
    }

    pub fn analyzer(&self) -> &ResolvedAnalyzer {
        self.store.analyzer()
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // Index state lives on disk and commits are atomic
        self.lock.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Recovering poisoned lock for owner '{}'", self.owner_id());
            poisoned.into_inner()
        })
    }

    /// Index or re-index one entity.
    ///
    /// The previous document for the id is deleted and the new one
    /// added in the same commit. An unpublished entity only has its
    /// previous document removed.
    pub fn index_one(&self, content: &Content) -> Result<IndexOutcome> {
        let _guard = self.lock();

        match DocumentMapper::map(content)? {
            Some(doc) => {
                let mut session = self.store.open_for_write()?;
                session.delete_id(&doc.id);
                session.add(&doc)?;
                session.commit()?;

                tracing::debug!("Indexed '{}' for owner '{}'", doc.id, self.owner_id());
                Ok(IndexOutcome::Indexed)
            }
            None => {
                if let Some(id) = unpublished_id(content) {
                    if self.store.exists() {
                        let mut session = self.store.open_for_write()?;
                        session.delete_id(id);
                        session.commit()?;
                    }
                }
                Ok(IndexOutcome::Unpublished)
            }
        }
    }

    /// Index a batch of entities with one commit.
    ///
    /// An entity that fails to map or write is skipped and reported;
    /// only a commit failure fails the call.
    pub fn index_many(&self, entities: &[Content]) -> Result<BatchReport> {
        let _guard = self.lock();
        self.index_batch(entities)
    }

    /// Remove the document for an id. A no-op on an absent index.
    pub fn unindex_one(&self, id: &str) -> Result<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(BlogdexError::Mapping(
                "Cannot unindex a blank id".to_string(),
            ));
        }

        let _guard = self.lock();

        if !self.store.exists() {
            tracing::debug!(
                "No index for owner '{}', nothing to unindex",
                self.owner_id()
            );
            return Ok(());
        }

        let mut session = self.store.open_for_write()?;
        session.delete_id(id);
        session.commit()?;

        tracing::debug!("Unindexed '{}' for owner '{}'", id, self.owner_id());
        Ok(())
    }

    /// Reset the index to empty
    pub fn clear(&self) -> Result<()> {
        let _guard = self.lock();
        self.store.clear()?;
        tracing::info!("Cleared index for owner '{}'", self.owner_id());
        Ok(())
    }

    /// Clear and re-index everything in one critical section
    pub fn rebuild_all(&self, entities: &[Content]) -> Result<BatchReport> {
        let _guard = self.lock();
        self.store.clear()?;
        self.index_batch(entities)
    }

    /// Run a query. Does not block on mutations.
    pub fn search(&self, query: &str) -> Result<SearchResultSet> {
        self.executor.search(&self.store, query)
    }

    /// Document, segment and size statistics
    pub fn stats(&self) -> Result<IndexStats> {
        let metadata = self.store.metadata().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable metadata for owner '{}': {}", self.owner_id(), e);
            None
        });
        let (state, documents, segments) = match self.store.open_for_read()? {
            Some(session) => {
                let searcher = session.searcher();
                (
                    IndexState::Present,
                    searcher.num_docs(),
                    searcher.segment_readers().len(),
                )
            }
            None => (IndexState::Absent, 0, 0),
        };

        Ok(IndexStats {
            owner: self.owner_id().to_string(),
            state,
            documents,
            segments,
            size_bytes: self.store.size_bytes(),
            analyzer: self.analyzer().name.to_string(),
            last_commit_at: metadata.and_then(|m| m.last_commit_at),
        })
    }

    /// Index a batch. Caller holds the lock.
    fn index_batch(&self, entities: &[Content]) -> Result<BatchReport> {
        let start = Instant::now();
        let mut report = BatchReport::default();

        if entities.is_empty() {
            return Ok(report);
        }

        let mut session = self.store.open_for_write()?;
        for content in entities {
            let outcome = Self::apply(&mut session, content);
            if let IndexOutcome::Skipped { reason } = &outcome {
                tracing::warn!(
                    "Skipping entity {:?} for owner '{}': {}",
                    content.id,
                    self.owner_id(),
                    reason
                );
            }
            report.push(content.id.clone(), outcome);
        }
        session.commit()?;

        tracing::info!(
            "Indexed {} entities for owner '{}' ({} unpublished, {} skipped) in {}ms",
            report.indexed(),
            self.owner_id(),
            report.unpublished(),
            report.skipped(),
            start.elapsed().as_millis()
        );

        Ok(report)
    }

    fn apply(session: &mut WriteSession<'_>, content: &Content) -> IndexOutcome {
        match DocumentMapper::map(content) {
            Ok(Some(doc)) => {
                session.delete_id(&doc.id);
                match session.add(&doc) {
                    Ok(()) => IndexOutcome::Indexed,
                    Err(e) => IndexOutcome::Skipped {
                        reason: e.message(),
                    },
                }
            }
            Ok(None) => {
                if let Some(id) = unpublished_id(content) {
                    session.delete_id(id);
                }
                IndexOutcome::Unpublished
            }
            Err(e) => IndexOutcome::Skipped {
                reason: e.message(),
            },
        }
    }
}

/// Id of an unpublished entity, if it has a usable one
fn unpublished_id(content: &Content) -> Option<&str> {
    DocumentMapper::require_id(content).ok()
}

//! Owner index storage.
//!
//! Owns one owner's index location and its lifecycle: the index is
//! absent until the first write session or `clear()`, then present.
//! One tantivy `Index` and `IndexReader` are shared by every session on
//! the store; write sessions commit atomically and reload the reader
//! before returning, so read sessions see the latest commit.

use crate::core::analysis::ResolvedAnalyzer;
use crate::core::error::{BlogdexError, Result};
use crate::core::mapping::IndexedDocument;
use crate::core::storage::schema::{create_schema, IndexFields, SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, Searcher};

/// Owner index metadata (written next to the tantivy directory)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub owner: String,
    pub schema_version: u32,
    pub analyzer: String,
    pub created_at: DateTime<Utc>,
    pub last_commit_at: Option<DateTime<Utc>>,
}

/// Open index with its shared reader
#[derive(Clone)]
struct IndexHandle {
    index: Index,
    reader: IndexReader,
    fields: IndexFields,
}

/// Physical index location for one owner
pub struct IndexStore {
    owner: String,

    /// Owner directory (metadata + tantivy index)
    dir: PathBuf,

    analyzer: ResolvedAnalyzer,

    /// Heap budget handed to each index writer
    writer_heap_bytes: usize,

    /// Loaded on first use, replaced when `clear` recreates the index
    handle: RwLock<Option<IndexHandle>>,
}

impl std::fmt::Debug for IndexStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexStore")
            .field("owner", &self.owner)
            .field("dir", &self.dir)
            .field("analyzer", &self.analyzer.name)
            .finish()
    }
}

impl IndexStore {
    /// Open the owner's index location, creating the directory if absent.
    ///
    /// The index itself stays absent until the first write or clear.
    pub fn open(
        owner: &str,
        dir: PathBuf,
        analyzer: ResolvedAnalyzer,
        writer_heap_bytes: usize,
    ) -> Result<Self> {
        fs::create_dir_all(&dir)?;

        Ok(Self {
            owner: owner.to_string(),
            dir,
            analyzer,
            writer_heap_bytes,
            handle: RwLock::new(None),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn analyzer(&self) -> &ResolvedAnalyzer {
        &self.analyzer
    }

    /// Get tantivy index directory path
    fn tantivy_dir(&self) -> PathBuf {
        self.dir.join("tantivy")
    }

    /// Get metadata file path
    fn metadata_path(&self) -> PathBuf {
        self.dir.join("owner.json")
    }

    /// Check if the index has been created
    pub fn exists(&self) -> bool {
        self.tantivy_dir().join("meta.json").exists()
    }

    /// Read owner metadata, if any has been written
    pub fn metadata(&self) -> Result<Option<IndexMetadata>> {
        let path = self.metadata_path();
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Replace the metadata file in one rename
    fn write_metadata(&self, metadata: &IndexMetadata) -> Result<()> {
        let json = serde_json::to_string_pretty(metadata)?;
        let tmp = self.dir.join("owner.json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, self.metadata_path())?;
        Ok(())
    }

    fn fresh_metadata(&self) -> IndexMetadata {
        IndexMetadata {
            owner: self.owner.clone(),
            schema_version: SCHEMA_VERSION,
            analyzer: self.analyzer.name.to_string(),
            created_at: Utc::now(),
            last_commit_at: None,
        }
    }

    /// Stamp the metadata after a commit. The commit is already durable,
    /// so failures are logged and not returned.
    fn record_commit(&self) {
        let mut metadata = match self.metadata() {
            Ok(Some(metadata)) => metadata,
            Ok(None) => self.fresh_metadata(),
            Err(e) => {
                tracing::warn!(
                    "Rewriting unreadable metadata for owner '{}': {}",
                    self.owner,
                    e
                );
                self.fresh_metadata()
            }
        };
        metadata.last_commit_at = Some(Utc::now());
        metadata.analyzer = self.analyzer.name.to_string();

        if let Err(e) = self.write_metadata(&metadata) {
            tracing::warn!("Failed to update metadata for owner '{}': {}", self.owner, e);
        }
    }

    fn cached(&self) -> Option<IndexHandle> {
        self.handle
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop the shared handle so the next session reopens from disk
    fn forget(&self) {
        *self.handle.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Shared handle on the existing index, opened on first use
    fn load(&self) -> Result<Option<IndexHandle>> {
        if let Some(handle) = self.cached() {
            return Ok(Some(handle));
        }

        let mut slot = self.handle.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            if !self.exists() {
                return Ok(None);
            }
            *slot = Some(self.open_index()?);
        }
        Ok(slot.clone())
    }

    /// Shared handle, creating the index if absent
    fn load_or_create(&self) -> Result<IndexHandle> {
        let mut slot = self.handle.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.as_ref() {
            return Ok(handle.clone());
        }

        let handle = if self.exists() {
            self.open_index()?
        } else {
            self.create_index()?
        };
        *slot = Some(handle.clone());
        Ok(handle)
    }

    /// Open a write session, creating the index if absent
    pub fn open_for_write(&self) -> Result<WriteSession<'_>> {
        let handle = self.load_or_create()?;
        self.write_session(handle)
    }

    /// Open a read session on the latest commit.
    ///
    /// Returns `None` if the index has never been created.
    pub fn open_for_read(&self) -> Result<Option<ReadSession>> {
        match self.open_reader() {
            Ok(session) => Ok(Some(session)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Open a read session, failing with `IndexMissing` if the index
    /// has never been created
    pub fn open_reader(&self) -> Result<ReadSession> {
        let handle = self
            .load()?
            .ok_or_else(|| BlogdexError::IndexMissing(self.owner.clone()))?;

        Ok(ReadSession {
            searcher: handle.reader.searcher(),
            index: handle.index,
            fields: handle.fields,
        })
    }

    /// Reset the index to an empty, present state.
    ///
    /// A healthy index is emptied with a single atomic commit. An index
    /// that cannot be opened (corrupt, unreadable metadata or older
    /// schema) is destroyed and recreated.
    pub fn clear(&self) -> Result<()> {
        let mut slot = self.handle.write().unwrap_or_else(PoisonError::into_inner);

        let existing = match slot.clone() {
            Some(handle) => Some(Ok(handle)),
            None if self.exists() => Some(self.open_index()),
            None => None,
        };

        match existing {
            Some(Ok(handle)) => {
                *slot = Some(handle.clone());
                drop(slot);

                let mut session = self.write_session(handle)?;
                session.delete_all()?;
                return session.commit();
            }
            Some(Err(BlogdexError::InvalidIndex(reason))) => {
                tracing::warn!(
                    "Recreating index for owner '{}': {}",
                    self.owner,
                    reason
                );
                fs::remove_dir_all(self.tantivy_dir())?;
            }
            Some(Err(e)) => return Err(e),
            None => {}
        }

        let handle = self.create_index()?;
        *slot = Some(handle.clone());
        drop(slot);

        self.write_session(handle)?.commit()
    }

    /// Total size of the owner directory in bytes
    pub fn size_bytes(&self) -> u64 {
        calculate_directory_size(&self.dir)
    }

    fn create_index(&self) -> Result<IndexHandle> {
        let tantivy_dir = self.tantivy_dir();
        fs::create_dir_all(&tantivy_dir)?;

        let schema = create_schema();
        let index = Index::create_in_dir(&tantivy_dir, schema.clone())
            .map_err(|e| BlogdexError::Storage(format!("Failed to create index: {e}")))?;
        self.analyzer.register(&index);

        self.write_metadata(&self.fresh_metadata())?;

        tracing::info!("Created index for owner '{}' at {:?}", self.owner, tantivy_dir);
        self.handle_for(index)
    }

    fn open_index(&self) -> Result<IndexHandle> {
        let metadata = self.metadata().map_err(|e| {
            BlogdexError::InvalidIndex(format!(
                "Unreadable metadata for owner '{}': {}. Please rebuild this index.",
                self.owner, e
            ))
        })?;

        // Check schema version compatibility
        if let Some(metadata) = metadata {
            if metadata.schema_version < SCHEMA_VERSION {
                return Err(BlogdexError::InvalidIndex(format!(
                    "Index for owner '{}' uses old schema version {} (current: v{}). \
                     Please rebuild this index.",
                    self.owner, metadata.schema_version, SCHEMA_VERSION
                )));
            }
            if metadata.analyzer != self.analyzer.name {
                tracing::warn!(
                    "Index for owner '{}' was written with analyzer '{}' but '{}' is configured; \
                     rebuild to re-analyze existing documents",
                    self.owner,
                    metadata.analyzer,
                    self.analyzer.name
                );
            }
        }

        let index = Index::open_in_dir(self.tantivy_dir())
            .map_err(|e| BlogdexError::InvalidIndex(format!("Failed to open index: {e}")))?;
        self.analyzer.register(&index);

        self.handle_for(index)
    }

    fn handle_for(&self, index: Index) -> Result<IndexHandle> {
        let fields = IndexFields::from_schema(&index.schema())?;
        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| BlogdexError::Storage(format!("Failed to create reader: {e}")))?;

        Ok(IndexHandle {
            index,
            reader,
            fields,
        })
    }

    fn write_session(&self, handle: IndexHandle) -> Result<WriteSession<'_>> {
        let writer: IndexWriter = handle
            .index
            .writer(self.writer_heap_bytes)
            .map_err(|e| BlogdexError::Storage(format!("Failed to create writer: {e}")))?;

        Ok(WriteSession {
            store: self,
            writer,
            reader: handle.reader,
            fields: handle.fields,
        })
    }
}

/// Pending changes to an owner's index.
///
/// Nothing is visible to readers until [`WriteSession::commit`];
/// dropping the session discards pending operations.
pub struct WriteSession<'a> {
    store: &'a IndexStore,
    writer: IndexWriter,
    reader: IndexReader,
    fields: IndexFields,
}

impl WriteSession<'_> {
    /// Delete every document with the given id
    pub fn delete_id(&mut self, id: &str) {
        self.writer.delete_term(self.fields.id_term(id));
    }

    /// Add a mapped document
    pub fn add(&mut self, doc: &IndexedDocument) -> Result<()> {
        self.writer
            .add_document(self.fields.to_document(doc))
            .map_err(|e| BlogdexError::Storage(format!("Failed to add document {}: {e}", doc.id)))?;
        Ok(())
    }

    /// Delete every document in the index
    pub fn delete_all(&mut self) -> Result<()> {
        self.writer
            .delete_all_documents()
            .map_err(|e| BlogdexError::Storage(format!("Failed to delete documents: {e}")))?;
        Ok(())
    }

    /// Commit all pending operations, publish them to readers and
    /// release the writer.
    ///
    /// Only a failed tantivy commit is an error. Once it succeeds the
    /// changes are durable and later steps just log.
    pub fn commit(mut self) -> Result<()> {
        let store = self.store;

        if let Err(e) = self.writer.commit() {
            tracing::error!("Commit failed for owner '{}': {}", store.owner, e);
            return Err(BlogdexError::Storage(format!("Failed to commit: {e}")));
        }

        if let Err(e) = self.writer.wait_merging_threads() {
            tracing::warn!("Merge failed for owner '{}': {}", store.owner, e);
        }

        if let Err(e) = self.reader.reload() {
            tracing::warn!(
                "Reader reload failed for owner '{}', reopening on next read: {}",
                store.owner,
                e
            );
            store.forget();
        }

        store.record_commit();
        Ok(())
    }
}

/// Snapshot of the latest committed state
pub struct ReadSession {
    index: Index,
    searcher: Searcher,
    fields: IndexFields,
}

impl ReadSession {
    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn fields(&self) -> &IndexFields {
        &self.fields
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }
}

/// Calculate directory size recursively
fn calculate_directory_size(path: &Path) -> u64 {
    let mut total = 0;

    if path.is_dir() {
        if let Ok(entries) = fs::read_dir(path) {
            for entry in entries.filter_map(|e| e.ok()) {
                if let Ok(metadata) = entry.metadata() {
                    if metadata.is_dir() {
                        total += calculate_directory_size(&entry.path());
                    } else {
                        total += metadata.len();
                    }
                }
            }
        }
    } else if path.is_file() {
        if let Ok(metadata) = fs::metadata(path) {
            total = metadata.len();
        }
    }

    total
}

//! Core data types for the blogdex search index.
//!
//! This module defines the content entities handed to the index by
//! collaborators, the search results handed back, and the explicit
//! outcome values returned by mutation calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of content entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Dated blog entry with categories, tags and responses
    #[default]
    Entry,

    /// Static page (no categories, tags or responses)
    Page,
}

/// A reader comment attached to an entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub body: String,

    /// Only approved comments are searchable
    #[serde(default)]
    pub approved: bool,
}

/// A trackback attached to an entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackBack {
    pub excerpt: String,

    /// Only approved trackbacks are searchable
    #[serde(default)]
    pub approved: bool,
}

/// A content entity supplied by a collaborator for indexing.
///
/// Every text field is optional; the mapper fills gaps with empty
/// strings. `published` defaults to `false` when deserialized, so an
/// entity without the flag is never made searchable by accident.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub kind: ContentKind,

    /// Stable unique identifier (required for indexing)
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub subtitle: Option<String>,

    #[serde(default)]
    pub permalink: Option<String>,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub author: Option<String>,

    /// Full body text (searchable, never stored)
    #[serde(default)]
    pub body: Option<String>,

    /// Human-readable excerpt returned with hits
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub published: bool,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub comments: Vec<Comment>,

    #[serde(default)]
    pub trackbacks: Vec<TrackBack>,
}

impl Content {
    /// Create a published entry
    pub fn entry(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Entry,
            id: Some(id.into()),
            title: Some(title.into()),
            published: true,
            ..Self::default()
        }
    }

    /// Create a published static page
    pub fn page(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Page,
            ..Self::entry(id, title)
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_permalink(mut self, permalink: impl Into<String>) -> Self {
        self.permalink = Some(permalink.into());
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_comment(mut self, body: impl Into<String>, approved: bool) -> Self {
        self.comments.push(Comment {
            body: body.into(),
            approved,
        });
        self
    }

    pub fn with_trackback(mut self, excerpt: impl Into<String>, approved: bool) -> Self {
        self.trackbacks.push(TrackBack {
            excerpt: excerpt.into(),
            approved,
        });
        self
    }

    /// Mark the entity as not published
    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }
}

/// A single search hit, rebuilt from stored fields only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Owner whose index produced the hit
    pub owner: String,

    pub id: String,
    pub permalink: String,
    pub title: String,
    pub subtitle: String,
    pub summary: String,
    pub published_at: Option<DateTime<Utc>>,

    /// BM25 relevance score (higher = more relevant)
    pub score: f32,
}

/// Ordered search results (descending score)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultSet {
    /// The query exactly as the caller supplied it
    pub query: String,

    pub hits: Vec<SearchHit>,

    /// Advisory for the user, set only when the query could not be parsed as written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResultSet {
    /// Empty result set echoing the query
    pub fn empty(query: &str) -> Self {
        Self {
            query: query.to_string(),
            hits: Vec::new(),
            message: None,
        }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Ids of all hits, in rank order
    pub fn ids(&self) -> Vec<&str> {
        self.hits.iter().map(|h| h.id.as_str()).collect()
    }
}

/// Outcome of indexing a single entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IndexOutcome {
    /// A live document now exists for the id
    Indexed,

    /// Entity is unpublished; any previous document was removed
    Unpublished,

    /// Entity was skipped inside a batch (mapping or store error)
    Skipped { reason: String },
}

/// Status of one entity within a batch call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStatus {
    /// Entity id, if it had one
    pub id: Option<String>,

    #[serde(flatten)]
    pub outcome: IndexOutcome,
}

/// Per-entity report from `index_many` / `rebuild_all`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub statuses: Vec<EntityStatus>,
}

impl BatchReport {
    pub fn push(&mut self, id: Option<String>, outcome: IndexOutcome) {
        self.statuses.push(EntityStatus { id, outcome });
    }

    /// Number of entities that now have a live document
    pub fn indexed(&self) -> usize {
        self.count(|o| matches!(o, IndexOutcome::Indexed))
    }

    /// Number of unpublished entities
    pub fn unpublished(&self) -> usize {
        self.count(|o| matches!(o, IndexOutcome::Unpublished))
    }

    /// Number of entities skipped due to an error
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, IndexOutcome::Skipped { .. }))
    }

    /// True when no entity was skipped
    pub fn is_clean(&self) -> bool {
        self.skipped() == 0
    }

    fn count(&self, pred: impl Fn(&IndexOutcome) -> bool) -> usize {
        self.statuses.iter().filter(|s| pred(&s.outcome)).count()
    }
}

/// Lifecycle state of an owner's index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    Absent,
    Present,
}

/// Statistics for an owner's index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub owner: String,
    pub state: IndexState,

    /// Live (non-deleted) documents
    pub documents: u64,
    pub segments: usize,
    pub size_bytes: u64,

    /// Analyzer strategy the index is written with
    pub analyzer: String,
    pub last_commit_at: Option<DateTime<Utc>>,
}

//! Tantivy schema for indexed content.
//!
//! Defines the logical document layout shared by every owner index
//! and the conversions between [`IndexedDocument`] and tantivy
//! documents.

use crate::core::analysis::CONTENT_TOKENIZER;
use crate::core::error::{BlogdexError, Result};
use crate::core::mapping::IndexedDocument;
use crate::core::types::SearchHit;
use chrono::{DateTime, Utc};
use tantivy::schema::*;
use tantivy::TantivyDocument;

/// Current schema version
/// Version 1: Initial content schema
pub const SCHEMA_VERSION: u32 = 1;

pub const ID: &str = "id";
pub const TITLE: &str = "title";
pub const SUBTITLE: &str = "subtitle";
pub const PERMALINK: &str = "permalink";
pub const PUBLISHED_AT: &str = "published_at";
pub const AUTHOR: &str = "author";
pub const SUMMARY: &str = "summary";
pub const BODY: &str = "body";
pub const CATEGORY: &str = "category";
pub const TAG: &str = "tag";
pub const AGGREGATED_TEXT: &str = "aggregated_text";

/// Default field for unqualified query terms
pub const DEFAULT_SEARCH_FIELD: &str = AGGREGATED_TEXT;

/// Fields a query may name in a `field:value` qualifier
pub const QUERYABLE_FIELDS: [&str; 10] = [
    ID,
    TITLE,
    SUBTITLE,
    PERMALINK,
    AUTHOR,
    SUMMARY,
    BODY,
    CATEGORY,
    TAG,
    AGGREGATED_TEXT,
];

/// Analyzed with the owner's analyzer, positions kept for phrase queries
fn analyzed() -> TextOptions {
    TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(CONTENT_TOKENIZER)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions),
    )
}

/// Create the tantivy schema for content indexing
///
/// Fields:
/// - id: Unique content id (STRING | STORED)
/// - title, subtitle, author, summary: analyzed | STORED
/// - permalink: raw (STRING | STORED)
/// - published_at: Date | STORED
/// - body: analyzed only, not retrievable
/// - category, tag: analyzed | STORED, multi-valued
/// - aggregated_text: analyzed only (title, body, approved responses)
pub fn create_schema() -> Schema {
    let mut builder = Schema::builder();

    // Identity and links
    builder.add_text_field(ID, STRING | STORED);
    builder.add_text_field(PERMALINK, STRING | STORED);

    // Displayed with hits
    builder.add_text_field(TITLE, analyzed().set_stored());
    builder.add_text_field(SUBTITLE, analyzed().set_stored());
    builder.add_text_field(AUTHOR, analyzed().set_stored());
    builder.add_text_field(SUMMARY, analyzed().set_stored());
    builder.add_date_field(PUBLISHED_AT, STORED);

    // Searchable only
    builder.add_text_field(BODY, analyzed());
    builder.add_text_field(AGGREGATED_TEXT, analyzed());

    // Classification
    builder.add_text_field(CATEGORY, analyzed().set_stored());
    builder.add_text_field(TAG, analyzed().set_stored());

    builder.build()
}

/// Resolved field handles for a schema
#[derive(Debug, Clone, Copy)]
pub struct IndexFields {
    pub id: Field,
    pub title: Field,
    pub subtitle: Field,
    pub permalink: Field,
    pub published_at: Field,
    pub author: Field,
    pub summary: Field,
    pub body: Field,
    pub category: Field,
    pub tag: Field,
    pub aggregated_text: Field,
}

impl IndexFields {
    /// Resolve all fields, failing if the schema is not ours
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        let field = |name: &str| {
            schema
                .get_field(name)
                .map_err(|e| BlogdexError::InvalidIndex(format!("Missing {name} field: {e}")))
        };

        Ok(Self {
            id: field(ID)?,
            title: field(TITLE)?,
            subtitle: field(SUBTITLE)?,
            permalink: field(PERMALINK)?,
            published_at: field(PUBLISHED_AT)?,
            author: field(AUTHOR)?,
            summary: field(SUMMARY)?,
            body: field(BODY)?,
            category: field(CATEGORY)?,
            tag: field(TAG)?,
            aggregated_text: field(AGGREGATED_TEXT)?,
        })
    }

    /// Term addressing every document with the given id
    pub fn id_term(&self, id: &str) -> Term {
        Term::from_field_text(self.id, id)
    }

    /// Convert a mapped document into a tantivy document
    pub fn to_document(&self, doc: &IndexedDocument) -> TantivyDocument {
        let mut out = TantivyDocument::default();

        out.add_text(self.id, &doc.id);
        out.add_text(self.title, &doc.title);
        out.add_text(self.subtitle, &doc.subtitle);
        out.add_text(self.permalink, &doc.permalink);
        out.add_text(self.author, &doc.author);
        out.add_text(self.summary, &doc.summary);
        out.add_text(self.body, &doc.body);
        out.add_text(self.aggregated_text, &doc.aggregated_text);

        if let Some(published_at) = doc.published_at {
            out.add_date(
                self.published_at,
                tantivy::DateTime::from_timestamp_secs(published_at.timestamp()),
            );
        }

        for category in &doc.categories {
            out.add_text(self.category, category);
        }
        for tag in &doc.tags {
            out.add_text(self.tag, tag);
        }

        out
    }

    /// Rebuild a hit from stored fields
    pub fn to_hit(&self, doc: &TantivyDocument, owner: &str, score: f32) -> SearchHit {
        SearchHit {
            owner: owner.to_string(),
            id: Self::extract_text(doc, self.id),
            permalink: Self::extract_text(doc, self.permalink),
            title: Self::extract_text(doc, self.title),
            subtitle: Self::extract_text(doc, self.subtitle),
            summary: Self::extract_text(doc, self.summary),
            published_at: Self::extract_date(doc, self.published_at),
            score,
        }
    }

    /// Extract text field from document
    fn extract_text(doc: &TantivyDocument, field: Field) -> String {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    }

    /// Extract date field from document
    fn extract_date(doc: &TantivyDocument, field: Field) -> Option<DateTime<Utc>> {
        doc.get_first(field)
            .and_then(|v| v.as_datetime())
            .and_then(|dt| DateTime::from_timestamp(dt.into_timestamp_secs(), 0))
    }
}

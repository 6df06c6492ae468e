//! Content to document mapping.
//!
//! Converts collaborator-supplied [`Content`] into the uniform
//! [`IndexedDocument`] shape the schema expects. Visibility rules
//! live here: unpublished content never yields a document, and only
//! approved responses reach the searchable text.

use crate::core::error::{BlogdexError, Result};
use crate::core::types::{Content, ContentKind};
use chrono::{DateTime, Utc};

/// One searchable unit, ready for the schema
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedDocument {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub permalink: String,
    pub published_at: Option<DateTime<Utc>>,
    pub author: String,
    pub summary: String,
    pub body: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,

    /// Title, body and approved responses joined by spaces
    pub aggregated_text: String,
}

/// Maps content entities to indexable documents
pub struct DocumentMapper;

impl DocumentMapper {
    /// Map an entity to a document.
    ///
    /// Returns `Ok(None)` for unpublished content and a
    /// [`BlogdexError::Mapping`] when the id is missing or blank.
    pub fn map(content: &Content) -> Result<Option<IndexedDocument>> {
        if !content.published {
            return Ok(None);
        }

        let id = Self::require_id(content)?;
        let title = text(&content.title);
        let body = text(&content.body);

        let mut aggregated = vec![title.as_str(), body.as_str()];
        let (categories, tags) = match content.kind {
            ContentKind::Entry => {
                aggregated.extend(
                    content
                        .comments
                        .iter()
                        .filter(|c| c.approved)
                        .map(|c| c.body.as_str()),
                );
                aggregated.extend(
                    content
                        .trackbacks
                        .iter()
                        .filter(|t| t.approved)
                        .map(|t| t.excerpt.as_str()),
                );
                (content.categories.clone(), content.tags.clone())
            }
            ContentKind::Page => (Vec::new(), Vec::new()),
        };
        let aggregated_text = aggregated.join(" ");

        Ok(Some(IndexedDocument {
            id: id.to_string(),
            subtitle: text(&content.subtitle),
            permalink: text(&content.permalink),
            published_at: content.published_at,
            author: text(&content.author),
            summary: text(&content.summary),
            categories,
            tags,
            aggregated_text,
            title,
            body,
        }))
    }

    /// The entity id, or a mapping error if it has none
    pub fn require_id(content: &Content) -> Result<&str> {
        match content.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            Some(_) => Err(BlogdexError::Mapping(format!(
                "{} '{}' has a blank id",
                kind_label(content.kind),
                text(&content.title)
            ))),
            None => Err(BlogdexError::Mapping(format!(
                "{} '{}' has no id",
                kind_label(content.kind),
                text(&content.title)
            ))),
        }
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn kind_label(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Entry => "Entry",
        ContentKind::Page => "Page",
    }
}

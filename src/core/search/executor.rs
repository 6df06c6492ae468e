//! BM25 query execution over an owner's index.

use crate::core::error::{BlogdexError, Result};
use crate::core::search::query::{escape_query, has_field_qualifier};
use crate::core::storage::IndexStore;
use crate::core::types::SearchResultSet;
use std::time::Instant;
use tantivy::collector::TopDocs;
use tantivy::query::{Query, QueryParser};
use tantivy::TantivyDocument;

/// Advisory when the query could not be parsed at all
pub const PARSE_ERROR_MESSAGE: &str = "Sorry, but there was an error. Please try another search";

/// Advisory when the query only parsed after escaping
pub const LITERAL_QUERY_MESSAGE: &str =
    "Your search contained special characters, they were treated as plain text";

/// Executes free-text queries with one escape-and-retry on parse failure
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    max_hits: usize,
    max_query_length: usize,
}

impl QueryExecutor {
    pub fn new(max_hits: usize, max_query_length: usize) -> Self {
        Self {
            max_hits: max_hits.max(1),
            max_query_length,
        }
    }

    pub fn max_hits(&self) -> usize {
        self.max_hits
    }

    /// Execute a query against an owner's index.
    ///
    /// Blank queries and never-created indexes yield an empty result
    /// set. Unparseable queries yield results with an advisory message
    /// rather than an error.
    pub fn search(&self, store: &IndexStore, query_str: &str) -> Result<SearchResultSet> {
        let start = Instant::now();

        if query_str.trim().is_empty() {
            return Ok(SearchResultSet::empty(query_str));
        }

        let length = query_str.chars().count();
        if length > self.max_query_length {
            return Err(BlogdexError::InvalidQuery(format!(
                "Query is {length} characters long (max {})",
                self.max_query_length
            )));
        }

        let Some(session) = store.open_for_read()? else {
            tracing::debug!("No index for owner '{}', returning no hits", store.owner());
            return Ok(SearchResultSet::empty(query_str));
        };
        let fields = session.fields();

        let query_parser = QueryParser::for_index(session.index(), vec![fields.aggregated_text]);

        let (query, message) = match parse(&query_parser, query_str) {
            Ok(query) => (query, None),
            Err(first) => {
                let retry = escape_query(query_str);
                tracing::debug!(
                    "{}, retrying as {:?} (qualified: {})",
                    first,
                    retry,
                    has_field_qualifier(query_str)
                );

                match parse(&query_parser, &retry) {
                    Ok(query) => (query, Some(LITERAL_QUERY_MESSAGE.to_string())),
                    Err(e) => {
                        tracing::warn!("Query {:?} could not be recovered: {}", query_str, e);
                        return Ok(SearchResultSet {
                            query: query_str.to_string(),
                            hits: Vec::new(),
                            message: Some(PARSE_ERROR_MESSAGE.to_string()),
                        });
                    }
                }
            }
        };

        // Execute search with BM25 ranking
        let searcher = session.searcher();
        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(self.max_hits))
            .map_err(|e| BlogdexError::SearchFailed(format!("Search failed: {e}")))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address).map_err(|e| {
                BlogdexError::SearchFailed(format!("Failed to retrieve document: {e}"))
            })?;
            hits.push(fields.to_hit(&doc, store.owner(), score));
        }

        tracing::debug!(
            "Search {:?} on owner '{}': {} hits in {}ms",
            query_str,
            store.owner(),
            hits.len(),
            start.elapsed().as_millis()
        );

        Ok(SearchResultSet {
            query: query_str.to_string(),
            hits,
            message,
        })
    }
}

/// Strict parse. A query with no terms left is a parse failure too.
fn parse(parser: &QueryParser, query_str: &str) -> Result<Box<dyn Query>> {
    if query_str.trim().is_empty() {
        return Err(BlogdexError::QueryParse(
            "Nothing left to search for".to_string(),
        ));
    }

    parser
        .parse_query(query_str)
        .map_err(|e| BlogdexError::QueryParse(format!("{query_str:?}: {e}")))
}

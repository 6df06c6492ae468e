//! Search module for BM25 full-text search.
//!
//! Queries run against the `aggregated_text` field by default and may
//! name one other field with a leading `field:value` qualifier.

mod executor;
mod query;

pub use executor::{QueryExecutor, LITERAL_QUERY_MESSAGE, PARSE_ERROR_MESSAGE};
pub use query::{escape_query, has_field_qualifier};

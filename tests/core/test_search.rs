//! Search tests: query semantics, qualifiers, limits and recovery

use crate::common::{create_test_manager, indexed_owner, search_ids};
use blogdex::core::search::{LITERAL_QUERY_MESSAGE, PARSE_ERROR_MESSAGE};
use blogdex::{BlogdexError, Config, Content, IndexManager, IndexState};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

#[test]
fn test_shared_and_distinct_terms() {
    let (manager, _temp) = create_test_manager();
    let blog = manager.owner("blog").unwrap();
    blog.index_many(&[
        Content::entry("1", "Hello World"),
        Content::entry("2", "Goodbye World"),
    ])
    .unwrap();

    let mut world = search_ids(&blog, "World");
    world.sort();
    assert_eq!(world, vec!["1", "2"]);
    assert_eq!(search_ids(&blog, "Hello"), vec!["1"]);
}

#[test]
fn test_search_is_case_insensitive() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    assert_eq!(search_ids(&blog, "TANTIVY"), vec!["1"]);
}

#[test]
fn test_hit_carries_stored_fields() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    let results = blog.search("tantivy").unwrap();
    let hit = &results.hits[0];

    assert_eq!(hit.owner, "blog");
    assert_eq!(hit.id, "1");
    assert_eq!(hit.title, "Getting started with Tantivy");
    assert_eq!(hit.subtitle, "Inverted indexes in Rust");
    assert_eq!(hit.permalink, "/2024/01/15/getting-started.html");
    assert_eq!(hit.summary, "A first look at full-text search");
    assert_eq!(
        hit.published_at,
        Some(Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap())
    );
    assert!(hit.score > 0.0);
    assert_eq!(results.query, "tantivy");
}

#[test]
fn test_field_qualifiers() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    assert_eq!(search_ids(&blog, "title:sourdough"), vec!["2"]);
    assert_eq!(search_ids(&blog, "author:sam"), vec!["1"]);
    assert_eq!(search_ids(&blog, "tag:rust"), vec!["1"]);
    assert_eq!(search_ids(&blog, "category:food"), vec!["2"]);
    assert_eq!(search_ids(&blog, "id:about"), vec!["about"]);
}

#[test]
fn test_qualifier_limits_to_field() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    // "patience" is only in the body of entry 2
    assert_eq!(search_ids(&blog, "patience"), vec!["2"]);
    assert!(search_ids(&blog, "title:patience").is_empty());
}

#[test]
fn test_phrase_and_boolean_queries() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    assert_eq!(search_ids(&blog, "\"full-text search engine\""), vec!["1"]);
    assert_eq!(search_ids(&blog, "bread -sourdough"), vec!["about"]);
    assert_eq!(search_ids(&blog, "rust AND tantivy"), vec!["1"]);
}

#[test]
fn test_unbalanced_query_never_errors() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    let results = blog.search("foo AND (bar").unwrap();

    assert!(results.is_empty());
    assert!(results.message.as_deref().is_some_and(|m| !m.is_empty()));
    assert_eq!(results.query, "foo AND (bar");
}

#[test]
fn test_unbalanced_query_still_matches_terms() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    let results = blog.search("tantivy AND (rust").unwrap();

    assert_eq!(results.ids(), vec!["1"]);
    assert_eq!(results.message.as_deref(), Some(LITERAL_QUERY_MESSAGE));
}

#[test]
fn test_qualified_query_with_bad_syntax_keeps_field() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    let results = blog.search("title:sourdough (diary").unwrap();

    assert!(results.ids().contains(&"2"));
    assert!(results.message.is_some());
}

#[test]
fn test_unknown_field_prefix_treated_as_text() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    let results = blog.search("Rust: the book").unwrap();

    assert!(results.ids().contains(&"1"));
    assert_eq!(results.message.as_deref(), Some(LITERAL_QUERY_MESSAGE));
}

#[test]
fn test_parse_error_message_text() {
    assert_eq!(
        PARSE_ERROR_MESSAGE,
        "Sorry, but there was an error. Please try another search"
    );
}

#[test]
fn test_blank_query_returns_empty_without_creating_index() {
    let (manager, _temp) = create_test_manager();
    let blog = manager.owner("blog").unwrap();

    for query in ["", "   ", "\t\n"] {
        let results = blog.search(query).unwrap();
        assert!(results.is_empty());
        assert!(results.message.is_none());
    }
    assert_eq!(blog.stats().unwrap().state, IndexState::Absent);
}

#[test]
fn test_never_indexed_owner_returns_empty() {
    let (manager, _temp) = create_test_manager();
    let blog = manager.owner("fresh").unwrap();

    let results = blog.search("anything").unwrap();
    assert!(results.is_empty());
    assert!(results.message.is_none());
    assert_eq!(blog.stats().unwrap().state, IndexState::Absent);
}

#[test]
fn test_overlong_query_rejected() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    let query = "word ".repeat(300);
    let err = blog.search(&query).unwrap_err();
    assert!(matches!(err, BlogdexError::InvalidQuery(_)));
    assert!(err.is_bad_request());
}

#[test]
fn test_hits_capped_by_config() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::with_index_root(temp_dir.path());
    config.storage.writer_heap_bytes = 15_000_000;
    config.search.max_hits = 4;
    let manager = IndexManager::new(config);
    let blog = manager.owner("blog").unwrap();

    let entities: Vec<Content> = (0..10)
        .map(|i| Content::entry(i.to_string(), format!("Weekly notes {i}")))
        .collect();
    blog.index_many(&entities).unwrap();

    assert_eq!(blog.search("weekly").unwrap().len(), 4);
}

#[test]
fn test_hits_sorted_by_descending_score() {
    let (manager, _temp) = create_test_manager();
    let blog = manager.owner("blog").unwrap();
    blog.index_many(&[
        Content::entry("1", "Compilers").with_body("a note on parsing among many other topics"),
        Content::entry("2", "Parsing").with_body("parsing parsing parsing"),
        Content::entry("3", "Parsing tricks").with_body("parsing"),
    ])
    .unwrap();

    let results = blog.search("parsing").unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results.hits[0].id, "2");
    assert!(results
        .hits
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
}

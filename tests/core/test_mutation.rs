//! Mutation tests: index, re-index, unindex, clear, rebuild

use crate::common::{create_test_manager, indexed_owner, sample_blog, search_ids};
use blogdex::{BlogdexError, Content, IndexOutcome, IndexState};

#[test]
fn test_every_published_entity_found_by_title() {
    let (manager, _temp) = create_test_manager();
    let blog = manager.owner("blog").unwrap();

    for content in sample_blog().into_iter().filter(|c| c.published) {
        blog.index_one(&content).unwrap();
        let title = content.title.clone().unwrap();
        let id = content.id.clone().unwrap();
        assert!(
            search_ids(&blog, &title).contains(&id),
            "'{title}' should find {id}"
        );
    }
}

#[test]
fn test_unindex_removes_entity() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");
    assert_eq!(search_ids(&blog, "sourdough"), vec!["2"]);

    blog.unindex_one("2").unwrap();

    assert!(search_ids(&blog, "sourdough").is_empty());
    assert!(!search_ids(&blog, "flour OR forum OR diary").contains(&"2".to_string()));
    assert_eq!(blog.stats().unwrap().documents, 2);
}

#[test]
fn test_unindex_unknown_id_is_harmless() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    blog.unindex_one("does-not-exist").unwrap();
    assert_eq!(blog.stats().unwrap().documents, 3);
}

#[test]
fn test_index_twice_yields_one_hit() {
    let (manager, _temp) = create_test_manager();
    let blog = manager.owner("blog").unwrap();
    let entry = Content::entry("7", "Twice indexed").with_body("duplicate check");

    blog.index_one(&entry).unwrap();
    blog.index_one(&entry).unwrap();

    assert_eq!(search_ids(&blog, "duplicate"), vec!["7"]);
    assert_eq!(blog.stats().unwrap().documents, 1);
}

#[test]
fn test_unpublished_never_retrievable() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    assert!(search_ids(&blog, "quantum").is_empty());

    let draft = Content::entry("8", "Hidden draft")
        .with_body("embargoed")
        .unpublished();
    assert_eq!(blog.index_one(&draft).unwrap(), IndexOutcome::Unpublished);
    assert!(search_ids(&blog, "embargoed").is_empty());
}

#[test]
fn test_unpublishing_removes_live_document() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");
    assert_eq!(search_ids(&blog, "tantivy"), vec!["1"]);

    let mut retracted = sample_blog().remove(0);
    retracted.published = false;
    blog.index_one(&retracted).unwrap();

    assert!(search_ids(&blog, "tantivy").is_empty());
}

#[test]
fn test_only_approved_responses_searchable() {
    let (manager, _temp) = create_test_manager();
    let blog = manager.owner("blog").unwrap();
    blog.index_one(
        &Content::entry("1", "Responses")
            .with_comment("alpha", true)
            .with_comment("beta", false),
    )
    .unwrap();

    assert_eq!(search_ids(&blog, "alpha"), vec!["1"]);
    assert!(search_ids(&blog, "beta").is_empty());
}

#[test]
fn test_sample_blog_responses() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    assert_eq!(search_ids(&blog, "segments"), vec!["1"]);
    assert!(search_ids(&blog, "watches").is_empty());
    assert_eq!(search_ids(&blog, "forum"), vec!["2"]);
    assert!(search_ids(&blog, "casino").is_empty());
}

#[test]
fn test_page_drops_tags() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    assert!(search_ids(&blog, "tag:ignored").is_empty());
    assert_eq!(search_ids(&blog, "bakes"), vec!["about"]);
}

#[test]
fn test_batch_skips_bad_entity_and_continues() {
    let (manager, _temp) = create_test_manager();
    let blog = manager.owner("blog").unwrap();

    let mut no_id = Content::entry("x", "Orphan");
    no_id.id = None;
    let entities = vec![
        Content::entry("1", "First good"),
        no_id,
        Content::entry("  ", "Blank id"),
        Content::entry("2", "Second good"),
        Content::entry("3", "Draft").unpublished(),
    ];

    let report = blog.index_many(&entities).unwrap();

    assert_eq!(report.statuses.len(), 5);
    assert_eq!(report.indexed(), 2);
    assert_eq!(report.skipped(), 2);
    assert_eq!(report.unpublished(), 1);
    assert!(!report.is_clean());
    assert!(matches!(
        report.statuses[1].outcome,
        IndexOutcome::Skipped { .. }
    ));
    assert_eq!(blog.stats().unwrap().documents, 2);
}

#[test]
fn test_batch_with_repeated_id_keeps_last() {
    let (manager, _temp) = create_test_manager();
    let blog = manager.owner("blog").unwrap();

    blog.index_many(&[
        Content::entry("1", "Old version").with_body("original"),
        Content::entry("1", "New version").with_body("revised"),
    ])
    .unwrap();

    assert_eq!(blog.stats().unwrap().documents, 1);
    assert!(search_ids(&blog, "original").is_empty());
    assert_eq!(search_ids(&blog, "revised"), vec!["1"]);
}

#[test]
fn test_index_one_without_id_fails() {
    let (manager, _temp) = create_test_manager();
    let blog = manager.owner("blog").unwrap();

    let mut content = Content::entry("x", "No id");
    content.id = None;

    let err = blog.index_one(&content).unwrap_err();
    assert!(matches!(err, BlogdexError::Mapping(_)));
    assert!(err.is_bad_request());
}

#[test]
fn test_clear_then_empty_batch_then_search() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    blog.clear().unwrap();
    let report = blog.index_many(&[]).unwrap();
    let results = blog.search("anything").unwrap();

    assert!(report.statuses.is_empty());
    assert!(results.is_empty());
    assert!(results.message.is_none());
    assert_eq!(blog.stats().unwrap().state, IndexState::Present);
}

#[test]
fn test_clear_on_absent_index_makes_it_present() {
    let (manager, _temp) = create_test_manager();
    let blog = manager.owner("blog").unwrap();
    assert_eq!(blog.stats().unwrap().state, IndexState::Absent);

    blog.clear().unwrap();

    let stats = blog.stats().unwrap();
    assert_eq!(stats.state, IndexState::Present);
    assert_eq!(stats.documents, 0);
}

#[test]
fn test_rebuild_replaces_everything() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    let report = blog
        .rebuild_all(&[Content::entry("9", "Fresh start").with_body("rebuilt")])
        .unwrap();

    assert_eq!(report.indexed(), 1);
    assert_eq!(search_ids(&blog, "rebuilt"), vec!["9"]);
    assert!(search_ids(&blog, "tantivy").is_empty());
    assert_eq!(blog.stats().unwrap().documents, 1);
}

#[test]
fn test_rebuild_with_nothing_leaves_empty_index() {
    let (manager, _temp) = create_test_manager();
    let blog = indexed_owner(&manager, "blog");

    blog.rebuild_all(&[]).unwrap();

    let stats = blog.stats().unwrap();
    assert_eq!(stats.state, IndexState::Present);
    assert_eq!(stats.documents, 0);
}

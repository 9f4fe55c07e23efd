//! Session lifecycle and the shape of what hosts receive.

use crate::common::{engine_over, sample_docs};
use glean::testing::{generate_docs, make_config, make_source};
use glean::{SearchEngine, SearchError};
use serde_json::json;

#[test]
fn test_queries_before_initialize_fail() {
    let mut engine = SearchEngine::new();
    assert!(matches!(engine.suggest("fox", 5), Err(SearchError::NotInitialized)));
    assert!(matches!(
        engine.search_page("fox", 5, 1),
        Err(SearchError::NotInitialized)
    ));
}

#[test]
fn test_page_items_serialize_for_hosts() {
    let mut engine = engine_over(&sample_docs(), 0);
    let page = engine.search_page("quick", 10, 1).unwrap();

    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(
        value,
        json!({
            "items": [{
                "type": "page",
                "link": "animals/fox.html",
                "title": "Foxes",
                "description": "<span class=\"search-highlight\">quick</span> brown fox jumps"
            }],
            "total": 1
        })
    );
}

#[test]
fn test_pages_partition_the_ranked_list() {
    let docs = generate_docs(30);
    let mut engine = engine_over(&docs, 2);

    let first = engine.search_page("fox", 4, 1).unwrap();
    let total = first.total;
    assert_eq!(total, 10, "every third document mentions the fox");

    let mut links = Vec::new();
    for page in 1..=3 {
        let result = engine.search_page("fox", 4, page).unwrap();
        assert_eq!(result.total, total);
        links.extend(result.items.into_iter().map(|item| item.link));
    }
    assert_eq!(links.len(), total);

    let mut unique = links.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), total);

    assert!(engine.search_page("fox", 4, 4).unwrap().items.is_empty());
}

#[test]
fn test_suggest_and_search_differ_on_the_last_word() {
    let mut engine = engine_over(&sample_docs(), 0);

    // Typeahead completes "unbreak" to "unbreakable".
    let suggestions = engine.suggest("unbreak", 10).unwrap();
    assert_eq!(suggestions.len(), 1);

    // A submitted search takes the word as typed.
    let page = engine.search_page("unbreak", 10, 1).unwrap();
    assert_eq!(page.total, 0);
}

#[test]
fn test_reinitialize_switches_corpus() {
    let mut engine = engine_over(&sample_docs(), 2);
    assert_eq!(engine.search_page("fox", 10, 1).unwrap().total, 2);

    let docs = generate_docs(6);
    engine.initialize(make_config(2), make_source(&docs));
    assert_eq!(engine.search_page("fox", 10, 1).unwrap().total, 2);
    assert!(engine
        .search_page("fox", 10, 1)
        .unwrap()
        .items
        .iter()
        .all(|item| item.link.starts_with("doc/")));
}

#[test]
fn test_teardown_then_query_fails() {
    let mut engine = engine_over(&sample_docs(), 2);
    engine.suggest("fox", 5).unwrap();
    engine.teardown();
    assert_eq!(engine.suggest("fox", 5).unwrap_err().code(), "NOT_INITIALIZED");
}

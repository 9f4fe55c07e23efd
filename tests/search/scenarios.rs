//! End-to-end scenarios from the documentation.

use crate::common::{doc, engine_over, marked, Corpus};
use glean::search::wildcard;
use glean::{Clause, Position, Strategy, Wildcard, DEFAULT_MARK};

#[test]
fn test_brown_fox_phrase() {
    let docs = vec![doc("fox.html", "Foxes", "quick brown fox jumps")];
    let corpus = Corpus::new(&docs, 2);
    let results = corpus.search("brown fox", 10, true);

    let content = &results[0].scores["content"];
    assert_eq!(content.score, 12.0);
    assert_eq!(content.anchor, Position::new(6, 15));
    assert_eq!(content.positions, vec![Position::new(6, 15)]);
}

#[test]
fn test_infix_wildcard_on_unbreakable() {
    let converted = wildcard(&Clause::new("break"), Wildcard::Both);
    assert_eq!(converted.wildcard, Wildcard::Both);
    assert!(!converted.use_pipeline);
    assert_eq!(converted.to_string(), "*break*");

    let docs = vec![doc("u.html", "Builds", "an unbreakable build")];
    let corpus = Corpus::new(&docs, 2);
    let results = corpus.search("break", 10, true);

    assert_eq!(results[0].strategy, Strategy::BothWildcard);
    let content = &results[0].scores["content"];
    assert_eq!(content.score, 0.5);
    assert_eq!(content.anchor, Position::new(3, 14));
}

#[test]
fn test_two_letter_term_is_never_relaxed() {
    let unchanged = wildcard(&Clause::new("br"), Wildcard::Both);
    assert_eq!(unchanged.wildcard, Wildcard::None);
    assert!(unchanged.use_pipeline);

    let docs = vec![doc("b.html", "B", "bring brown bread")];
    let corpus = Corpus::new(&docs, 2);
    assert!(corpus.search("br", 10, false).is_empty());
}

#[test]
fn test_typeahead_then_submit() {
    let docs = vec![
        doc("a.html", "Alpha", "the search engine ranks pages"),
        doc("b.html", "Beta", "an engineer searching by hand"),
    ];
    let mut engine = engine_over(&docs, 0);

    let typed = engine.suggest("search eng", 10).unwrap();
    assert_eq!(typed.len(), 2);
    assert_eq!(typed[0].link, "a.html");
    assert_eq!(typed[1].link, "b.html");
    // Each page is scored by the strategy that found it: "a" matched on
    // "search" alone, "b" only through the completed "eng*".
    assert_eq!(marked(&typed[0].description, DEFAULT_MARK), vec!["search"]);
    assert_eq!(marked(&typed[1].description, DEFAULT_MARK), vec!["engineer"]);

    let submitted = engine.search_page("search engine", 10, 1).unwrap();
    assert_eq!(submitted.total, 1);
    assert_eq!(submitted.items[0].link, "a.html");
}

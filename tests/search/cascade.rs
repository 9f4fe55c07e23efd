//! Query cascade: strategy order, relaxation, dedup and presence handling.

use crate::common::{doc, references, sample_corpus, sample_docs, Corpus};
use glean::index::{LanguagePack, Pipeline};
use glean::{search, Strategy};
use std::collections::HashSet;

#[test]
fn test_precise_match_needs_no_relaxation() {
    let corpus = Corpus::new(&sample_docs(), 0);
    let results = corpus.search("brown fox", 10, true);

    assert_eq!(references(&results), vec!["animals/fox.html", "animals/bear.html"]);
    assert!(results.iter().all(|r| r.strategy == Strategy::Precise));
}

#[test]
fn test_both_wildcard_finds_infix() {
    let corpus = sample_corpus();
    let results = corpus.search("break", 10, true);

    assert_eq!(references(&results), vec!["guide/unbreakable.html"]);
    assert_eq!(results[0].strategy, Strategy::BothWildcard);
}

#[test]
fn test_tolerance_caps_relaxation() {
    let strict = Corpus::new(&sample_docs(), 1);
    assert!(strict.search("break", 10, true).is_empty());

    let none = Corpus::new(&sample_docs(), 0);
    assert!(none.search("instal", 10, true).is_empty());

    let trailing = Corpus::new(&sample_docs(), 1);
    let results = trailing.search("instal", 10, true);
    assert_eq!(results[0].strategy, Strategy::TrailingWildcard);
    assert_eq!(references(&results), vec!["guide/install.html"]);
}

#[test]
fn test_short_terms_are_never_wildcarded() {
    let corpus = sample_corpus();
    assert!(corpus.search("br", 10, true).is_empty());
    assert!(corpus.search("br", 10, false).is_empty());
}

#[test]
fn test_unsealed_completes_last_word() {
    let corpus = Corpus::new(&sample_docs(), 0);

    // Sealed: "bro" is taken literally and only "quick" matches.
    let sealed = corpus.search("quick bro", 10, true);
    assert_eq!(references(&sealed), vec!["animals/fox.html"]);

    // Unsealed: "bro*" picks up the bear page as well.
    let unsealed = corpus.search("quick bro", 10, false);
    assert_eq!(
        references(&unsealed),
        vec!["animals/fox.html", "animals/bear.html"]
    );
    assert_eq!(unsealed[0].strategy, Strategy::Precise);
    assert_eq!(unsealed[1].strategy, Strategy::PreciseUnsealed);
}

#[test]
fn test_documents_are_scored_by_first_strategy_only() {
    let corpus = sample_corpus();
    let results = corpus.search("brown", 10, false);

    let unique: HashSet<&str> = references(&results).into_iter().collect();
    assert_eq!(unique.len(), results.len());
    assert!(results.iter().all(|r| r.strategy == Strategy::Precise));
}

#[test]
fn test_cascade_stops_once_count_is_reached() {
    let corpus = sample_corpus();
    let results = corpus.search("brown", 1, true);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].reference, "animals/fox.html");
}

#[test]
fn test_zero_count_returns_nothing() {
    assert!(sample_corpus().search("brown", 0, true).is_empty());
}

#[test]
fn test_prohibited_clause_excludes_at_every_level() {
    for tolerance in 0..3 {
        let corpus = Corpus::new(&sample_docs(), tolerance);
        let results = corpus.search("brown -bear", 10, false);
        assert_eq!(references(&results), vec!["animals/fox.html"], "tolerance {}", tolerance);
    }
}

#[test]
fn test_required_clause_filters() {
    let corpus = Corpus::new(&sample_docs(), 0);
    let results = corpus.search("+install setup", 10, true);
    assert_eq!(references(&results), vec!["guide/install.html"]);
}

#[test]
fn test_field_scope() {
    let corpus = Corpus::new(&sample_docs(), 0);
    let results = corpus.search("title:setup", 10, true);
    assert_eq!(references(&results), vec!["guide/cafe.html"]);
    assert!(results[0].scores.contains_key("title"));
    assert!(!results[0].scores.contains_key("keywords"));
}

#[test]
fn test_parse_errors_surface() {
    let corpus = sample_corpus();
    for query in ["summary:fox", "fox~1", "f*x", "+"] {
        let err = search(&corpus.config, &corpus.index, query, 10, true).unwrap_err();
        assert_eq!(err.code(), "QUERY_PARSE_ERROR", "query {}", query);
    }
}

#[test]
fn test_empty_query_is_empty_result() {
    let corpus = sample_corpus();
    assert!(corpus.search("", 10, true).is_empty());
    assert!(corpus.search("   ", 10, false).is_empty());
}

#[test]
fn test_no_match_is_not_an_error() {
    assert!(sample_corpus().search("zeppelin", 10, false).is_empty());
}

#[test]
fn test_stop_words_drop_out_of_the_query() {
    let mut corpus = Corpus::new(&sample_docs(), 0);
    let plain = corpus.search("the brown", 10, true);
    assert!(plain.len() > 2);

    let pack = LanguagePack {
        language: "en".to_string(),
        stop_words: vec!["the".to_string()],
    };
    corpus.index = corpus.index.with_pipeline(Pipeline::new().with_language(pack));

    let filtered = corpus.search("the brown", 10, true);
    assert_eq!(
        references(&filtered),
        vec!["animals/fox.html", "animals/bear.html"]
    );
}

#[test]
#[cfg(feature = "unicode-normalization")]
fn test_diacritics_fold_on_both_sides() {
    let corpus = Corpus::new(&sample_docs(), 0);
    for query in ["cafe", "café", "CAFÉ"] {
        let results = corpus.search(query, 10, true);
        assert_eq!(references(&results), vec!["guide/cafe.html"], "query {}", query);
    }
}

#[test]
fn test_ranking_is_stable_for_equal_scores() {
    let docs: Vec<_> = (0..5)
        .map(|i| doc(&format!("same/{}.html", i), "Same", "identical words here"))
        .collect();
    let corpus = Corpus::new(&docs, 2);
    let results = corpus.search("identical", 10, true);
    assert_eq!(
        references(&results),
        vec![
            "same/0.html",
            "same/1.html",
            "same/2.html",
            "same/3.html",
            "same/4.html"
        ]
    );
}

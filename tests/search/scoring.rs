//! Phrased and sparsed scoring, seen through the cascade.

use crate::common::{doc, references, Corpus};
use glean::scoring::{EXACT_PHRASE_WEIGHT, EXACT_WEIGHT, WILDCARD_WEIGHT};
use glean::Position;

fn content_score(corpus: &Corpus, query: &str, reference: &str) -> f64 {
    corpus
        .search(query, 10, true)
        .into_iter()
        .find(|r| r.reference == reference)
        .and_then(|r| r.scores.get("content").map(|s| s.score))
        .unwrap_or_else(|| panic!("{} has no content score for '{}'", reference, query))
}

#[test]
fn test_contiguous_phrase_outranks_scattered_terms() {
    let docs = vec![
        doc("scattered.html", "One", "foo then something else entirely then bar"),
        doc("phrase.html", "Two", "this has foo bar in it"),
    ];
    let corpus = Corpus::new(&docs, 0);
    let results = corpus.search("foo bar", 10, true);

    assert_eq!(references(&results), vec!["phrase.html", "scattered.html"]);
    assert_eq!(
        content_score(&corpus, "foo bar", "phrase.html"),
        EXACT_WEIGHT + EXACT_PHRASE_WEIGHT
    );
    assert_eq!(content_score(&corpus, "foo bar", "scattered.html"), EXACT_WEIGHT);
}

#[test]
fn test_reversed_phrase_gets_no_bonus() {
    let docs = vec![doc("reversed.html", "R", "bar foo")];
    let corpus = Corpus::new(&docs, 0);
    assert_eq!(content_score(&corpus, "foo bar", "reversed.html"), EXACT_WEIGHT * 2.0);
}

#[test]
fn test_punctuation_within_tolerance_still_merges() {
    // "foo, bar": gap of two characters
    let docs = vec![doc("comma.html", "C", "foo, bar")];
    let corpus = Corpus::new(&docs, 0);
    assert_eq!(content_score(&corpus, "foo bar", "comma.html"), EXACT_WEIGHT + EXACT_PHRASE_WEIGHT);

    // "foo -- bar": gap of four characters breaks the span
    let docs = vec![doc("dash.html", "D", "foo -- bar")];
    let corpus = Corpus::new(&docs, 0);
    assert_eq!(content_score(&corpus, "foo bar", "dash.html"), EXACT_WEIGHT);
}

#[test]
fn test_wildcard_hits_weigh_less_than_exact() {
    let docs = vec![
        doc("exact.html", "E", "install guide"),
        doc("prefix.html", "P", "installation guide"),
    ];
    let corpus = Corpus::new(&docs, 1);
    let results = corpus.search("install", 10, true);

    assert_eq!(references(&results), vec!["exact.html", "prefix.html"]);
    assert_eq!(content_score(&corpus, "install", "prefix.html"), WILDCARD_WEIGHT);
}

#[test]
fn test_anchor_is_best_span() {
    let docs = vec![doc(
        "anchor.html",
        "A",
        "fox alone here, and later the brown fox together",
    )];
    let corpus = Corpus::new(&docs, 0);
    let results = corpus.search("brown fox", 10, true);
    let score = &results[0].scores["content"];

    let start = "fox alone here, and later the ".len();
    assert_eq!(score.anchor, Position::new(start, start + "brown fox".len()));
    assert_eq!(score.positions.len(), 2);
}

#[test]
fn test_fields_without_matches_are_absent() {
    let docs = vec![doc("t.html", "Kiosk manual", "nothing relevant")];
    let corpus = Corpus::new(&docs, 0);
    let results = corpus.search("kiosk", 10, true);

    assert!(results[0].scores.contains_key("title"));
    assert!(!results[0].scores.contains_key("content"));
}

#[test]
fn test_document_score_is_best_field() {
    let docs = vec![doc("both.html", "brown fox", "brown and then a fox")];
    let corpus = Corpus::new(&docs, 0);
    let results = corpus.search("brown fox", 10, true);

    assert_eq!(results[0].scores["title"].score, EXACT_WEIGHT + EXACT_PHRASE_WEIGHT);
    assert_eq!(results[0].max_score(), EXACT_WEIGHT + EXACT_PHRASE_WEIGHT);
}

#[test]
fn test_sparsed_uses_index_score_and_raw_positions() {
    let docs = vec![doc("s.html", "S", "brown fox and another brown fox")];
    let corpus = Corpus::new(&docs, 0).sparsed();
    let results = corpus.search("brown fox", 10, true);

    let result = &results[0];
    let content = &result.scores["content"];
    assert_eq!(content.score, result.base_score);
    assert_eq!(content.anchor, Position::new(0, 5));
    assert_eq!(content.positions.len(), 4, "one position per raw token");
}

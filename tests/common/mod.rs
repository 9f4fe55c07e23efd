//! Shared test utilities and fixtures.

#![allow(dead_code)]

use glean::scoring::ScoredResult;
use glean::testing::{make_config, make_index, make_registry, make_source, TestDoc};
use glean::{search, Confidence, EngineConfig, PostingsIndex, Registry, SearchEngine};

// Re-export canonical test utilities from glean::testing
pub use glean::testing::{doc, sample_docs};

/// Index, registry and config over one corpus.
pub struct Corpus {
    pub index: PostingsIndex,
    pub registry: Registry,
    pub config: EngineConfig,
}

impl Corpus {
    pub fn new(docs: &[TestDoc], tolerance: u32) -> Self {
        Corpus {
            index: make_index(docs),
            registry: make_registry(docs),
            config: make_config(tolerance),
        }
    }

    pub fn sparsed(mut self) -> Self {
        self.config.confidence = Confidence::Sparsed;
        self
    }

    /// Run the cascade, panicking on parse errors.
    pub fn search(&self, query: &str, count: usize, sealed: bool) -> Vec<ScoredResult> {
        search(&self.config, &self.index, query, count, sealed)
            .unwrap_or_else(|e| panic!("query '{}' failed: {}", query, e))
    }
}

/// The sample corpus at the default tolerance.
pub fn sample_corpus() -> Corpus {
    Corpus::new(&sample_docs(), 2)
}

/// An initialized engine over `docs`.
pub fn engine_over(docs: &[TestDoc], tolerance: u32) -> SearchEngine {
    let mut engine = SearchEngine::new();
    engine.initialize(make_config(tolerance), make_source(docs));
    engine
}

pub fn references(results: &[ScoredResult]) -> Vec<&str> {
    results.iter().map(|r| r.reference.as_str()).collect()
}

/// Strip `<span class="...">` markup.
pub fn strip_marks(text: &str) -> String {
    let mut out = String::new();
    let mut rest = text;
    while let Some(at) = rest.find('<') {
        out.push_str(&rest[..at]);
        match rest[at..].find('>') {
            Some(end) => rest = &rest[at + end + 1..],
            None => {
                out.push_str(&rest[at..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Every `<span class="{mark}">…</span>` body, in order.
pub fn marked(text: &str, mark: &str) -> Vec<String> {
    let open = format!("<span class=\"{}\">", mark);
    text.split(open.as_str())
        .skip(1)
        .filter_map(|part| part.split_once("</span>").map(|(body, _)| body.to_string()))
        .collect()
}

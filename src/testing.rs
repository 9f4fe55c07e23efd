//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation. Production
//! indexes are built elsewhere; these helpers build small ones in memory with
//! the same payload format, so tests exercise the real loader.

#![doc(hidden)]

use crate::config::EngineConfig;
use crate::index::{normalize, FieldSpec, IndexPayload, PostingsIndex, PAYLOAD_VERSION};
use crate::resources::MemorySource;
use crate::types::{Registry, RegistryEntry};
use std::collections::BTreeMap;

pub const INDEX_LOCATION: &str = "index.json";
pub const REGISTRY_LOCATION: &str = "registry.json";
pub const LANGUAGE_LOCATION: &str = "language.json";

/// Title matches count double in fixture base scores.
pub const TITLE_BOOST: f64 = 2.0;

/// One fixture document.
#[derive(Debug, Clone)]
pub struct TestDoc {
    pub reference: String,
    pub title: String,
    pub content: String,
    pub keywords: Vec<String>,
}

impl TestDoc {
    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn entry(&self) -> RegistryEntry {
        RegistryEntry {
            title: self.title.clone(),
            content: self.content.clone(),
            keywords: self.keywords.clone(),
        }
    }

    fn field_text(&self, field: &str) -> String {
        match field {
            "title" => self.title.clone(),
            "content" => self.content.clone(),
            _ => self.keywords.join(" "),
        }
    }
}

/// Create a fixture document.
pub fn doc(reference: &str, title: &str, content: &str) -> TestDoc {
    TestDoc {
        reference: reference.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        keywords: Vec::new(),
    }
}

/// Split text into `(term, char_start, char_len)` for every alphanumeric run.
///
/// Terms are normalized the same way the query pipeline normalizes them.
pub fn tokenize(text: &str) -> Vec<(String, usize, usize)> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut start = 0;

    for (offset, c) in text.chars().enumerate() {
        if c.is_alphanumeric() {
            if word.is_empty() {
                start = offset;
            }
            word.push(c);
        } else if !word.is_empty() {
            let len = word.chars().count();
            tokens.push((normalize(&word), start, len));
            word.clear();
        }
    }
    if !word.is_empty() {
        let len = word.chars().count();
        tokens.push((normalize(&word), start, len));
    }

    tokens
}

/// Build an index payload over `docs`, fields `title`, `content`, `keywords`.
pub fn make_payload(docs: &[TestDoc]) -> IndexPayload {
    let fields = vec![
        FieldSpec {
            name: "title".to_string(),
            boost: TITLE_BOOST,
        },
        FieldSpec {
            name: "content".to_string(),
            boost: 1.0,
        },
        FieldSpec {
            name: "keywords".to_string(),
            boost: 1.0,
        },
    ];

    let mut postings: BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<(usize, usize)>>>> =
        BTreeMap::new();

    for doc in docs {
        for field in &fields {
            for (term, start, len) in tokenize(&doc.field_text(&field.name)) {
                postings
                    .entry(term)
                    .or_default()
                    .entry(field.name.clone())
                    .or_default()
                    .entry(doc.reference.clone())
                    .or_default()
                    .push((start, len));
            }
        }
    }

    IndexPayload {
        version: PAYLOAD_VERSION,
        fields,
        documents: docs.iter().map(|doc| doc.reference.clone()).collect(),
        postings,
    }
}

/// Build a loaded index over `docs`.
pub fn make_index(docs: &[TestDoc]) -> PostingsIndex {
    PostingsIndex::from_payload(make_payload(docs)).expect("fixture payload is valid")
}

pub fn make_registry(docs: &[TestDoc]) -> Registry {
    docs.iter()
        .map(|doc| (doc.reference.clone(), doc.entry()))
        .collect()
}

/// A memory source serving `docs` at `INDEX_LOCATION` / `REGISTRY_LOCATION`.
pub fn make_source(docs: &[TestDoc]) -> MemorySource {
    let index = serde_json::to_vec(&make_payload(docs)).expect("payload serializes");
    let registry = serde_json::to_vec(&make_registry(docs)).expect("registry serializes");
    MemorySource::new()
        .with(INDEX_LOCATION, index)
        .with(REGISTRY_LOCATION, registry)
}

/// Engine config pointing at the fixture locations.
pub fn make_config(tolerance: u32) -> EngineConfig {
    let mut config = EngineConfig {
        tolerance,
        ..EngineConfig::default()
    };
    config.resources.index = INDEX_LOCATION.to_string();
    config.resources.registry = REGISTRY_LOCATION.to_string();
    config
}

/// A small documentation corpus used across tests and benches.
pub fn sample_docs() -> Vec<TestDoc> {
    vec![
        doc("animals/fox.html", "Foxes", "quick brown fox jumps"),
        doc(
            "animals/bear.html",
            "Bears",
            "The brown bear is large. A fox would not pick a fight with it.",
        ),
        doc(
            "guide/install.html",
            "Installation",
            "Install the package, then run the installer again to verify.",
        )
        .keywords(&["setup", "install"]),
        doc(
            "guide/unbreakable.html",
            "Unbreakable builds",
            "Reproducible builds are unbreakable when every input is pinned.",
        ),
        doc(
            "guide/cafe.html",
            "Café setup",
            "Configure the café kiosk before the first customer arrives.",
        ),
    ]
}

/// Generate `count` documents of filler text with a few recurring terms.
pub fn generate_docs(count: usize) -> Vec<TestDoc> {
    const WORDS: [&str; 12] = [
        "search", "index", "ranking", "snippet", "phrase", "query", "wildcard", "highlight",
        "document", "registry", "engine", "worker",
    ];

    (0..count)
        .map(|i| {
            let content: Vec<&str> = (0..60)
                .map(|j| WORDS[(i * 7 + j * 5) % WORDS.len()])
                .collect();
            let mut content = content.join(" ");
            if i % 3 == 0 {
                content.push_str("\nquick brown fox jumps over the lazy dog");
            }
            doc(
                &format!("doc/{}.html", i),
                &format!("{} {}", WORDS[i % WORDS.len()], i),
                &content,
            )
        })
        .collect()
}

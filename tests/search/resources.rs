//! Loading payloads from disk, plain and brotli-compressed.

use crate::common::sample_docs;
use glean::testing::{make_payload, make_registry};
use glean::{EngineConfig, FsSource, SearchEngine};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn compress(data: &[u8]) -> Vec<u8> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        encoder.write_all(data).unwrap();
    }
    compressed
}

/// Write the sample corpus as `index.json.br` + `registry.json`.
fn write_payloads(dir: &Path) {
    let index = serde_json::to_vec(&make_payload(&sample_docs())).unwrap();
    let registry = serde_json::to_vec(&make_registry(&sample_docs())).unwrap();
    fs::write(dir.join("index.json.br"), compress(&index)).unwrap();
    fs::write(dir.join("registry.json"), registry).unwrap();
}

fn config(index: &str) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.resources.index = index.to_string();
    config.resources.registry = "registry.json".to_string();
    config
}

#[test]
fn test_engine_loads_compressed_index_from_disk() {
    let dir = TempDir::new().unwrap();
    write_payloads(dir.path());

    let mut engine = SearchEngine::new();
    engine.initialize(config("index.json.br"), FsSource::new(dir.path()));
    assert!(!engine.is_loaded());

    let items = engine.suggest("unbreakable", 5).unwrap();
    assert!(engine.is_loaded());
    assert_eq!(items[0].link, "guide/unbreakable.html");
}

#[test]
fn test_missing_file_is_a_resource_error() {
    let dir = TempDir::new().unwrap();
    write_payloads(dir.path());

    let mut engine = SearchEngine::new();
    engine.initialize(config("missing.json"), FsSource::new(dir.path()));

    let err = engine.suggest("fox", 5).unwrap_err();
    assert_eq!(err.code(), "RESOURCE_LOAD_ERROR");
    assert!(err.to_string().contains("missing.json"));
    assert!(!engine.is_loaded());
}

#[test]
fn test_corrupt_payload_is_a_resource_error() {
    let dir = TempDir::new().unwrap();
    write_payloads(dir.path());
    fs::write(dir.path().join("broken.json.br"), b"not brotli at all").unwrap();
    fs::write(dir.path().join("broken.json"), b"{ \"version\": ").unwrap();

    for location in ["broken.json.br", "broken.json"] {
        let mut engine = SearchEngine::new();
        engine.initialize(config(location), FsSource::new(dir.path()));
        let err = engine.search_page("fox", 5, 1).unwrap_err();
        assert_eq!(err.code(), "RESOURCE_LOAD_ERROR", "location {}", location);
    }
}

#[test]
fn test_language_pack_from_disk_filters_stop_words() {
    let dir = TempDir::new().unwrap();
    write_payloads(dir.path());
    fs::write(
        dir.path().join("en.json"),
        br#"{"language": "en", "stopWords": ["the", "a"]}"#,
    )
    .unwrap();

    // Wildcard terms bypass stop words, so stay at the precise level.
    let mut precise = config("index.json.br");
    precise.tolerance = 0;

    let mut plain = SearchEngine::new();
    plain.initialize(precise.clone(), FsSource::new(dir.path()));
    let unfiltered = plain.search_page("the fox", 10, 1).unwrap().total;

    let mut with_pack = precise;
    with_pack.resources.language = Some("en.json".to_string());
    let mut engine = SearchEngine::new();
    engine.initialize(with_pack, FsSource::new(dir.path()));
    let filtered = engine.search_page("the fox", 10, 1).unwrap();

    assert!(unfiltered > filtered.total);
    assert_eq!(filtered.total, 2);
}

#[test]
fn test_config_file_shape() {
    let json = r#"{
        "tolerance": 1,
        "confidence": "sparsed",
        "mark": "hit",
        "resources": {"index": "index.json.br", "registry": "registry.json"}
    }"#;
    let config = EngineConfig::from_json(json).unwrap();
    assert_eq!(config.tolerance, 1);
    assert_eq!(config.mark, "hit");
    assert_eq!(config.base, "");
    assert_eq!(config.resources.language, None);
}

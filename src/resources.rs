// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Getting the payloads into memory.
//!
//! The engine doesn't care where bytes come from. A `ResourceSource` maps a
//! location string from `Resources` to raw bytes: `FsSource` reads files under
//! a root directory (the CLI), `MemorySource` serves bytes a host already
//! fetched (WASM, tests). Anything ending in `.br` is brotli-decompressed
//! before decoding.
//!
//! Every failure here is a `ResourceLoad` error naming the location. There is
//! no fallback to an empty index.

use crate::config::Resources;
use crate::error::{Result, SearchError};
use crate::index::{LanguagePack, Pipeline, PostingsIndex};
use crate::types::Registry;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Suffix marking a brotli-compressed payload.
pub const BROTLI_SUFFIX: &str = ".br";

const BROTLI_BUFFER: usize = 4096;

/// Where payload bytes come from.
pub trait ResourceSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Files under a root directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsSource { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceSource for FsSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let path = self.root.join(location);
        debug!(path = %path.display(), "reading resource");
        std::fs::read(&path).map_err(|e| SearchError::resource_load(location, e))
    }
}

/// Bytes handed over up front.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, location: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(location, bytes);
        self
    }

    pub fn insert(&mut self, location: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(location.into(), bytes.into());
    }
}

impl ResourceSource for MemorySource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        self.entries
            .get(location)
            .cloned()
            .ok_or_else(|| SearchError::resource_load(location, "not found"))
    }
}

/// Fetch `location` and undo brotli compression if its name says so.
pub fn fetch_decoded(source: &dyn ResourceSource, location: &str) -> Result<Vec<u8>> {
    if location.is_empty() {
        return Err(SearchError::resource_load("resource", "no location configured"));
    }

    let bytes = source.fetch(location)?;
    if !location.ends_with(BROTLI_SUFFIX) {
        return Ok(bytes);
    }

    let mut decoded = Vec::new();
    brotli::Decompressor::new(bytes.as_slice(), BROTLI_BUFFER)
        .read_to_end(&mut decoded)
        .map_err(|e| SearchError::resource_load(location, format!("brotli: {}", e)))?;
    Ok(decoded)
}

pub fn load_registry(source: &dyn ResourceSource, location: &str) -> Result<Registry> {
    let bytes = fetch_decoded(source, location)?;
    serde_json::from_slice(&bytes).map_err(|e| SearchError::resource_load(location, e))
}

pub fn load_language(source: &dyn ResourceSource, location: &str) -> Result<LanguagePack> {
    let bytes = fetch_decoded(source, location)?;
    serde_json::from_slice(&bytes).map_err(|e| SearchError::resource_load(location, e))
}

pub fn load_index(
    source: &dyn ResourceSource,
    location: &str,
    language: Option<LanguagePack>,
) -> Result<PostingsIndex> {
    let bytes = fetch_decoded(source, location)?;
    let index = PostingsIndex::from_json(&bytes).map_err(|e| match e {
        SearchError::ResourceLoad { reason, .. } => SearchError::resource_load(location, reason),
        other => other,
    })?;

    let mut pipeline = Pipeline::new();
    if let Some(pack) = language {
        pipeline = pipeline.with_language(pack);
    }
    Ok(index.with_pipeline(pipeline))
}

/// The in-memory pair the engine queries.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub index: PostingsIndex,
    pub registry: Registry,
}

/// Load index, registry and optional language pack.
pub fn load(resources: &Resources, source: &dyn ResourceSource) -> Result<Loaded> {
    let language = resources
        .language
        .as_deref()
        .map(|location| load_language(source, location))
        .transpose()?;
    let language_code = language.as_ref().map(|pack| pack.language.clone());

    let index = load_index(source, &resources.index, language)?;
    let registry = load_registry(source, &resources.registry)?;

    let stats = index.stats();
    info!(
        documents = stats.documents,
        vocabulary = stats.vocabulary,
        registry = registry.len(),
        language = language_code.as_deref().unwrap_or("none"),
        "resources loaded"
    );

    Ok(Loaded { index, registry })
}

//! WebAssembly binding for a search worker.
//!
//! The JS host owns transport: it fetches the index, registry and optional
//! language payloads however it likes (fetch, importScripts, a cache) and
//! hands the bytes over through `load`. The worker owns everything else.
//!
//! Errors reach JS as `Error` objects whose `name` is the stable error code
//! (`NOT_INITIALIZED`, `QUERY_PARSE_ERROR`, `RESOURCE_LOAD_ERROR`).

use crate::config::{EngineConfig, Resources};
use crate::engine::SearchEngine;
use crate::error::SearchError;
use crate::resources::{self, MemorySource};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

const INDEX_KEY: &str = "index";
const REGISTRY_KEY: &str = "registry";
const LANGUAGE_KEY: &str = "language";

fn to_js_error(error: SearchError) -> JsValue {
    let js = js_sys::Error::new(&error.to_string());
    js.set_name(error.code());
    js.into()
}

/// One worker, one session.
#[wasm_bindgen]
pub struct GleanWorker {
    engine: SearchEngine,
}

impl Default for GleanWorker {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl GleanWorker {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GleanWorker {
        GleanWorker {
            engine: SearchEngine::new(),
        }
    }

    /// Configure the worker. Missing options take their defaults.
    #[wasm_bindgen]
    pub fn init(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        self.engine.configure(config);
        Ok(())
    }

    /// Hand over the payload bytes. Must follow `init`; queries before this
    /// fail with `NOT_INITIALIZED`.
    #[wasm_bindgen]
    pub fn load(
        &mut self,
        index: &[u8],
        registry: &[u8],
        language: Option<Vec<u8>>,
    ) -> Result<(), JsValue> {
        if !self.engine.is_initialized() {
            return Err(to_js_error(SearchError::NotInitialized));
        }

        let mut source = MemorySource::new()
            .with(INDEX_KEY, index.to_vec())
            .with(REGISTRY_KEY, registry.to_vec());
        let mut locations = Resources {
            index: INDEX_KEY.to_string(),
            registry: REGISTRY_KEY.to_string(),
            language: None,
        };
        if let Some(bytes) = language {
            source.insert(LANGUAGE_KEY, bytes);
            locations.language = Some(LANGUAGE_KEY.to_string());
        }

        let loaded = resources::load(&locations, &source).map_err(to_js_error)?;
        self.engine.install(loaded).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn is_loaded(&self) -> bool {
        self.engine.is_loaded()
    }

    /// Typeahead suggestions: `[{type, link, title, description}]`.
    #[wasm_bindgen]
    pub fn suggest(&mut self, query: &str, count: Option<usize>) -> Result<JsValue, JsValue> {
        let items = self
            .engine
            .suggest(query, count.unwrap_or(10))
            .map_err(to_js_error)?;
        to_value(&items).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// One page of full results: `{items, total}`.
    #[wasm_bindgen]
    pub fn search(
        &mut self,
        query: &str,
        count: Option<usize>,
        page: Option<usize>,
    ) -> Result<JsValue, JsValue> {
        let page = self
            .engine
            .search_page(query, count.unwrap_or(10), page.unwrap_or(1))
            .map_err(to_js_error)?;
        to_value(&page).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn teardown(&mut self) {
        self.engine.teardown();
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One search session.
//!
//! A `SearchEngine` lives as long as its hosting context (a browser worker,
//! a CLI invocation) and owns everything that context needs: the config, the
//! resource source, the loaded index and registry, and a one-entry cache of
//! the last full search.
//!
//! ```text
//!   new() ──initialize()──▶ configured ──first query──▶ loaded
//!     ▲                         │ load fails: error, retried next call
//!     └──────teardown()─────────┴──────────────────────────┘
//! ```
//!
//! Queries before `initialize` (or after `teardown`) fail with
//! `NotInitialized`. The index and registry are loaded once and never
//! touched again.

use crate::config::EngineConfig;
use crate::error::{Result, SearchError};
use crate::resources::{self, Loaded, ResourceSource};
use crate::scoring::ScoredResult;
use crate::search;
use crate::snippet::{self, PageItem, Style};
use serde::Serialize;
use tracing::{debug, info};

/// One page of full search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPage {
    pub items: Vec<PageItem>,
    /// Ranked results across all pages.
    pub total: usize,
}

/// The last `search_page` query and its ranked, unpaginated results.
#[derive(Debug, Clone)]
struct CachedQuery {
    query: String,
    results: Vec<ScoredResult>,
}

/// Per-session search engine.
#[derive(Default)]
pub struct SearchEngine {
    config: Option<EngineConfig>,
    source: Option<Box<dyn ResourceSource>>,
    loaded: Option<Loaded>,
    cache: Option<CachedQuery>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the engine. Resources are loaded lazily on the first query.
    ///
    /// Calling this again replaces the config and source and forgets anything
    /// loaded or cached under the previous ones.
    pub fn initialize(&mut self, config: EngineConfig, source: impl ResourceSource + 'static) {
        info!(
            tolerance = config.tolerance,
            confidence = ?config.confidence,
            index = %config.resources.index,
            registry = %config.resources.registry,
            "search engine initialized"
        );
        self.config = Some(config);
        self.source = Some(Box::new(source));
        self.loaded = None;
        self.cache = None;
    }

    /// Configure the engine for a host that hands over payloads itself.
    ///
    /// There is no source to load from: queries fail with `NotInitialized`
    /// until `install` has been called.
    pub fn configure(&mut self, config: EngineConfig) {
        info!(
            tolerance = config.tolerance,
            confidence = ?config.confidence,
            "search engine configured, awaiting payloads"
        );
        self.config = Some(config);
        self.source = None;
        self.loaded = None;
        self.cache = None;
    }

    /// Hand over an already loaded index and registry, skipping the source.
    pub fn install(&mut self, loaded: Loaded) -> Result<()> {
        if self.config.is_none() {
            return Err(SearchError::NotInitialized);
        }
        self.loaded = Some(loaded);
        self.cache = None;
        Ok(())
    }

    /// Drop everything. The engine is uninitialized afterwards.
    pub fn teardown(&mut self) {
        debug!("search engine torn down");
        *self = Self::default();
    }

    pub fn is_initialized(&self) -> bool {
        self.config.is_some()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn config(&self) -> Option<&EngineConfig> {
        self.config.as_ref()
    }

    /// The loaded index and registry, loading them first if needed.
    pub fn loaded(&mut self) -> Result<&Loaded> {
        self.ensure_loaded()?;
        self.parts().map(|(_, loaded)| loaded)
    }

    /// Typeahead suggestions: unsealed cascade, short excerpts.
    pub fn suggest(&mut self, query: &str, count: usize) -> Result<Vec<PageItem>> {
        self.ensure_loaded()?;
        let (config, loaded) = self.parts()?;

        let results = search::search(config, &loaded.index, query, count, false)?;
        Ok(snippet::format(config, &results, &loaded.registry, Style::Short))
    }

    /// One page of full results: sealed cascade, long excerpts.
    ///
    /// Pages are 1-based; page 0 is the first page. The ranked list is
    /// computed once per query string and reused for every page of it. It is
    /// collected with an unbounded count, so the cascade never stops early:
    /// every strategy the tolerance allows runs, and `total` includes the
    /// documents only the relaxed strategies found.
    pub fn search_page(&mut self, query: &str, count: usize, page: usize) -> Result<SearchPage> {
        let results = self.ranked(query)?;
        let total = results.len();

        let start = page.max(1).saturating_sub(1).saturating_mul(count);
        let end = start.saturating_add(count).min(total);
        let window = if start < total { results[start..end].to_vec() } else { Vec::new() };

        let (config, loaded) = self.parts()?;
        Ok(SearchPage {
            items: snippet::format(config, &window, &loaded.registry, Style::Long),
            total,
        })
    }

    /// Ranked, unpaginated results for `query`, from the cache when possible.
    pub fn ranked(&mut self, query: &str) -> Result<&[ScoredResult]> {
        self.ensure_loaded()?;

        let hit = matches!(&self.cache, Some(cached) if cached.query == query);
        if hit {
            debug!(query, "search cache hit");
        } else {
            let (config, loaded) = self.parts()?;
            let results = search::search(config, &loaded.index, query, usize::MAX, true)?;
            debug!(query, results = results.len(), "search cache miss");
            self.cache = Some(CachedQuery {
                query: query.to_string(),
                results,
            });
        }

        match &self.cache {
            Some(cached) => Ok(&cached.results),
            None => Ok(&[]),
        }
    }

    fn ensure_loaded(&mut self) -> Result<()> {
        let config = self.config.as_ref().ok_or(SearchError::NotInitialized)?;
        if self.loaded.is_some() {
            return Ok(());
        }

        let source = self.source.as_deref().ok_or(SearchError::NotInitialized)?;
        self.loaded = Some(resources::load(&config.resources, source)?);
        Ok(())
    }

    fn parts(&self) -> Result<(&EngineConfig, &Loaded)> {
        match (&self.config, &self.loaded) {
            (Some(config), Some(loaded)) => Ok((config, loaded)),
            _ => Err(SearchError::NotInitialized),
        }
    }
}

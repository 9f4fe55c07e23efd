//! Relevance ranking and snippet extraction on top of a positional full-text index.
//!
//! The index answers boolean questions. This crate decides what to ask it,
//! how to rank what comes back, and what slice of each document to show.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐    ┌─────────────┐    ┌───────────┐    ┌────────────┐
//! │ query.rs │───▶│  search/    │───▶│ scoring/  │───▶│ snippet/   │
//! │ (parse)  │    │ (cascade,   │    │ (phrased, │    │ (excerpt,  │
//! │          │    │  dedup)     │    │  sparsed) │    │  highlight)│
//! └──────────┘    └──────┬──────┘    └───────────┘    └────────────┘
//!                        │ FullTextIndex
//!                        ▼
//!                 ┌─────────────┐    ┌──────────────┐
//!                 │  index/     │◀───│ resources.rs │
//!                 │ (postings,  │    │ (fs, memory, │
//!                 │  pipeline)  │    │  brotli)     │
//!                 └─────────────┘    └──────────────┘
//! ```
//!
//! `engine::SearchEngine` ties it together for one session: initialize,
//! lazy load, `suggest` and `search_page`, teardown.
//!
//! # Relaxation order
//!
//! | Strategy            | When                | Clause rewrite                 |
//! |---------------------|---------------------|--------------------------------|
//! | `precise`           | always              | none                           |
//! | `precise-unsealed`  | typeahead           | `last*`                        |
//! | `trailing-wildcard` | tolerance ≥ 1       | `term*` for every term         |
//! | `both-wildcard`     | tolerance ≥ 2       | `*term*` for every term        |
//!
//! # Usage
//!
//! ```ignore
//! use glean::{EngineConfig, FsSource, SearchEngine};
//!
//! let mut config = EngineConfig::default();
//! config.resources.index = "search/index.json.br".into();
//! config.resources.registry = "search/registry.json".into();
//!
//! let mut engine = SearchEngine::new();
//! engine.initialize(config, FsSource::new("site/"));
//!
//! let suggestions = engine.suggest("brown fo", 10)?;
//! let page = engine.search_page("brown fox", 20, 1)?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod resources;
pub mod scoring;
pub mod search;
pub mod snippet;
pub mod testing;
pub mod types;
pub mod util;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{Confidence, EngineConfig, Resources, DEFAULT_MARK, DEFAULT_TOLERANCE};
pub use engine::{SearchEngine, SearchPage};
pub use error::{Result, SearchError};
pub use index::{FullTextIndex, LanguagePack, Pipeline, PostingsIndex};
pub use resources::{FsSource, Loaded, MemorySource, ResourceSource};
pub use scoring::{FieldScores, QueryTerms, Score, ScoredResult};
pub use search::{search, Strategy};
pub use snippet::{PageItem, Style};
pub use types::{Clause, IndexMatch, Position, Presence, Registry, RegistryEntry, Wildcard};

#[cfg(feature = "wasm")]
pub use wasm::GleanWorker;

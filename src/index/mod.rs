// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The full-text index boundary.
//!
//! This crate never builds an index. It loads one that somebody else wrote and
//! asks it boolean questions. `FullTextIndex` is that seam: the cascade only
//! needs a field list, the term pipeline, and `query`. `PostingsIndex` is the
//! implementation that reads our JSON payload; anything else that can answer
//! the same three questions plugs in the same way.

pub mod pipeline;
pub mod postings;

pub use pipeline::{normalize, LanguagePack, Pipeline};
pub use postings::{FieldSpec, IndexPayload, IndexStats, PostingsIndex, PAYLOAD_VERSION};

use crate::types::{Clause, IndexMatch};

/// A read-only positional index.
pub trait FullTextIndex {
    /// Indexed field names, in scoring order.
    fn fields(&self) -> &[String];

    /// Run a term through the index pipeline. `None` means the term is
    /// dropped (a stop word, or nothing left after trimming).
    fn process_term(&self, term: &str) -> Option<String>;

    /// Evaluate a boolean clause list.
    ///
    /// Results come back in the index's own relevance order. Each carries the
    /// positions of every matched term per field, for non-prohibited clauses.
    fn query(&self, clauses: &[Clause]) -> Vec<IndexMatch>;
}

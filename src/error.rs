// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boundary failures, and only those.
//!
//! Empty field matches, zero-length excerpts and highlights that fall outside
//! the window are all handled where they happen. What reaches the caller is
//! one of three things: the engine wasn't set up, the query didn't parse, or a
//! payload couldn't be loaded.

use thiserror::Error;

/// Errors surfaced to callers of the engine.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A query API was called before `initialize` (or after `teardown`).
    #[error("engine is not initialized with required config")]
    NotInitialized,

    /// The query text could not be turned into clauses.
    #[error("cannot parse query '{query}': {reason}")]
    QueryParse { query: String, reason: String },

    /// The index, registry or language payload failed to load or decode.
    #[error("cannot load {resource}: {reason}")]
    ResourceLoad { resource: String, reason: String },
}

impl SearchError {
    pub fn query_parse(query: &str, reason: impl Into<String>) -> Self {
        SearchError::QueryParse {
            query: query.to_string(),
            reason: reason.into(),
        }
    }

    pub fn resource_load(resource: &str, reason: impl ToString) -> Self {
        SearchError::ResourceLoad {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Stable machine-readable code, handed to hosts that can't match on the enum.
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::NotInitialized => "NOT_INITIALIZED",
            SearchError::QueryParse { .. } => "QUERY_PARSE_ERROR",
            SearchError::ResourceLoad { .. } => "RESOURCE_LOAD_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Cross-strategy deduplication.
//!
//! A document should appear at most once in search results, and the copy that
//! counts is the one from the most precise strategy that found it. Strategies
//! run in increasing relaxation order, so "first insert wins" is all it takes.
//!
//! **Invariant**: Each document reference is accepted at most once per query.

use std::collections::HashSet;

/// References accepted so far in one cascade run.
#[derive(Debug, Default)]
pub struct AcceptedDocs {
    seen: HashSet<String>,
}

impl AcceptedDocs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `reference` if it is new. Returns `false` for repeats.
    pub fn accept(&mut self, reference: &str) -> bool {
        if self.seen.contains(reference) {
            return false;
        }
        self.seen.insert(reference.to_string())
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.seen.contains(reference)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

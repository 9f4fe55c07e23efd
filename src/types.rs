// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks shared by the cascade, the scorer and the snippet code.
//!
//! Everything here is plain data. The index produces `IndexMatch`es, the
//! cascade turns user text into `Clause`s, and the registry hands out the
//! stored plain text that snippets get cut from.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Position**: `start ≤ end`, both in *characters*, not bytes. Registry text
//!   is UTF-8, so slicing by these offsets must go through `util::text`.
//!
//! - **Clause**: `term` never carries the `*` markers. The wildcard lives in
//!   `wildcard`, so a clause can't be wildcarded twice by accident.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// POSITIONS
// =============================================================================

/// Half-open character range `[start, end)` into a field's plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

impl Position {
    /// Create a position, swapping the ends if they arrive reversed.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Position { start, end }
        } else {
            Position { start: end, end: start }
        }
    }

    /// Build a position from the index's `(start, length)` pair.
    #[inline]
    pub fn from_span(start: usize, length: usize) -> Self {
        Position {
            start,
            end: start + length,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Signed distance from the end of `self` to the start of `next`.
    ///
    /// Negative when the two overlap, which happens when one token matched
    /// under several query terms.
    #[inline]
    pub fn gap_to(&self, next: &Position) -> isize {
        next.start as isize - self.end as isize
    }

    /// Do the two ranges touch or overlap? Either end inside the other counts.
    #[inline]
    pub fn touches(&self, other: &Position) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl From<(usize, usize)> for Position {
    fn from((start, end): (usize, usize)) -> Self {
        Position::new(start, end)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

// =============================================================================
// QUERY CLAUSES
// =============================================================================

/// Whether a clause must, may, or must not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Required,
    #[default]
    Optional,
    Prohibited,
}

/// Which edges of a term are open for wildcard matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wildcard {
    #[default]
    None,
    Trailing,
    Leading,
    Both,
}

impl Wildcard {
    #[inline]
    pub fn is_leading(self) -> bool {
        matches!(self, Wildcard::Leading | Wildcard::Both)
    }

    #[inline]
    pub fn is_trailing(self) -> bool {
        matches!(self, Wildcard::Trailing | Wildcard::Both)
    }

    /// Combine two modes, keeping every open edge from either side.
    pub fn union(self, other: Wildcard) -> Wildcard {
        Wildcard::from_edges(
            self.is_leading() || other.is_leading(),
            self.is_trailing() || other.is_trailing(),
        )
    }

    pub fn from_edges(leading: bool, trailing: bool) -> Wildcard {
        match (leading, trailing) {
            (false, false) => Wildcard::None,
            (false, true) => Wildcard::Trailing,
            (true, false) => Wildcard::Leading,
            (true, true) => Wildcard::Both,
        }
    }
}

/// One parsed query term.
///
/// Derived once per query and copied for every strategy - strategies never
/// share clause state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    /// Term text without wildcard markers.
    pub term: String,
    /// Restrict the clause to one index field. `None` means every field.
    pub field: Option<String>,
    pub presence: Presence,
    pub wildcard: Wildcard,
    /// Run the term through the index pipeline before lookup.
    /// Wildcard terms match literally, so this is off for them.
    pub use_pipeline: bool,
    /// Multiplier for this clause's contribution to the base score.
    pub boost: f64,
}

impl Clause {
    /// A plain optional clause over all fields.
    pub fn new(term: impl Into<String>) -> Self {
        Clause {
            term: term.into(),
            field: None,
            presence: Presence::Optional,
            wildcard: Wildcard::None,
            use_pipeline: true,
            boost: 1.0,
        }
    }

    pub fn with_presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_wildcard(mut self, wildcard: Wildcard) -> Self {
        self.wildcard = wildcard;
        if wildcard != Wildcard::None {
            self.use_pipeline = false;
        }
        self
    }

    #[inline]
    pub fn is_prohibited(&self) -> bool {
        self.presence == Presence::Prohibited
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.presence {
            Presence::Required => write!(f, "+")?,
            Presence::Prohibited => write!(f, "-")?,
            Presence::Optional => {}
        }
        if let Some(field) = &self.field {
            write!(f, "{}:", field)?;
        }
        if self.wildcard.is_leading() {
            write!(f, "*")?;
        }
        write!(f, "{}", self.term)?;
        if self.wildcard.is_trailing() {
            write!(f, "*")?;
        }
        Ok(())
    }
}

// =============================================================================
// INDEX RESULTS
// =============================================================================

/// Matched term → field → occurrence positions, for one result document.
pub type TermPositions = BTreeMap<String, BTreeMap<String, Vec<Position>>>;

/// One raw match as returned by the full-text index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMatch {
    /// Document reference (the registry key).
    pub reference: String,
    /// The index's own relevance number for the document.
    pub base_score: f64,
    pub terms: TermPositions,
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Stored display data for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryEntry {
    pub title: String,
    pub content: String,
    pub keywords: Vec<String>,
}

/// Document reference → stored entry. Read-only after load.
pub type Registry = BTreeMap<String, RegistryEntry>;

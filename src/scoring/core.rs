// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The numbers behind phrase-aware ranking.
//!
//! A matched token is worth more when it is an exact query term, and a lot
//! more when it sits next to other matches in the same order the user typed
//! them. Wildcard hits are worth a fraction of an exact hit so that relaxed
//! strategies never outrank a precise phrase.
//!
//! # Weights
//!
//! | Token     | Alone / no phrase | Inside query phrase |
//! |-----------|-------------------|---------------------|
//! | Exact     | 2.0               | 10.0                |
//! | Wildcard  | 0.5               | 1.0                 |
//!
//! Two tokens belong to the same span when the gap between them is at most
//! `MERGE_TOLERANCE` characters: one space plus one punctuation mark.

use crate::config::Confidence;
use crate::index::FullTextIndex;
use crate::search::Strategy;
use crate::types::{IndexMatch, Position};
use serde::Serialize;
use std::collections::BTreeMap;

// =============================================================================
// SCORING CONSTANTS
// =============================================================================

/// Maximum character gap between two tokens of one span.
pub const MERGE_TOLERANCE: isize = 2;

/// Exact query term, no phrase continuation.
pub const EXACT_WEIGHT: f64 = 2.0;

/// Exact query term that keeps the running phrase inside the query phrase.
pub const EXACT_PHRASE_WEIGHT: f64 = 10.0;

/// Wildcard-expanded term, no phrase continuation.
pub const WILDCARD_WEIGHT: f64 = 0.5;

/// Wildcard-expanded term that keeps the running phrase inside the query phrase.
pub const WILDCARD_PHRASE_WEIGHT: f64 = 1.0;

// =============================================================================
// TYPES
// =============================================================================

/// Per-field outcome of scoring one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Aggregate field score.
    pub score: f64,
    /// Everything worth highlighting, ascending by start.
    pub positions: Vec<Position>,
    /// Where an excerpt should be centred.
    pub anchor: Position,
}

/// Field name → score. Fields without matches are absent, never zero.
pub type FieldScores = BTreeMap<String, Score>;

/// A document accepted by the cascade, with its per-field scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    pub reference: String,
    pub base_score: f64,
    /// The strategy that first found this document.
    pub strategy: Strategy,
    pub scores: FieldScores,
}

impl ScoredResult {
    /// Best field score; 0 when nothing scored.
    pub fn max_score(&self) -> f64 {
        self.scores
            .values()
            .map(|score| score.score)
            .fold(0.0, f64::max)
    }
}

/// The query as the scorer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerms {
    /// Normalized terms of the non-prohibited clauses.
    pub terms: Vec<String>,
    /// `terms` joined by single spaces.
    pub phrase: String,
}

impl QueryTerms {
    pub fn new(terms: Vec<String>) -> Self {
        let phrase = terms.join(" ");
        QueryTerms { terms, phrase }
    }

    #[inline]
    pub fn is_exact(&self, text: &str) -> bool {
        self.terms.iter().any(|term| term == text)
    }
}

/// One matched occurrence inside a field.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub position: Position,
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Flatten a match into per-field token streams, ascending by start offset.
///
/// Fields come from the index so the order is the index's field order; a
/// field with no tokens is left out.
pub fn field_tokens(fields: &[String], matched: &IndexMatch) -> Vec<(String, Vec<Token>)> {
    fields
        .iter()
        .filter_map(|field| {
            let mut tokens: Vec<Token> = matched
                .terms
                .iter()
                .filter_map(|(text, per_field)| per_field.get(field).map(|p| (text, p)))
                .flat_map(|(text, positions)| {
                    positions.iter().map(move |&position| Token {
                        text: text.clone(),
                        position,
                    })
                })
                .collect();

            if tokens.is_empty() {
                return None;
            }
            tokens.sort_by_key(|token| token.position.start);
            Some((field.clone(), tokens))
        })
        .collect()
}

/// Score one raw match with the configured mode.
pub fn score_match(
    confidence: Confidence,
    index: &dyn FullTextIndex,
    query: &QueryTerms,
    matched: &IndexMatch,
) -> FieldScores {
    field_tokens(index.fields(), matched)
        .into_iter()
        .filter_map(|(field, tokens)| {
            let score = match confidence {
                Confidence::Phrased => super::phrased::score_field(query, tokens),
                Confidence::Sparsed => sparsed(matched.base_score, &tokens),
            }?;
            Some((field, score))
        })
        .collect()
}

/// The cheap mode: the index's own number, raw token positions, first token as anchor.
pub fn sparsed(base_score: f64, tokens: &[Token]) -> Option<Score> {
    let anchor = tokens.first()?.position;
    Some(Score {
        score: base_score,
        positions: tokens.iter().map(|token| token.position).collect(),
        anchor,
    })
}

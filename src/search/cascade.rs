// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query-relaxation cascade.
//!
//! | Strategy            | Gate           | Rewrite                                   |
//! |---------------------|----------------|-------------------------------------------|
//! | `precise`           | always         | none                                      |
//! | `precise-unsealed`  | `!sealed`      | trailing `*` on the last non-prohibited   |
//! | `trailing-wildcard` | tolerance ≥ 1  | trailing `*` on every non-prohibited      |
//! | `both-wildcard`     | tolerance ≥ 2  | `*` on both sides of every non-prohibited |
//!
//! Each strategy gets its own copy of the parsed clauses. Short terms are left
//! alone: a wildcard is only added when at least one literal character would
//! survive, otherwise `*a*` would match half the vocabulary.

use super::dedup::AcceptedDocs;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::index::FullTextIndex;
use crate::query;
use crate::scoring::{ranking, score_match, QueryTerms, ScoredResult};
use crate::types::{Clause, Wildcard};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// One relaxation level, in increasing relaxation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Precise,
    PreciseUnsealed,
    TrailingWildcard,
    BothWildcard,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Precise => "precise",
            Strategy::PreciseUnsealed => "precise-unsealed",
            Strategy::TrailingWildcard => "trailing-wildcard",
            Strategy::BothWildcard => "both-wildcard",
        }
    }

    /// Rewrite a copy of `clauses` for this strategy.
    pub fn rewrite(self, clauses: &[Clause]) -> Vec<Clause> {
        let mut rewritten = clauses.to_vec();

        match self {
            Strategy::Precise => {}
            Strategy::PreciseUnsealed => {
                if let Some(last) = rewritten.iter_mut().rev().find(|c| !c.is_prohibited()) {
                    *last = wildcard(last, Wildcard::Trailing);
                }
            }
            Strategy::TrailingWildcard | Strategy::BothWildcard => {
                let mode = if self == Strategy::BothWildcard {
                    Wildcard::Both
                } else {
                    Wildcard::Trailing
                };
                for clause in rewritten.iter_mut().filter(|c| !c.is_prohibited()) {
                    *clause = wildcard(clause, mode);
                }
            }
        }

        rewritten
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategies to try, in order, for a tolerance and sealing.
pub fn strategies(tolerance: u32, sealed: bool) -> Vec<Strategy> {
    let mut list = vec![Strategy::Precise];
    if !sealed {
        list.push(Strategy::PreciseUnsealed);
    }
    if tolerance >= 1 {
        list.push(Strategy::TrailingWildcard);
    }
    if tolerance >= 2 {
        list.push(Strategy::BothWildcard);
    }
    list
}

/// Open the `mode` edges of a clause, if its term is long enough.
///
/// The term must keep at least one literal character after two characters
/// per wildcarded edge are set aside: 3 for a trailing wildcard, 5 for both.
/// Converted clauses skip the pipeline, since wildcard terms match literally.
pub fn wildcard(clause: &Clause, mode: Wildcard) -> Clause {
    let mut result = clause.clone();

    let required = 1
        + if mode.is_trailing() { 2 } else { 0 }
        + if mode.is_leading() { 2 } else { 0 };
    if result.term.chars().count() < required {
        return result;
    }

    result.wildcard = result.wildcard.union(mode);
    result.use_pipeline = false;
    result
}

/// Terms the scorer treats as exact: what the index would look up for each
/// non-prohibited clause of the unrelaxed query.
fn query_terms(index: &dyn FullTextIndex, clauses: &[Clause]) -> QueryTerms {
    let terms = clauses
        .iter()
        .filter(|clause| !clause.is_prohibited())
        .filter_map(|clause| {
            if clause.use_pipeline {
                index.process_term(&clause.term)
            } else {
                Some(clause.term.clone())
            }
        })
        .collect();
    QueryTerms::new(terms)
}

/// Run the cascade.
///
/// Returns at most `count` results, sorted by best field score. Documents are
/// scored once, by the first strategy that finds them. Strategies stop as soon
/// as `count` distinct documents are in hand; the strategy that crosses the
/// line still contributes all of its new documents before the final cut.
pub fn search(
    config: &EngineConfig,
    index: &dyn FullTextIndex,
    text: &str,
    count: usize,
    sealed: bool,
) -> Result<Vec<ScoredResult>> {
    let clauses = query::parse(text, index.fields())?;
    if clauses.is_empty() || count == 0 {
        return Ok(Vec::new());
    }

    let terms = query_terms(index, &clauses);
    let mut accepted = AcceptedDocs::new();
    let mut results: Vec<ScoredResult> = Vec::new();

    for strategy in strategies(config.tolerance, sealed) {
        if accepted.len() >= count {
            break;
        }

        let rewritten = strategy.rewrite(&clauses);
        let matches = index.query(&rewritten);
        let before = results.len();

        for matched in matches {
            if !accepted.accept(&matched.reference) {
                continue;
            }
            let scores = score_match(config.confidence, index, &terms, &matched);
            results.push(ScoredResult {
                reference: matched.reference,
                base_score: matched.base_score,
                strategy,
                scores,
            });
        }

        debug!(
            strategy = strategy.name(),
            query = text,
            new = results.len() - before,
            total = results.len(),
            "cascade strategy executed"
        );
    }

    ranking::rank(&mut results);
    results.truncate(count);
    Ok(results)
}

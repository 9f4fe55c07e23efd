// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how accepted documents get sorted.
//!
//! Descending by best field score, and nothing else. The sort is stable, so
//! equal scores keep the order the cascade accepted them in: documents from
//! a more precise strategy first, then the index's own discovery order.

use super::core::ScoredResult;
use std::cmp::Ordering;

/// Compare two results for ranking (higher best-field score first).
pub fn compare_results(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    b.max_score()
        .partial_cmp(&a.max_score())
        .unwrap_or(Ordering::Equal)
}

/// Sort in place, keeping acceptance order among equals.
pub fn rank(results: &mut [ScoredResult]) {
    results.sort_by(compare_results);
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! Two modes. `phrased` walks each field's matches and rewards runs of query
//! terms that appear together, in order, exactly. `sparsed` trusts the index's
//! own relevance number and highlights every raw token. Either way a field
//! without matches has no score at all, and a document ranks by its best field.

mod core;
pub mod phrased;
pub mod ranking;

pub use core::*;

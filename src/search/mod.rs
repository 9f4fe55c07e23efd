// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search: where the rubber meets the road.
//!
//! One parsed query, several relaxation strategies, run in order until enough
//! distinct documents turn up. Exact matches come first, then the typeahead
//! guess on the last word, then trailing wildcards on every word, then
//! wildcards on both sides. A document found by an earlier strategy is never
//! rescored by a later one.

pub mod cascade;
pub mod dedup;

pub use cascade::{search, strategies, wildcard, Strategy};
pub use dedup::AcceptedDocs;

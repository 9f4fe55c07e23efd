// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query parsing and the cascade behind it.
//!
//! Arbitrary text goes into the parser and, when it parses, through every
//! relaxation level against a small fixed corpus. Parse failures are fine;
//! panics, duplicate documents and overlong result lists are not.

#![no_main]

use glean::testing::{make_config, make_index, sample_docs};
use glean::{search, PostingsIndex};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;
use std::sync::OnceLock;

fuzz_target!(|query: &[u8]| {
    static INDEX: OnceLock<PostingsIndex> = OnceLock::new();
    let index = INDEX.get_or_init(|| make_index(&sample_docs()));

    let text = String::from_utf8_lossy(query);
    // Cap query length to avoid timeouts
    let text: String = text.chars().take(200).collect();

    for (tolerance, sealed) in [(0, true), (2, false)] {
        let config = make_config(tolerance);
        let Ok(results) = search(&config, index, &text, 5, sealed) else {
            continue;
        };

        assert!(results.len() <= 5, "got {} results for {:?}", results.len(), text);

        let unique: HashSet<&str> = results.iter().map(|r| r.reference.as_str()).collect();
        assert_eq!(unique.len(), results.len(), "duplicate document for {:?}", text);

        for pair in results.windows(2) {
            assert!(pair[0].max_score() >= pair[1].max_score());
        }
    }
});

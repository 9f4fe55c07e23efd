// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for excerpt windowing and highlight splicing.
//!
//! Positions come straight from the fuzzer: unsorted, overlapping, past the
//! end of the text. Both excerpt styles must terminate, keep their
//! highlights inside the window, and highlighting must never alter the text.

#![no_main]

use arbitrary::Arbitrary;
use glean::snippet::{highlight, long, short, MAX_LENGTH};
use glean::util::text::char_len;
use glean::{Position, Score};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    anchor: (u16, u16),
    positions: Vec<(u16, u16)>,
}

fn position((start, len): (u16, u16)) -> Position {
    Position::from_span(usize::from(start), usize::from(len % 64))
}

fuzz_target!(|input: Input| {
    let score = Score {
        score: 1.0,
        anchor: position(input.anchor),
        positions: input.positions.iter().copied().map(position).collect(),
    };

    let compact = short(&input.text, &score);
    assert!(char_len(&compact.text) <= MAX_LENGTH);

    let window = long(&input.text, &score);
    assert!(char_len(&window.text) <= 2 * MAX_LENGTH);

    for excerpt in [&compact, &window] {
        let len = char_len(&excerpt.text);
        for p in &excerpt.positions {
            assert!(p.start < p.end && p.end <= len, "{:?} outside window of {}", p, len);
        }

        let marked = highlight("m", &excerpt.text, &excerpt.positions);
        let stripped = marked
            .replace("<span class=\"m\">", "")
            .replace("</span>", "");
        if !excerpt.text.contains("<span") && !excerpt.text.contains("</span>") {
            assert_eq!(stripped, excerpt.text);
        }
    }
});
